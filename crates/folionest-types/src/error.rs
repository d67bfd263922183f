use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A field-level validation failure, recoverable inline within the builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Dotted path of the offending field ("personal.name", "projects[0].title").
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

fn join_validation(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors related to portfolio operations.
#[derive(Debug, Error)]
pub enum PortfolioError {
    #[error("portfolio not found")]
    NotFound,

    #[error("not the owner of this portfolio")]
    PermissionDenied,

    #[error("slug '{0}' is already taken")]
    SlugConflict(String),

    #[error("{resource} limit reached ({limit})")]
    QuotaExceeded { resource: &'static str, limit: u32 },

    #[error("validation failed: {}", join_validation(.0))]
    Validation(Vec<ValidationError>),

    #[error("upstream failure: {0}")]
    Upstream(String),
}

impl PortfolioError {
    /// Single-field validation failure shorthand.
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        PortfolioError::Validation(vec![ValidationError::new(field, reason)])
    }
}

/// Errors raised by the builder session state machine.
#[derive(Debug, Error)]
pub enum BuilderError {
    #[error("step validation failed: {}", join_validation(.0))]
    Invalid(Vec<ValidationError>),

    #[error("already at the last step")]
    AlreadyAtEnd,

    #[error("step '{step}' is incomplete")]
    Incomplete { step: String },
}

/// Errors from repository operations (used by trait definitions in
/// folionest-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}
