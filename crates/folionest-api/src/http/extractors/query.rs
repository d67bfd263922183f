//! Query-string parameter shapes.

use serde::Deserialize;

/// Query parameters for `GET /api/v1/portfolios`.
#[derive(Debug, Deserialize)]
pub struct PortfolioListQuery {
    /// Filter by lifecycle status ("draft" or "published").
    pub status: Option<String>,
    /// Sort field, whitelisted by the repository.
    #[serde(default = "default_sort")]
    pub sort: String,
    /// "asc" or "desc".
    #[serde(default = "default_order")]
    pub order: String,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

fn default_sort() -> String {
    "created_at".to_string()
}

fn default_order() -> String {
    "desc".to_string()
}
