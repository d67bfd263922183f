//! The multi-step builder flow.
//!
//! `session` drives the step state machine, `rules` holds the pure per-step
//! validation shared with the publish service's authoritative re-check, and
//! `draft_store` defines the persistence port for resumable sessions.

pub mod draft_store;
pub mod rules;
pub mod session;

pub use session::{BuilderSessionExt, edit_session, new_session};
