//! Observability setup for Folionest.

pub mod tracing_setup;
