//! Shared domain types for Folionest.
//!
//! This crate contains the core domain types used across the Folionest
//! platform: the portfolio aggregate, plan entitlements, users, platform
//! settings, builder session state, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod builder;
pub mod error;
pub mod plan;
pub mod portfolio;
pub mod settings;
pub mod user;
