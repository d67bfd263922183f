//! Business logic and repository trait definitions for Folionest.
//!
//! This crate defines the "ports" (repository traits) that the infrastructure
//! layer implements. It depends only on `folionest-types` -- never on
//! `folionest-infra` or any database/IO crate.

pub mod asset;
pub mod builder;
pub mod entitlement;
pub mod repository;
pub mod service;
pub mod template;
