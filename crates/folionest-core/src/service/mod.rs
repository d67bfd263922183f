//! Service layer orchestrating the domain.

pub mod publish;
