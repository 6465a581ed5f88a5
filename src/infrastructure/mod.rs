//! Infrastructure layer for external integrations.
//!
//! Implements the store trait defined by the domain layer.
//!
//! # Modules
//!
//! - [`store`] - Redis and in-memory mapping stores

pub mod store;
