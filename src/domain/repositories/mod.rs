//! Repository trait definitions for the domain layer.
//!
//! Implementations live in `crate::infrastructure::store`. Mock implementations
//! are generated via `mockall` for unit tests.

pub mod link_store;

pub use link_store::{InsertOutcome, LinkStore};

#[cfg(test)]
pub use link_store::MockLinkStore;
