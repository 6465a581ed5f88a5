//! Domain layer containing the data model and the seams to external systems.
//!
//! - [`entities`] - Short codes and created links
//! - [`generator`] - Code generator trait
//! - [`repositories`] - Mapping store trait
//!
//! The domain layer has no dependency on HTTP or on a concrete store.

pub mod entities;
pub mod generator;
pub mod repositories;
