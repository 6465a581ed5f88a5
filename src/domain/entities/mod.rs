//! Core domain entities.
//!
//! - [`ShortCode`] - The compact identifier used as a store key
//! - [`CreatedLink`] - A mapping that was accepted by the store

pub mod link;
pub mod short_code;

pub use link::CreatedLink;
pub use short_code::ShortCode;
