//! Ports (Interfaces)
//!
//! Abstract interfaces between the entity services, the document stores they
//! read and write, and the callers that depend on them.
//!
//! Implementations of the store traits live in adapter crates.

pub mod collection;
pub mod entity_service;

// Re-exports
pub use collection::*;
pub use entity_service::*;
