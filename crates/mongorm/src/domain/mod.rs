//! Domain Layer
//!
//! Storage-independent contracts: what an entity is and how operations fail.

pub mod entity;
pub mod errors;

// Re-exports for convenience
pub use entity::*;
pub use errors::*;
