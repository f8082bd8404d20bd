//! Store Adapters
//!
//! Implementations of the collection ports that ship with the library.

mod memory;

pub use memory::{InMemoryCollection, InMemoryStore};
