//! Application Layer (Use Cases)
//!
//! Default implementation of the entity service contract.

mod entity_service;

pub use entity_service::GenericEntityService;
