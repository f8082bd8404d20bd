//! MongoRM Domain Library
//!
//! Generic, store-verified CRUD services for entities kept in a document
//! database.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): the entity contract and error types
//!   - `entity`: what any storable type must expose (a string identifier)
//!   - `errors`: Warning / Critical service errors and raw store errors
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `collection`: the document-collection capability a store provides
//!   - `entity_service`: the Get / Create / Update / Delete contract
//!
//! - **Application** (`application/`): `GenericEntityService`, the default
//!   implementation of the contract with read-after-write verification
//!
//! - **Adapters** (`adapters/`): `InMemoryStore`, a process-local store
//!
//! # Usage
//!
//! ```rust,ignore
//! use mongorm::{EntityService, GenericEntityService, InMemoryStore};
//!
//! let store = InMemoryStore::new();
//! let books = GenericEntityService::<Book, _>::from_store(&store);
//! let created = books.create(Book::new("Dune")).await?;
//! ```

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use adapters::{InMemoryCollection, InMemoryStore};
pub use application::GenericEntityService;
pub use domain::{Entity, ServiceError, ServiceResult, Severity, StoreError};
pub use ports::{DocumentCollection, DocumentCursor, DocumentStore, EntityService, IdFilter};
