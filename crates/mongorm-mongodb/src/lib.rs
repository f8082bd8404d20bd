//! MongoDB integration for MongoRM
//!
//! Provides a `DocumentStore` backed by the official MongoDB driver, so any
//! `mongorm::Entity` can be served by `GenericEntityService`.
//!
//! # Example
//!
//! ```rust,ignore
//! use mongorm::{EntityService, GenericEntityService};
//! use mongorm_mongodb::{MongoConfig, MongoDb};
//!
//! let config = MongoConfig::from_env()?;
//! let db = MongoDb::connect(&config).await?;
//! let books = GenericEntityService::<Book, _>::from_store(&db);
//! let book = books.get("65f1c0ffee0000000000abcd").await?;
//! ```

mod collection;
mod config;
mod database;
mod error;

pub use collection::MongoCollection;
pub use config::{ConfigError, MongoConfig};
pub use database::MongoDb;
