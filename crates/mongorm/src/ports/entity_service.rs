//! Entity Service Port
//!
//! The operation set callers depend on. `GenericEntityService` is the
//! default implementation; specialized services wrap it and delegate.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{Entity, ServiceError};

/// Store-verified CRUD for one entity type.
///
/// Every successful return is the entity as currently persisted, never the
/// input echoed back.
#[async_trait]
pub trait EntityService<T: Entity>: Send + Sync {
    /// Get an entity by its identifier
    async fn get(&self, id: &str) -> Result<T, ServiceError>;

    /// Insert a new entity and return it as stored
    async fn create(&self, entity: T) -> Result<T, ServiceError>;

    /// Replace an existing entity (matched by identifier) and return it as stored
    async fn update(&self, entity: T) -> Result<T, ServiceError>;

    /// Delete an entity and return its value from just before deletion
    async fn delete(&self, id: &str) -> Result<T, ServiceError>;
}

#[async_trait]
impl<T, S> EntityService<T> for Arc<S>
where
    T: Entity,
    S: EntityService<T> + ?Sized,
{
    async fn get(&self, id: &str) -> Result<T, ServiceError> {
        (**self).get(id).await
    }

    async fn create(&self, entity: T) -> Result<T, ServiceError> {
        (**self).create(entity).await
    }

    async fn update(&self, entity: T) -> Result<T, ServiceError> {
        (**self).update(entity).await
    }

    async fn delete(&self, id: &str) -> Result<T, ServiceError> {
        (**self).delete(id).await
    }
}
