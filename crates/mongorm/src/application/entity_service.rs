//! Generic Entity Service
//!
//! Get / Create / Update / Delete for any `Entity` against one document
//! collection. Every mutation is confirmed by a follow-up read, and every
//! store failure is re-classified into a `ServiceError`.

use std::fmt;
use std::marker::PhantomData;

use async_trait::async_trait;

use crate::domain::{Entity, ServiceError};
use crate::ports::{DocumentCollection, DocumentStore, EntityService, IdFilter};

/// Store-verified CRUD service for entities of type `T`.
///
/// Holds nothing but the collection handle, so one instance can be shared
/// across tasks. Specialized services wrap this one and delegate to it.
pub struct GenericEntityService<T, C> {
    collection: C,
    _entity: PhantomData<fn() -> T>,
}

impl<T, C> GenericEntityService<T, C>
where
    T: Entity,
    C: DocumentCollection<T>,
{
    pub fn new(collection: C) -> Self {
        Self {
            collection,
            _entity: PhantomData,
        }
    }

    /// Bind to the collection named after `T` in `store`
    pub fn from_store<S>(store: &S) -> Self
    where
        S: DocumentStore<Collection<T> = C>,
    {
        Self::new(store.collection::<T>(T::entity_name()))
    }

    pub fn collection(&self) -> &C {
        &self.collection
    }

    /// Re-read an entity by id. A missing result handle, an empty cursor and
    /// a failing query all come back as `None`.
    async fn read_back(&self, id: &str) -> Option<T> {
        let filter = IdFilter::by_id(id);
        let cursor = match self.collection.find(&filter).await {
            Ok(Some(cursor)) => cursor,
            Ok(None) => {
                tracing::debug!("{} lookup for {} returned no cursor", T::entity_name(), id);
                return None;
            }
            Err(e) => {
                tracing::warn!("{} lookup for {} failed: {}", T::entity_name(), id, e);
                return None;
            }
        };

        match cursor.first().await {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!("{} cursor for {} failed: {}", T::entity_name(), id, e);
                None
            }
        }
    }
}

impl<T, C> Clone for GenericEntityService<T, C>
where
    C: Clone,
{
    fn clone(&self) -> Self {
        Self {
            collection: self.collection.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T, C> fmt::Debug for GenericEntityService<T, C>
where
    C: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenericEntityService")
            .field("collection", &self.collection)
            .finish()
    }
}

#[async_trait]
impl<T, C> EntityService<T> for GenericEntityService<T, C>
where
    T: Entity,
    C: DocumentCollection<T>,
{
    async fn get(&self, id: &str) -> Result<T, ServiceError> {
        self.read_back(id)
            .await
            .ok_or_else(|| ServiceError::not_found(T::entity_name(), id))
    }

    async fn create(&self, entity: T) -> Result<T, ServiceError> {
        let name = T::entity_name();

        // The verification read must use the id the store actually kept
        let id = match self.collection.insert_one(&entity).await {
            Ok(id) => id,
            Err(e) => {
                tracing::error!("{} insert failed: {}", name, e);
                return Err(ServiceError::creation_failed(name));
            }
        };

        match self.read_back(&id).await {
            Some(stored) => {
                tracing::info!("Created {}: {}", name, id);
                Ok(stored)
            }
            None => {
                tracing::warn!("{} {} inserted but not readable", name, id);
                Err(ServiceError::save_unconfirmed(name))
            }
        }
    }

    async fn update(&self, entity: T) -> Result<T, ServiceError> {
        let name = T::entity_name();
        let filter = IdFilter::by_id(entity.id());

        match self.collection.replace_one(&filter, &entity).await {
            Ok(matched) => {
                tracing::debug!("{} replace for {} matched {}", name, filter.id(), matched);
            }
            Err(e) => {
                tracing::warn!("{} replace for {} failed: {}", name, filter.id(), e);
                return Err(ServiceError::update_failed(name));
            }
        }

        match self.read_back(filter.id()).await {
            Some(stored) => {
                tracing::info!("Updated {}: {}", name, filter.id());
                Ok(stored)
            }
            None => {
                tracing::warn!("{} {} replaced but not readable", name, filter.id());
                Err(ServiceError::update_unconfirmed(name))
            }
        }
    }

    async fn delete(&self, id: &str) -> Result<T, ServiceError> {
        let name = T::entity_name();
        let filter = IdFilter::by_id(id);

        // Snapshot before deleting; afterwards there is nothing left to read
        let cursor = match self.collection.find(&filter).await {
            Ok(Some(cursor)) => cursor,
            Ok(None) => return Err(ServiceError::delete_not_found(name, id)),
            Err(e) => {
                tracing::warn!("{} lookup for {} failed: {}", name, id, e);
                return Err(ServiceError::delete_not_found(name, id));
            }
        };
        let snapshot = match cursor.first().await {
            Ok(Some(entity)) => Some(entity),
            Ok(None) => return Err(ServiceError::delete_not_found(name, id)),
            Err(e) => {
                tracing::warn!("{} snapshot for {} unresolved: {}", name, id, e);
                None
            }
        };

        match self.collection.delete_one(&filter).await {
            Ok(deleted) => {
                tracing::debug!("{} delete for {} removed {}", name, id, deleted);
            }
            Err(e) => {
                tracing::warn!("{} delete for {} failed: {}", name, id, e);
                return Err(ServiceError::delete_failed(name));
            }
        }

        match snapshot {
            Some(entity) => {
                tracing::info!("Deleted {}: {}", name, id);
                Ok(entity)
            }
            None => Err(ServiceError::delete_unconfirmed(name)),
        }
    }
}
