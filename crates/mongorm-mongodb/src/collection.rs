//! MongoDB implementation of DocumentCollection
//!
//! Entities are stored as BSON documents keyed by `_id`. A 24-character hex
//! identifier is stored as an `ObjectId`, any other identifier as a plain
//! string, and an empty identifier gets a fresh `ObjectId` on insert.
//! Identifiers are always handed back to entities as strings through
//! `Entity::set_id`, so the entity may serialize its id under any field name.

use std::fmt;
use std::marker::PhantomData;

use async_trait::async_trait;
use futures::StreamExt;
use mongodb::bson::{self, doc, oid::ObjectId, Bson, Document};
use mongodb::Collection;

use mongorm::{DocumentCollection, DocumentCursor, Entity, IdFilter, StoreError};

use crate::error::store_error;

const ID_FIELD: &str = "_id";

/// Handle to the MongoDB collection holding entities of type `T`
pub struct MongoCollection<T> {
    inner: Collection<Document>,
    _entity: PhantomData<fn() -> T>,
}

impl<T> MongoCollection<T> {
    pub fn new(inner: Collection<Document>) -> Self {
        Self {
            inner,
            _entity: PhantomData,
        }
    }

    /// The raw driver collection
    pub fn inner(&self) -> &Collection<Document> {
        &self.inner
    }
}

impl<T> Clone for MongoCollection<T> {
    fn clone(&self) -> Self {
        Self::new(self.inner.clone())
    }
}

impl<T> fmt::Debug for MongoCollection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MongoCollection")
            .field("name", &self.inner.name())
            .finish()
    }
}

#[async_trait]
impl<T: Entity> DocumentCollection<T> for MongoCollection<T> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn find(&self, filter: &IdFilter) -> Result<Option<DocumentCursor<T>>, StoreError> {
        let cursor = self
            .inner
            .find(id_filter(filter), None)
            .await
            .map_err(store_error)?;

        let entities = cursor.map(|result| result.map_err(store_error).and_then(decode::<T>));
        Ok(Some(DocumentCursor::new(entities)))
    }

    async fn insert_one(&self, entity: &T) -> Result<String, StoreError> {
        let id = if entity.id().is_empty() {
            ObjectId::new().to_hex()
        } else {
            entity.id().to_string()
        };

        let result = self
            .inner
            .insert_one(encode(entity, &id)?, None)
            .await
            .map_err(store_error)?;

        tracing::debug!("Inserted into {}: {}", self.inner.name(), result.inserted_id);
        Ok(id_to_string(&result.inserted_id))
    }

    async fn replace_one(&self, filter: &IdFilter, entity: &T) -> Result<u64, StoreError> {
        let result = self
            .inner
            .replace_one(id_filter(filter), encode(entity, filter.id())?, None)
            .await
            .map_err(store_error)?;

        Ok(result.matched_count)
    }

    async fn delete_one(&self, filter: &IdFilter) -> Result<u64, StoreError> {
        let result = self
            .inner
            .delete_one(id_filter(filter), None)
            .await
            .map_err(store_error)?;

        Ok(result.deleted_count)
    }
}

fn id_to_bson(id: &str) -> Bson {
    match ObjectId::parse_str(id) {
        Ok(oid) => Bson::ObjectId(oid),
        Err(_) => Bson::String(id.to_string()),
    }
}

fn id_to_string(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn id_filter(filter: &IdFilter) -> Document {
    doc! { "_id": id_to_bson(filter.id()) }
}

fn encode<T: Entity>(entity: &T, id: &str) -> Result<Document, StoreError> {
    let mut document =
        bson::to_document(entity).map_err(|e| StoreError::Serialization(e.to_string()))?;
    document.insert(ID_FIELD, id_to_bson(id));
    Ok(document)
}

fn decode<T: Entity>(mut document: Document) -> Result<T, StoreError> {
    let id = document.get(ID_FIELD).map(id_to_string);
    if let Some(id) = &id {
        document.insert(ID_FIELD, id.clone());
    }

    let mut entity: T =
        bson::from_document(document).map_err(|e| StoreError::Serialization(e.to_string()))?;
    // `_id` is authoritative whatever field the entity serializes its id under
    if let Some(id) = id {
        entity.set_id(id);
    }
    Ok(entity)
}
