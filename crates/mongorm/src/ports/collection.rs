//! Collection Ports
//!
//! The capability a document store exposes to entity services: a handle per
//! entity type supporting find / insert / replace / delete by identifier.

use std::fmt;

use async_trait::async_trait;
use futures::stream::{self, BoxStream, Stream, StreamExt};

use crate::domain::{Entity, StoreError};

/// Predicate selecting documents whose identifier equals `id`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdFilter {
    id: String,
}

impl IdFilter {
    pub fn by_id(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Lazy, possibly empty sequence of documents returned by a find.
///
/// Items are decoded on demand, so a cursor can fail part way through.
pub struct DocumentCursor<T> {
    inner: BoxStream<'static, Result<T, StoreError>>,
}

impl<T: Send + 'static> DocumentCursor<T> {
    pub fn new<S>(stream: S) -> Self
    where
        S: Stream<Item = Result<T, StoreError>> + Send + 'static,
    {
        Self {
            inner: stream.boxed(),
        }
    }

    /// Cursor over already materialized documents
    pub fn from_vec(items: Vec<T>) -> Self {
        Self::new(stream::iter(items.into_iter().map(Ok)))
    }

    pub fn empty() -> Self {
        Self::from_vec(Vec::new())
    }

    /// Resolve the first document, `None` when the cursor is exhausted
    pub async fn first(mut self) -> Result<Option<T>, StoreError> {
        self.inner.next().await.transpose()
    }
}

impl<T> fmt::Debug for DocumentCursor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentCursor").finish_non_exhaustive()
    }
}

/// Handle to the documents of one entity type
#[async_trait]
pub trait DocumentCollection<T: Entity>: Send + Sync {
    /// Name of the underlying collection
    fn name(&self) -> &str;

    /// Find documents matching the filter.
    ///
    /// `Ok(None)` means the store produced no result handle at all, which
    /// callers treat the same as an empty cursor.
    async fn find(&self, filter: &IdFilter) -> Result<Option<DocumentCursor<T>>, StoreError>;

    /// Insert a new document and return the identifier it was stored under.
    ///
    /// An entity with an empty identifier gets one assigned by the store.
    async fn insert_one(&self, entity: &T) -> Result<String, StoreError>;

    /// Replace the document matching the filter, returning the matched count
    async fn replace_one(&self, filter: &IdFilter, entity: &T) -> Result<u64, StoreError>;

    /// Delete the document matching the filter, returning the deleted count
    async fn delete_one(&self, filter: &IdFilter) -> Result<u64, StoreError>;
}

/// A document database that hands out one collection per entity type
pub trait DocumentStore: Send + Sync {
    type Collection<T: Entity>: DocumentCollection<T>;

    /// Handle to the collection called `name`, holding documents of type `T`
    fn collection<T: Entity>(&self, name: &str) -> Self::Collection<T>;
}
