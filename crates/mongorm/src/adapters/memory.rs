//! In-memory document store
//!
//! Keeps every collection in a process-local map. Documents are stored in
//! serialized form, so reads return what the store holds rather than the
//! caller's value.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use futures::stream;
use serde_json::Value;

use crate::domain::{Entity, StoreError};
use crate::ports::{DocumentCollection, DocumentCursor, DocumentStore, IdFilter};

type Documents = BTreeMap<String, Value>;
type Collections = Arc<RwLock<HashMap<String, Documents>>>;
type IdGenerator = Arc<dyn Fn() -> String + Send + Sync>;

/// Process-local implementation of `DocumentStore`
#[derive(Clone)]
pub struct InMemoryStore {
    collections: Collections,
    id_generator: IdGenerator,
}

impl InMemoryStore {
    /// Store assigning UUID v4 identifiers
    pub fn new() -> Self {
        Self::with_id_generator(|| uuid::Uuid::new_v4().simple().to_string())
    }

    /// Store assigning identifiers from `generator`
    pub fn with_id_generator<F>(generator: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        Self {
            collections: Arc::new(RwLock::new(HashMap::new())),
            id_generator: Arc::new(generator),
        }
    }

    /// Number of documents currently held in a collection
    pub fn document_count(&self, name: &str) -> usize {
        self.collections
            .read()
            .map(|collections| collections.get(name).map_or(0, BTreeMap::len))
            .unwrap_or(0)
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InMemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryStore").finish_non_exhaustive()
    }
}

impl DocumentStore for InMemoryStore {
    type Collection<T: Entity> = InMemoryCollection<T>;

    fn collection<T: Entity>(&self, name: &str) -> InMemoryCollection<T> {
        InMemoryCollection {
            name: name.to_string(),
            collections: Arc::clone(&self.collections),
            id_generator: Arc::clone(&self.id_generator),
            _entity: PhantomData,
        }
    }
}

/// Handle to one collection of an `InMemoryStore`
pub struct InMemoryCollection<T> {
    name: String,
    collections: Collections,
    id_generator: IdGenerator,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for InMemoryCollection<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            collections: Arc::clone(&self.collections),
            id_generator: Arc::clone(&self.id_generator),
            _entity: PhantomData,
        }
    }
}

impl<T> fmt::Debug for InMemoryCollection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryCollection")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

fn poisoned() -> StoreError {
    StoreError::Connection("in-memory store lock poisoned".to_string())
}

#[async_trait]
impl<T: Entity> DocumentCollection<T> for InMemoryCollection<T> {
    fn name(&self) -> &str {
        &self.name
    }

    async fn find(&self, filter: &IdFilter) -> Result<Option<DocumentCursor<T>>, StoreError> {
        let collections = self.collections.read().map_err(|_| poisoned())?;
        let matches: Vec<Value> = collections
            .get(&self.name)
            .and_then(|documents| documents.get(filter.id()))
            .cloned()
            .into_iter()
            .collect();

        let decoded = matches
            .into_iter()
            .map(|value| serde_json::from_value::<T>(value).map_err(StoreError::from));
        Ok(Some(DocumentCursor::new(stream::iter(decoded))))
    }

    async fn insert_one(&self, entity: &T) -> Result<String, StoreError> {
        let mut stored = entity.clone();
        if stored.id().is_empty() {
            stored.set_id((self.id_generator)());
        }
        let id = stored.id().to_string();
        let document = serde_json::to_value(&stored)?;

        let mut collections = self.collections.write().map_err(|_| poisoned())?;
        let documents = collections.entry(self.name.clone()).or_default();
        if documents.contains_key(&id) {
            return Err(StoreError::DuplicateKey {
                collection: self.name.clone(),
                id,
            });
        }
        documents.insert(id.clone(), document);

        Ok(id)
    }

    async fn replace_one(&self, filter: &IdFilter, entity: &T) -> Result<u64, StoreError> {
        let mut replacement = entity.clone();
        replacement.set_id(filter.id().to_string());
        let document = serde_json::to_value(&replacement)?;

        let mut collections = self.collections.write().map_err(|_| poisoned())?;
        match collections
            .get_mut(&self.name)
            .and_then(|documents| documents.get_mut(filter.id()))
        {
            Some(existing) => {
                *existing = document;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_one(&self, filter: &IdFilter) -> Result<u64, StoreError> {
        let mut collections = self.collections.write().map_err(|_| poisoned())?;
        let removed = collections
            .get_mut(&self.name)
            .and_then(|documents| documents.remove(filter.id()));

        Ok(u64::from(removed.is_some()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        #[serde(rename = "_id", default)]
        id: String,
        body: String,
    }

    impl Entity for Note {
        fn id(&self) -> &str {
            &self.id
        }

        fn set_id(&mut self, id: String) {
            self.id = id;
        }
    }

    fn note(id: &str, body: &str) -> Note {
        Note {
            id: id.to_string(),
            body: body.to_string(),
        }
    }

    async fn find_first(collection: &InMemoryCollection<Note>, id: &str) -> Option<Note> {
        collection
            .find(&IdFilter::by_id(id))
            .await
            .unwrap()
            .unwrap()
            .first()
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_insert_assigns_id_when_empty() {
        let store = InMemoryStore::with_id_generator(|| "n-1".to_string());
        let notes = store.collection::<Note>("Note");

        let id = notes.insert_one(&note("", "hello")).await.unwrap();

        assert_eq!(id, "n-1");
        assert_eq!(find_first(&notes, "n-1").await, Some(note("n-1", "hello")));
    }

    #[tokio::test]
    async fn test_insert_keeps_caller_id() {
        let store = InMemoryStore::new();
        let notes = store.collection::<Note>("Note");

        let id = notes.insert_one(&note("mine", "hello")).await.unwrap();

        assert_eq!(id, "mine");
        assert_eq!(store.document_count("Note"), 1);
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_id() {
        let store = InMemoryStore::new();
        let notes = store.collection::<Note>("Note");
        notes.insert_one(&note("dup", "first")).await.unwrap();

        let result = notes.insert_one(&note("dup", "second")).await;

        assert!(matches!(result, Err(StoreError::DuplicateKey { .. })));
        assert_eq!(find_first(&notes, "dup").await, Some(note("dup", "first")));
    }

    #[tokio::test]
    async fn test_find_missing_yields_empty_cursor() {
        let store = InMemoryStore::new();
        let notes = store.collection::<Note>("Note");

        assert_eq!(find_first(&notes, "nope").await, None);
    }

    #[tokio::test]
    async fn test_replace_and_delete_report_counts() {
        let store = InMemoryStore::new();
        let notes = store.collection::<Note>("Note");
        notes.insert_one(&note("a", "v1")).await.unwrap();

        let filter = IdFilter::by_id("a");
        assert_eq!(notes.replace_one(&filter, &note("a", "v2")).await.unwrap(), 1);
        assert_eq!(find_first(&notes, "a").await, Some(note("a", "v2")));
        assert_eq!(
            notes
                .replace_one(&IdFilter::by_id("b"), &note("b", "v1"))
                .await
                .unwrap(),
            0
        );

        assert_eq!(notes.delete_one(&filter).await.unwrap(), 1);
        assert_eq!(notes.delete_one(&filter).await.unwrap(), 0);
        assert_eq!(store.document_count("Note"), 0);
    }

    #[tokio::test]
    async fn test_collections_are_isolated_by_name() {
        let store = InMemoryStore::new();
        let notes = store.collection::<Note>("Note");
        let archived = store.collection::<Note>("ArchivedNote");
        notes.insert_one(&note("a", "live")).await.unwrap();

        assert_eq!(find_first(&archived, "a").await, None);
    }
}
