//! Book entity and its service
//!
//! `BookService` adds input normalization on top of the generic service by
//! delegating to it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use mongorm::{DocumentCollection, Entity, EntityService, GenericEntityService, ServiceError};

/// A book in the library collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl Book {
    /// New, not yet stored book
    pub fn new(title: impl Into<String>, author: Option<String>) -> Self {
        Self {
            id: String::new(),
            title: title.into(),
            author,
        }
    }

    fn normalized(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.author = self
            .author
            .map(|author| author.trim().to_string())
            .filter(|author| !author.is_empty());
        self
    }
}

impl Entity for Book {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

/// Book service: trims titles and authors before writing
pub struct BookService<C> {
    inner: GenericEntityService<Book, C>,
}

impl<C: DocumentCollection<Book>> BookService<C> {
    pub fn new(inner: GenericEntityService<Book, C>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<C: DocumentCollection<Book>> EntityService<Book> for BookService<C> {
    async fn get(&self, id: &str) -> Result<Book, ServiceError> {
        self.inner.get(id.trim()).await
    }

    async fn create(&self, book: Book) -> Result<Book, ServiceError> {
        self.inner.create(book.normalized()).await
    }

    async fn update(&self, book: Book) -> Result<Book, ServiceError> {
        self.inner.update(book.normalized()).await
    }

    async fn delete(&self, id: &str) -> Result<Book, ServiceError> {
        self.inner.delete(id.trim()).await
    }
}
