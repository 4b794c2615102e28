use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{BookStore, StoreError, StoreResult};
use crate::models::{Book, BookPatch, NewBook};

/// Book store backed by a process-local map
#[derive(Debug, Default)]
pub struct InMemoryBookStore {
    books: RwLock<HashMap<Uuid, Book>>,
}

impl InMemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.books.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.books.read().await.is_empty()
    }
}

#[async_trait]
impl BookStore for InMemoryBookStore {
    async fn create(&self, book: NewBook) -> StoreResult<Book> {
        let book = Book::create(book);
        self.books.write().await.insert(book.id, book.clone());
        Ok(book)
    }

    async fn find_all(&self) -> StoreResult<Vec<Book>> {
        let mut books: Vec<Book> = self.books.read().await.values().cloned().collect();
        books.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(books)
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Book> {
        self.books
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn update(&self, id: Uuid, patch: BookPatch) -> StoreResult<Book> {
        let mut books = self.books.write().await;
        let book = books.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        book.apply(patch);
        Ok(book.clone())
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        self.books
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }
}
