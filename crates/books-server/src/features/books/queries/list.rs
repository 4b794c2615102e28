use crate::models::Book;
use crate::store::{SharedBookStore, StoreError};

/// List every book, oldest first
#[derive(Debug, Clone, Default)]
pub struct ListBooksQuery;

#[derive(Debug, thiserror::Error)]
pub enum ListBooksError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

#[tracing::instrument(skip(store, _query))]
pub async fn handle(store: SharedBookStore, _query: ListBooksQuery) -> Result<Vec<Book>, ListBooksError> {
    let books = store.find_all().await?;
    tracing::debug!(count = books.len(), "Books listed");
    Ok(books)
}
