use uuid::Uuid;

use crate::models::Book;
use crate::store::{SharedBookStore, StoreError};

#[derive(Debug, Clone)]
pub struct GetBookQuery {
    /// Raw identifier from the request path
    pub id: String,
}

#[derive(Debug, thiserror::Error)]
pub enum GetBookError {
    /// Also returned for identifiers that are not valid UUIDs
    #[error("Book not found")]
    NotFound,
    #[error("Store error: {0}")]
    Store(#[source] StoreError),
}

impl From<StoreError> for GetBookError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => GetBookError::NotFound,
            other => GetBookError::Store(other),
        }
    }
}

impl GetBookQuery {
    pub fn validate(&self) -> Result<Uuid, GetBookError> {
        Uuid::parse_str(&self.id).map_err(|_| GetBookError::NotFound)
    }
}

#[tracing::instrument(skip(store))]
pub async fn handle(store: SharedBookStore, query: GetBookQuery) -> Result<Book, GetBookError> {
    let id = query.validate()?;
    Ok(store.find_by_id(id).await?)
}
