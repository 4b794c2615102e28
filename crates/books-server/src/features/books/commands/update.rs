use uuid::Uuid;

use crate::ingest::csv::validator::{validate_patch, BookPatchInput, Rejection};
use crate::models::{Book, BookPatch};
use crate::store::{SharedBookStore, StoreError};

/// Command to change some fields of an existing book
#[derive(Debug, Clone)]
pub struct UpdateBookCommand {
    /// Raw identifier from the request path
    pub id: String,
    pub changes: BookPatchInput,
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateBookError {
    #[error("Invalid book id '{0}'")]
    InvalidId(String),
    #[error("Request body could not be read: {0}")]
    InvalidBody(String),
    #[error("Validation failed: {0}")]
    Validation(#[from] Rejection),
    #[error("Book '{0}' not found")]
    NotFound(Uuid),
    #[error("Store error: {0}")]
    Store(#[source] StoreError),
}

impl From<StoreError> for UpdateBookError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => UpdateBookError::NotFound(id),
            other => UpdateBookError::Store(other),
        }
    }
}

impl UpdateBookCommand {
    pub fn validate(&self) -> Result<(Uuid, BookPatch), UpdateBookError> {
        let id = Uuid::parse_str(&self.id).map_err(|_| UpdateBookError::InvalidId(self.id.clone()))?;
        let patch = validate_patch(&self.changes)?;
        Ok((id, patch))
    }
}

#[tracing::instrument(skip(store, command), fields(book_id = %command.id))]
pub async fn handle(store: SharedBookStore, command: UpdateBookCommand) -> Result<Book, UpdateBookError> {
    let (id, patch) = command.validate()?;

    let book = store.update(id, patch).await?;

    tracing::info!("Book updated");

    Ok(book)
}
