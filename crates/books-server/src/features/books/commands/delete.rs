use uuid::Uuid;

use crate::store::{SharedBookStore, StoreError};

#[derive(Debug, Clone)]
pub struct DeleteBookCommand {
    pub id: String,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteBookError {
    #[error("Invalid book id '{0}'")]
    InvalidId(String),
    #[error("Book '{0}' not found")]
    NotFound(Uuid),
    #[error("Store error: {0}")]
    Store(#[source] StoreError),
}

impl From<StoreError> for DeleteBookError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => DeleteBookError::NotFound(id),
            other => DeleteBookError::Store(other),
        }
    }
}

impl DeleteBookCommand {
    pub fn validate(&self) -> Result<Uuid, DeleteBookError> {
        Uuid::parse_str(&self.id).map_err(|_| DeleteBookError::InvalidId(self.id.clone()))
    }
}

#[tracing::instrument(skip(store, command), fields(book_id = %command.id))]
pub async fn handle(store: SharedBookStore, command: DeleteBookCommand) -> Result<Uuid, DeleteBookError> {
    let id = command.validate()?;

    store.delete(id).await?;

    tracing::info!("Book deleted");

    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewBook;
    use crate::store::{BookStore, InMemoryBookStore};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_handle_deletes_book() {
        let store = Arc::new(InMemoryBookStore::new());
        let created = store
            .create(NewBook {
                title: "Roadside Picnic".to_string(),
                author: "Arkady and Boris Strugatsky".to_string(),
                published_year: 1972,
            })
            .await
            .unwrap();

        let cmd = DeleteBookCommand {
            id: created.id.to_string(),
        };
        assert_eq!(handle(store.clone(), cmd.clone()).await.unwrap(), created.id);
        assert!(store.is_empty().await);

        assert!(matches!(handle(store, cmd).await, Err(DeleteBookError::NotFound(_))));
    }

    #[test]
    fn test_validation_invalid_id() {
        let cmd = DeleteBookCommand {
            id: "42".to_string(),
        };
        assert!(matches!(cmd.validate(), Err(DeleteBookError::InvalidId(_))));
    }
}
