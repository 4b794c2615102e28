//! Create book command
//!
//! The body is checked against the same schema as imported rows, then handed
//! to the store which assigns the identifier.

use crate::ingest::csv::validator::{validate_input, BookInput, Rejection};
use crate::models::{Book, NewBook};
use crate::store::{SharedBookStore, StoreError};

/// Command to create a new book
///
/// # Examples
///
/// ```rust,ignore
/// use books_server::features::books::commands::CreateBookCommand;
/// use books_server::ingest::csv::BookInput;
///
/// let command = CreateBookCommand {
///     book: BookInput {
///         title: Some("The Dispossessed".to_string()),
///         author: Some("Ursula K. Le Guin".to_string()),
///         published_year: Some(serde_json::json!(1974)),
///     },
/// };
/// ```
#[derive(Debug, Clone)]
pub struct CreateBookCommand {
    pub book: BookInput,
}

/// Errors that can occur when creating a book
#[derive(Debug, thiserror::Error)]
pub enum CreateBookError {
    #[error("Request body could not be read: {0}")]
    InvalidBody(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] Rejection),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl CreateBookCommand {
    /// Validates the body and returns the book to persist
    pub fn validate(&self) -> Result<NewBook, CreateBookError> {
        Ok(validate_input(&self.book)?)
    }
}

#[tracing::instrument(skip(store, command))]
pub async fn handle(store: SharedBookStore, command: CreateBookCommand) -> Result<Book, CreateBookError> {
    let new_book = command.validate()?;

    let book = store.create(new_book).await?;

    tracing::info!(book_id = %book.id, title = %book.title, "Book created");

    Ok(book)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryBookStore;
    use serde_json::json;
    use std::sync::Arc;

    fn command(title: Option<&str>, author: Option<&str>, year: serde_json::Value) -> CreateBookCommand {
        CreateBookCommand {
            book: BookInput {
                title: title.map(str::to_string),
                author: author.map(str::to_string),
                published_year: Some(year),
            },
        }
    }

    #[test]
    fn test_validation_success() {
        let cmd = command(Some("Dune"), Some("Frank Herbert"), json!(1965));
        assert_eq!(cmd.validate().unwrap().published_year, 1965);
    }

    #[test]
    fn test_validation_missing_title() {
        let cmd = command(None, Some("Frank Herbert"), json!(1965));
        assert!(matches!(cmd.validate(), Err(CreateBookError::Validation(Rejection::Issues(_)))));
    }

    #[test]
    fn test_validation_year_out_of_range() {
        let cmd = command(Some("Dune"), Some("Frank Herbert"), json!(999));
        assert!(matches!(cmd.validate(), Err(CreateBookError::Validation(_))));
    }

    #[tokio::test]
    async fn test_handle_creates_book() {
        let store = Arc::new(InMemoryBookStore::new());
        let cmd = command(Some("Dune"), Some("Frank Herbert"), json!("1965"));

        let book = handle(store.clone(), cmd).await.unwrap();

        assert_eq!(book.title, "Dune");
        assert_eq!(book.published_year, 1965);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_handle_does_not_persist_invalid_book() {
        let store = Arc::new(InMemoryBookStore::new());
        let cmd = command(Some(""), Some("Frank Herbert"), json!(1965));

        assert!(handle(store.clone(), cmd).await.is_err());
        assert!(store.is_empty().await);
    }
}
