//! Import books command
//!
//! Runs an uploaded CSV file through the import pipeline. Row-level failures
//! are part of a successful response; only a missing or unreadable upload
//! fails the command.

use serde::Serialize;

use crate::ingest::csv::{ImportPipeline, ImportSummary, RowFailure};
use crate::store::SharedBookStore;

pub const IMPORT_COMPLETE_MESSAGE: &str = "Import complete";

/// Command carrying the uploaded file contents, if any
#[derive(Debug, Clone, Default)]
pub struct ImportBooksCommand {
    pub file: Option<Vec<u8>>,
}

/// Response body for a finished import
#[derive(Debug, Clone, Serialize)]
pub struct ImportBooksResponse {
    pub message: String,
    pub imported: usize,
    pub failed: usize,
    pub errors: Vec<RowFailure>,
}

impl From<ImportSummary> for ImportBooksResponse {
    fn from(summary: ImportSummary) -> Self {
        Self {
            message: IMPORT_COMPLETE_MESSAGE.to_string(),
            imported: summary.success_count,
            failed: summary.failed_count(),
            errors: summary.errors,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ImportBooksError {
    #[error("No file uploaded")]
    NoFile,

    #[error("Upload exceeds the configured size limit")]
    TooLarge,

    #[error("Failed to read upload: {0}")]
    Upload(String),
}

impl ImportBooksCommand {
    pub fn validate(&self) -> Result<&[u8], ImportBooksError> {
        self.file.as_deref().ok_or(ImportBooksError::NoFile)
    }
}

#[tracing::instrument(skip(store, command))]
pub async fn handle(
    store: SharedBookStore,
    command: ImportBooksCommand,
) -> Result<ImportBooksResponse, ImportBooksError> {
    let bytes = command.validate()?;

    let summary = ImportPipeline::new(store).run(bytes).await;

    Ok(summary.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryBookStore;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_handle_without_file() {
        let store = Arc::new(InMemoryBookStore::new());
        let result = handle(store, ImportBooksCommand::default()).await;
        assert!(matches!(result, Err(ImportBooksError::NoFile)));
    }

    #[tokio::test]
    async fn test_handle_reports_counts() {
        let store = Arc::new(InMemoryBookStore::new());
        let command = ImportBooksCommand {
            file: Some(b"title,author,publishedYear\nDune,Herbert,1965\n,NoTitle,2020\n".to_vec()),
        };

        let response = handle(store.clone(), command).await.unwrap();

        assert_eq!(response.message, IMPORT_COMPLETE_MESSAGE);
        assert_eq!(response.imported, 1);
        assert_eq!(response.failed, 1);
        assert_eq!(response.errors[0].row, 3);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_empty_file_imports_nothing() {
        let store = Arc::new(InMemoryBookStore::new());
        let command = ImportBooksCommand { file: Some(Vec::new()) };

        let response = handle(store, command).await.unwrap();

        assert_eq!(response.imported, 0);
        assert_eq!(response.failed, 0);
    }
}
