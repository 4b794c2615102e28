//! CSV import orchestration
//!
//! Parses an upload once, then validates and persists each row in order.
//! A failing row is recorded and processing moves on; rows that were already
//! persisted stay persisted.

use super::models::{ImportSummary, RowFailure, RowFailureReason};
use super::parser::parse_csv_detailed;
use super::validator::validate_parsed;
use crate::features::shared::validation::current_year;
use crate::store::SharedBookStore;

/// Message recorded for rows the store refused to save
pub const PERSISTENCE_FAILURE_MESSAGE: &str = "Failed to persist record";

/// Data rows are numbered after the header, which is row 1
const FIRST_DATA_ROW: usize = 2;

/// Drives parser, validator and store for one upload
#[derive(Clone)]
pub struct ImportPipeline {
    store: SharedBookStore,
    current_year: Option<i32>,
}

impl ImportPipeline {
    pub fn new(store: SharedBookStore) -> Self {
        Self {
            store,
            current_year: None,
        }
    }

    /// Pin the year used for the upper bound on `publishedYear`
    pub fn with_current_year(mut self, year: i32) -> Self {
        self.current_year = Some(year);
        self
    }

    /// Import every row of `bytes`
    ///
    /// Rows are persisted one at a time; each create is awaited before the
    /// next row is looked at.
    #[tracing::instrument(name = "csv_import", skip(self, bytes), fields(bytes = bytes.len()))]
    pub async fn run(&self, bytes: &[u8]) -> ImportSummary {
        let year = self.current_year.unwrap_or_else(current_year);
        let rows = parse_csv_detailed(bytes);
        let mut summary = ImportSummary::default();

        for (index, parsed) in rows.into_iter().enumerate() {
            let row = index + FIRST_DATA_ROW;

            let reason = match validate_parsed(&parsed, year) {
                Ok(book) => match self.store.create(book).await {
                    Ok(created) => {
                        tracing::trace!(row, id = %created.id, "Row imported");
                        summary.success_count += 1;
                        continue;
                    },
                    Err(e) => {
                        tracing::warn!(row, error = %e, "Failed to persist imported row");
                        RowFailureReason::Persistence {
                            message: PERSISTENCE_FAILURE_MESSAGE.to_string(),
                        }
                    },
                },
                Err(rejection) => {
                    tracing::debug!(row, reason = %rejection, "Row rejected");
                    rejection.into()
                },
            };

            summary.errors.push(RowFailure {
                row,
                data: parsed.row,
                reason,
            });
        }

        tracing::info!(
            imported = summary.success_count,
            failed = summary.failed_count(),
            "CSV import finished"
        );

        summary
    }
}
