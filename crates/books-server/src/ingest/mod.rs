//! Bulk ingestion of book records

pub mod csv;

pub use csv::{ImportPipeline, ImportSummary};
