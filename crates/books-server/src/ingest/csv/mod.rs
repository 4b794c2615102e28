//! CSV bulk import of books
//!
//! - [`parser`]: turns uploaded bytes into header-keyed rows
//! - [`validator`]: applies the book schema to a row
//! - [`pipeline`]: persists valid rows and collects per-row failures

pub mod models;
pub mod parser;
pub mod pipeline;
pub mod validator;

pub use models::{ImportSummary, ParsedRow, RawRow, RowFailure, RowFailureReason};
pub use parser::{parse_csv, parse_csv_detailed};
pub use pipeline::ImportPipeline;
pub use validator::{validate_row, BookInput, BookPatchInput, Rejection};
