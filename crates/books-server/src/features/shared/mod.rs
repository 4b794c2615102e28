//! Shared utilities for feature modules
//!
//! - **validation**: the book schema shared by JSON commands and CSV import

pub mod validation;

pub use validation::{
    current_year, validate_candidate, validate_partial, BookCandidate, FieldIssue, IssueCode,
};
