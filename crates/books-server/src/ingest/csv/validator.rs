//! Book schema checks for parsed rows and JSON bodies
//!
//! Rows and request bodies are first turned into a [`BookCandidate`] and then
//! run through the shared schema in [`crate::features::shared::validation`].
//! Nothing here persists or mutates its input.

use serde::Deserialize;
use serde_json::Value;

use super::models::{ParsedRow, RawRow, RowFailureReason};
use crate::features::shared::validation::{
    coerce_year_json, coerce_year_text, current_year, validate_candidate, validate_partial,
    BookCandidate, FieldIssue, AUTHOR_FIELD, PUBLISHED_YEAR_FIELD, TITLE_FIELD,
};
use crate::models::{BookPatch, NewBook};

pub const UNTERMINATED_QUOTE_MESSAGE: &str = "Unterminated quoted field";
pub const NO_FIELDS_MESSAGE: &str = "At least one field must be provided";

/// Why a row or body was refused
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("Schema validation failed with {} issue(s)", .0.len())]
    Issues(Vec<FieldIssue>),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("At least one field must be provided")]
    NoFields,
}

impl From<Rejection> for RowFailureReason {
    fn from(rejection: Rejection) -> Self {
        match rejection {
            Rejection::Issues(issues) => RowFailureReason::Validation { issues },
            Rejection::InvalidData(message) => RowFailureReason::InvalidData { message },
            Rejection::NoFields => RowFailureReason::InvalidData {
                message: NO_FIELDS_MESSAGE.to_string(),
            },
        }
    }
}

/// JSON body for creating or partially updating a book
///
/// `publishedYear` may be a number or numeric text; `null` counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub published_year: Option<Value>,
}

pub type BookPatchInput = BookInput;

impl BookInput {
    fn candidate(&self) -> BookCandidate {
        BookCandidate {
            title: self.title.clone(),
            author: self.author.clone(),
            published_year: self.published_year.as_ref().and_then(coerce_year_json),
        }
    }
}

/// Build a candidate from the case-sensitive row keys
///
/// A row without a `publishedYear` column coerces to `NaN`, like numeric
/// conversion of an undefined value.
pub fn candidate_from_row(row: &RawRow) -> BookCandidate {
    BookCandidate {
        title: row.get(TITLE_FIELD).map(str::to_string),
        author: row.get(AUTHOR_FIELD).map(str::to_string),
        published_year: Some(
            row.get(PUBLISHED_YEAR_FIELD)
                .map(coerce_year_text)
                .unwrap_or(f64::NAN),
        ),
    }
}

pub fn validate_row(row: &RawRow) -> Result<NewBook, Rejection> {
    validate_row_for_year(row, current_year())
}

/// Validate a row against an explicit current year
pub fn validate_row_for_year(row: &RawRow, year: i32) -> Result<NewBook, Rejection> {
    validate_candidate(&candidate_from_row(row), year).map_err(Rejection::Issues)
}

/// Validate a row together with what the parser reported about it
pub fn validate_parsed(parsed: &ParsedRow, year: i32) -> Result<NewBook, Rejection> {
    if parsed.unterminated_quote {
        return Err(Rejection::InvalidData(UNTERMINATED_QUOTE_MESSAGE.to_string()));
    }
    validate_row_for_year(&parsed.row, year)
}

pub fn validate_input(input: &BookInput) -> Result<NewBook, Rejection> {
    validate_input_for_year(input, current_year())
}

pub fn validate_input_for_year(input: &BookInput, year: i32) -> Result<NewBook, Rejection> {
    validate_candidate(&input.candidate(), year).map_err(Rejection::Issues)
}

pub fn validate_patch(input: &BookPatchInput) -> Result<BookPatch, Rejection> {
    validate_patch_for_year(input, current_year())
}

/// Validate the fields present in a partial update; at least one is required
pub fn validate_patch_for_year(input: &BookPatchInput, year: i32) -> Result<BookPatch, Rejection> {
    let candidate = input.candidate();
    if candidate.title.is_none() && candidate.author.is_none() && candidate.published_year.is_none() {
        return Err(Rejection::NoFields);
    }
    validate_partial(&candidate, year).map_err(Rejection::Issues)
}
