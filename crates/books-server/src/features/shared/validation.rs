//! Book schema validation
//!
//! The same rules apply to CSV rows and to JSON request bodies:
//!
//! - `title`: required, not blank
//! - `author`: required, not blank
//! - `publishedYear`: a finite integer between [`MIN_PUBLISHED_YEAR`] and the
//!   current calendar year, inclusive
//!
//! Every field is checked and all issues are reported together.
//!
//! # Examples
//!
//! ```rust,ignore
//! use books_server::features::shared::validation::{validate_candidate, BookCandidate};
//!
//! let candidate = BookCandidate {
//!     title: Some("Dune".into()),
//!     author: Some("Frank Herbert".into()),
//!     published_year: Some(1965.0),
//! };
//! let book = validate_candidate(&candidate, 2025)?;
//! ```

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{BookPatch, NewBook};

/// Earliest accepted publication year
pub const MIN_PUBLISHED_YEAR: i32 = 1000;

pub const TITLE_FIELD: &str = "title";
pub const AUTHOR_FIELD: &str = "author";
pub const PUBLISHED_YEAR_FIELD: &str = "publishedYear";

/// Which constraint a field violated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    Required,
    TooSmall,
    TooBig,
    NotANumber,
    NotAnInteger,
}

/// A single field-level schema violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIssue {
    pub field: String,
    pub code: IssueCode,
    pub message: String,
}

impl FieldIssue {
    fn new(field: &str, code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            code,
            message: message.into(),
        }
    }
}

/// Unvalidated book fields after type coercion
///
/// `None` means the field was absent. A present but non-numeric year is
/// represented as `NaN`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookCandidate {
    pub title: Option<String>,
    pub author: Option<String>,
    pub published_year: Option<f64>,
}

/// The current calendar year in UTC
pub fn current_year() -> i32 {
    Utc::now().year()
}

/// Coerce year text the way numeric conversion of text behaves:
/// blank text is zero, unparseable text is `NaN`
pub fn coerce_year_text(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Coerce a JSON value for `publishedYear`; `null` counts as absent
pub fn coerce_year_json(value: &Value) -> Option<f64> {
    match value {
        Value::Null => None,
        Value::Number(n) => Some(n.as_f64().unwrap_or(f64::NAN)),
        Value::String(s) => Some(coerce_year_text(s)),
        _ => Some(f64::NAN),
    }
}

fn check_text(field: &str, value: Option<&str>, issues: &mut Vec<FieldIssue>) -> Option<String> {
    match value {
        None => {
            issues.push(FieldIssue::new(field, IssueCode::Required, format!("{field} is required")));
            None
        },
        Some(text) if text.trim().is_empty() => {
            issues.push(FieldIssue::new(
                field,
                IssueCode::TooSmall,
                format!("{field} must contain at least 1 character"),
            ));
            None
        },
        Some(text) => Some(text.to_string()),
    }
}

fn check_year(value: Option<f64>, current_year: i32, issues: &mut Vec<FieldIssue>) -> Option<i32> {
    let field = PUBLISHED_YEAR_FIELD;
    let Some(year) = value else {
        issues.push(FieldIssue::new(field, IssueCode::Required, format!("{field} is required")));
        return None;
    };

    if !year.is_finite() {
        issues.push(FieldIssue::new(field, IssueCode::NotANumber, format!("{field} must be a number")));
        return None;
    }
    let before = issues.len();
    if year.fract() != 0.0 {
        issues.push(FieldIssue::new(
            field,
            IssueCode::NotAnInteger,
            format!("{field} must be an integer"),
        ));
    }
    if year < f64::from(MIN_PUBLISHED_YEAR) {
        issues.push(FieldIssue::new(
            field,
            IssueCode::TooSmall,
            format!("{field} must be greater than or equal to {MIN_PUBLISHED_YEAR}"),
        ));
    }
    if year > f64::from(current_year) {
        issues.push(FieldIssue::new(
            field,
            IssueCode::TooBig,
            format!("{field} must be less than or equal to {current_year}"),
        ));
    }
    if issues.len() > before {
        return None;
    }

    // Bounded by [MIN_PUBLISHED_YEAR, current_year] so the cast is exact
    Some(year as i32)
}

/// Validate a full candidate against the book schema
pub fn validate_candidate(
    candidate: &BookCandidate,
    current_year: i32,
) -> Result<NewBook, Vec<FieldIssue>> {
    let mut issues = Vec::new();

    let title = check_text(TITLE_FIELD, candidate.title.as_deref(), &mut issues);
    let author = check_text(AUTHOR_FIELD, candidate.author.as_deref(), &mut issues);
    let published_year = check_year(candidate.published_year, current_year, &mut issues);

    match (title, author, published_year) {
        (Some(title), Some(author), Some(published_year)) if issues.is_empty() => Ok(NewBook {
            title,
            author,
            published_year,
        }),
        _ => Err(issues),
    }
}

/// Validate only the fields present in a candidate
///
/// Absent fields are left untouched by the resulting patch.
pub fn validate_partial(
    candidate: &BookCandidate,
    current_year: i32,
) -> Result<BookPatch, Vec<FieldIssue>> {
    let mut issues = Vec::new();
    let mut patch = BookPatch::default();

    if candidate.title.is_some() {
        patch.title = check_text(TITLE_FIELD, candidate.title.as_deref(), &mut issues);
    }
    if candidate.author.is_some() {
        patch.author = check_text(AUTHOR_FIELD, candidate.author.as_deref(), &mut issues);
    }
    if candidate.published_year.is_some() {
        patch.published_year = check_year(candidate.published_year, current_year, &mut issues);
    }

    if issues.is_empty() {
        Ok(patch)
    } else {
        Err(issues)
    }
}
