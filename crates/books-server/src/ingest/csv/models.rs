// CSV import data models

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::features::shared::validation::FieldIssue;

// ============================================================================
// Raw rows
// ============================================================================

/// One data line of a CSV file keyed by header name
///
/// Keys keep header order. Inserting an existing key replaces its value in
/// place, so duplicate header columns collapse to the last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    fields: Vec<(String, String)>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Case-sensitive lookup
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = RawRow::new();
        for (key, value) in iter {
            row.insert(key, value);
        }
        row
    }
}

impl Serialize for RawRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// A parsed row plus what the parser noticed about its source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRow {
    pub row: RawRow,
    /// The line ended while still inside a quoted field
    pub unterminated_quote: bool,
}

// ============================================================================
// Import outcomes
// ============================================================================

/// Why a row was not imported
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowFailureReason {
    /// The row violated the book schema
    Validation { issues: Vec<FieldIssue> },
    /// The row could not be interpreted as a book at all
    InvalidData { message: String },
    /// The row was valid but the store rejected or failed to save it
    Persistence { message: String },
}

/// A row that was not imported
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RowFailure {
    /// 1-based line number counting the header as row 1
    pub row: usize,
    /// The row exactly as parsed
    pub data: RawRow,
    pub reason: RowFailureReason,
}

/// Aggregate result of one import run
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub success_count: usize,
    pub errors: Vec<RowFailure>,
}

impl ImportSummary {
    pub fn failed_count(&self) -> usize {
        self.errors.len()
    }
}
