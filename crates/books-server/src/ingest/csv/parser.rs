// Delimited-text parser for book uploads
//
// Format:
// - First non-empty line is the header, split on plain commas
// - Later non-empty lines are data rows
// - A double quote toggles "inside quotes"; commas inside quotes are literal
// - The quote character itself never reaches the output
// - No escaped-quote convention ("" is two toggles, not a literal quote)
//
// The whole buffer is parsed eagerly.

use super::models::{ParsedRow, RawRow};

pub const DELIMITER: char = ',';
pub const QUOTE: char = '"';

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Parse a CSV buffer into header-keyed rows
///
/// Returns no rows when fewer than two non-empty lines are present.
pub fn parse_csv(bytes: &[u8]) -> Vec<RawRow> {
    parse_csv_detailed(bytes)
        .into_iter()
        .map(|parsed| parsed.row)
        .collect()
}

/// Parse a CSV buffer keeping per-row parser diagnostics
pub fn parse_csv_detailed(bytes: &[u8]) -> Vec<ParsedRow> {
    let text = String::from_utf8_lossy(bytes);
    let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(&text);

    let lines: Vec<&str> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty())
        .collect();

    let Some((header_line, data_lines)) = lines.split_first() else {
        return Vec::new();
    };
    if data_lines.is_empty() {
        return Vec::new();
    }

    let headers: Vec<&str> = header_line.split(DELIMITER).map(str::trim).collect();

    data_lines
        .iter()
        .map(|line| {
            let (values, unterminated_quote) = split_line(line);
            ParsedRow {
                row: build_row(&headers, values),
                unterminated_quote,
            }
        })
        .collect()
}

/// Split one data line into cleaned field values
///
/// The flag is true when the line ended inside a quoted section.
fn split_line(line: &str) -> (Vec<String>, bool) {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            QUOTE => in_quotes = !in_quotes,
            DELIMITER if !in_quotes => values.push(clean_field(&std::mem::take(&mut current))),
            _ => current.push(ch),
        }
    }
    values.push(clean_field(&current));

    (values, in_quotes)
}

/// Trim, then drop one wrapping pair of quotes if both ends have one
fn clean_field(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix(QUOTE)
        .and_then(|inner| inner.strip_suffix(QUOTE))
        .unwrap_or(trimmed)
        .to_string()
}

fn build_row(headers: &[&str], values: Vec<String>) -> RawRow {
    let mut values = values.into_iter();
    headers
        .iter()
        .map(|header| (*header, values.next().unwrap_or_default()))
        .collect()
}
