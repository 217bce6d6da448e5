//! Legacy flat-file fallback source.
//!
//! Older label sets were exported to a flat CSV file with no fixed schema.
//! The filename may sit under any of several historical column names, so
//! the lookup scans a tolerant alias set. Only existence can be answered
//! from this source; the structured annotation payload is not
//! reconstructable from the flat format.
//!
//! The parser accepts RFC-4180-style input: a header row, comma-separated
//! fields, optional double-quoting with `""` escapes. Rows shorter than
//! the header are tolerated (missing cells never match). The one hard
//! failure is an unterminated quoted field, which means the file cannot
//! be parsed at all and is reported as [`CoreError::MalformedFallback`],
//! distinct from "not found".

use crate::error::CoreError;

/// Column names that may contain the video filename in a legacy export.
pub const FILENAME_ALIASES: &[&str] = &["filename", "file", "video", "video_name", "videoFilename"];

/// A parsed legacy CSV export: one header row plus data rows.
#[derive(Debug, Clone)]
pub struct FallbackTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl FallbackTable {
    /// Parse a CSV document. The first record is the header row.
    ///
    /// Empty input yields an empty table (a present-but-empty export is
    /// not malformed). Blank lines are skipped.
    pub fn parse(text: &str) -> Result<Self, CoreError> {
        let mut records = parse_records(text)?;
        // Drop blank lines (single empty field).
        records.retain(|r| !(r.len() == 1 && r[0].is_empty()));

        let mut records = records.into_iter();
        let headers = records.next().unwrap_or_default();
        Ok(Self {
            headers,
            rows: records.collect(),
        })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Scan rows in order for an exact, case-sensitive filename match
    /// under any alias column. First matching row wins.
    pub fn contains_filename(&self, filename: &str) -> bool {
        let alias_columns: Vec<usize> = self
            .headers
            .iter()
            .enumerate()
            .filter(|(_, h)| FILENAME_ALIASES.contains(&h.as_str()))
            .map(|(i, _)| i)
            .collect();

        if alias_columns.is_empty() {
            return false;
        }

        self.rows.iter().any(|row| {
            alias_columns
                .iter()
                .any(|&i| row.get(i).is_some_and(|cell| cell == filename))
        })
    }
}

/// Split CSV text into records of fields.
///
/// Quoting: a field starting with `"` runs until the closing quote, with
/// `""` as an escaped quote; separators inside quotes are literal. Quotes
/// appearing mid-field are kept as literal characters. A field still open
/// at end of input is malformed.
fn parse_records(text: &str) -> Result<Vec<Vec<String>>, CoreError> {
    let mut records: Vec<Vec<String>> = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
            continue;
        }

        match c {
            '"' if field.is_empty() => in_quotes = true,
            ',' => record.push(std::mem::take(&mut field)),
            '\r' => {}
            '\n' => {
                record.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut record));
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(CoreError::MalformedFallback(
            "unterminated quoted field".to_string(),
        ));
    }

    // Final record without a trailing newline.
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }

    Ok(records)
}
