//! Parser for the message catalog CSV.
//!
//! Format: a header row naming at least a `Tags` and a `Message` column,
//! then one row per template:
//!
//! ```text
//! Tags,Message
//! "Aggressively, With a movie quote","{review_critic} called it {review_q}. Go."
//! Gently,{title} starring {actor} runs {runtime}.
//! ```
//!
//! Fields follow the usual CSV quoting rules: a field wrapped in double
//! quotes may contain commas, newlines and `""` (an escaped quote).
//! Other columns are allowed and ignored.

use crate::error::{CatalogError, Result};
use crate::types::{Catalog, TemplateEntry};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info};

pub const TAGS_COLUMN: &str = "Tags";
pub const MESSAGE_COLUMN: &str = "Message";

/// One CSV record and the line it started on
#[derive(Debug)]
struct Record {
    line: usize,
    fields: Vec<String>,
}

impl Record {
    fn is_blank(&self) -> bool {
        self.fields.len() == 1 && self.fields[0].trim().is_empty()
    }
}

/// Read and parse a catalog file
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => CatalogError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => CatalogError::IoError(e),
    })?;

    let catalog = parse_catalog(&content)?;
    info!(
        "Loaded {} message templates ({} tags) from {}",
        catalog.len(),
        catalog.tag_counts().len(),
        path.display()
    );
    Ok(catalog)
}

/// Parse catalog CSV text
pub fn parse_catalog(content: &str) -> Result<Catalog> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut records = split_records(content)?
        .into_iter()
        .filter(|record| !record.is_blank());

    let header = records.next().ok_or(CatalogError::MissingColumn {
        column: TAGS_COLUMN,
    })?;
    let tags_idx = column_index(&header, TAGS_COLUMN)?;
    let message_idx = column_index(&header, MESSAGE_COLUMN)?;

    let mut entries = Vec::new();
    for record in records {
        if record.fields.len() != header.fields.len() {
            return Err(CatalogError::FieldCountMismatch {
                expected: header.fields.len(),
                found: record.fields.len(),
                line: record.line,
            });
        }

        let template = &record.fields[message_idx];
        if template.trim().is_empty() {
            return Err(CatalogError::EmptyMessage { line: record.line });
        }

        let tags = parse_tags(&record.fields[tags_idx])
            .ok_or(CatalogError::EmptyTags { line: record.line })?;

        let mut entry = TemplateEntry::new(tags, template.as_str());
        entry.line = record.line;
        entries.push(entry);
    }

    debug!("Parsed {} catalog rows", entries.len());
    Ok(Catalog::new(entries))
}

fn column_index(header: &Record, column: &'static str) -> Result<usize> {
    header
        .fields
        .iter()
        .position(|name| name.trim() == column)
        .ok_or(CatalogError::MissingColumn { column })
}

/// Split a tags field on commas and trim each tag.
///
/// Returns `None` if any tag is blank ("Gently,,Aggressively" or "").
fn parse_tags(field: &str) -> Option<Vec<&str>> {
    let tags: Vec<&str> = field.split(',').map(str::trim).collect();
    if tags.iter().any(|tag| tag.is_empty()) {
        return None;
    }
    Some(tags)
}

/// Split CSV text into records, honouring quoted fields
fn split_records(content: &str) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();

    let mut line = 1;
    let mut record_line = 1;
    let mut in_quotes = false;
    // Set right after a closing quote, until the next separator
    let mut after_quote = false;

    let mut chars = content.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => {
                    in_quotes = false;
                    after_quote = true;
                }
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            ',' => {
                fields.push(std::mem::take(&mut field));
                after_quote = false;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                fields.push(std::mem::take(&mut field));
                records.push(Record {
                    line: record_line,
                    fields: std::mem::take(&mut fields),
                });
                line += 1;
                record_line = line;
                after_quote = false;
            }
            _ if after_quote => {
                return Err(CatalogError::ParseError {
                    line,
                    reason: format!("Unexpected {:?} after closing quote", c),
                });
            }
            '"' if field.is_empty() => in_quotes = true,
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(CatalogError::ParseError {
            line: record_line,
            reason: "Unterminated quoted field".to_string(),
        });
    }

    if !field.is_empty() || !fields.is_empty() || after_quote {
        fields.push(field);
        records.push(Record {
            line: record_line,
            fields,
        });
    }

    Ok(records)
}
