//! Error types for the message-catalog crate.
//!
//! Loading is fail-fast: the first bad row aborts the load and no partial
//! catalog is ever returned.

use thiserror::Error;

/// Errors that can occur while loading a message catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Catalog file could not be found
    #[error("Failed to open catalog: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading the catalog
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Header row lacks a required column
    #[error("Catalog header has no {column:?} column")]
    MissingColumn { column: &'static str },

    /// Row couldn't be split into fields
    #[error("Parse error at line {line}: {reason}")]
    ParseError { line: usize, reason: String },

    /// Row has a different number of fields than the header
    #[error("Expected {expected} fields but found {found} in line {line}")]
    FieldCountMismatch {
        expected: usize,
        found: usize,
        line: usize,
    },

    /// Tags column was blank, or held a blank tag between commas
    #[error("Empty tag in line {line}")]
    EmptyTags { line: usize },

    /// Message column was blank
    #[error("Empty message template in line {line}")]
    EmptyMessage { line: usize },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
