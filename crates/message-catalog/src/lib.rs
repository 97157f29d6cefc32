//! # Message Catalog Crate
//!
//! Loads the static library of tagged message templates.
//!
//! ## Main Components
//!
//! - **types**: TemplateEntry and the ordered Catalog
//! - **parser**: CSV parsing with `Tags` / `Message` columns
//! - **error**: Error types for catalog loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use message_catalog::Catalog;
//! use std::path::Path;
//!
//! let catalog = Catalog::load_from_file(Path::new("data/messages.csv"))?;
//! for (tag, count) in catalog.tag_counts() {
//!     println!("{tag}: {count} templates");
//! }
//! ```
//!
//! Templates are stored verbatim. Placeholder names are not checked here;
//! an unknown placeholder is reported when the template is rendered.

pub mod error;
pub mod parser;
pub mod types;

pub use error::{CatalogError, Result};
pub use parser::{MESSAGE_COLUMN, TAGS_COLUMN};
pub use types::{Catalog, TemplateEntry};
