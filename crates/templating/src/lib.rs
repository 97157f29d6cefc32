//! Template rendering for movie messages.
//!
//! This crate fills catalog templates with a movie's facts and groups the
//! results under decorated tags.
//!
//! ## Main Components
//!
//! - **placeholder**: `{name}` substitution against a FactSheet
//! - **emoji**: `:shortcode:` expansion
//! - **traits**: the TagDecorator seam
//! - **decorators**: EmojiTagDecorator (the default) and PlainTags
//! - **engine**: TemplateEngine and the MessagesByTag result

pub mod decorators;
pub mod emoji;
pub mod engine;
pub mod error;
pub mod placeholder;
pub mod traits;

pub use decorators::{EmojiTagDecorator, PlainTags};
pub use engine::{FailurePolicy, MessagesByTag, TagGroup, TemplateEngine};
pub use error::{RenderError, Result};
pub use traits::TagDecorator;
