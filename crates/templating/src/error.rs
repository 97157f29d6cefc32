//! Error types for template rendering.

use movie_facts::FactError;
use thiserror::Error;

/// Errors raised while rendering a message template
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// `{name}` where `name` is not a known placeholder
    #[error("Template references unknown placeholder {{{name}}}")]
    UnknownPlaceholder { name: String },

    /// A `{` or `}` that is neither a placeholder nor a doubled escape
    #[error("Unbalanced brace at byte {position} in template")]
    UnbalancedBrace { position: usize },

    /// The placeholder exists but its fact could not be extracted
    #[error("Cannot fill {{{placeholder}}}: {source}")]
    MissingFact {
        placeholder: String,
        #[source]
        source: FactError,
    },

    /// Wraps any of the above with the catalog entry that failed
    #[error("Catalog entry #{index} (line {line}) failed to render: {source}")]
    Entry {
        index: usize,
        line: usize,
        #[source]
        source: Box<RenderError>,
    },
}

impl RenderError {
    /// The underlying error, without catalog-entry context.
    pub fn root(&self) -> &RenderError {
        match self {
            RenderError::Entry { source, .. } => source.root(),
            other => other,
        }
    }

    /// True when the failure comes from upstream data rather than the template.
    pub fn is_missing_fact(&self) -> bool {
        matches!(self.root(), RenderError::MissingFact { .. })
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, RenderError>;
