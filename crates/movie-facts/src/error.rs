//! Error types for the movie-facts crate.
//!
//! Every variant describes upstream data that was absent or unusable.
//! None of them are recovered locally: the caller decides whether a
//! missing fact fails the request or only the templates that need it.

use thiserror::Error;

/// Errors raised while deriving a fact from raw upstream data
///
/// `Clone` because a [`crate::FactSheet`] evaluates each field once and
/// hands the same failure to every template that references it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FactError {
    /// A key the projection needs was absent or empty
    #[error("Upstream data is missing {field}")]
    MissingField { field: &'static str },

    /// Asked for an actor past the end of the abridged cast
    #[error("Actor #{wanted} requested but the cast lists only {found}")]
    NotEnoughActors { wanted: usize, found: usize },

    /// The abridged directors list was empty
    #[error("Upstream data lists no director")]
    NoDirector,

    /// Runtime was zero, blank or absent
    #[error("Upstream data has no runtime")]
    MissingRuntime,

    /// Theater release date was not a valid YYYY-MM-DD date
    #[error("Invalid theater release date: {value:?}")]
    InvalidReleaseDate { value: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, FactError>;
