//! Core trait for tag decoration.
//!
//! A decorator turns a catalog tag into the key messages are grouped
//! under. Two tags that decorate to the same string share one group.

/// Maps a raw catalog tag to its display form.
///
/// `Send + Sync` so one engine can be shared across request handlers.
pub trait TagDecorator: Send + Sync {
    /// Returns the name of this decorator (for logging/debugging)
    fn name(&self) -> &str;

    /// Decorated form of `tag`. Unknown tags should come back unchanged.
    fn decorate(&self, tag: &str) -> String;
}
