//! Tag decorators.
//!
//! `EmojiTagDecorator` is what the service uses: a fixed table from tag
//! text to emoji shortcodes, expanded and prefixed to the tag.

use crate::emoji::emojize;
use crate::traits::TagDecorator;

/// Built-in tag -> shortcode prefixes.
pub const DEFAULT_DECORATIONS: &[(&str, &str)] = &[
    ("Aggressively", ":rage:"),
    ("Gently", ":relieved:"),
    ("With a movie quote", ":clapper::speech_balloon:"),
];

/// Prefixes known tags with emoji: "Gently" -> "😌 Gently".
///
/// Matching is exact (case and whitespace); tags not in the table pass
/// through unchanged.
#[derive(Debug, Clone)]
pub struct EmojiTagDecorator {
    decorations: Vec<(String, String)>,
}

impl EmojiTagDecorator {
    pub fn new() -> Self {
        Self {
            decorations: DEFAULT_DECORATIONS
                .iter()
                .map(|(tag, prefix)| (tag.to_string(), emojize(prefix).into_owned()))
                .collect(),
        }
    }

    /// Add or replace the prefix for `tag`. `shortcodes` may mix
    /// `:aliases:` and literal emoji.
    pub fn with_decoration(mut self, tag: impl Into<String>, shortcodes: &str) -> Self {
        let tag = tag.into();
        let prefix = emojize(shortcodes).into_owned();
        match self.decorations.iter_mut().find(|(known, _)| *known == tag) {
            Some((_, existing)) => *existing = prefix,
            None => self.decorations.push((tag, prefix)),
        }
        self
    }
}

impl Default for EmojiTagDecorator {
    fn default() -> Self {
        Self::new()
    }
}

impl TagDecorator for EmojiTagDecorator {
    fn name(&self) -> &str {
        "EmojiTagDecorator"
    }

    fn decorate(&self, tag: &str) -> String {
        match self.decorations.iter().find(|(known, _)| known == tag) {
            Some((_, prefix)) => format!("{} {}", prefix, tag),
            None => tag.to_string(),
        }
    }
}

/// Leaves tags exactly as the catalog spells them.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTags;

impl TagDecorator for PlainTags {
    fn name(&self) -> &str {
        "PlainTags"
    }

    fn decorate(&self, tag: &str) -> String {
        tag.to_string()
    }
}
