//! The TemplateEngine renders a whole catalog against one FactSheet.
//!
//! ## Algorithm
//! For each catalog entry, in catalog order:
//! 1. Substitute the sheet's facts into the template
//! 2. Expand `:shortcodes:` in the result
//! 3. For each of the entry's tags, decorate the tag and append a copy of
//!    the message to that decorated tag's group (creating it on first use)
//!
//! Groups keep first-seen order; messages within a group keep catalog order.

use message_catalog::{Catalog, TemplateEntry};
use movie_facts::FactSheet;
use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::{debug, warn};

use crate::decorators::EmojiTagDecorator;
use crate::emoji::emojize;
use crate::error::{RenderError, Result};
use crate::placeholder;
use crate::traits::TagDecorator;

/// What to do when one catalog entry fails to render
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Fail the whole render on the first bad entry
    #[default]
    Abort,
    /// Log the bad entry and leave it out
    SkipEntry,
}

/// Messages under one decorated tag
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TagGroup {
    pub tag: String,
    pub messages: Vec<String>,
}

/// Decorated tag -> rendered messages, in first-seen order.
///
/// Serializes as a JSON object whose keys keep that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessagesByTag {
    groups: Vec<TagGroup>,
}

impl MessagesByTag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `message` to `tag`'s group, creating the group if needed.
    pub fn push(&mut self, tag: String, message: String) {
        match self.groups.iter_mut().find(|group| group.tag == tag) {
            Some(group) => group.messages.push(message),
            None => self.groups.push(TagGroup {
                tag,
                messages: vec![message],
            }),
        }
    }

    pub fn get(&self, tag: &str) -> Option<&[String]> {
        self.groups
            .iter()
            .find(|group| group.tag == tag)
            .map(|group| group.messages.as_slice())
    }

    pub fn groups(&self) -> &[TagGroup] {
        &self.groups
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|group| group.tag.as_str())
    }

    /// Number of groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total messages across all groups
    pub fn message_count(&self) -> usize {
        self.groups.iter().map(|group| group.messages.len()).sum()
    }
}

impl Serialize for MessagesByTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for group in &self.groups {
            map.serialize_entry(&group.tag, &group.messages)?;
        }
        map.end()
    }
}

/// Renders catalogs into tag-grouped messages.
///
/// ## Usage
/// ```ignore
/// let engine = TemplateEngine::new();
/// let messages = engine.render(&catalog, &sheet)?;
/// for group in messages.groups() {
///     println!("{}: {} messages", group.tag, group.messages.len());
/// }
/// ```
pub struct TemplateEngine {
    decorator: Box<dyn TagDecorator>,
    policy: FailurePolicy,
}

impl TemplateEngine {
    /// Engine with emoji tag decorations that aborts on the first failure.
    pub fn new() -> Self {
        Self {
            decorator: Box::new(EmojiTagDecorator::new()),
            policy: FailurePolicy::Abort,
        }
    }

    /// Replace the tag decorator (builder pattern).
    pub fn with_decorator(mut self, decorator: impl TagDecorator + 'static) -> Self {
        self.decorator = Box::new(decorator);
        self
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    pub fn decorate(&self, tag: &str) -> String {
        self.decorator.decorate(tag)
    }

    /// Render a single template: substitute facts, then expand shortcodes.
    pub fn render_template(&self, template: &str, sheet: &FactSheet) -> Result<String> {
        let message = placeholder::render(template, sheet)?;
        Ok(emojize(&message).into_owned())
    }

    /// Render every catalog entry and group the results by decorated tag.
    pub fn render(&self, catalog: &Catalog, sheet: &FactSheet) -> Result<MessagesByTag> {
        let mut messages = MessagesByTag::new();
        let mut skipped = 0;

        for (index, entry) in catalog.entries().iter().enumerate() {
            let message = match self.render_entry(index, entry, sheet) {
                Ok(message) => message,
                Err(e) if self.policy == FailurePolicy::SkipEntry => {
                    warn!("Skipping message for {:?}: {}", sheet.title(), e);
                    skipped += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };

            for tag in &entry.tags {
                messages.push(self.decorator.decorate(tag), message.clone());
            }
        }

        debug!(
            "Rendered {} messages in {} groups for {:?} with {} (skipped {})",
            messages.message_count(),
            messages.len(),
            sheet.title(),
            self.decorator.name(),
            skipped
        );
        Ok(messages)
    }

    fn render_entry(&self, index: usize, entry: &TemplateEntry, sheet: &FactSheet) -> Result<String> {
        self.render_template(&entry.template, sheet)
            .map_err(|source| RenderError::Entry {
                index,
                line: entry.line,
                source: Box::new(source),
            })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decorators::PlainTags;
    use movie_facts::{MovieFacts, MovieInfo, Person, RawMovieData, RawReview};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn sheet_with_cast(cast: &[&str]) -> FactSheet {
        let data = RawMovieData {
            info: MovieInfo {
                title: Some("Alien".to_string()),
                abridged_cast: cast
                    .iter()
                    .map(|name| Person { name: name.to_string() })
                    .collect(),
                runtime: Some(117),
                ..Default::default()
            },
            reviews: vec![
                RawReview::new("Critic A", "Paper A", "Terrifying."),
                RawReview::new("Critic B", "Paper B", "Relentless."),
                RawReview::new("Critic C", "Paper C", "Perfect."),
            ],
        };
        FactSheet::snapshot(&MovieFacts::new(&data), &mut StdRng::seed_from_u64(9)).unwrap()
    }

    #[test]
    fn test_same_tag_accumulates_in_catalog_order() {
        let catalog = Catalog::new(vec![
            TemplateEntry::new(["Aggressively"], "Watch {title}."),
            TemplateEntry::new(["Gently"], "Maybe {title}?"),
            TemplateEntry::new(["Aggressively"], "{title}. Now."),
        ]);

        let messages = TemplateEngine::new()
            .render(&catalog, &sheet_with_cast(&["Sigourney Weaver"]))
            .unwrap();

        assert_eq!(messages.len(), 2);
        assert_eq!(
            messages.get("😡 Aggressively").unwrap(),
            &["Watch Alien.".to_string(), "Alien. Now.".to_string()]
        );
        assert_eq!(messages.tags().collect::<Vec<_>>(), vec!["😡 Aggressively", "😌 Gently"]);
    }

    #[test]
    fn test_multi_tag_entry_lands_in_each_group() {
        let catalog = Catalog::new(vec![TemplateEntry::new(
            ["Gently", "With a movie quote"],
            "{review_critic} said {review_q}",
        )]);

        let sheet = sheet_with_cast(&["Sigourney Weaver"]);
        let messages = TemplateEngine::new().render(&catalog, &sheet).unwrap();

        let expected = format!("{} said {}", sheet.review().critic, sheet.review().quote);
        assert_eq!(messages.get("😌 Gently").unwrap(), &[expected.clone()]);
        assert_eq!(messages.get("🎬💬 With a movie quote").unwrap(), &[expected]);
        assert_eq!(messages.message_count(), 2);
    }

    #[test]
    fn test_every_message_quotes_the_same_review() {
        let catalog = Catalog::new(
            (0..10)
                .map(|_| TemplateEntry::new(["Gently"], "{review_critic}"))
                .collect(),
        );
        let messages = TemplateEngine::new()
            .render(&catalog, &sheet_with_cast(&["Sigourney Weaver"]))
            .unwrap();

        let critics = messages.get("😌 Gently").unwrap();
        assert!(critics.iter().all(|critic| critic == &critics[0]));
    }

    #[test]
    fn test_shortcodes_in_templates_are_expanded() {
        let catalog = Catalog::new(vec![TemplateEntry::new(["Sarcastically"], ":popcorn: {title}")]);
        let messages = TemplateEngine::new()
            .render(&catalog, &sheet_with_cast(&[]))
            .unwrap();
        assert_eq!(messages.get("Sarcastically").unwrap(), &["🍿 Alien".to_string()]);
    }

    #[test]
    fn test_abort_policy_fails_on_missing_actor() {
        let catalog = Catalog::new(vec![
            TemplateEntry::new(["Gently"], "{title}"),
            TemplateEntry::new(["Gently"], "{actor} and {actor2}"),
        ]);

        let err = TemplateEngine::new()
            .render(&catalog, &sheet_with_cast(&["Sigourney Weaver"]))
            .unwrap_err();

        assert!(matches!(err, RenderError::Entry { index: 1, .. }));
        assert!(err.is_missing_fact());
    }

    #[test]
    fn test_skip_policy_drops_only_failed_entries() {
        let catalog = Catalog::new(vec![
            TemplateEntry::new(["Gently"], "{title}"),
            TemplateEntry::new(["Gently"], "{actor} and {actor2}"),
            TemplateEntry::new(["Gently"], "{nonsense}"),
            TemplateEntry::new(["Gently"], "{actor}"),
        ]);

        let messages = TemplateEngine::new()
            .with_policy(FailurePolicy::SkipEntry)
            .render(&catalog, &sheet_with_cast(&["Sigourney Weaver"]))
            .unwrap();

        assert_eq!(
            messages.get("😌 Gently").unwrap(),
            &["Alien".to_string(), "Sigourney Weaver".to_string()]
        );
    }

    #[test]
    fn test_plain_decorator_keeps_raw_tags() {
        let catalog = Catalog::new(vec![TemplateEntry::new(["Gently"], "{title}")]);
        let messages = TemplateEngine::new()
            .with_decorator(PlainTags)
            .render(&catalog, &sheet_with_cast(&[]))
            .unwrap();
        assert_eq!(messages.get("Gently").unwrap(), &["Alien".to_string()]);
    }

    #[test]
    fn test_serializes_as_ordered_object() {
        let mut messages = MessagesByTag::new();
        messages.push("b".to_string(), "1".to_string());
        messages.push("a".to_string(), "2".to_string());
        messages.push("b".to_string(), "3".to_string());

        assert_eq!(
            serde_json::to_string(&messages).unwrap(),
            r#"{"b":["1","3"],"a":["2"]}"#
        );
    }
}
