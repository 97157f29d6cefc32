//! Catalog types: template entries and the ordered catalog holding them.

use serde::Serialize;
use std::path::Path;

use crate::error::Result;
use crate::parser;

/// One catalog row: the tags it is filed under and its message template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateEntry {
    /// Trimmed tag names, first-seen order, no duplicates
    pub tags: Vec<String>,
    /// Format string with `{placeholder}` fields, stored verbatim
    pub template: String,
    /// Line the row started on in the source (1-based, header is line 1)
    pub line: usize,
}

impl TemplateEntry {
    pub fn new<I, S>(tags: I, template: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut entry = Self {
            tags: Vec::new(),
            template: template.into(),
            line: 0,
        };
        for tag in tags {
            entry.add_tag(tag.into());
        }
        entry
    }

    pub(crate) fn add_tag(&mut self, tag: String) {
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
    }
}

/// Ordered list of template entries.
///
/// Built once and never mutated afterwards, so it can sit behind an `Arc`
/// and be shared by every request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Catalog {
    entries: Vec<TemplateEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<TemplateEntry>) -> Self {
        Self { entries }
    }

    /// Load a catalog from a CSV file with `Tags` and `Message` columns.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        parser::load_catalog(path)
    }

    /// Parse a catalog from CSV text.
    pub fn parse(content: &str) -> Result<Self> {
        parser::parse_catalog(content)
    }

    pub fn entries(&self) -> &[TemplateEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct tags with how many entries carry each, first-seen order.
    pub fn tag_counts(&self) -> Vec<(&str, usize)> {
        let mut counts: Vec<(&str, usize)> = Vec::new();
        for tag in self.entries.iter().flat_map(|e| e.tags.iter()) {
            match counts.iter_mut().find(|(seen, _)| *seen == tag.as_str()) {
                Some((_, count)) => *count += 1,
                None => counts.push((tag.as_str(), 1)),
            }
        }
        counts
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a TemplateEntry;
    type IntoIter = std::slice::Iter<'a, TemplateEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
