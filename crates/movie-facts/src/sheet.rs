//! Per-request snapshot of every template placeholder.
//!
//! Rendering a catalog touches the same facts dozens of times. The sheet
//! evaluates each placeholder once, including the random review pick, so
//! every message in one response quotes the same critic.

use std::collections::BTreeMap;

use rand::Rng;

use crate::error::{FactError, Result};
use crate::facts::{MovieFacts, Review};

/// Placeholder names message templates may reference.
pub const PLACEHOLDERS: [&str; 11] = [
    "title",
    "director",
    "runtime",
    "releasedate",
    "actor",
    "actor2",
    "review_q",
    "review_pub",
    "review_critic",
    "rtblurb",
    "rtscore",
];

/// Immutable placeholder -> value (or failure) mapping for one movie.
#[derive(Debug, Clone)]
pub struct FactSheet {
    title: String,
    review: Review,
    fields: BTreeMap<&'static str, Result<String>>,
}

impl FactSheet {
    /// Evaluate all placeholders against `facts`.
    ///
    /// Only a missing title fails the snapshot; every other failure is
    /// stored and reported when a template asks for that field.
    pub fn snapshot<R: Rng + ?Sized>(facts: &MovieFacts<'_>, rng: &mut R) -> Result<Self> {
        let title = facts.title()?.to_string();
        let review = facts.review(rng);

        let mut fields = BTreeMap::new();
        fields.insert("title", Ok(title.clone()));
        fields.insert("director", facts.director().map(str::to_string));
        fields.insert("runtime", facts.runtime());
        fields.insert("releasedate", facts.release_date());
        fields.insert("actor", facts.actor(0).map(str::to_string));
        fields.insert("actor2", facts.actor(1).map(str::to_string));
        fields.insert("review_q", Ok(review.quote.clone()));
        fields.insert("review_pub", Ok(review.publication.clone()));
        fields.insert("review_critic", Ok(review.critic.clone()));
        fields.insert("rtblurb", facts.consensus_blurb());
        fields.insert("rtscore", facts.critics_score());

        Ok(Self {
            title,
            review,
            fields,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// The review chosen for this snapshot.
    pub fn review(&self) -> &Review {
        &self.review
    }

    /// `None` means the name is not a placeholder at all.
    pub fn lookup(&self, name: &str) -> Option<&Result<String>> {
        self.fields.get(name)
    }

    /// Value of a placeholder, skipping ones that failed to extract.
    pub fn value(&self, name: &str) -> Option<&str> {
        match self.fields.get(name) {
            Some(Ok(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Placeholders whose extraction failed, with the reason.
    pub fn failures(&self) -> impl Iterator<Item = (&'static str, &FactError)> + '_ {
        self.fields
            .iter()
            .filter_map(|(name, value)| value.as_ref().err().map(|e| (*name, e)))
    }
}
