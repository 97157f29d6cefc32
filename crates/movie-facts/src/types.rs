//! Raw upstream types for the movie-information API.
//!
//! These mirror the JSON the API returns, and nothing more. No invariants
//! are enforced here beyond "the JSON has this shape": fields the API is
//! known to omit or blank out are `Option` or `#[serde(default)]`, and the
//! checks live in [`crate::facts::MovieFacts`] where a missing value can be
//! reported against the field that needed it.

use serde::{Deserialize, Deserializer, Serialize};

/// Identifier the upstream API uses for a movie (numeric, but opaque to us)
pub type MovieId = String;

// =============================================================================
// Combined payload
// =============================================================================

/// Everything fetched for one movie: the info document plus its reviews.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawMovieData {
    pub info: MovieInfo,
    #[serde(default)]
    pub reviews: Vec<RawReview>,
}

// =============================================================================
// Movie info endpoint
// =============================================================================

/// The movie-info document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MovieInfo {
    #[serde(default)]
    pub title: Option<String>,
    /// Lead actors, billing order
    #[serde(default)]
    pub abridged_cast: Vec<Person>,
    #[serde(default)]
    pub abridged_directors: Vec<Person>,
    /// Minutes. The API sends `""` when it doesn't know.
    #[serde(default, deserialize_with = "number_or_blank")]
    pub runtime: Option<i64>,
    #[serde(default)]
    pub critics_consensus: Option<String>,
    #[serde(default)]
    pub ratings: Ratings,
    #[serde(default)]
    pub release_dates: ReleaseDates,
}

/// A cast or crew entry. The API sends more keys; only the name is used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ratings {
    /// Percentage. `-1` means "no score yet".
    #[serde(default, deserialize_with = "number_or_blank")]
    pub critics_score: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReleaseDates {
    /// "YYYY-MM-DD"
    #[serde(default)]
    pub theater: Option<String>,
}

// =============================================================================
// Reviews endpoint
// =============================================================================

/// Body of the reviews endpoint. Only the list is kept.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewPage {
    #[serde(default)]
    pub reviews: Vec<RawReview>,
}

/// One critic review as the API sends it (no quoting applied).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawReview {
    #[serde(default)]
    pub critic: String,
    #[serde(default)]
    pub publication: String,
    #[serde(default)]
    pub quote: String,
}

impl RawReview {
    pub fn new(
        critic: impl Into<String>,
        publication: impl Into<String>,
        quote: impl Into<String>,
    ) -> Self {
        Self {
            critic: critic.into(),
            publication: publication.into(),
            quote: quote.into(),
        }
    }
}

// =============================================================================
// Lenient number decoding
// =============================================================================

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(i64),
    Text(String),
}

/// Accept `142`, `"142"`, `""` or `null`. Blank and null both become `None`.
fn number_or_blank<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Number(n)) => Ok(Some(n)),
        Some(NumberOrText::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            text.parse()
                .map(Some)
                .map_err(|e| serde::de::Error::custom(format!("Invalid number {:?}: {}", text, e)))
        }
    }
}
