//! Projection of raw upstream data into the formatted facts that message
//! templates consume.
//!
//! `MovieFacts` borrows a [`RawMovieData`] and formats one field at a time.
//! Each accessor fails independently, so a movie with a single listed actor
//! still has a perfectly good title, runtime and release date.

use chrono::NaiveDate;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Serialize;

use crate::error::{FactError, Result};
use crate::types::{MovieInfo, RawMovieData, RawReview};

/// A review ready to drop into a template.
///
/// Real reviews have `publication` and `quote` wrapped in literal double
/// quotes; the placeholder review keeps its own fixed quoting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Review {
    pub critic: String,
    pub publication: String,
    pub quote: String,
}

impl Review {
    /// Stand-in used when the movie has no reviews at all.
    pub fn placeholder() -> Self {
        Self {
            critic: "your Mom".to_string(),
            publication: "\"Up Your Butt\"".to_string(),
            quote: "Go see this movie!".to_string(),
        }
    }

    fn quoted(raw: &RawReview) -> Self {
        Self {
            critic: raw.critic.clone(),
            publication: format!("\"{}\"", raw.publication),
            quote: format!("\"{}\"", raw.quote),
        }
    }
}

/// Read-only view over one movie's raw data.
#[derive(Debug, Clone, Copy)]
pub struct MovieFacts<'a> {
    info: &'a MovieInfo,
    reviews: &'a [RawReview],
}

impl<'a> MovieFacts<'a> {
    pub fn new(data: &'a RawMovieData) -> Self {
        Self {
            info: &data.info,
            reviews: &data.reviews,
        }
    }

    pub fn title(&self) -> Result<&'a str> {
        match self.info.title.as_deref() {
            Some(title) if !title.is_empty() => Ok(title),
            _ => Err(FactError::MissingField { field: "info.title" }),
        }
    }

    /// All lead actors in billing order.
    pub fn actors(&self) -> Vec<&'a str> {
        self.info
            .abridged_cast
            .iter()
            .map(|person| person.name.as_str())
            .collect()
    }

    /// The `n`th billed actor, zero-based.
    pub fn actor(&self, n: usize) -> Result<&'a str> {
        self.info
            .abridged_cast
            .get(n)
            .map(|person| person.name.as_str())
            .ok_or(FactError::NotEnoughActors {
                wanted: n + 1,
                found: self.info.abridged_cast.len(),
            })
    }

    /// First listed director.
    pub fn director(&self) -> Result<&'a str> {
        self.info
            .abridged_directors
            .first()
            .map(|person| person.name.as_str())
            .ok_or(FactError::NoDirector)
    }

    pub fn runtime(&self) -> Result<String> {
        self.info
            .runtime
            .ok_or(FactError::MissingRuntime)
            .and_then(format_runtime)
    }

    pub fn release_date(&self) -> Result<String> {
        let raw = self
            .info
            .release_dates
            .theater
            .as_deref()
            .ok_or(FactError::MissingField {
                field: "info.release_dates.theater",
            })?;
        format_release_date(raw)
    }

    pub fn critics_score(&self) -> Result<String> {
        match self.info.ratings.critics_score {
            Some(score) if score >= 0 => Ok(format_critics_score(score)),
            _ => Err(FactError::MissingField {
                field: "info.ratings.critics_score",
            }),
        }
    }

    /// Critics consensus, or the stock line when the API has none.
    pub fn consensus_blurb(&self) -> Result<String> {
        match self.info.critics_consensus.as_deref() {
            Some(blurb) if !blurb.is_empty() => Ok(blurb.to_string()),
            _ => Ok(consensus_fallback(self.title()?)),
        }
    }

    /// Pick one review uniformly at random.
    ///
    /// Callers that render several templates should call this once and
    /// reuse the result (see [`crate::FactSheet`]).
    pub fn review<R: Rng + ?Sized>(&self, rng: &mut R) -> Review {
        self.reviews
            .choose(rng)
            .map(Review::quoted)
            .unwrap_or_else(Review::placeholder)
    }
}

/// "142 minutes". Zero or negative minutes count as missing.
pub fn format_runtime(minutes: i64) -> Result<String> {
    if minutes <= 0 {
        return Err(FactError::MissingRuntime);
    }
    Ok(format!("{} minutes", minutes))
}

/// "2020-03-05" -> "March 5, 2020"
pub fn format_release_date(raw: &str) -> Result<String> {
    let invalid = || FactError::InvalidReleaseDate {
        value: raw.to_string(),
    };

    let mut parts = raw.split('-');
    let (Some(year), Some(month), Some(day), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };

    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    let day: u32 = day.parse().map_err(|_| invalid())?;

    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)?;
    Ok(date.format("%B %-d, %Y").to_string())
}

/// "87%"
pub fn format_critics_score(score: i64) -> String {
    format!("{}%", score)
}

pub fn consensus_fallback(title: &str) -> String {
    format!(
        "{} has been called a film with a beginning, middle, AND end.",
        title
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Person, Ratings, ReleaseDates};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn inception() -> RawMovieData {
        RawMovieData {
            info: MovieInfo {
                title: Some("Inception".to_string()),
                abridged_cast: vec![
                    Person { name: "Leonardo DiCaprio".to_string() },
                    Person { name: "Joseph Gordon-Levitt".to_string() },
                ],
                abridged_directors: vec![Person { name: "Christopher Nolan".to_string() }],
                runtime: Some(148),
                critics_consensus: Some("Smart, innovative, and thrilling.".to_string()),
                ratings: Ratings { critics_score: Some(87) },
                release_dates: ReleaseDates { theater: Some("2010-07-16".to_string()) },
            },
            reviews: vec![
                RawReview::new("Peter Travers", "Rolling Stone", "Wildly ingenious."),
                RawReview::new("A.O. Scott", "New York Times", "Clever."),
                RawReview::new("Roger Ebert", "Chicago Sun-Times", "A labyrinth."),
            ],
        }
    }

    #[test]
    fn test_release_date_drops_leading_zero() {
        assert_eq!(format_release_date("2020-03-05").unwrap(), "March 5, 2020");
        assert_eq!(format_release_date("2010-07-16").unwrap(), "July 16, 2010");
    }

    #[test]
    fn test_release_date_rejects_malformed_input() {
        for raw in ["", "2010-07", "2010-07-16-01", "2010-13-01", "2010-02-30", "July 16"] {
            assert!(
                matches!(format_release_date(raw), Err(FactError::InvalidReleaseDate { .. })),
                "{:?} should be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_runtime_and_score_formatting() {
        assert_eq!(format_runtime(142).unwrap(), "142 minutes");
        assert_eq!(format_runtime(0), Err(FactError::MissingRuntime));
        assert_eq!(format_critics_score(87), "87%");
    }

    #[test]
    fn test_complete_movie_yields_non_empty_facts() {
        let data = inception();
        let facts = MovieFacts::new(&data);

        assert_eq!(facts.title().unwrap(), "Inception");
        assert_eq!(facts.director().unwrap(), "Christopher Nolan");
        assert_eq!(facts.actor(0).unwrap(), "Leonardo DiCaprio");
        assert_eq!(facts.actor(1).unwrap(), "Joseph Gordon-Levitt");
        assert_eq!(facts.runtime().unwrap(), "148 minutes");
        assert_eq!(facts.release_date().unwrap(), "July 16, 2010");
        assert_eq!(facts.critics_score().unwrap(), "87%");
        assert_eq!(facts.consensus_blurb().unwrap(), "Smart, innovative, and thrilling.");
    }

    #[test]
    fn test_second_actor_missing_is_an_error() {
        let mut data = inception();
        data.info.abridged_cast.truncate(1);
        let facts = MovieFacts::new(&data);

        assert!(facts.actor(0).is_ok());
        assert_eq!(
            facts.actor(1),
            Err(FactError::NotEnoughActors { wanted: 2, found: 1 })
        );
    }

    #[test]
    fn test_missing_director_and_score() {
        let mut data = inception();
        data.info.abridged_directors.clear();
        data.info.ratings.critics_score = Some(-1);
        let facts = MovieFacts::new(&data);

        assert_eq!(facts.director(), Err(FactError::NoDirector));
        assert!(matches!(facts.critics_score(), Err(FactError::MissingField { .. })));
    }

    #[test]
    fn test_blank_or_absent_consensus_falls_back() {
        let expected = "Inception has been called a film with a beginning, middle, AND end.";

        let mut data = inception();
        data.info.critics_consensus = Some(String::new());
        assert_eq!(MovieFacts::new(&data).consensus_blurb().unwrap(), expected);

        data.info.critics_consensus = None;
        assert_eq!(MovieFacts::new(&data).consensus_blurb().unwrap(), expected);
    }

    #[test]
    fn test_empty_reviews_use_placeholder() {
        let mut data = inception();
        data.reviews.clear();
        let facts = MovieFacts::new(&data);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..10 {
            let review = facts.review(&mut rng);
            assert_eq!(review.critic, "your Mom");
            assert_eq!(review.publication, "\"Up Your Butt\"");
            assert_eq!(review.quote, "Go see this movie!");
        }
    }

    #[test]
    fn test_review_is_quoted_and_drawn_from_list() {
        let data = inception();
        let facts = MovieFacts::new(&data);
        let mut rng = StdRng::seed_from_u64(42);

        let review = facts.review(&mut rng);
        let source = data
            .reviews
            .iter()
            .find(|r| r.critic == review.critic)
            .expect("review should come from the list");

        assert_eq!(review.publication, format!("\"{}\"", source.publication));
        assert_eq!(review.quote, format!("\"{}\"", source.quote));
    }

    #[test]
    fn test_every_review_is_eventually_selected() {
        let data = inception();
        let facts = MovieFacts::new(&data);
        let mut rng = StdRng::seed_from_u64(1);

        let seen: HashSet<String> = (0..200).map(|_| facts.review(&mut rng).critic).collect();
        assert_eq!(seen.len(), data.reviews.len());
    }
}
