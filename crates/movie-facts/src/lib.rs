//! # Movie Facts Crate
//!
//! Turns the raw movie-information API payload into the formatted facts
//! that message templates are filled with.
//!
//! ## Main Components
//!
//! - **types**: Raw upstream JSON shapes (RawMovieData, MovieInfo, RawReview)
//! - **facts**: MovieFacts, a borrowed projection with one accessor per fact
//! - **sheet**: FactSheet, the per-request snapshot of every placeholder
//! - **error**: FactError for missing or malformed upstream data
//!
//! ## Example Usage
//!
//! ```ignore
//! use movie_facts::{FactSheet, MovieFacts, RawMovieData};
//!
//! let data: RawMovieData = serde_json::from_str(&body)?;
//! let facts = MovieFacts::new(&data);
//! let sheet = FactSheet::snapshot(&facts, &mut rand::rng())?;
//!
//! println!("{} runs {}", sheet.title(), sheet.value("runtime").unwrap_or("?"));
//! ```
//!
//! Randomness is always passed in by the caller, so tests seed a
//! `StdRng` and get the same review every time.

pub mod error;
pub mod facts;
pub mod sheet;
pub mod types;

pub use error::{FactError, Result};
pub use facts::{
    MovieFacts, Review, consensus_fallback, format_critics_score, format_release_date,
    format_runtime,
};
pub use sheet::{FactSheet, PLACEHOLDERS};
pub use types::{
    MovieId, MovieInfo, Person, Ratings, RawMovieData, RawReview, ReleaseDates, ReviewPage,
};
