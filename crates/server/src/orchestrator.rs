//! # Message Orchestrator
//!
//! Coordinates one movie request end to end:
//! 1. Fetch the info document and reviews (in parallel, via the source)
//! 2. Snapshot the placeholder facts, picking one review for the request
//! 3. Render every catalog entry and group the results by decorated tag
//!
//! The catalog and engine are shared read-only across requests; each
//! request gets its own facts and its own random review.

use std::sync::Arc;
use std::time::Instant;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{debug, info};

use message_catalog::Catalog;
use movie_facts::{FactSheet, MovieFacts, RawMovieData, Review};
use templating::{MessagesByTag, TagGroup, TemplateEngine};
use upstream::MovieSource;

use crate::error::Result;

/// Query response: `{"title": ..., "messages": {decorated tag: [message, ...]}}`
#[derive(Debug, Clone, Serialize)]
pub struct MovieMessages {
    pub title: String,
    pub messages: MessagesByTag,
}

/// Facts and messages for one movie, before shaping for a response
#[derive(Debug, Clone)]
pub struct ComposedMovie {
    pub sheet: FactSheet,
    pub messages: MessagesByTag,
}

/// Everything the results page shows.
///
/// Fields whose fact failed are `None` and simply left off the page.
#[derive(Debug, Clone, Serialize)]
pub struct MoviePage {
    pub title: String,
    pub director: Option<String>,
    pub actors: Vec<String>,
    pub runtime: Option<String>,
    pub release_date: Option<String>,
    pub critics_score: Option<String>,
    pub consensus: Option<String>,
    pub review: Review,
    pub groups: Vec<TagGroup>,
}

/// Main orchestrator shared by every request handler
#[derive(Clone)]
pub struct MessageOrchestrator {
    source: Arc<dyn MovieSource>,
    catalog: Arc<Catalog>,
    engine: Arc<TemplateEngine>,
}

impl MessageOrchestrator {
    pub fn new(source: Arc<dyn MovieSource>, catalog: Arc<Catalog>) -> Self {
        Self {
            source,
            catalog,
            engine: Arc::new(TemplateEngine::new()),
        }
    }

    pub fn with_engine(mut self, engine: TemplateEngine) -> Self {
        self.engine = Arc::new(engine);
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Fetch raw data for `movie_id`, timing the round trip.
    pub async fn fetch(&self, movie_id: &str) -> Result<RawMovieData> {
        let start_time = Instant::now();
        let data = self.source.fetch(movie_id).await?;
        info!(
            "Fetched movie {} ({} reviews) in {:?}",
            movie_id,
            data.reviews.len(),
            start_time.elapsed()
        );
        Ok(data)
    }

    /// Build the fact sheet and render the catalog against it.
    ///
    /// Pure apart from `rng`, which picks the review.
    pub fn compose<R: Rng + ?Sized>(
        &self,
        data: &RawMovieData,
        rng: &mut R,
    ) -> Result<ComposedMovie> {
        let facts = MovieFacts::new(data);
        let sheet = FactSheet::snapshot(&facts, rng)?;
        for (field, err) in sheet.failures() {
            debug!("Fact {} unavailable for {}: {}", field, sheet.title(), err);
        }

        let messages = self.engine.render(&self.catalog, &sheet)?;
        info!(
            "Rendered {} messages in {} tag groups for {}",
            messages.message_count(),
            messages.len(),
            sheet.title()
        );

        Ok(ComposedMovie { sheet, messages })
    }

    /// Main entry point: the query operation.
    pub async fn movie_messages(&self, movie_id: &str) -> Result<MovieMessages> {
        let data = self.fetch(movie_id).await?;
        let composed = self.compose(&data, &mut StdRng::from_os_rng())?;
        Ok(MovieMessages {
            title: composed.sheet.title().to_string(),
            messages: composed.messages,
        })
    }

    /// Data for the HTML results page.
    pub async fn movie_page(&self, movie_id: &str) -> Result<MoviePage> {
        let data = self.fetch(movie_id).await?;
        let composed = self.compose(&data, &mut StdRng::from_os_rng())?;
        Ok(build_page(&data, composed))
    }
}

/// Shape composed output into page data.
pub fn build_page(data: &RawMovieData, composed: ComposedMovie) -> MoviePage {
    let sheet = &composed.sheet;
    let field = |name: &str| sheet.value(name).map(str::to_string);

    MoviePage {
        title: sheet.title().to_string(),
        director: field("director"),
        actors: MovieFacts::new(data)
            .actors()
            .into_iter()
            .map(str::to_string)
            .collect(),
        runtime: field("runtime"),
        release_date: field("releasedate"),
        critics_score: field("rtscore"),
        consensus: field("rtblurb"),
        review: sheet.review().clone(),
        groups: composed.messages.groups().to_vec(),
    }
}
