//! In-memory movie source backed by saved API responses.
//!
//! Used by the CLI's offline `render` command and by the server tests.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use movie_facts::{MovieId, RawMovieData};
use upstream::{MovieSource, UpstreamError};

/// Serves movies from a fixed map instead of the network
#[derive(Debug, Clone, Default)]
pub struct StaticMovieSource {
    movies: HashMap<MovieId, RawMovieData>,
}

impl StaticMovieSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_movie(mut self, movie_id: impl Into<MovieId>, data: RawMovieData) -> Self {
        self.movies.insert(movie_id.into(), data);
        self
    }

    /// Load one saved response, `{"info": {...}, "reviews": [...]}`, under `movie_id`.
    pub fn from_file(path: &Path, movie_id: impl Into<MovieId>) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read fixture {}", path.display()))?;
        let data: RawMovieData = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse fixture {}", path.display()))?;
        Ok(Self::new().with_movie(movie_id, data))
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

#[async_trait]
impl MovieSource for StaticMovieSource {
    async fn fetch(&self, movie_id: &str) -> upstream::Result<RawMovieData> {
        self.movies
            .get(movie_id)
            .cloned()
            .ok_or_else(|| UpstreamError::MovieNotFound {
                movie_id: movie_id.to_string(),
                message: "Could not find a movie with the specified id".to_string(),
            })
    }
}
