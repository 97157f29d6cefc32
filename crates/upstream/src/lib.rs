//! Client for the upstream movie-information API.
//!
//! This crate fetches the two documents a movie's messages are built from:
//! - `GET {base}/movies/{id}.json` for the movie info
//! - `GET {base}/movies/{id}/reviews.json` for critic reviews
//!
//! Both requests carry the API key as an `apikey` query parameter. The key
//! never appears in logs or errors: endpoints are reported without their
//! query string.

use std::time::Duration;

use async_trait::async_trait;
use movie_facts::{MovieInfo, RawMovieData, RawReview, ReviewPage};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, info};
use url::Url;

/// Errors that can occur when talking to the movie API
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("Invalid API base URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid movie id {movie_id:?}")]
    InvalidMovieId { movie_id: String },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Movie API unreachable at {endpoint}: {source}")]
    Unavailable {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Movie API returned HTTP {status} for {endpoint}")]
    Status { endpoint: String, status: u16 },

    #[error("Unexpected response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Movie {movie_id} not found: {message}")]
    MovieNotFound { movie_id: String, message: String },
}

impl UpstreamError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, UpstreamError::MovieNotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, UpstreamError>;

/// Connection settings for the movie API.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Everything before `/movies/...`
    pub base_url: String,
    pub api_key: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl UpstreamConfig {
    pub const DEFAULT_BASE_URL: &'static str = "http://api.rottentomatoes.com/api/public/v1.0";
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Anything that can produce raw movie data for an id.
///
/// The HTTP client is the real implementation; tests plug in fixtures.
#[async_trait]
pub trait MovieSource: Send + Sync {
    async fn fetch(&self, movie_id: &str) -> Result<RawMovieData>;
}

/// HTTP client for the movie API
#[derive(Debug, Clone)]
pub struct MovieDataFetcher {
    client: Client,
    base: Url,
    api_key: String,
}

impl MovieDataFetcher {
    /// Build a fetcher from `config`.
    ///
    /// Fails if the base URL doesn't parse or can't take path segments.
    pub fn new(config: UpstreamConfig) -> Result<Self> {
        let base = Url::parse(&config.base_url).map_err(|e| UpstreamError::InvalidUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(UpstreamError::InvalidUrl {
                url: config.base_url,
                reason: "URL cannot have path segments".to_string(),
            });
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("movie-messages/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(UpstreamError::Client)?;

        info!("Movie API client ready for {}", redact(&base));
        Ok(Self {
            client,
            base,
            api_key: config.api_key,
        })
    }

    /// `{base}/movies/{id}.json?apikey=...`
    pub fn info_url(&self, movie_id: &str) -> Result<Url> {
        let file = format!("{}.json", movie_id);
        self.endpoint(movie_id, &[file.as_str()])
    }

    /// `{base}/movies/{id}/reviews.json?apikey=...`
    pub fn reviews_url(&self, movie_id: &str) -> Result<Url> {
        self.endpoint(movie_id, &[movie_id, "reviews.json"])
    }

    fn endpoint(&self, movie_id: &str, segments: &[&str]) -> Result<Url> {
        if movie_id.trim().is_empty() {
            return Err(UpstreamError::InvalidMovieId {
                movie_id: movie_id.to_string(),
            });
        }

        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| UpstreamError::InvalidUrl {
                url: self.base.to_string(),
                reason: "URL cannot have path segments".to_string(),
            })?
            .pop_if_empty()
            .push("movies")
            .extend(segments);
        url.query_pairs_mut().append_pair("apikey", &self.api_key);
        Ok(url)
    }

    /// Fetch the movie-info document.
    pub async fn fetch_info(&self, movie_id: &str) -> Result<MovieInfo> {
        let url = self.info_url(movie_id)?;
        let endpoint = redact(&url);
        let value = self.get_json(movie_id, url).await?;
        serde_json::from_value(value).map_err(|source| UpstreamError::Decode { endpoint, source })
    }

    /// Fetch the critic reviews.
    pub async fn fetch_reviews(&self, movie_id: &str) -> Result<Vec<RawReview>> {
        let url = self.reviews_url(movie_id)?;
        let endpoint = redact(&url);
        let value = self.get_json(movie_id, url).await?;
        let page: ReviewPage = serde_json::from_value(value)
            .map_err(|source| UpstreamError::Decode { endpoint, source })?;
        Ok(page.reviews)
    }

    /// GET a JSON document.
    ///
    /// An `{"error": "..."}` body on a 2xx or 404 response means the API
    /// doesn't know the movie.
    async fn get_json(&self, movie_id: &str, url: Url) -> Result<Value> {
        let endpoint = redact(&url);
        debug!("GET {}", endpoint);

        // reqwest errors carry the full URL, api key included
        let response = self.client.get(url).send().await.map_err(|source| {
            let source = source.without_url();
            error!("Movie API request to {} failed: {}", endpoint, source);
            UpstreamError::Unavailable {
                endpoint: endpoint.clone(),
                source,
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| UpstreamError::Unavailable {
                endpoint: endpoint.clone(),
                source: source.without_url(),
            })?;
        let parsed = serde_json::from_str::<Value>(&body);

        if status.is_success() || status == StatusCode::NOT_FOUND {
            if let Some(message) = parsed
                .as_ref()
                .ok()
                .and_then(|value| value.get("error"))
                .and_then(Value::as_str)
            {
                info!("Movie API has no movie {}: {}", movie_id, message);
                return Err(UpstreamError::MovieNotFound {
                    movie_id: movie_id.to_string(),
                    message: message.to_string(),
                });
            }
        }

        if !status.is_success() {
            error!("Movie API returned {} for {}", status, endpoint);
            return Err(UpstreamError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        parsed.map_err(|source| UpstreamError::Decode { endpoint, source })
    }
}

#[async_trait]
impl MovieSource for MovieDataFetcher {
    /// Fetch info and reviews concurrently.
    async fn fetch(&self, movie_id: &str) -> Result<RawMovieData> {
        let (info, reviews) =
            tokio::try_join!(self.fetch_info(movie_id), self.fetch_reviews(movie_id))?;
        debug!(
            "Fetched movie {} with {} reviews",
            movie_id,
            reviews.len()
        );
        Ok(RawMovieData { info, reviews })
    }
}

/// URL without its query string, safe to log.
fn redact(url: &Url) -> String {
    let mut url = url.clone();
    url.set_query(None);
    url.to_string()
}
