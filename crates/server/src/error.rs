//! Request-level errors and how they map onto HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use movie_facts::FactError;
use serde_json::json;
use templating::RenderError;
use thiserror::Error;
use tracing::{error, warn};
use upstream::UpstreamError;

/// Anything that can go wrong while answering a movie request
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    Facts(#[from] FactError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Failed to render page: {0}")]
    Page(#[from] tera::Error),
}

impl ServiceError {
    /// Status code the client sees.
    ///
    /// Upstream trouble is a 502, a movie the API doesn't know is a 404,
    /// and data the API sent but we can't use is a 422.
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::Upstream(UpstreamError::MovieNotFound { .. }) => StatusCode::NOT_FOUND,
            ServiceError::Upstream(UpstreamError::InvalidMovieId { .. }) => StatusCode::BAD_REQUEST,
            ServiceError::Upstream(
                UpstreamError::Unavailable { .. }
                | UpstreamError::Status { .. }
                | UpstreamError::Decode { .. },
            ) => StatusCode::BAD_GATEWAY,
            ServiceError::Upstream(UpstreamError::InvalidUrl { .. } | UpstreamError::Client(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ServiceError::Facts(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::Render(e) if e.is_missing_fact() => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::Render(_) | ServiceError::Page(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed ({}): {}", status, self);
        } else {
            warn!("Request rejected ({}): {}", status, self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
