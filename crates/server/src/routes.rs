//! HTTP surface: the JSON query endpoint, the results page and a health check.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Json;
use axum::Router;
use axum::extract::{Path, State};
use axum::response::Html;
use axum::routing::get;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::ServiceError;
use crate::orchestrator::{MessageOrchestrator, MovieMessages};
use crate::page::PageRenderer;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: MessageOrchestrator,
    pub pages: Arc<PageRenderer>,
}

impl AppState {
    pub fn new(orchestrator: MessageOrchestrator) -> Result<Self> {
        let pages = PageRenderer::new().context("Failed to compile page template")?;
        Ok(Self {
            orchestrator,
            pages: Arc::new(pages),
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/query/:movie_id", get(query_movie))
        .route("/movie/:movie_id", get(movie_page))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(addr: SocketAddr, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown requested");
    }
}

async fn query_movie(
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
) -> Result<Json<MovieMessages>, ServiceError> {
    let messages = state.orchestrator.movie_messages(&movie_id).await?;
    Ok(Json(messages))
}

async fn movie_page(
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
) -> Result<Html<String>, ServiceError> {
    let page = state.orchestrator.movie_page(&movie_id).await?;
    Ok(Html(state.pages.render(&page)?))
}

async fn health() -> &'static str {
    "OK"
}
