//! Server crate for the movie messages service.
//!
//! Wires the fetcher, catalog and template engine into an orchestrator
//! and exposes it over HTTP.

pub mod config;
pub mod error;
pub mod fixtures;
pub mod orchestrator;
pub mod page;
pub mod routes;

pub use config::{CatalogArgs, UpstreamArgs};
pub use error::ServiceError;
pub use fixtures::StaticMovieSource;
pub use orchestrator::{ComposedMovie, MessageOrchestrator, MoviePage, MovieMessages, build_page};
pub use page::PageRenderer;
pub use routes::{AppState, router, serve};
