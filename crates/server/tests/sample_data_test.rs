//! The bundled catalog and fixture, served through the full router.

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use message_catalog::Catalog;
use serde_json::Value;
use server::{AppState, MessageOrchestrator, StaticMovieSource, router};
use tower::ServiceExt;

fn data_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../data")
        .join(relative)
}

fn app() -> axum::Router {
    let catalog = Catalog::load_from_file(&data_path("messages.csv")).unwrap();
    let source =
        StaticMovieSource::from_file(&data_path("fixtures/inception.json"), "770672122").unwrap();
    let orchestrator = MessageOrchestrator::new(Arc::new(source), Arc::new(catalog));
    router(AppState::new(orchestrator).unwrap())
}

#[tokio::test]
async fn test_sample_catalog_renders_every_entry() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/query/770672122")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["title"], "Inception");

    let messages = json["messages"].as_object().unwrap();
    let tags: Vec<&str> = messages.keys().map(String::as_str).collect();
    assert_eq!(tags.len(), 3);
    assert!(tags.contains(&"😌 Gently"));
    assert!(tags.contains(&"😡 Aggressively"));
    assert!(tags.contains(&"🎬💬 With a movie quote"));

    let gently: Vec<&str> = messages["😌 Gently"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m.as_str().unwrap())
        .collect();
    assert_eq!(gently.len(), 4);
    assert_eq!(
        gently[0],
        "Have you seen Inception? Leonardo DiCaprio is in it, and it only runs 148 minutes."
    );
    assert_eq!(
        gently[1],
        "Inception came out July 16, 2010. Critics gave it 86%. 🍿"
    );
    assert_eq!(
        gently[3],
        "If you like Joseph Gordon-Levitt, Inception is a {small} treat. 🎉"
    );

    let total: usize = messages.values().map(|v| v.as_array().unwrap().len()).sum();
    assert_eq!(total, 10);
}

#[tokio::test]
async fn test_sample_page() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/movie/770672122")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("Christopher Nolan"));
    assert!(html.contains("Leonardo DiCaprio, Joseph Gordon-Levitt, Ellen Page"));
    assert!(html.contains("July 16, 2010"));
}
