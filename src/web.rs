use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::api;
use crate::suitability::SuitabilityAnalyzer;

/// Build the application with the API nested under `/api`
pub fn app(analyzer: Arc<SuitabilityAnalyzer>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", api::router(analyzer))
        .layer(cors)
}

pub async fn run(analyzer: Arc<SuitabilityAnalyzer>, port: u16) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server running at http://localhost:{}", port);

    axum::serve(listener, app(analyzer))
        .await
        .context("Web server stopped unexpectedly")
}
