use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod handlers;
pub mod state;

pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/api/stories", get(handlers::list_stories).post(handlers::create_story))
        .route("/api/stories/:id", get(handlers::get_story))
        .route("/api/stories/:id/coverage", get(handlers::get_story_coverage))
        .route("/api/articles/:id", get(handlers::get_article))
        .route("/api/articles/:id/story", get(handlers::get_article_story))
        .route("/api/articles/:id/coverage", get(handlers::get_article_coverage))
        .route("/api/coverage", axum::routing::post(handlers::compare_articles))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::new(state))
}

/// Serves the API until the listener fails.
pub async fn serve(state: AppState, addr: &str) -> nt_core::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("🚀 Listening on {}", listener.local_addr()?);
    axum::serve(listener, create_app(state)).await?;
    Ok(())
}

pub mod prelude {
    pub use crate::{create_app, serve, AppState};
    pub use nt_core::{Article, Error, Result};
}
