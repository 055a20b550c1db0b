use axum::{Router, routing::post};
use std::path::Path;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};

use crate::client::YouTubeClient;

pub mod handlers;
pub mod models;

/// Shared by every request handler.
pub struct AppState {
    pub client: YouTubeClient,
    pub default_region: String,
}

pub fn create_router(state: Arc<AppState>, static_dir: impl AsRef<Path>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // API routes
        .route("/api/search", post(handlers::search_handler))
        .with_state(state)
        // Static file serving for the UI
        .fallback_service(ServeDir::new(static_dir.as_ref()))
        .layer(cors)
}
