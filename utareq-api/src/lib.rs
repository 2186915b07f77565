//! utareq-api library - song request web service
//!
//! Serves the fan-facing JSON API (catalogue, search, likes, requests,
//! rankings, announcements, presence, kana annotation) plus the embedded
//! web UI. State is a SQLite pool shared across handlers.

use axum::Router;
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod services;

use services::kana_client::KanaClient;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Shared password for admin endpoints (x-admin-token header)
    pub admin_password: String,
    /// Generative-AI client for kana annotation
    pub kana: KanaClient,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, admin_password: String, kana: KanaClient) -> Self {
        Self {
            db,
            admin_password,
            kana,
        }
    }
}

/// Build application router
///
/// All /api routes are CORS-open to match the original serverless handlers.
/// Admin-gated handlers check the x-admin-token header themselves.
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{delete, get, post};

    Router::new()
        .route("/", get(api::serve_index))
        .route("/static/app.js", get(api::serve_app_js))
        .merge(api::health_routes())
        .route("/api/songs", get(api::get_songs).post(api::save_songs))
        .route("/api/songs/raw", get(api::get_songs_raw))
        .route("/api/search", get(api::search_songs))
        .route("/api/log-like", post(api::log_like))
        .route("/api/get-like-ranking", get(api::get_like_ranking))
        .route("/api/log-request", post(api::log_request))
        .route("/api/get-request-ranking", get(api::get_request_ranking))
        .route("/api/get-new-requests", get(api::get_new_requests))
        .route("/api/presence", get(api::get_presence).post(api::log_presence))
        .route("/api/posts", get(api::get_posts).post(api::save_post))
        .route("/api/posts/:id", delete(api::delete_post))
        .route("/api/ui-config", get(api::get_ui_config).post(api::save_ui_config))
        .route(
            "/api/setlist-suggestions",
            get(api::list_setlist_suggestions).post(api::create_setlist_suggestion),
        )
        .route("/api/generate-kana", post(api::generate_kana))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
