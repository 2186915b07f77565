//! Song catalogue endpoints
//!
//! The catalogue is one delimited text blob edited as a whole from the admin
//! form. Fans read it parsed; the admin form reads/writes it raw.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use utareq_common::catalog::{parse_songs, Song};

use crate::api::admin::require_admin;
use crate::api::ApiError;
use crate::AppState;

/// Fetch the raw catalogue blob from the singleton row
pub(crate) async fn load_catalog(state: &AppState) -> Result<String, ApiError> {
    let content: String = sqlx::query_scalar("SELECT content FROM catalog WHERE id = 1")
        .fetch_one(&state.db)
        .await?;
    Ok(content)
}

/// GET /api/songs
///
/// Returns the parsed catalogue as a JSON array.
pub async fn get_songs(State(state): State<AppState>) -> Result<Json<Vec<Song>>, ApiError> {
    let content = load_catalog(&state).await?;
    Ok(Json(parse_songs(&content)))
}

/// GET /api/songs/raw
///
/// Returns the raw blob for the admin edit form.
pub async fn get_songs_raw(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let content = load_catalog(&state).await?;
    Ok(Json(json!({ "content": content })))
}

#[derive(Debug, Deserialize)]
pub struct SaveSongsBody {
    pub content: String,
}

/// POST /api/songs (admin)
///
/// Replaces the catalogue blob. Rejects content that parses to zero songs so
/// a bad paste cannot wipe the catalogue.
pub async fn save_songs(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<SaveSongsBody>,
) -> Result<Json<Value>, ApiError> {
    require_admin(&state, &headers)?;

    let songs = parse_songs(&body.content);
    if songs.is_empty() {
        return Err(ApiError::BadRequest(
            "Song list contains no valid lines.".to_string(),
        ));
    }

    let now = chrono::Utc::now().timestamp_millis();
    sqlx::query("UPDATE catalog SET content = ?, updated_at = ? WHERE id = 1")
        .bind(&body.content)
        .bind(now)
        .execute(&state.db)
        .await?;

    tracing::info!("Catalogue updated: {} songs", songs.len());
    Ok(Json(json!({ "success": true, "count": songs.len() })))
}
