//! Kana annotation endpoint
//!
//! Batches title/artist pairs into one generative-AI call that returns
//! parenthetical katakana readings. No retry or backoff; any upstream
//! failure surfaces as 500.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::api::ApiError;
use crate::services::kana_client::{KanaError, KanaResult, SongName};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateKanaBody {
    pub songs: Vec<SongName>,
}

/// POST /api/generate-kana
pub async fn generate_kana(
    State(state): State<AppState>,
    Json(body): Json<GenerateKanaBody>,
) -> Result<Json<Vec<KanaResult>>, ApiError> {
    if body.songs.is_empty() {
        return Err(ApiError::BadRequest(
            "Invalid input: songs array is required.".to_string(),
        ));
    }

    let results = state.kana.annotate(&body.songs).await.map_err(|e| match e {
        KanaError::MissingApiKey => {
            ApiError::Internal("API key is not configured on the server.".to_string())
        }
        other => ApiError::Internal(format!("Failed to generate kana from AI model: {}", other)),
    })?;

    Ok(Json(results))
}
