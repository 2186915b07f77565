//! Setlist suggestions
//!
//! Fans submit a set of songs they would like played together; admins read
//! the submissions from the admin panel.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use utareq_common::db::SetlistSuggestionRow;
use utareq_common::ngword::contains_ng_word;
use uuid::Uuid;

use crate::api::admin::require_admin;
use crate::api::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSuggestionBody {
    #[serde(default)]
    pub requester: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    pub songs: Vec<Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub id: String,
    pub requester: String,
    pub comment: String,
    pub songs: Value,
    pub created_at: i64,
}

/// POST /api/setlist-suggestions
///
/// Free-text fields are NG-word filtered before persisting.
pub async fn create_setlist_suggestion(
    State(state): State<AppState>,
    Json(body): Json<CreateSuggestionBody>,
) -> Result<Json<Value>, ApiError> {
    if body.songs.is_empty() {
        return Err(ApiError::BadRequest(
            "At least one song is required.".to_string(),
        ));
    }

    let requester = body
        .requester
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("anonymous");
    let comment = body.comment.as_deref().map(str::trim).unwrap_or("");

    if contains_ng_word(requester) || contains_ng_word(comment) {
        return Err(ApiError::BadRequest(
            "Submission contains inappropriate language.".to_string(),
        ));
    }

    let id = Uuid::new_v4().to_string();
    let songs = serde_json::to_string(&body.songs)
        .map_err(|e| ApiError::Internal(format!("Failed to encode songs: {}", e)))?;
    let created_at = chrono::Utc::now().timestamp_millis();

    sqlx::query(
        r#"
        INSERT INTO setlist_suggestions (id, requester, comment, songs, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(requester)
    .bind(comment)
    .bind(&songs)
    .bind(created_at)
    .execute(&state.db)
    .await?;

    Ok(Json(json!({ "success": true, "id": id })))
}

/// GET /api/setlist-suggestions (admin)
///
/// Submissions, newest first.
pub async fn list_setlist_suggestions(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Suggestion>>, ApiError> {
    require_admin(&state, &headers)?;

    let rows: Vec<SetlistSuggestionRow> = sqlx::query_as(
        r#"
        SELECT id, requester, comment, songs, created_at
        FROM setlist_suggestions ORDER BY created_at DESC
        "#,
    )
    .fetch_all(&state.db)
    .await?;

    let suggestions = rows
        .into_iter()
        .map(|row| {
            let songs = serde_json::from_str(&row.songs).unwrap_or(Value::Array(vec![]));
            Suggestion {
                id: row.id,
                requester: row.requester,
                comment: row.comment,
                songs,
                created_at: row.created_at,
            }
        })
        .collect();

    Ok(Json(suggestions))
}
