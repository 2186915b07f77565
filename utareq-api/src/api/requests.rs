//! Song request logging and request feeds
//!
//! Requests are counted per title with last-submitter metadata. The
//! increment is a single upsert so concurrent submitters cannot lose
//! updates. Unlike like logging, a database failure here is a real 500.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utareq_common::db::RequestRow;
use utareq_common::ngword::contains_ng_word;

use crate::api::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LogRequestBody {
    pub term: String,
    #[serde(default)]
    pub requester: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEntry {
    pub id: String,
    pub count: i64,
    pub last_requester: String,
    pub last_requested_at: i64,
    pub is_anonymous: bool,
}

impl From<RequestRow> for RequestEntry {
    fn from(row: RequestRow) -> Self {
        RequestEntry {
            id: row.title,
            count: row.count,
            last_requester: row.last_requester,
            last_requested_at: row.last_requested_at,
            is_anonymous: row.is_anonymous,
        }
    }
}

/// POST /api/log-request
///
/// Body: `{term, requester?}`. Empty requester defaults to "anonymous";
/// requester names containing NG words are rejected.
pub async fn log_request(
    State(state): State<AppState>,
    Json(body): Json<LogRequestBody>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let title = body.term.trim();
    if title.is_empty() {
        return Err(ApiError::BadRequest(
            "Invalid song title provided.".to_string(),
        ));
    }

    let requester = body
        .requester
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("anonymous");

    if contains_ng_word(requester) {
        return Err(ApiError::BadRequest(
            "Requester name contains inappropriate language.".to_string(),
        ));
    }

    let is_anonymous = requester == "anonymous";
    let now = chrono::Utc::now().timestamp_millis();

    sqlx::query(
        r#"
        INSERT INTO song_requests (title, count, last_requester, last_requested_at, is_anonymous)
        VALUES (?, 1, ?, ?, ?)
        ON CONFLICT(title) DO UPDATE SET
            count = count + 1,
            last_requester = excluded.last_requester,
            last_requested_at = excluded.last_requested_at,
            is_anonymous = excluded.is_anonymous
        "#,
    )
    .bind(title)
    .bind(requester)
    .bind(now)
    .bind(is_anonymous)
    .execute(&state.db)
    .await
    .map_err(|e| ApiError::Internal(format!("Failed to log request: {}", e)))?;

    Ok(Json(json!({ "success": true })))
}

/// GET /api/get-request-ranking
///
/// Request counts sorted descending.
pub async fn get_request_ranking(
    State(state): State<AppState>,
) -> Result<Json<Vec<RequestEntry>>, ApiError> {
    let rows: Vec<RequestRow> = sqlx::query_as(
        r#"
        SELECT title, count, last_requester, last_requested_at, is_anonymous
        FROM song_requests ORDER BY count DESC LIMIT 100
        "#,
    )
    .fetch_all(&state.db)
    .await?;

    Ok(Json(rows.into_iter().map(RequestEntry::from).collect()))
}

/// GET /api/get-new-requests
///
/// Recent named (non-anonymous) requests, newest first.
pub async fn get_new_requests(
    State(state): State<AppState>,
) -> Result<Json<Vec<RequestEntry>>, ApiError> {
    let rows: Vec<RequestRow> = sqlx::query_as(
        r#"
        SELECT title, count, last_requester, last_requested_at, is_anonymous
        FROM song_requests
        WHERE is_anonymous = 0
        ORDER BY last_requested_at DESC LIMIT 100
        "#,
    )
    .fetch_all(&state.db)
    .await?;

    Ok(Json(rows.into_iter().map(RequestEntry::from).collect()))
}
