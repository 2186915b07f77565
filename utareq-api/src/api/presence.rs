//! Presence heartbeats
//!
//! Clients POST a heartbeat with their client id; the active-user count
//! applies a freshness window at read time. Heartbeat rows are never
//! deleted. Logging is fail-silent like the like endpoint.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use crate::api::ApiError;
use crate::AppState;

/// Heartbeats older than this are not counted as active
const ACTIVE_WINDOW_MS: i64 = 5 * 60 * 1000;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceBody {
    pub client_id: String,
}

/// POST /api/presence
///
/// Body: `{clientId}`. Upserts the heartbeat timestamp. Fail-silent.
pub async fn log_presence(
    State(state): State<AppState>,
    Json(body): Json<PresenceBody>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let client_id = body.client_id.trim();
    if client_id.is_empty() {
        return Err(ApiError::BadRequest("clientId is required.".to_string()));
    }

    let now = chrono::Utc::now().timestamp_millis();
    let result = sqlx::query(
        r#"
        INSERT INTO active_users (client_id, last_seen) VALUES (?, ?)
        ON CONFLICT(client_id) DO UPDATE SET last_seen = excluded.last_seen
        "#,
    )
    .bind(client_id)
    .bind(now)
    .execute(&state.db)
    .await;

    if let Err(e) = result {
        warn!("Logging presence failed: {}", e);
        return Ok(Json(json!({ "success": true, "error": "Internal logging error" })));
    }

    Ok(Json(json!({ "success": true })))
}

/// GET /api/presence
///
/// Returns `{active}`: the number of clients seen within the last 5 minutes.
pub async fn get_presence(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let cutoff = chrono::Utc::now().timestamp_millis() - ACTIVE_WINDOW_MS;
    let active: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM active_users WHERE last_seen > ?")
        .bind(cutoff)
        .fetch_one(&state.db)
        .await?;

    Ok(Json(json!({ "active": active })))
}
