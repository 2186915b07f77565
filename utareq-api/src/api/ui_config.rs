//! UI configuration endpoints
//!
//! A singleton JSON document of presentation settings (titles, colors,
//! background, social links, nav button labels) edited as a whole from the
//! admin panel and applied client-side.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde_json::{json, Value};

use crate::api::admin::require_admin;
use crate::api::ApiError;
use crate::AppState;

/// GET /api/ui-config
pub async fn get_ui_config(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let config: String = sqlx::query_scalar("SELECT config FROM ui_config WHERE id = 1")
        .fetch_one(&state.db)
        .await?;

    let value: Value = serde_json::from_str(&config)
        .map_err(|e| ApiError::Internal(format!("Stored UI config is not valid JSON: {}", e)))?;
    Ok(Json(value))
}

/// POST /api/ui-config (admin)
///
/// Replaces the whole configuration document.
pub async fn save_ui_config(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    require_admin(&state, &headers)?;

    if !body.is_object() {
        return Err(ApiError::BadRequest(
            "UI config must be a JSON object.".to_string(),
        ));
    }

    let now = chrono::Utc::now().timestamp_millis();
    sqlx::query("UPDATE ui_config SET config = ?, updated_at = ? WHERE id = 1")
        .bind(body.to_string())
        .bind(now)
        .execute(&state.db)
        .await?;

    Ok(Json(json!({ "success": true })))
}
