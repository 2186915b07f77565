//! Admin authentication
//!
//! Admin writes (catalogue, posts, UI config, suggestion listing) require
//! the shared admin password in the `x-admin-token` header. There are no
//! per-user accounts or sessions.

use axum::http::HeaderMap;

use crate::api::ApiError;
use crate::AppState;

/// Header carrying the admin password
pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Verify the admin token header against the configured password
pub fn require_admin(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    match headers.get(ADMIN_TOKEN_HEADER).and_then(|v| v.to_str().ok()) {
        Some(token) if token == state.admin_password => Ok(()),
        _ => Err(ApiError::Unauthorized),
    }
}
