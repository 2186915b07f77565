//! Database row models
//!
//! Timestamps are stored as epoch milliseconds to match the wire format the
//! web client expects (`Date.now()` semantics).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// All-time or bucketed like counter for one song
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LikeCountRow {
    pub title: String,
    pub artist: String,
    pub count: i64,
}

/// Song request counter with last-submitter metadata
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RequestRow {
    pub title: String,
    pub count: i64,
    pub last_requester: String,
    pub last_requested_at: i64,
    pub is_anonymous: bool,
}

/// Announcement post
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PostRow {
    pub id: String,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub created_at: i64,
}

/// Setlist suggestion submitted from the fan-facing form.
/// `songs` holds the selected song references as a JSON array string.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SetlistSuggestionRow {
    pub id: String,
    pub requester: String,
    pub comment: String,
    pub songs: String,
    pub created_at: i64,
}
