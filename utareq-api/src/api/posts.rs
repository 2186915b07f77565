//! Announcement posts
//!
//! Simple CRUD entity: fans read the feed, admins create, update, and
//! delete posts from the admin panel.

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utareq_common::db::PostRow;
use uuid::Uuid;

use crate::api::admin::require_admin;
use crate::api::ApiError;
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub created_at: i64,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post {
            id: row.id,
            title: row.title,
            content: row.content,
            image_url: row.image_url,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePostBody {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// GET /api/posts
///
/// Announcement feed, newest first.
pub async fn get_posts(State(state): State<AppState>) -> Result<Json<Vec<Post>>, ApiError> {
    let rows: Vec<PostRow> = sqlx::query_as(
        "SELECT id, title, content, image_url, created_at FROM posts ORDER BY created_at DESC",
    )
    .fetch_all(&state.db)
    .await?;

    Ok(Json(rows.into_iter().map(Post::from).collect()))
}

/// POST /api/posts (admin)
///
/// Creates a post, or updates one when `id` is present.
pub async fn save_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<SavePostBody>,
) -> Result<Json<Post>, ApiError> {
    require_admin(&state, &headers)?;

    if body.title.trim().is_empty() || body.content.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Title and content are required.".to_string(),
        ));
    }

    let post = match body.id {
        Some(id) => {
            let result = sqlx::query(
                "UPDATE posts SET title = ?, content = ?, image_url = ? WHERE id = ?",
            )
            .bind(body.title.trim())
            .bind(body.content.trim())
            .bind(&body.image_url)
            .bind(&id)
            .execute(&state.db)
            .await?;

            if result.rows_affected() == 0 {
                return Err(ApiError::NotFound(format!("Post not found: {}", id)));
            }

            let row: PostRow = sqlx::query_as(
                "SELECT id, title, content, image_url, created_at FROM posts WHERE id = ?",
            )
            .bind(&id)
            .fetch_one(&state.db)
            .await?;
            Post::from(row)
        }
        None => {
            let id = Uuid::new_v4().to_string();
            let created_at = chrono::Utc::now().timestamp_millis();
            sqlx::query(
                "INSERT INTO posts (id, title, content, image_url, created_at) VALUES (?, ?, ?, ?, ?)",
            )
            .bind(&id)
            .bind(body.title.trim())
            .bind(body.content.trim())
            .bind(&body.image_url)
            .bind(created_at)
            .execute(&state.db)
            .await?;

            Post {
                id,
                title: body.title.trim().to_string(),
                content: body.content.trim().to_string(),
                image_url: body.image_url,
                created_at,
            }
        }
    };

    Ok(Json(post))
}

/// DELETE /api/posts/:id (admin)
pub async fn delete_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_admin(&state, &headers)?;

    let result = sqlx::query("DELETE FROM posts WHERE id = ?")
        .bind(&id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound(format!("Post not found: {}", id)));
    }

    Ok(Json(json!({ "success": true })))
}
