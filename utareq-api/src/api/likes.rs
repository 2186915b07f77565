//! Like logging and like rankings
//!
//! A like increments three counters in one transaction: the all-time
//! counter and the current monthly and yearly buckets. There is no
//! idempotency key; duplicate client calls double-count.
//!
//! Logging is fail-silent: a backend failure is logged and reported to the
//! client as success so a like can never break the fan-facing UI.

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::SqlitePool;
use tracing::warn;
use utareq_common::db::LikeCountRow;
use utareq_common::ranking::{month_key, year_key};
use utareq_common::RankingPeriod;

use crate::api::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LogLikeBody {
    pub term: String,
    #[serde(default)]
    pub artist: Option<String>,
}

/// One ranking entry; `id` carries the song title
#[derive(Debug, Serialize)]
pub struct RankingEntry {
    pub id: String,
    pub artist: String,
    pub count: i64,
}

async fn record_like(db: &SqlitePool, title: &str, artist: &str) -> Result<(), sqlx::Error> {
    let now = chrono::Utc::now();
    let mut tx = db.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO song_like_counts (title, artist, count) VALUES (?, ?, 1)
        ON CONFLICT(title) DO UPDATE SET count = count + 1, artist = excluded.artist
        "#,
    )
    .bind(title)
    .bind(artist)
    .execute(&mut *tx)
    .await?;

    for (period, bucket) in [("month", month_key(now)), ("year", year_key(now))] {
        sqlx::query(
            r#"
            INSERT INTO like_buckets (period, bucket, title, artist, count) VALUES (?, ?, ?, ?, 1)
            ON CONFLICT(period, bucket, title) DO UPDATE SET count = count + 1, artist = excluded.artist
            "#,
        )
        .bind(period)
        .bind(bucket)
        .bind(title)
        .bind(artist)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await
}

/// POST /api/log-like
///
/// Body: `{term, artist?}`. Fail-silent on database errors.
pub async fn log_like(
    State(state): State<AppState>,
    Json(body): Json<LogLikeBody>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let title = body.term.trim();
    if title.is_empty() {
        return Err(ApiError::BadRequest(
            "Invalid song title provided.".to_string(),
        ));
    }
    let artist = body.artist.as_deref().unwrap_or("").trim();

    match record_like(&state.db, title, artist).await {
        Ok(()) => Ok(Json(json!({ "success": true }))),
        Err(e) => {
            warn!("Logging like failed: {}", e);
            Ok(Json(json!({ "success": true, "error": "Internal logging error" })))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RankingQuery {
    #[serde(default)]
    pub period: Option<String>,
}

/// GET /api/get-like-ranking?period=all|month|year
///
/// All-time reads the sorted counter table; month/year read the current
/// bucket. Responses carry a short client cache hint.
pub async fn get_like_ranking(
    State(state): State<AppState>,
    Query(query): Query<RankingQuery>,
) -> Result<Response, ApiError> {
    let period = RankingPeriod::parse(query.period.as_deref())?;

    let rows: Vec<LikeCountRow> = match period.bucket_key(chrono::Utc::now()) {
        None => {
            sqlx::query_as(
                "SELECT title, artist, count FROM song_like_counts ORDER BY count DESC LIMIT 100",
            )
            .fetch_all(&state.db)
            .await?
        }
        Some(bucket) => {
            let period_name = match period {
                RankingPeriod::Month => "month",
                RankingPeriod::Year => "year",
                RankingPeriod::All => unreachable!(),
            };
            sqlx::query_as(
                r#"
                SELECT title, artist, count FROM like_buckets
                WHERE period = ? AND bucket = ?
                ORDER BY count DESC LIMIT 100
                "#,
            )
            .bind(period_name)
            .bind(bucket)
            .fetch_all(&state.db)
            .await?
        }
    };

    let ranking: Vec<RankingEntry> = rows
        .into_iter()
        .map(|row| RankingEntry {
            id: row.title,
            artist: row.artist,
            count: row.count,
        })
        .collect();

    Ok((
        StatusCode::OK,
        [(header::CACHE_CONTROL, "public, max-age=300")],
        Json(ranking),
    )
        .into_response())
}
