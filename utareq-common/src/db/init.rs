//! Database initialization
//!
//! The database is created automatically on first run with the full schema,
//! and default content (seed catalogue, UI configuration) is inserted when
//! missing. Initialization is idempotent and safe to repeat on every start.

use crate::catalog::DEFAULT_CATALOG;
use crate::Result;
use serde_json::json;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // Enable foreign keys
    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;

    // WAL mode allows concurrent readers with one writer
    sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;

    sqlx::query("PRAGMA busy_timeout = 5000").execute(&pool).await?;

    create_tables(&pool).await?;
    seed_defaults(&pool).await?;

    Ok(pool)
}

/// Open an in-memory database with the full schema and seed data.
/// Used by integration tests.
pub async fn init_memory_database() -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;
    create_tables(&pool).await?;
    seed_defaults(&pool).await?;
    Ok(pool)
}

/// Create all tables (idempotent)
pub async fn create_tables(pool: &SqlitePool) -> Result<()> {
    create_catalog_table(pool).await?;
    create_like_count_tables(pool).await?;
    create_requests_table(pool).await?;
    create_posts_table(pool).await?;
    create_ui_config_table(pool).await?;
    create_setlist_suggestions_table(pool).await?;
    create_active_users_table(pool).await?;
    Ok(())
}

/// Raw song-list blob, singleton row (id = 1)
async fn create_catalog_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS catalog (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            content TEXT NOT NULL,
            updated_at INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// All-time like counters plus the monthly/yearly bucket mirrors
async fn create_like_count_tables(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS song_like_counts (
            title TEXT PRIMARY KEY,
            artist TEXT NOT NULL DEFAULT '',
            count INTEGER NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS like_buckets (
            period TEXT NOT NULL,
            bucket TEXT NOT NULL,
            title TEXT NOT NULL,
            artist TEXT NOT NULL DEFAULT '',
            count INTEGER NOT NULL DEFAULT 0,
            PRIMARY KEY (period, bucket, title)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_requests_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS song_requests (
            title TEXT PRIMARY KEY,
            count INTEGER NOT NULL DEFAULT 0,
            last_requester TEXT NOT NULL DEFAULT 'anonymous',
            last_requested_at INTEGER NOT NULL,
            is_anonymous INTEGER NOT NULL DEFAULT 1
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_posts_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS posts (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            content TEXT NOT NULL,
            image_url TEXT,
            created_at INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Singleton presentation settings document, stored as a JSON blob
async fn create_ui_config_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS ui_config (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            config TEXT NOT NULL,
            updated_at INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_setlist_suggestions_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS setlist_suggestions (
            id TEXT PRIMARY KEY,
            requester TEXT NOT NULL DEFAULT 'anonymous',
            comment TEXT NOT NULL DEFAULT '',
            songs TEXT NOT NULL,
            created_at INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Presence heartbeats. Rows are never expired; readers apply a freshness
/// window when counting active users.
async fn create_active_users_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS active_users (
            client_id TEXT PRIMARY KEY,
            last_seen INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Insert default content where missing
pub async fn seed_defaults(pool: &SqlitePool) -> Result<()> {
    let now = chrono::Utc::now().timestamp_millis();

    sqlx::query("INSERT OR IGNORE INTO catalog (id, content, updated_at) VALUES (1, ?, ?)")
        .bind(DEFAULT_CATALOG)
        .bind(now)
        .execute(pool)
        .await?;

    let config = default_ui_config().to_string();
    sqlx::query("INSERT OR IGNORE INTO ui_config (id, config, updated_at) VALUES (1, ?, ?)")
        .bind(config)
        .bind(now)
        .execute(pool)
        .await?;

    Ok(())
}

/// Default UI configuration served until an admin saves one
pub fn default_ui_config() -> serde_json::Value {
    json!({
        "mainTitle": "リクエスト曲ー検索",
        "subtitle": "弾ける曲かチェックできます",
        "primaryColor": "#ec4899",
        "twitcastingUrl": "",
        "xUrl": "",
        "ofuseUrl": "",
        "doneruUrl": "",
        "amazonWishlistUrl": "",
        "backgroundType": "color",
        "backgroundColor": "#f3f4f6",
        "darkBackgroundColor": "#111827",
        "backgroundImageUrl": "",
        "backgroundOpacity": 0.1,
        "twitcastingIconUrl": "",
        "xIconUrl": "",
        "supportIconUrl": "",
        "navButtons": {
            "search": { "label": "曲を検索", "enabled": true },
            "list": { "label": "曲リスト", "enabled": true },
            "ranking": { "label": "ランキング", "enabled": true },
            "requests": { "label": "リクエスト", "enabled": true },
            "blog": { "label": "お知らせ", "enabled": true },
            "setlist": { "label": "セトリ提案", "enabled": true },
            "suggest": { "label": "曲の提案", "enabled": true }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_schema_and_seeds_defaults() {
        let pool = init_memory_database().await.unwrap();

        let content: String = sqlx::query_scalar("SELECT content FROM catalog WHERE id = 1")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(content, DEFAULT_CATALOG);

        let config: String = sqlx::query_scalar("SELECT config FROM ui_config WHERE id = 1")
            .fetch_one(&pool)
            .await
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&config).unwrap();
        assert_eq!(parsed["navButtons"]["search"]["enabled"], true);
    }

    #[tokio::test]
    async fn seeding_is_idempotent() {
        let pool = init_memory_database().await.unwrap();

        sqlx::query("UPDATE catalog SET content = 'Lemon,米津玄師' WHERE id = 1")
            .execute(&pool)
            .await
            .unwrap();

        // A second seed pass must not clobber saved content
        seed_defaults(&pool).await.unwrap();
        let content: String = sqlx::query_scalar("SELECT content FROM catalog WHERE id = 1")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(content, "Lemon,米津玄師");
    }

    #[tokio::test]
    async fn file_database_is_created_on_first_run() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("utareq.db");
        let pool = init_database(&db_path).await.unwrap();
        assert!(db_path.exists());

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
