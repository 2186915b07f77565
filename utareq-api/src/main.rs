//! utareq-api - Song request web service
//!
//! Fan-facing song request application: catalogue search, song requests,
//! likes and rankings, announcements, presence, and AI kana annotation,
//! with an admin surface for editing the catalogue and UI configuration.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use utareq_api::services::kana_client::KanaClient;
use utareq_api::{build_router, AppState};
use utareq_common::config;
use utareq_common::db::init_database;

/// Command-line arguments for utareq-api
#[derive(Parser, Debug)]
#[command(name = "utareq-api")]
#[command(about = "Song request web service")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "8787", env = "UTAREQ_PORT")]
    port: u16,

    /// Root folder holding the database (resolved via env/config file/OS
    /// default when omitted)
    #[arg(short, long)]
    root_folder: Option<String>,

    /// Password for admin endpoints (x-admin-token header)
    #[arg(long, default_value = "admin", env = "UTAREQ_ADMIN_PASSWORD")]
    admin_password: String,

    /// Gemini API key for kana annotation; /api/generate-kana returns 500
    /// when unset
    #[arg(long, env = "GEMINI_API_KEY")]
    gemini_api_key: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting utareq song request service (utareq-api) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    let root_folder =
        config::resolve_root_folder(args.root_folder.as_deref(), "UTAREQ_ROOT_FOLDER")?;
    config::ensure_root_folder(&root_folder)?;

    let db_path = config::database_path(&root_folder);
    info!("Database path: {}", db_path.display());

    let pool = init_database(&db_path)
        .await
        .context("Failed to initialize database")?;
    info!("✓ Database ready");

    if args.gemini_api_key.is_some() {
        info!("✓ Gemini API key configured (kana annotation enabled)");
    } else {
        info!("Gemini API key not set (kana annotation disabled)");
    }

    let kana = KanaClient::new(args.gemini_api_key).context("Failed to build kana client")?;
    let state = AppState::new(pool, args.admin_password, kana);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", args.port)).await?;
    info!("utareq-api listening on http://127.0.0.1:{}", args.port);
    info!("Health check: http://127.0.0.1:{}/health", args.port);

    axum::serve(listener, app).await?;

    Ok(())
}
