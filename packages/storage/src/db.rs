// ABOUTME: Database connection management and schema migrations
// ABOUTME: Opens the SQLite pool with WAL and foreign keys, then applies embedded migrations

use std::path::PathBuf;
use std::time::Duration;

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::StorageError;

/// Open the proposals database, creating its parent directory when needed.
/// Defaults to `~/.skz/proposals.db`.
pub async fn connect(database_path: Option<PathBuf>) -> Result<SqlitePool, StorageError> {
    let database_path = database_path.unwrap_or_else(skz_core::default_database_path);

    if let Some(parent) = database_path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let database_url = format!("sqlite:{}?mode=rwc", database_path.display());
    connect_url(&database_url, 10).await
}

/// Single-connection in-memory database, used by tests and dry runs
pub async fn connect_in_memory() -> Result<SqlitePool, StorageError> {
    connect_url("sqlite::memory:", 1).await
}

pub async fn connect_url(database_url: &str, max_connections: u32) -> Result<SqlitePool, StorageError> {
    debug!("Connecting to database: {}", database_url);

    let mut options = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(30));
    if max_connections == 1 {
        // An in-memory database vanishes with its last connection
        options = options.idle_timeout(None).max_lifetime(None);
    }
    let pool = options.connect(database_url).await?;

    sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;
    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;
    sqlx::query("PRAGMA synchronous = NORMAL").execute(&pool).await?;

    info!("Database connection established");

    sqlx::migrate!("./migrations").run(&pool).await?;

    debug!("Database migrations completed");

    Ok(pool)
}
