use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

/// Opens (creating if missing) the local sqlite file backing the content
/// store and returns a connection pool. The pool serializes concurrent
/// writers internally; callers issue no explicit locking.
pub async fn create_pool(store_path: &str) -> Result<SqlitePool> {
    info!("Opening content store at {store_path}...");

    let options = SqliteConnectOptions::new()
        .filename(store_path)
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    info!("Content store pool established");
    Ok(pool)
}
