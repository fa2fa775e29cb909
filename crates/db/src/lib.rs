//! SQLite persistence for captured upstream snapshots and service flags.
//!
//! The repository layer returns raw `sqlx` results; [`Store`] wraps it
//! for the request and collection paths, logging failures and degrading
//! to "no data" instead of propagating them.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

pub mod models;
pub mod repositories;
pub mod store;

pub use store::Store;

pub type DbPool = sqlx::SqlitePool;

/// Create a connection pool from a database URL.
///
/// In-memory databases are limited to a single long-lived connection,
/// since every SQLite connection to `:memory:` opens a separate database.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");

    let mut options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .busy_timeout(Duration::from_secs(5));

    if in_memory {
        return SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await;
    }

    options = options.journal_mode(SqliteJournalMode::Wal);
    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded schema migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
