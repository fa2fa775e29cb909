//! Repository for the `system_status` table.

use highcommand_core::types::Timestamp;
use sqlx::SqlitePool;

use super::timestamp_text;
use crate::models::system_status::SystemStatus;

const COLUMNS: &str = "key, value, updated_at";

/// Provides read/overwrite operations for named service flags.
pub struct SystemStatusRepo;

impl SystemStatusRepo {
    /// Create the flag on first write, overwrite it afterwards.
    pub async fn upsert(
        pool: &SqlitePool,
        key: &str,
        value: &str,
        updated_at: Timestamp,
    ) -> Result<SystemStatus, sqlx::Error> {
        let query = format!(
            "INSERT INTO system_status (key, value, updated_at) \
             VALUES (?1, ?2, ?3) \
             ON CONFLICT (key) DO UPDATE SET \
                 value = excluded.value, \
                 updated_at = excluded.updated_at \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SystemStatus>(&query)
            .bind(key)
            .bind(value)
            .bind(timestamp_text(updated_at))
            .fetch_one(pool)
            .await
    }

    pub async fn find(pool: &SqlitePool, key: &str) -> Result<Option<SystemStatus>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM system_status WHERE key = ?1");
        sqlx::query_as::<_, SystemStatus>(&query)
            .bind(key)
            .fetch_optional(pool)
            .await
    }
}
