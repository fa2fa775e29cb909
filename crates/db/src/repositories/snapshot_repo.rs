//! Repository for the `snapshots` table.
//!
//! Reads are ordered by `captured_at DESC, id DESC` so that rows sharing a
//! timestamp resolve to the most recently inserted one.

use highcommand_core::kinds::SnapshotKind;
use highcommand_core::types::Timestamp;
use sqlx::SqlitePool;

use super::timestamp_text;
use crate::models::snapshot::{NewSnapshot, Snapshot};

/// Column list for `snapshots` SELECT queries.
const COLUMNS: &str = "id, kind, unique_key, entity_key, data, captured_at";

/// Provides query operations for captured snapshots.
pub struct SnapshotRepo;

impl SnapshotRepo {
    /// Insert a snapshot, or update the existing row with the same kind and
    /// uniqueness key in place (the row keeps its `id`).
    ///
    /// The stored `captured_at` never goes below the newest timestamp
    /// already recorded for the kind, so capture times stay non-decreasing
    /// even if the wall clock steps backwards.
    pub async fn upsert(
        pool: &SqlitePool,
        snapshot: &NewSnapshot,
        captured_at: Timestamp,
    ) -> Result<Snapshot, sqlx::Error> {
        let query = format!(
            "INSERT INTO snapshots (kind, unique_key, entity_key, data, captured_at) \
             VALUES (?1, ?2, ?3, ?4, \
                 MAX(?5, COALESCE((SELECT MAX(captured_at) FROM snapshots WHERE kind = ?1), ?5))) \
             ON CONFLICT (kind, unique_key) DO UPDATE SET \
                 entity_key = excluded.entity_key, \
                 data = excluded.data, \
                 captured_at = excluded.captured_at \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Snapshot>(&query)
            .bind(snapshot.kind.as_str())
            .bind(snapshot.unique_key.as_deref())
            .bind(snapshot.entity_key)
            .bind(snapshot.data.to_string())
            .bind(timestamp_text(captured_at))
            .fetch_one(pool)
            .await
    }

    /// The `limit` most recent rows of a kind, newest first.
    pub async fn list_latest(
        pool: &SqlitePool,
        kind: SnapshotKind,
        limit: i64,
    ) -> Result<Vec<Snapshot>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM snapshots \
             WHERE kind = ?1 \
             ORDER BY captured_at DESC, id DESC \
             LIMIT ?2"
        );
        sqlx::query_as::<_, Snapshot>(&query)
            .bind(kind.as_str())
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// The `limit` most recent rows of a kind for one business key.
    pub async fn list_by_entity(
        pool: &SqlitePool,
        kind: SnapshotKind,
        entity_key: i64,
        limit: i64,
    ) -> Result<Vec<Snapshot>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM snapshots \
             WHERE kind = ?1 AND entity_key = ?2 \
             ORDER BY captured_at DESC, id DESC \
             LIMIT ?3"
        );
        sqlx::query_as::<_, Snapshot>(&query)
            .bind(kind.as_str())
            .bind(entity_key)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Find the row stored under a uniqueness key.
    pub async fn find_by_unique_key(
        pool: &SqlitePool,
        kind: SnapshotKind,
        unique_key: &str,
    ) -> Result<Option<Snapshot>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM snapshots \
             WHERE kind = ?1 AND unique_key = ?2"
        );
        sqlx::query_as::<_, Snapshot>(&query)
            .bind(kind.as_str())
            .bind(unique_key)
            .fetch_optional(pool)
            .await
    }

    /// Number of rows stored for a kind.
    pub async fn count(pool: &SqlitePool, kind: SnapshotKind) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM snapshots WHERE kind = ?1")
            .bind(kind.as_str())
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
