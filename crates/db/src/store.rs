//! Log-and-degrade facade over the repositories.
//!
//! The collector and the request handlers only ever talk to [`Store`]. A
//! database failure is logged here and reported as "nothing stored" (reads)
//! or `false` (writes), so callers never see a `sqlx::Error`.

use chrono::Utc;
use highcommand_core::kinds::SnapshotKind;
use serde_json::Value;

use crate::models::snapshot::{NewSnapshot, Snapshot};
use crate::repositories::{SnapshotRepo, SystemStatusRepo};
use crate::DbPool;

/// Shared handle to the snapshot store. Cheap to clone.
#[derive(Clone)]
pub struct Store {
    pool: DbPool,
}

impl Store {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    // ------------------------------------------------------------------
    // Writes
    // ------------------------------------------------------------------

    /// Append a snapshot, or update it in place when its uniqueness key
    /// already exists. Returns whether the row was written.
    pub async fn append_or_upsert(&self, snapshot: NewSnapshot) -> bool {
        match SnapshotRepo::upsert(&self.pool, &snapshot, Utc::now()).await {
            Ok(row) => {
                tracing::debug!(
                    kind = %snapshot.kind,
                    id = row.id,
                    unique_key = ?row.unique_key,
                    "Snapshot stored",
                );
                true
            }
            Err(e) => {
                tracing::error!(
                    kind = %snapshot.kind,
                    unique_key = ?snapshot.unique_key,
                    error = %e,
                    "Failed to store snapshot",
                );
                false
            }
        }
    }

    /// Append a whole document as the newest snapshot of `kind`.
    pub async fn save_document(&self, kind: SnapshotKind, data: Value) -> bool {
        self.append_or_upsert(NewSnapshot::document(kind, data)).await
    }

    /// Upsert each item of a collection under its own uniqueness key.
    ///
    /// Items without a usable id are skipped. Returns the number of rows
    /// written.
    pub async fn save_items(&self, kind: SnapshotKind, items: &[Value]) -> usize {
        let mut written = 0;
        for item in items {
            let Some(snapshot) = NewSnapshot::from_item(kind, item.clone()) else {
                tracing::warn!(kind = %kind, "Skipping item without an id");
                continue;
            };
            if self.append_or_upsert(snapshot).await {
                written += 1;
            }
        }
        written
    }

    /// Record a named boolean flag.
    pub async fn set_flag(&self, name: &str, value: bool) -> bool {
        let text = if value { "true" } else { "false" };
        match SystemStatusRepo::upsert(&self.pool, name, text, Utc::now()).await {
            Ok(_) => true,
            Err(e) => {
                tracing::error!(flag = name, value, error = %e, "Failed to set status flag");
                false
            }
        }
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// Up to `limit` documents of `kind`, newest first.
    pub async fn latest(&self, kind: SnapshotKind, limit: i64) -> Vec<Value> {
        match SnapshotRepo::list_latest(&self.pool, kind, limit).await {
            Ok(rows) => documents(rows),
            Err(e) => {
                tracing::error!(kind = %kind, error = %e, "Failed to read snapshots");
                Vec::new()
            }
        }
    }

    /// The newest document of `kind`.
    pub async fn latest_snapshot(&self, kind: SnapshotKind) -> Option<Value> {
        self.latest(kind, 1).await.into_iter().next()
    }

    /// The newest document of `kind` stored for a business key.
    pub async fn latest_by_key(&self, kind: SnapshotKind, key: i64) -> Option<Value> {
        self.history_by_key(kind, key, 1).await.into_iter().next()
    }

    /// Up to `limit` documents of `kind` for a business key, newest first.
    pub async fn history_by_key(&self, kind: SnapshotKind, key: i64, limit: i64) -> Vec<Value> {
        match SnapshotRepo::list_by_entity(&self.pool, kind, key, limit).await {
            Ok(rows) => documents(rows),
            Err(e) => {
                tracing::error!(kind = %kind, key, error = %e, "Failed to read snapshots by key");
                Vec::new()
            }
        }
    }

    /// Read a named boolean flag. `None` if never written or unreadable.
    pub async fn get_flag(&self, name: &str) -> Option<bool> {
        match SystemStatusRepo::find(&self.pool, name).await {
            Ok(row) => row.and_then(|r| r.as_bool()),
            Err(e) => {
                tracing::error!(flag = name, error = %e, "Failed to read status flag");
                None
            }
        }
    }

    /// Whether the database answers queries.
    pub async fn is_healthy(&self) -> bool {
        crate::health_check(&self.pool).await.is_ok()
    }
}

// ---- private helpers ----

fn documents(rows: Vec<Snapshot>) -> Vec<Value> {
    rows.into_iter().map(Snapshot::into_document).collect()
}
