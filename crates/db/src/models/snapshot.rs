//! Captured upstream documents (`snapshots` table).

use highcommand_core::kinds::SnapshotKind;
use highcommand_core::types::{DbId, Timestamp};
use serde::Serialize;
use serde_json::Value;
use sqlx::types::Json;
use sqlx::FromRow;

/// A stored snapshot row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Snapshot {
    pub id: DbId,
    pub kind: String,
    pub unique_key: Option<String>,
    pub entity_key: Option<i64>,
    pub data: Json<Value>,
    pub captured_at: Timestamp,
}

impl Snapshot {
    pub fn into_document(self) -> Value {
        self.data.0
    }
}

/// DTO for writing a snapshot.
///
/// With a `unique_key`, an existing row of the same kind and key is
/// updated in place; without one a new row is appended.
#[derive(Debug, Clone)]
pub struct NewSnapshot {
    pub kind: SnapshotKind,
    pub unique_key: Option<String>,
    pub entity_key: Option<i64>,
    pub data: Value,
}

impl NewSnapshot {
    /// An un-keyed, append-only document.
    pub fn document(kind: SnapshotKind, data: Value) -> Self {
        Self {
            kind,
            unique_key: None,
            entity_key: None,
            data,
        }
    }

    /// A document upserted under an explicit uniqueness key.
    pub fn keyed(kind: SnapshotKind, key: impl Into<String>, data: Value) -> Self {
        Self {
            kind,
            unique_key: Some(key.into()),
            entity_key: None,
            data,
        }
    }

    /// Attach a business key (planet index).
    pub fn with_entity_key(mut self, entity_key: Option<i64>) -> Self {
        self.entity_key = entity_key;
        self
    }

    /// Build an item snapshot with keys taken from the document itself.
    ///
    /// Returns `None` when the kind is keyed but the item has no usable id.
    pub fn from_item(kind: SnapshotKind, data: Value) -> Option<Self> {
        let entity_key = kind.entity_key(&data);
        if !kind.is_keyed() {
            return Some(Self::document(kind, data).with_entity_key(entity_key));
        }
        let key = kind.unique_key(&data)?;
        Some(Self::keyed(kind, key, data).with_entity_key(entity_key))
    }
}
