//! Catalogue of snapshot kinds and the keys each one is stored under.
//!
//! Whole-document kinds (war status, statistics, the planet and campaign
//! lists, factions, biomes) are appended as point-in-time history. Item
//! kinds are upserted by a uniqueness key taken from the upstream record,
//! and may also carry a business key (a planet index) for per-entity reads.

use std::fmt;

use serde_json::Value;

/// A kind of document held in the snapshot store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapshotKind {
    WarStatus,
    Statistics,
    Planets,
    PlanetStatus,
    Campaigns,
    Campaign,
    Factions,
    Biomes,
    Assignment,
    Dispatch,
    PlanetEvent,
}

impl SnapshotKind {
    /// Value stored in the `snapshots.kind` column.
    pub const fn as_str(self) -> &'static str {
        match self {
            SnapshotKind::WarStatus => "war_status",
            SnapshotKind::Statistics => "statistics",
            SnapshotKind::Planets => "planets",
            SnapshotKind::PlanetStatus => "planet_status",
            SnapshotKind::Campaigns => "campaigns",
            SnapshotKind::Campaign => "campaign",
            SnapshotKind::Factions => "factions",
            SnapshotKind::Biomes => "biomes",
            SnapshotKind::Assignment => "assignment",
            SnapshotKind::Dispatch => "dispatch",
            SnapshotKind::PlanetEvent => "planet_event",
        }
    }

    /// Whether rows of this kind are deduplicated by a uniqueness key.
    pub const fn is_keyed(self) -> bool {
        matches!(
            self,
            SnapshotKind::PlanetStatus
                | SnapshotKind::Campaign
                | SnapshotKind::Assignment
                | SnapshotKind::Dispatch
                | SnapshotKind::PlanetEvent
        )
    }

    /// Uniqueness key for an item document, or `None` for whole-document
    /// kinds and for items without a usable id.
    ///
    /// Assumes upstream ids are stable and unique within a kind.
    pub fn unique_key(self, doc: &Value) -> Option<String> {
        match self {
            SnapshotKind::PlanetStatus => key_string(doc.get("index")?),
            SnapshotKind::Campaign
            | SnapshotKind::Assignment
            | SnapshotKind::Dispatch
            | SnapshotKind::PlanetEvent => key_string(doc.get("id")?),
            _ => None,
        }
    }

    /// Business key (planet index) an item document belongs to, if any.
    pub fn entity_key(self, doc: &Value) -> Option<i64> {
        match self {
            SnapshotKind::PlanetStatus => doc.get("index")?.as_i64(),
            SnapshotKind::Campaign => doc.get("planet")?.get("index")?.as_i64(),
            SnapshotKind::PlanetEvent => doc
                .get("planetIndex")
                .or_else(|| doc.get("planet_index"))
                .and_then(Value::as_i64)
                .or_else(|| doc.get("planet")?.get("index")?.as_i64()),
            _ => None,
        }
    }
}

impl fmt::Display for SnapshotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalise a JSON id (number or non-empty string) into key text.
fn key_string(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}
