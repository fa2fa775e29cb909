//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&SqlitePool` as the first argument.

pub mod snapshot_repo;
pub mod system_status_repo;

pub use snapshot_repo::SnapshotRepo;
pub use system_status_repo::SystemStatusRepo;

use highcommand_core::types::Timestamp;

/// Fixed-width UTC text used for every stored timestamp, so that text
/// comparison in SQL matches chronological order.
pub(crate) fn timestamp_text(ts: Timestamp) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}
