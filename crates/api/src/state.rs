use std::sync::Arc;
use std::time::Duration;

use highcommand_db::Store;

use crate::background::collector::Collector;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the store is a pool handle, the collector an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Snapshot store (log-and-degrade wrapper over the SQLite pool).
    pub store: Store,
    /// Owns the shared upstream client; handlers fetch live data through
    /// it so every request goes through the same pacing.
    pub collector: Arc<Collector>,
    /// How long a cache-backed read waits for upstream before serving the
    /// stored snapshot.
    pub live_fetch_timeout: Duration,
}
