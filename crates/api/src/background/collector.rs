//! Periodic collection of every tracked upstream resource.
//!
//! Each cycle fetches all resources one after another through the shared
//! (rate-limited) client and writes whatever succeeded to the store. A
//! failing resource is logged and skipped; it never aborts the cycle. The
//! upstream health flag records whether war status was reachable.

use std::sync::Arc;
use std::time::Duration;

use highcommand_core::kinds::SnapshotKind;
use highcommand_core::status_keys::UPSTREAM_API_AVAILABLE;
use highcommand_db::models::snapshot::NewSnapshot;
use highcommand_db::Store;
use highcommand_upstream::{Target, Upstream, UpstreamError};
use serde_json::Value;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Resources fetched by every cycle, in order. War status goes first
/// because it decides the health flag.
pub const CYCLE_TARGETS: [Target; 9] = [
    Target::WarStatus,
    Target::Statistics,
    Target::Planets,
    Target::Campaigns,
    Target::Factions,
    Target::Biomes,
    Target::Assignments,
    Target::Dispatches,
    Target::PlanetEvents,
];

/// Outcome of one collection cycle.
#[derive(Debug, Default)]
pub struct CycleReport {
    pub succeeded: Vec<&'static str>,
    pub failed: Vec<&'static str>,
    /// Whether war status was fetched in this cycle.
    pub upstream_available: bool,
}

struct RunningTask {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

/// Timer-driven collector.
pub struct Collector {
    upstream: Arc<dyn Upstream>,
    store: Store,
    interval: Duration,
    /// Held for the duration of a cycle so cycles never overlap.
    cycle_lock: Mutex<()>,
    task: Mutex<Option<RunningTask>>,
}

impl Collector {
    pub fn new(upstream: Arc<dyn Upstream>, store: Store, interval: Duration) -> Self {
        Self {
            upstream,
            store,
            interval,
            cycle_lock: Mutex::new(()),
            task: Mutex::new(None),
        }
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Start the schedule: one cycle immediately, then one every interval.
    ///
    /// Returns `false` (and does nothing) if already running.
    pub async fn start(self: &Arc<Self>) -> bool {
        let mut task = self.task.lock().await;
        if task.as_ref().is_some_and(|t| !t.handle.is_finished()) {
            tracing::info!("Collector already running");
            return false;
        }

        let cancel = CancellationToken::new();
        let this = Arc::clone(self);
        let token = cancel.clone();
        let handle = tokio::spawn(async move { this.run(token).await });

        *task = Some(RunningTask { cancel, handle });
        tracing::info!(interval_secs = self.interval.as_secs(), "Collector started");
        true
    }

    /// Cancel the schedule and wait for the task to exit. A cycle already
    /// in progress runs to completion first.
    ///
    /// Returns `false` if the collector was not running.
    pub async fn stop(&self) -> bool {
        let Some(running) = self.task.lock().await.take() else {
            return false;
        };

        running.cancel.cancel();
        if let Err(e) = running.handle.await {
            tracing::error!(error = %e, "Collector task ended abnormally");
        }
        tracing::info!("Collector stopped");
        true
    }

    pub async fn is_running(&self) -> bool {
        self.task
            .lock()
            .await
            .as_ref()
            .is_some_and(|t| !t.handle.is_finished())
    }

    async fn run(&self, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::info!("Collector shutting down");
                    break;
                }
                _ = ticker.tick() => {
                    self.collect_all().await;
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Collection
    // ------------------------------------------------------------------

    /// Run one full collection cycle.
    pub async fn collect_all(&self) -> CycleReport {
        let _cycle = self.cycle_lock.lock().await;
        let started = Instant::now();
        let mut report = CycleReport::default();

        for target in CYCLE_TARGETS {
            match self.upstream.fetch(target).await {
                Ok(data) => {
                    persist(&self.store, target, &data).await;
                    if target == Target::WarStatus {
                        report.upstream_available = true;
                    }
                    report.succeeded.push(target.name());
                }
                Err(e) => {
                    tracing::warn!(resource = target.name(), error = %e, "Collection skipped");
                    report.failed.push(target.name());
                }
            }
        }

        self.store
            .set_flag(UPSTREAM_API_AVAILABLE, report.upstream_available)
            .await;

        tracing::info!(
            succeeded = report.succeeded.len(),
            failed = report.failed.len(),
            upstream_available = report.upstream_available,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Collection cycle finished",
        );
        report
    }

    /// Fetch one resource now and store it. Used by the refresh routes.
    pub async fn refresh(&self, target: Target) -> Result<Value, UpstreamError> {
        let data = self.upstream.fetch(target).await?;
        persist(&self.store, target, &data).await;
        Ok(data)
    }

    /// On-demand refresh of a single planet's status.
    pub async fn collect_planet(&self, index: i64) -> Result<Value, UpstreamError> {
        self.refresh(Target::Planet(index)).await
    }
}

/// Where a fetched document goes: an appended whole-document snapshot,
/// keyed per-item rows, or both.
pub fn storage_for(target: Target) -> (Option<SnapshotKind>, Option<SnapshotKind>) {
    match target {
        Target::WarStatus => (Some(SnapshotKind::WarStatus), None),
        Target::Statistics => (Some(SnapshotKind::Statistics), None),
        Target::Planets => (Some(SnapshotKind::Planets), Some(SnapshotKind::PlanetStatus)),
        Target::Planet(_) => (None, Some(SnapshotKind::PlanetStatus)),
        Target::Campaigns => (Some(SnapshotKind::Campaigns), Some(SnapshotKind::Campaign)),
        Target::Factions => (Some(SnapshotKind::Factions), None),
        Target::Biomes => (Some(SnapshotKind::Biomes), None),
        Target::Assignments => (None, Some(SnapshotKind::Assignment)),
        Target::Dispatches => (None, Some(SnapshotKind::Dispatch)),
        Target::PlanetEvents => (None, Some(SnapshotKind::PlanetEvent)),
    }
}

/// Write a fetched document to the store. Returns whether every write
/// succeeded; failures are already logged by the store.
pub async fn persist(store: &Store, target: Target, data: &Value) -> bool {
    if let Target::Planet(index) = target {
        // Keyed on the requested index, whatever the document says.
        let snapshot =
            NewSnapshot::keyed(SnapshotKind::PlanetStatus, index.to_string(), data.clone())
                .with_entity_key(Some(index));
        return store.append_or_upsert(snapshot).await;
    }

    let (document, items) = storage_for(target);
    let mut ok = true;

    if let Some(kind) = document {
        ok &= store.save_document(kind, data.clone()).await;
    }

    if let Some(kind) = items {
        match data {
            Value::Array(list) => {
                ok &= store.save_items(kind, list).await == list.len();
            }
            single => match NewSnapshot::from_item(kind, single.clone()) {
                Some(snapshot) => ok &= store.append_or_upsert(snapshot).await,
                None => {
                    tracing::warn!(kind = %kind, "Fetched item has no id, not stored");
                    ok = false;
                }
            },
        }
    }

    ok
}
