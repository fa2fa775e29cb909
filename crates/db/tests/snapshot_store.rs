//! Integration tests for snapshot storage on an in-memory database.

use assert_matches::assert_matches;
use chrono::{TimeZone, Utc};
use highcommand_core::kinds::SnapshotKind;
use highcommand_core::types::Timestamp;
use highcommand_db::models::snapshot::NewSnapshot;
use highcommand_db::repositories::{SnapshotRepo, SystemStatusRepo};
use highcommand_db::{DbPool, Store};
use serde_json::json;

async fn test_pool() -> DbPool {
    let pool = highcommand_db::create_pool("sqlite::memory:").await.unwrap();
    highcommand_db::run_migrations(&pool).await.unwrap();
    pool
}

fn at(secs: u32) -> Timestamp {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, secs).unwrap()
}

// ---------------------------------------------------------------------------
// Upsert and append semantics
// ---------------------------------------------------------------------------

#[tokio::test]
async fn keyed_write_updates_in_place_and_keeps_id() {
    let pool = test_pool().await;

    let first = NewSnapshot::keyed(SnapshotKind::Assignment, "7", json!({"id": 7, "v": 1}));
    let second = NewSnapshot::keyed(SnapshotKind::Assignment, "7", json!({"id": 7, "v": 2}));

    let a = SnapshotRepo::upsert(&pool, &first, at(1)).await.unwrap();
    let b = SnapshotRepo::upsert(&pool, &second, at(2)).await.unwrap();

    assert_eq!(a.id, b.id);
    assert_eq!(b.data.0, json!({"id": 7, "v": 2}));
    assert_eq!(b.captured_at, at(2));
    assert_eq!(SnapshotRepo::count(&pool, SnapshotKind::Assignment).await.unwrap(), 1);

    let found = SnapshotRepo::find_by_unique_key(&pool, SnapshotKind::Assignment, "7")
        .await
        .unwrap();
    assert_matches!(found, Some(row) if row.data.0["v"] == 2);
}

#[tokio::test]
async fn same_key_under_different_kinds_does_not_conflict() {
    let pool = test_pool().await;

    let assignment = NewSnapshot::keyed(SnapshotKind::Assignment, "1", json!({"id": 1}));
    let dispatch = NewSnapshot::keyed(SnapshotKind::Dispatch, "1", json!({"id": 1}));
    let a = SnapshotRepo::upsert(&pool, &assignment, at(1)).await.unwrap();
    let d = SnapshotRepo::upsert(&pool, &dispatch, at(1)).await.unwrap();

    assert_ne!(a.id, d.id);
}

#[tokio::test]
async fn unkeyed_writes_append() {
    let pool = test_pool().await;
    let store = Store::new(pool.clone());

    assert!(store.save_document(SnapshotKind::WarStatus, json!({"warId": 1})).await);
    assert!(store.save_document(SnapshotKind::WarStatus, json!({"warId": 1})).await);

    assert_eq!(SnapshotRepo::count(&pool, SnapshotKind::WarStatus).await.unwrap(), 2);
}

#[tokio::test]
async fn save_items_skips_items_without_ids() {
    let pool = test_pool().await;
    let store = Store::new(pool.clone());

    let items = vec![
        json!({"id": 1, "message": "first"}),
        json!({"message": "no id"}),
        json!({"id": 2, "message": "second"}),
    ];
    let written = store.save_items(SnapshotKind::Dispatch, &items).await;

    assert_eq!(written, 2);
    assert_eq!(SnapshotRepo::count(&pool, SnapshotKind::Dispatch).await.unwrap(), 2);
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

#[tokio::test]
async fn latest_snapshot_returns_newest_capture() {
    let pool = test_pool().await;
    for (secs, n) in [(1, 1), (2, 2), (3, 3)] {
        let doc = NewSnapshot::document(SnapshotKind::Statistics, json!({"n": n}));
        SnapshotRepo::upsert(&pool, &doc, at(secs)).await.unwrap();
    }

    let store = Store::new(pool);
    assert_eq!(
        store.latest_snapshot(SnapshotKind::Statistics).await,
        Some(json!({"n": 3}))
    );
}

#[tokio::test]
async fn equal_timestamps_resolve_to_last_inserted() {
    let pool = test_pool().await;
    for n in [1, 2] {
        let doc = NewSnapshot::document(SnapshotKind::Planets, json!([{"n": n}]));
        SnapshotRepo::upsert(&pool, &doc, at(5)).await.unwrap();
    }

    let store = Store::new(pool);
    assert_eq!(
        store.latest_snapshot(SnapshotKind::Planets).await,
        Some(json!([{"n": 2}]))
    );
}

#[tokio::test]
async fn capture_times_never_go_backwards() {
    let pool = test_pool().await;

    let newer = NewSnapshot::document(SnapshotKind::WarStatus, json!({"n": 1}));
    let older = NewSnapshot::document(SnapshotKind::WarStatus, json!({"n": 2}));
    SnapshotRepo::upsert(&pool, &newer, at(30)).await.unwrap();
    let row = SnapshotRepo::upsert(&pool, &older, at(10)).await.unwrap();

    assert_eq!(row.captured_at, at(30));

    let store = Store::new(pool);
    assert_eq!(
        store.latest_snapshot(SnapshotKind::WarStatus).await,
        Some(json!({"n": 2}))
    );
}

#[tokio::test]
async fn latest_honours_limit_and_order() {
    let pool = test_pool().await;
    for secs in 1..=5 {
        let doc = NewSnapshot::document(SnapshotKind::Statistics, json!({"n": secs}));
        SnapshotRepo::upsert(&pool, &doc, at(secs)).await.unwrap();
    }

    let store = Store::new(pool);
    let docs = store.latest(SnapshotKind::Statistics, 3).await;
    assert_eq!(docs, vec![json!({"n": 5}), json!({"n": 4}), json!({"n": 3})]);
}

// ---------------------------------------------------------------------------
// Per-entity reads
// ---------------------------------------------------------------------------

#[tokio::test]
async fn latest_by_key_filters_on_entity() {
    let pool = test_pool().await;
    let store = Store::new(pool);

    let planets = vec![
        json!({"index": 0, "name": "Super Earth"}),
        json!({"index": 5, "name": "Malevelon Creek"}),
    ];
    assert_eq!(store.save_items(SnapshotKind::PlanetStatus, &planets).await, 2);

    assert_eq!(
        store.latest_by_key(SnapshotKind::PlanetStatus, 5).await,
        Some(json!({"index": 5, "name": "Malevelon Creek"}))
    );
    assert_eq!(store.latest_by_key(SnapshotKind::PlanetStatus, 9).await, None);
    assert_eq!(store.history_by_key(SnapshotKind::PlanetStatus, 0, 10).await.len(), 1);
}

#[tokio::test]
async fn empty_store_reads_nothing() {
    let store = Store::new(test_pool().await);

    assert_eq!(store.latest_snapshot(SnapshotKind::Campaigns).await, None);
    assert!(store.latest(SnapshotKind::Assignment, 10).await.is_empty());
}

// ---------------------------------------------------------------------------
// Status flags
// ---------------------------------------------------------------------------

#[tokio::test]
async fn flags_are_created_then_overwritten() {
    let pool = test_pool().await;
    let store = Store::new(pool.clone());

    assert_eq!(store.get_flag("upstream_api_available").await, None);

    assert!(store.set_flag("upstream_api_available", true).await);
    assert_eq!(store.get_flag("upstream_api_available").await, Some(true));

    assert!(store.set_flag("upstream_api_available", false).await);
    assert_eq!(store.get_flag("upstream_api_available").await, Some(false));

    let row = SystemStatusRepo::find(&pool, "upstream_api_available")
        .await
        .unwrap();
    assert_matches!(row, Some(status) if status.value == "false");
}

// ---------------------------------------------------------------------------
// Degraded storage
// ---------------------------------------------------------------------------

#[tokio::test]
async fn closed_pool_degrades_instead_of_failing() {
    let pool = test_pool().await;
    let store = Store::new(pool.clone());
    pool.close().await;

    assert!(!store.is_healthy().await);
    assert!(!store.save_document(SnapshotKind::WarStatus, json!({})).await);
    assert!(!store.set_flag("upstream_api_available", true).await);
    assert_eq!(store.latest_snapshot(SnapshotKind::WarStatus).await, None);
    assert_eq!(store.get_flag("upstream_api_available").await, None);
}
