//! Range query contract of the in-memory asset store

use proptest::prelude::*;
use regionscan_core::models::{AssetRecord, BoundingBox};
use regionscan_store::{AssetStore, MemoryAssetStore};

fn fixture_records(points: &[(f64, f64)]) -> Vec<AssetRecord> {
    points
        .iter()
        .enumerate()
        .map(|(i, &(lat, lon))| AssetRecord::new(lat, lon, "fixture.csv", format!("I.{}", i)))
        .collect()
}

#[tokio::test]
async fn test_box_edges_are_inclusive() {
    let store = MemoryAssetStore::with_assets(fixture_records(&[
        (42.0, -124.4),  // north-west corner
        (32.5, -114.1),  // south-east corner
        (37.0, -120.0),  // interior
        (42.01, -120.0), // just north
        (37.0, -114.09), // just east
    ]));

    let bbox = BoundingBox::new(42.0, 32.5, -114.1, -124.4).unwrap();
    let records = store.assets_in_box(&bbox).await.unwrap();

    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|r| bbox.contains(r.lat, r.lon)));
}

#[tokio::test]
async fn test_empty_store() {
    let store = MemoryAssetStore::new();
    let bbox = BoundingBox::new(1.0, -1.0, 1.0, -1.0).unwrap();
    assert!(store.assets_in_box(&bbox).await.unwrap().is_empty());
}

fn point() -> impl Strategy<Value = (f64, f64)> {
    (-60.0f64..60.0, -60.0f64..60.0)
}

proptest! {
    /// Property: the range query returns exactly the fixture records inside the closed box.
    #[test]
    fn prop_range_query_matches_scan(
        points in prop::collection::vec(point(), 0..60),
        corner in point(),
        height in 0.0f64..40.0,
        width in 0.0f64..40.0,
    ) {
        let records = fixture_records(&points);
        let store = MemoryAssetStore::with_assets(records.clone());
        let bbox = BoundingBox::new(corner.0 + height, corner.0, corner.1 + width, corner.1).unwrap();

        let runtime = tokio::runtime::Runtime::new().unwrap();
        let found = runtime.block_on(store.assets_in_box(&bbox)).unwrap();

        let expected = records.iter().filter(|r| bbox.contains(r.lat, r.lon)).count();
        prop_assert_eq!(found.len(), expected);
        prop_assert!(found.iter().all(|r| bbox.contains(r.lat, r.lon)));
    }
}
