//! End-to-end region queries against the in-memory adapters

use geo::{polygon, MultiPolygon};
use regionscan_core::models::{
    AggregatedSummary, AssetRecord, BoundaryLayer, Granularity, LocodeBoundary, Padding,
    RegionGeometry,
};
use regionscan_core::RegionscanError;
use regionscan_geo::extract_bounding_box;
use regionscan_pipeline::{RegionPipeline, RegionQuery};
use regionscan_store::{MemoryAssetStore, MemoryBoundarySource};
use std::sync::Arc;

/// Simplified California outline
fn california() -> RegionGeometry {
    RegionGeometry::Polygon(polygon![
        (x: -124.4, y: 42.0),
        (x: -120.0, y: 42.0),
        (x: -120.0, y: 39.0),
        (x: -114.1, y: 34.3),
        (x: -114.7, y: 32.7),
        (x: -117.1, y: 32.5),
        (x: -120.6, y: 34.4),
        (x: -122.6, y: 36.9),
        (x: -124.4, y: 42.0)
    ])
}

/// Two islands
fn archipelago() -> RegionGeometry {
    RegionGeometry::MultiPolygon(MultiPolygon::new(vec![
        polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 1.0, y: 1.0),
            (x: 0.0, y: 1.0),
            (x: 0.0, y: 0.0)
        ],
        polygon![
            (x: 5.0, y: 5.0),
            (x: 6.0, y: 5.0),
            (x: 6.0, y: 6.0),
            (x: 5.0, y: 6.0),
            (x: 5.0, y: 5.0)
        ],
    ]))
}

fn fixture() -> RegionPipeline {
    let boundaries = MemoryBoundarySource::new()
        .with_boundary(BoundaryLayer::States, "US-CA", california())
        .with_boundary(BoundaryLayer::Countries, "XA", archipelago());

    let store = MemoryAssetStore::with_assets(vec![
        AssetRecord::new(36.74, -119.79, "power.csv", "I.1.1").with_locode("US FAT"),
        AssetRecord::new(39.53, -119.81, "power.csv", "I.1.1").with_locode("US RNO"),
        AssetRecord::new(36.17, -115.14, "transport.csv", "II.1.1").with_locode("US LAS"),
        AssetRecord::new(33.45, -112.07, "transport.csv", "II.1.1").with_locode("US PHX"),
        AssetRecord::new(0.5, 0.5, "waste.csv", "III.1.1"),
        AssetRecord::new(5.5, 5.5, "waste.csv", "III.2.1").with_locode("XA ISL"),
        AssetRecord::new(3.0, 3.0, "waste.csv", "III.1.1"),
    ]);

    store.insert_locode(
        LocodeBoundary::new("US FAT", "POLYGON((-120 36.6, -119.6 36.6, -119.6 36.9, -120 36.9, -120 36.6))"),
        "Fresno",
        Some("Fresno, California, United States".to_string()),
    );
    store.insert_locode(LocodeBoundary::new("US DUP", "POLYGON((0 0, 1 0, 1 1, 0 0))"), "Dup", None);
    store.insert_locode(LocodeBoundary::new("US DUP", "POLYGON((0 0, 2 0, 2 2, 0 0))"), "Dup", None);

    RegionPipeline::new(Arc::new(boundaries), Arc::new(store))
}

fn references(records: &[AssetRecord]) -> Vec<String> {
    let mut refs: Vec<String> = records
        .iter()
        .map(|r| format!("{}@{:?}", r.reference().unwrap_or("-"), r.locode))
        .collect();
    refs.sort();
    refs
}

#[tokio::test]
async fn test_state_query_drops_points_outside_boundary() {
    let pipeline = fixture();
    let query = RegionQuery::new(Granularity::State, "us-ca").unwrap();

    let report = pipeline.run(&query).await.unwrap();

    // Fresno, Reno and Las Vegas fall in the box; Phoenix does not
    assert_eq!(report.candidates, 3);
    assert_eq!(report.contained.len(), 1);
    assert_eq!(report.contained[0].locode.as_deref(), Some("US FAT"));
    assert!(report.outside.is_none());

    assert_eq!(report.summary.total, 1);
    assert_eq!(report.summary.distinct_locodes, 1);
    assert_eq!(report.explanation.records_rejected, 2);
    assert_eq!(report.explanation.phases.len(), 5);
}

#[tokio::test]
async fn test_california_keeps_bay_area_drops_nevada() {
    let boundaries = MemoryBoundarySource::new().with_boundary(BoundaryLayer::States, "US-CA", california());
    let store = MemoryAssetStore::with_assets(vec![
        AssetRecord::new(37.0, -122.0, "fixture.csv", "I.1.1"),
        AssetRecord::new(39.0, -119.0, "fixture.csv", "I.1.1"),
    ]);
    let pipeline = RegionPipeline::new(Arc::new(boundaries), Arc::new(store));

    let report = pipeline.run(&RegionQuery::new(Granularity::State, "US-CA").unwrap()).await.unwrap();

    assert_eq!(report.candidates, 2);
    assert_eq!(report.contained.len(), 1);
    assert_eq!((report.contained[0].lat, report.contained[0].lon), (37.0, -122.0));
}

#[tokio::test]
async fn test_outside_points_on_request() {
    let pipeline = fixture();
    let query = RegionQuery::new(Granularity::State, "US-CA").unwrap().with_outside(true);

    let report = pipeline.run(&query).await.unwrap();
    let outside = report.outside.unwrap();

    assert_eq!(report.contained.len(), 1);
    assert_eq!(
        references(&outside),
        vec!["I.1.1@Some(\"US RNO\")", "II.1.1@Some(\"US LAS\")"]
    );
}

#[tokio::test]
async fn test_padding_widens_scan_not_result() {
    let pipeline = fixture();
    let padded = RegionQuery::new(Granularity::State, "US-CA")
        .unwrap()
        .with_padding(Padding::new(0.0, 2.5).unwrap());

    let report = pipeline.run(&padded).await.unwrap();

    // Phoenix is within 2.5 degrees east of the envelope
    assert_eq!(report.candidates, 4);
    assert_eq!(report.contained.len(), 1);
    assert!(report.search_box.encloses(&report.envelope));
}

#[tokio::test]
async fn test_multipolygon_country() {
    let pipeline = fixture();
    let query = RegionQuery::new(Granularity::Country, "XA").unwrap();

    let report = pipeline.run(&query).await.unwrap();

    // The point between the islands is in the box but in neither part
    assert_eq!(report.candidates, 3);
    assert_eq!(
        references(&report.contained),
        vec!["III.1.1@None", "III.2.1@Some(\"XA ISL\")"]
    );
    assert_eq!(report.summary.reference_numbers.len(), 2);
    assert_eq!(report.summary.locode_references.len(), 1);
}

#[tokio::test]
async fn test_unknown_region_is_not_found() {
    let pipeline = fixture();
    let query = RegionQuery::new(Granularity::Country, "ZZ").unwrap();

    let resolved = pipeline.resolver().resolve(&query.code, query.granularity).await.unwrap();
    assert!(resolved.is_none());

    let geometry = resolved.map(|r| r.geometry);
    assert!(extract_bounding_box(geometry.as_ref(), Padding::none()).is_err());

    match pipeline.run(&query).await {
        Err(RegionscanError::RegionNotFound { granularity, code }) => {
            assert_eq!(granularity, Granularity::Country);
            assert_eq!(code, "ZZ");
        }
        other => panic!("expected RegionNotFound, got {:?}", other.map(|r| r.candidates)),
    }
}

#[tokio::test]
async fn test_city_query() {
    let pipeline = fixture();
    let query = RegionQuery::new(Granularity::City, "us fat").unwrap();

    let report = pipeline.run(&query).await.unwrap();

    assert_eq!(report.contained.len(), 1);
    assert!(report.stored_bbox.is_none());
    assert_eq!(
        report.summary.reference_numbers.iter().next().and_then(|r| r.as_deref()),
        Some("I.1.1")
    );
}

#[tokio::test]
async fn test_duplicate_and_absent_locodes() {
    let pipeline = fixture();

    let duplicate = RegionQuery::new(Granularity::City, "US DUP").unwrap();
    assert!(matches!(
        pipeline.run(&duplicate).await,
        Err(RegionscanError::AmbiguousLocode { count: 2, .. })
    ));

    let absent = RegionQuery::new(Granularity::City, "US XXX").unwrap();
    let err = pipeline.run(&absent).await.unwrap_err();
    assert!(matches!(err, RegionscanError::LocodeNotFound { .. }));
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_identical_runs_are_identical() {
    let pipeline = fixture();
    let query = RegionQuery::new(Granularity::Country, "XA").unwrap().with_outside(true);

    let first = pipeline.run(&query).await.unwrap();
    let second = pipeline.run(&query).await.unwrap();

    assert_eq!(references(&first.contained), references(&second.contained));
    assert_eq!(first.summary, second.summary);
    assert_eq!(first.search_box, second.search_box);
    assert_eq!(first.candidates, second.candidates);
}

#[tokio::test]
async fn test_empty_result_has_zero_summary() {
    let boundaries = MemoryBoundarySource::new().with_boundary(
        BoundaryLayer::Countries,
        "XB",
        RegionGeometry::Polygon(polygon![
            (x: 100.0, y: 10.0),
            (x: 101.0, y: 10.0),
            (x: 101.0, y: 11.0),
            (x: 100.0, y: 10.0)
        ]),
    );
    let pipeline = RegionPipeline::new(Arc::new(boundaries), Arc::new(MemoryAssetStore::new()));

    let report = pipeline.run(&RegionQuery::new(Granularity::Country, "XB").unwrap()).await.unwrap();

    assert!(report.contained.is_empty());
    assert_eq!(report.summary, AggregatedSummary::default());
}

#[tokio::test]
async fn test_search_and_sector_queries() {
    let pipeline = fixture();

    let matches = pipeline.search_locodes("fres").await.unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].locode, "US FAT");

    assert!(matches!(
        pipeline.search_locodes(" ").await,
        Err(RegionscanError::InvalidQuery { .. })
    ));

    let code = regionscan_core::models::RegionCode::new("US LAS").unwrap();
    let records = pipeline.sector_assets(&code, "II").await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].year, None);
}
