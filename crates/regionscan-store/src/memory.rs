//! In-memory adapters for development and testing.
//!
//! `MemoryAssetStore` answers the same queries as the PostgreSQL adapter
//! from an R-tree of asset locations and a list of locode rows.

use async_trait::async_trait;
use chrono::{Datelike, NaiveDateTime};
use regionscan_core::error::Result;
use regionscan_core::models::{
    AssetRecord, BoundaryLayer, BoundingBox, LocodeBoundary, LocodeMatch, RegionCode,
    RegionGeometry, SectorRecord,
};
use regionscan_core::formats::BoundaryRecord;
use rstar::primitives::GeomWithData;
use rstar::{RTree, AABB};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock};

use crate::pattern::LikePattern;
use crate::ports::{AssetStore, BoundarySource};

/// An asset row together with the columns only some queries read
#[derive(Debug, Clone, PartialEq)]
struct StoredAsset {
    record: AssetRecord,
    start_time: Option<NaiveDateTime>,
}

type AssetEntry = GeomWithData<[f64; 2], StoredAsset>;

/// A row of the locode table
#[derive(Debug, Clone)]
struct LocodeRow {
    boundary: LocodeBoundary,
    name: String,
    display_name: Option<String>,
}

/// In-memory implementation of AssetStore
#[derive(Debug, Clone, Default)]
pub struct MemoryAssetStore {
    assets: Arc<RwLock<RTree<AssetEntry>>>,
    locodes: Arc<RwLock<Vec<LocodeRow>>>,
}

impl MemoryAssetStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from asset records in one pass
    pub fn with_assets(records: impl IntoIterator<Item = AssetRecord>) -> Self {
        let entries = records
            .into_iter()
            .map(|record| entry(record, None))
            .collect::<Vec<_>>();

        Self {
            assets: Arc::new(RwLock::new(RTree::bulk_load(entries))),
            locodes: Arc::default(),
        }
    }

    /// Add an asset row
    pub fn insert_asset(&self, record: AssetRecord) {
        self.insert_asset_started(record, None);
    }

    /// Add an asset row with the start time used by sector queries
    pub fn insert_asset_started(&self, record: AssetRecord, start_time: Option<NaiveDateTime>) {
        let mut assets = self.assets.write().unwrap_or_else(PoisonError::into_inner);
        assets.insert(entry(record, start_time));
    }

    /// Add a row to the locode table
    pub fn insert_locode(
        &self,
        boundary: LocodeBoundary,
        name: impl Into<String>,
        display_name: Option<String>,
    ) {
        let mut locodes = self.locodes.write().unwrap_or_else(PoisonError::into_inner);
        locodes.push(LocodeRow {
            boundary,
            name: name.into(),
            display_name,
        });
    }

    /// Number of asset rows, duplicates included
    pub fn asset_count(&self) -> usize {
        self.assets.read().unwrap_or_else(PoisonError::into_inner).size()
    }
}

fn entry(record: AssetRecord, start_time: Option<NaiveDateTime>) -> AssetEntry {
    GeomWithData::new([record.lon, record.lat], StoredAsset { record, start_time })
}

/// Key of `SELECT DISTINCT lat, lon, filename, reference_number, locode`
type DistinctKey = (u64, u64, String, Option<String>, Option<String>);

fn distinct_key(record: &AssetRecord) -> DistinctKey {
    (
        record.lat.to_bits(),
        record.lon.to_bits(),
        record.filename.clone(),
        record.reference_number.clone(),
        record.locode.clone(),
    )
}

#[async_trait]
impl AssetStore for MemoryAssetStore {
    async fn assets_in_box(&self, bbox: &BoundingBox) -> Result<Vec<AssetRecord>> {
        let assets = self.assets.read().unwrap_or_else(PoisonError::into_inner);
        let envelope = AABB::from_corners([bbox.west(), bbox.south()], [bbox.east(), bbox.north()]);

        let mut seen = HashSet::new();
        let records = assets
            .locate_in_envelope(&envelope)
            .map(|entry| &entry.data.record)
            .filter(|record| bbox.contains(record.lat, record.lon))
            .filter(|record| seen.insert(distinct_key(record)))
            .cloned()
            .collect();

        Ok(records)
    }

    async fn locode_boundaries(&self, locode: &str) -> Result<Vec<LocodeBoundary>> {
        let locodes = self.locodes.read().unwrap_or_else(PoisonError::into_inner);
        Ok(locodes
            .iter()
            .filter(|row| row.boundary.locode == locode)
            .map(|row| row.boundary.clone())
            .collect())
    }

    async fn search_locodes(&self, name: &str) -> Result<Vec<LocodeMatch>> {
        let pattern = LikePattern::contains("name", name)?;
        let locodes = self.locodes.read().unwrap_or_else(PoisonError::into_inner);

        let mut matches: Vec<LocodeMatch> = locodes
            .iter()
            .filter(|row| pattern.matches(&row.name))
            .map(|row| LocodeMatch {
                locode: row.boundary.locode.clone(),
                name: row.name.clone(),
                display_name: row.display_name.clone(),
            })
            .collect();

        matches.sort_by(|a, b| a.name.cmp(&b.name).then(a.locode.cmp(&b.locode)));
        Ok(matches)
    }

    async fn sector_assets(&self, locode: &str, sector: &str) -> Result<Vec<SectorRecord>> {
        let pattern = LikePattern::prefix("sector", sector)?;
        let assets = self.assets.read().unwrap_or_else(PoisonError::into_inner);

        let distinct: BTreeSet<(String, Option<i32>, String)> = assets
            .iter()
            .map(|entry| &entry.data)
            .filter(|stored| stored.record.locode.as_deref() == Some(locode))
            .filter_map(|stored| {
                let reference = stored.record.reference().filter(|r| pattern.matches(r))?;
                Some((
                    reference.to_string(),
                    stored.start_time.map(|t| t.year()),
                    locode.to_string(),
                ))
            })
            .collect();

        Ok(distinct
            .into_iter()
            .map(|(reference_number, year, locode)| SectorRecord {
                locode,
                year,
                reference_number,
            })
            .collect())
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}

/// In-memory implementation of BoundarySource
#[derive(Debug, Clone, Default)]
pub struct MemoryBoundarySource {
    layers: HashMap<BoundaryLayer, Vec<BoundaryRecord>>,
}

impl MemoryBoundarySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a boundary to a layer; earlier entries win on duplicate codes
    pub fn with_boundary(
        mut self,
        layer: BoundaryLayer,
        code: impl Into<String>,
        geometry: RegionGeometry,
    ) -> Self {
        self.layers
            .entry(layer)
            .or_default()
            .push(BoundaryRecord::new(Some(code.into()), geometry));
        self
    }
}

impl BoundarySource for MemoryBoundarySource {
    fn find_boundary(
        &self,
        layer: BoundaryLayer,
        code: &RegionCode,
    ) -> Result<Option<RegionGeometry>> {
        Ok(self
            .layers
            .get(&layer)
            .and_then(|records| first_match(records, code)))
    }

    fn layer_len(&self, layer: BoundaryLayer) -> Result<usize> {
        Ok(self.layers.get(&layer).map(Vec::len).unwrap_or(0))
    }
}

/// Geometry of the first record whose code matches
pub(crate) fn first_match(records: &[BoundaryRecord], code: &RegionCode) -> Option<RegionGeometry> {
    records
        .iter()
        .find(|record| record.code.as_deref().is_some_and(|stored| code.matches(stored)))
        .map(|record| record.geometry.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use geo::polygon;

    fn at(year: i32) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(year, 1, 1).and_then(|d| d.and_hms_opt(0, 0, 0))
    }

    fn unit_square(x0: f64) -> RegionGeometry {
        RegionGeometry::Polygon(polygon![
            (x: x0, y: 0.0),
            (x: x0 + 1.0, y: 0.0),
            (x: x0 + 1.0, y: 1.0),
            (x: x0, y: 1.0),
            (x: x0, y: 0.0)
        ])
    }

    #[tokio::test]
    async fn test_assets_in_box_is_inclusive() {
        let store = MemoryAssetStore::with_assets(vec![
            AssetRecord::new(10.0, 20.0, "a.csv", "I.1"),
            AssetRecord::new(0.0, 5.0, "b.csv", "I.2"),
            AssetRecord::new(5.0, 10.0, "c.csv", "I.3"),
            AssetRecord::new(10.5, 10.0, "d.csv", "I.4"),
        ]);

        let bbox = BoundingBox::new(10.0, 0.0, 20.0, 5.0).unwrap();
        let mut refs: Vec<_> = store
            .assets_in_box(&bbox)
            .await
            .unwrap()
            .into_iter()
            .filter_map(|r| r.reference_number)
            .collect();
        refs.sort();

        assert_eq!(refs, vec!["I.1", "I.2", "I.3"]);
    }

    #[tokio::test]
    async fn test_assets_in_box_is_distinct() {
        let store = MemoryAssetStore::new();
        let record = AssetRecord::new(1.0, 1.0, "a.csv", "I.1").with_locode("US NYC");
        store.insert_asset(record.clone());
        store.insert_asset(record.clone());
        store.insert_asset(AssetRecord::new(1.0, 1.0, "a.csv", "I.1"));

        let bbox = BoundingBox::new(2.0, 0.0, 2.0, 0.0).unwrap();
        let records = store.assets_in_box(&bbox).await.unwrap();

        assert_eq!(store.asset_count(), 3);
        assert_eq!(records.len(), 2);
    }

    #[tokio::test]
    async fn test_locode_boundaries() {
        let store = MemoryAssetStore::new();
        store.insert_locode(
            LocodeBoundary::new("US NYC", "POLYGON((0 0, 1 0, 1 1, 0 0))"),
            "New York",
            Some("New York, United States".to_string()),
        );

        assert_eq!(store.locode_boundaries("US NYC").await.unwrap().len(), 1);
        assert!(store.locode_boundaries("US LAX").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_locodes() {
        let store = MemoryAssetStore::new();
        store.insert_locode(LocodeBoundary::new("US NYC", ""), "New York", None);
        store.insert_locode(LocodeBoundary::new("GB YRK", ""), "York", None);
        store.insert_locode(LocodeBoundary::new("DE BER", ""), "Berlin", None);

        let matches = store.search_locodes("york").await.unwrap();
        let locodes: Vec<_> = matches.iter().map(|m| m.locode.as_str()).collect();
        assert_eq!(locodes, vec!["US NYC", "GB YRK"]);

        assert!(store.search_locodes("").await.is_err());
    }

    #[tokio::test]
    async fn test_sector_assets() {
        let store = MemoryAssetStore::new();
        store.insert_asset_started(
            AssetRecord::new(1.0, 1.0, "a.csv", "II.1.1").with_locode("US NYC"),
            at(2021),
        );
        store.insert_asset_started(
            AssetRecord::new(1.5, 1.0, "b.csv", "II.1.1").with_locode("US NYC"),
            at(2021),
        );
        store.insert_asset_started(
            AssetRecord::new(1.0, 1.5, "c.csv", "I.1.1").with_locode("US NYC"),
            at(2020),
        );
        store.insert_asset_started(
            AssetRecord::new(1.0, 1.0, "d.csv", "II.2.1").with_locode("US LAX"),
            at(2020),
        );

        let records = store.sector_assets("US NYC", "II").await.unwrap();
        assert_eq!(
            records,
            vec![SectorRecord {
                locode: "US NYC".to_string(),
                year: Some(2021),
                reference_number: "II.1.1".to_string(),
            }]
        );

        // A bare "I" prefix also matches the "II" sector
        assert_eq!(store.sector_assets("US NYC", "I").await.unwrap().len(), 2);
    }

    #[test]
    fn test_boundary_source_first_match_wins() {
        let source = MemoryBoundarySource::new()
            .with_boundary(BoundaryLayer::Countries, "us", unit_square(0.0))
            .with_boundary(BoundaryLayer::Countries, "US", unit_square(10.0));

        let code = RegionCode::new("US").unwrap();
        let geometry = source.find_boundary(BoundaryLayer::Countries, &code).unwrap();
        assert_eq!(geometry, Some(unit_square(0.0)));

        let missing = RegionCode::new("ZZ").unwrap();
        assert!(source.find_boundary(BoundaryLayer::Countries, &missing).unwrap().is_none());
        assert!(source.find_boundary(BoundaryLayer::States, &code).unwrap().is_none());
        assert_eq!(source.layer_len(BoundaryLayer::Countries).unwrap(), 2);
    }
}
