use async_trait::async_trait;
use regionscan_core::error::Result;
use regionscan_core::models::{
    AssetRecord, BoundaryLayer, BoundingBox, LocodeBoundary, LocodeMatch, RegionCode,
    RegionGeometry, SectorRecord,
};

/// Port for the asset database
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Distinct assets whose location lies inside the closed box.
    ///
    /// Output order is unspecified.
    async fn assets_in_box(&self, bbox: &BoundingBox) -> Result<Vec<AssetRecord>>;

    /// Every boundary row stored for a locode
    async fn locode_boundaries(&self, locode: &str) -> Result<Vec<LocodeBoundary>>;

    /// Locodes whose name contains `name`, case-insensitively
    async fn search_locodes(&self, name: &str) -> Result<Vec<LocodeMatch>>;

    /// Distinct (locode, year, reference number) rows of a locode whose
    /// reference number starts with `sector`
    async fn sector_assets(&self, locode: &str, sector: &str) -> Result<Vec<SectorRecord>>;

    /// Check that the store is reachable
    async fn health_check(&self) -> Result<()>;
}

/// Port for the static country and state boundary dataset
pub trait BoundarySource: Send + Sync {
    /// Geometry of the first record of `layer` whose code matches
    fn find_boundary(&self, layer: BoundaryLayer, code: &RegionCode)
        -> Result<Option<RegionGeometry>>;

    /// Number of records in a layer
    fn layer_len(&self, layer: BoundaryLayer) -> Result<usize>;
}
