//! Geometry Resolver
//!
//! Countries and states are looked up in the static boundary layers; cities
//! come from the locode table of the asset store as WKT.

use regionscan_core::error::{RegionscanError, Result};
use regionscan_core::models::{BoundaryLayer, Granularity, RegionCode};
use regionscan_geo::parse_region_wkt;
use regionscan_store::ports::{AssetStore, BoundarySource};
use std::sync::Arc;

use crate::models::ResolvedRegion;

/// Resolves region codes to boundary geometries
#[derive(Clone)]
pub struct GeometryResolver {
    boundaries: Arc<dyn BoundarySource>,
    assets: Arc<dyn AssetStore>,
}

impl GeometryResolver {
    pub fn new(boundaries: Arc<dyn BoundarySource>, assets: Arc<dyn AssetStore>) -> Self {
        Self { boundaries, assets }
    }

    /// Resolve a region code at a granularity.
    ///
    /// An unknown country or state code resolves to `Ok(None)`. City codes
    /// must match exactly one locode row.
    pub async fn resolve(
        &self,
        code: &RegionCode,
        granularity: Granularity,
    ) -> Result<Option<ResolvedRegion>> {
        match granularity.boundary_layer() {
            Some(layer) => self.resolve_boundary(layer, code).await,
            None => self.resolve_locode(code).await.map(Some),
        }
    }

    async fn resolve_boundary(
        &self,
        layer: BoundaryLayer,
        code: &RegionCode,
    ) -> Result<Option<ResolvedRegion>> {
        // Layer loading reads shapefiles from disk
        let boundaries = Arc::clone(&self.boundaries);
        let code = code.clone();
        let geometry = tokio::task::spawn_blocking(move || boundaries.find_boundary(layer, &code))
            .await
            .map_err(|e| RegionscanError::Io(std::io::Error::other(e)))??;

        Ok(geometry.map(|geometry| ResolvedRegion { geometry, stored_bbox: None }))
    }

    async fn resolve_locode(&self, code: &RegionCode) -> Result<ResolvedRegion> {
        let mut rows = self.assets.locode_boundaries(code.as_str()).await?;

        match rows.len() {
            0 => Err(RegionscanError::LocodeNotFound {
                locode: code.to_string(),
            }),
            1 => {
                let row = rows.remove(0);
                let geometry = parse_region_wkt(&row.geometry_wkt)?;
                Ok(ResolvedRegion {
                    geometry,
                    stored_bbox: row.stored_bbox,
                })
            }
            count => Err(RegionscanError::AmbiguousLocode {
                locode: code.to_string(),
                count,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::polygon;
    use regionscan_core::models::{LocodeBoundary, RegionGeometry};
    use regionscan_store::{MemoryAssetStore, MemoryBoundarySource};

    fn resolver(store: MemoryAssetStore) -> GeometryResolver {
        let boundaries = MemoryBoundarySource::new().with_boundary(
            BoundaryLayer::Countries,
            "FR",
            RegionGeometry::Polygon(polygon![
                (x: -5.0, y: 42.0),
                (x: 8.0, y: 42.0),
                (x: 8.0, y: 51.0),
                (x: -5.0, y: 42.0)
            ]),
        );
        GeometryResolver::new(Arc::new(boundaries), Arc::new(store))
    }

    #[tokio::test]
    async fn test_country_lookup_is_case_insensitive() {
        let resolver = resolver(MemoryAssetStore::new());
        let code = RegionCode::new("fr").unwrap();
        let resolved = resolver.resolve(&code, Granularity::Country).await.unwrap();
        assert!(resolved.is_some());
    }

    #[tokio::test]
    async fn test_unknown_state_is_none() {
        let resolver = resolver(MemoryAssetStore::new());
        let code = RegionCode::new("FR-XX").unwrap();
        assert!(resolver.resolve(&code, Granularity::State).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_city_keeps_stored_bbox() {
        let store = MemoryAssetStore::new();
        store.insert_locode(
            LocodeBoundary::new("FR PAR", "POLYGON((2.2 48.8, 2.5 48.8, 2.5 48.9, 2.2 48.9, 2.2 48.8))")
                .with_stored_bbox(Some(48.9), Some(48.8), Some(2.5), Some(2.2)),
            "Paris",
            None,
        );

        let resolver = resolver(store);
        let code = RegionCode::new("fr par").unwrap();
        let resolved = resolver.resolve(&code, Granularity::City).await.unwrap().unwrap();
        assert!(resolved.stored_bbox.is_some());
        assert_eq!(resolved.geometry.part_count(), 1);
    }

    #[tokio::test]
    async fn test_city_with_bad_wkt() {
        let store = MemoryAssetStore::new();
        store.insert_locode(LocodeBoundary::new("FR PAR", "POINT(2.3 48.8)"), "Paris", None);

        let resolver = resolver(store);
        let code = RegionCode::new("FR PAR").unwrap();
        assert!(matches!(
            resolver.resolve(&code, Granularity::City).await,
            Err(RegionscanError::GeometryParse { .. })
        ));
    }
}
