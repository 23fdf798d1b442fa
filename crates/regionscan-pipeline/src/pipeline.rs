use regionscan_core::error::{RegionscanError, Result};
use regionscan_core::models::{AggregatedSummary, LocodeMatch, RegionCode, SectorRecord};
use regionscan_geo::{envelope, filter_contained, pad_envelope, partition_contained};
use regionscan_store::ports::{AssetStore, BoundarySource};
use std::sync::Arc;
use std::time::Instant;

use crate::models::{PhaseTiming, QueryExplanation, RegionQuery, RegionReport};
use crate::resolver::GeometryResolver;

/// Region query pipeline
///
/// Phases run strictly in sequence: resolve the boundary, derive the search
/// box, scan the asset table, refine by containment, aggregate.
#[derive(Clone)]
pub struct RegionPipeline {
    resolver: GeometryResolver,
    assets: Arc<dyn AssetStore>,
}

impl RegionPipeline {
    /// Create a new region pipeline
    pub fn new(boundaries: Arc<dyn BoundarySource>, assets: Arc<dyn AssetStore>) -> Self {
        Self {
            resolver: GeometryResolver::new(boundaries, Arc::clone(&assets)),
            assets,
        }
    }

    pub fn resolver(&self) -> &GeometryResolver {
        &self.resolver
    }

    /// Execute a region query
    pub async fn run(&self, query: &RegionQuery) -> Result<RegionReport> {
        let mut phases = Vec::with_capacity(5);

        // Phase 1: Resolve the boundary
        let started = Instant::now();
        let resolved = self
            .resolver
            .resolve(&query.code, query.granularity)
            .await?
            .ok_or_else(|| RegionscanError::RegionNotFound {
                granularity: query.granularity,
                code: query.code.to_string(),
            })?;
        phases.push(timing("resolve", started));

        tracing::info!(
            code = %query.code,
            granularity = %query.granularity,
            parts = resolved.geometry.part_count(),
            "Resolved region boundary"
        );

        // Phase 2: Derive the search box
        let started = Instant::now();
        let unpadded = envelope(&resolved.geometry)?;
        let search_box = pad_envelope(&unpadded, query.padding)?;
        phases.push(timing("bounding_box", started));

        // Phase 3: Range query
        let started = Instant::now();
        let candidates = self.assets.assets_in_box(&search_box).await?;
        let scanned = candidates.len();
        phases.push(timing("range_query", started));

        tracing::info!(
            north = search_box.north(),
            south = search_box.south(),
            east = search_box.east(),
            west = search_box.west(),
            candidates = scanned,
            "Scanned asset table"
        );

        // Phase 4: Containment
        let started = Instant::now();
        let (contained, outside) = if query.include_outside {
            let (inside, outside) = partition_contained(candidates, &resolved.geometry);
            (inside, Some(outside))
        } else {
            (filter_contained(candidates, &resolved.geometry), None)
        };
        phases.push(timing("containment", started));

        // Phase 5: Aggregate
        let started = Instant::now();
        let summary = AggregatedSummary::from_records(&contained);
        phases.push(timing("aggregate", started));

        tracing::info!(
            code = %query.code,
            kept = contained.len(),
            rejected = scanned - contained.len(),
            distinct_locodes = summary.distinct_locodes,
            "Region query complete"
        );

        let explanation = QueryExplanation {
            geometry_variant: resolved.geometry.variant(),
            part_count: resolved.geometry.part_count(),
            padding: query.padding,
            wide_search_box: search_box.is_global_span(),
            records_scanned: scanned,
            records_kept: contained.len(),
            records_rejected: scanned - contained.len(),
            phases,
        };

        Ok(RegionReport {
            query: query.clone(),
            geometry: resolved.geometry,
            stored_bbox: resolved.stored_bbox,
            envelope: unpadded,
            search_box,
            candidates: scanned,
            contained,
            outside,
            summary,
            explanation,
        })
    }

    /// Locodes whose name contains `name`
    pub async fn search_locodes(&self, name: &str) -> Result<Vec<LocodeMatch>> {
        let matches = self.assets.search_locodes(name).await?;
        tracing::info!(name, matches = matches.len(), "Searched locodes");
        Ok(matches)
    }

    /// Assets of a city within an emissions sector, by year
    pub async fn sector_assets(&self, locode: &RegionCode, sector: &str) -> Result<Vec<SectorRecord>> {
        let records = self.assets.sector_assets(locode.as_str(), sector).await?;
        tracing::info!(locode = %locode, sector, records = records.len(), "Queried sector assets");
        Ok(records)
    }
}

fn timing(phase: &str, started: Instant) -> PhaseTiming {
    PhaseTiming {
        phase: phase.to_string(),
        elapsed_ms: started.elapsed().as_secs_f64() * 1000.0,
    }
}
