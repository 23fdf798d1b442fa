//! Shapefile-backed boundary source with a per-layer cache
//!
//! Each layer is read from disk the first time it is queried and kept for
//! the life of the source. Loaded layers are immutable and shared through
//! `Arc`, so concurrent lookups only take the read lock.

use regionscan_core::error::Result;
use regionscan_core::formats::{BoundaryRecord, ShapefileLayerReader};
use regionscan_core::models::{BoundaryLayer, RegionCode, RegionGeometry, Resolution};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Instant;

use crate::memory::first_match;
use crate::ports::BoundarySource;

type LayerCache = HashMap<BoundaryLayer, Arc<Vec<BoundaryRecord>>>;

/// Natural Earth boundary layers read from a directory of shapefiles
#[derive(Debug)]
pub struct ShapefileBoundarySource {
    dir: PathBuf,
    resolution: Resolution,
    cache: RwLock<LayerCache>,
}

impl ShapefileBoundarySource {
    pub fn new(dir: impl Into<PathBuf>, resolution: Resolution) -> Self {
        Self {
            dir: dir.into(),
            resolution,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Path of the shapefile backing a layer
    pub fn layer_path(&self, layer: BoundaryLayer) -> PathBuf {
        self.dir.join(layer.file_name(self.resolution))
    }

    /// Whether a layer has already been loaded
    pub fn is_cached(&self, layer: BoundaryLayer) -> bool {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&layer)
    }

    /// Records of a layer, loading it on first use
    pub fn layer(&self, layer: BoundaryLayer) -> Result<Arc<Vec<BoundaryRecord>>> {
        if let Some(records) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&layer)
        {
            tracing::debug!(layer = %layer, "Boundary layer cache hit");
            return Ok(Arc::clone(records));
        }

        let path = self.layer_path(layer);
        let started = Instant::now();
        let records = ShapefileLayerReader::new(layer.code_attribute()).read(&path)?;

        tracing::debug!(
            layer = %layer,
            path = %path.display(),
            records = records.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Loaded boundary layer"
        );

        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        // Another reader may have loaded the layer while the file was read
        let records = cache.entry(layer).or_insert_with(|| Arc::new(records));
        Ok(Arc::clone(records))
    }
}

impl BoundarySource for ShapefileBoundarySource {
    fn find_boundary(
        &self,
        layer: BoundaryLayer,
        code: &RegionCode,
    ) -> Result<Option<RegionGeometry>> {
        let records = self.layer(layer)?;
        Ok(first_match(&records, code))
    }

    fn layer_len(&self, layer: BoundaryLayer) -> Result<usize> {
        Ok(self.layer(layer)?.len())
    }
}
