//! Readers for the static boundary datasets
//!
//! Country and state boundaries ship as Natural Earth shapefiles. The reader
//! in this module turns one layer into a list of [`BoundaryRecord`]s keyed by
//! the layer's ISO code attribute.

pub mod shapefile;

pub use self::shapefile::ShapefileLayerReader;

use crate::models::RegionGeometry;

/// One feature of a boundary layer
#[derive(Debug, Clone)]
pub struct BoundaryRecord {
    /// Upper-cased ISO code, `None` when the attribute is null or blank
    pub code: Option<String>,
    pub geometry: RegionGeometry,
}

impl BoundaryRecord {
    pub fn new(code: Option<String>, geometry: RegionGeometry) -> Self {
        let code = code
            .map(|c| c.trim().to_uppercase())
            .filter(|c| !c.is_empty());
        Self { code, geometry }
    }
}
