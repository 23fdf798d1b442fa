//! Point-in-polygon refinement of range query candidates
//!
//! A point on a boundary edge or vertex counts as inside. Records are tested
//! as `(lon, lat)` against every part of the geometry.

use geo::{Intersects, Point, Polygon};
use regionscan_core::models::{AssetRecord, RegionGeometry};

/// Whether a point lies inside or on the boundary of the geometry
pub fn point_in_geometry(point: &Point<f64>, geometry: &RegionGeometry) -> bool {
    match geometry {
        RegionGeometry::Polygon(polygon) => point_in_polygon(point, polygon),
        RegionGeometry::MultiPolygon(multi) => {
            multi.iter().any(|polygon| point_in_polygon(point, polygon))
        }
    }
}

fn point_in_polygon(point: &Point<f64>, polygon: &Polygon<f64>) -> bool {
    point.intersects(polygon)
}

/// Keep the records whose location lies within the geometry
pub fn filter_contained(records: Vec<AssetRecord>, geometry: &RegionGeometry) -> Vec<AssetRecord> {
    records
        .into_iter()
        .filter(|record| point_in_geometry(&record.point(), geometry))
        .collect()
}

/// Split records into `(inside, outside)` the geometry, preserving order
pub fn partition_contained(
    records: Vec<AssetRecord>,
    geometry: &RegionGeometry,
) -> (Vec<AssetRecord>, Vec<AssetRecord>) {
    records
        .into_iter()
        .partition(|record| point_in_geometry(&record.point(), geometry))
}
