//! Bounding box extraction
//!
//! The envelope of a boundary is the min/max of its coordinates over every
//! part, so single and multi-part geometries are handled the same way.
//! Boundaries straddling the antimeridian get a box spanning most of the
//! globe; that box is still a superset of the region, only a wider scan.

use geo::{BoundingRect, Rect};
use regionscan_core::error::{RegionscanError, Result};
use regionscan_core::models::{BoundingBox, Padding, RegionGeometry};

/// Unpadded envelope of all parts of a geometry
pub fn envelope(geometry: &RegionGeometry) -> Result<BoundingBox> {
    let rect = geometry
        .parts()
        .iter()
        .filter_map(|part| part.bounding_rect())
        .reduce(merge_rects)
        .ok_or(RegionscanError::EmptyGeometry)?;

    Ok(BoundingBox::from_rect(rect))
}

/// Envelope of a geometry expanded outward by the padding
pub fn from_geometry(geometry: &RegionGeometry, padding: Padding) -> Result<BoundingBox> {
    pad_envelope(&envelope(geometry)?, padding)
}

/// Expand an already computed envelope into a search box.
///
/// Warns when the result spans more than half the globe.
pub fn pad_envelope(envelope: &BoundingBox, padding: Padding) -> Result<BoundingBox> {
    let bbox = envelope.with_padding(padding)?;

    if bbox.is_global_span() {
        tracing::warn!(
            west = bbox.west(),
            east = bbox.east(),
            "Search box spans more than 180 degrees of longitude; \
             the region may cross the antimeridian and the scan will be wide"
        );
    }

    Ok(bbox)
}

/// Search box for a resolved geometry.
///
/// A missing geometry is rejected rather than turned into a zero box.
pub fn extract_bounding_box(
    geometry: Option<&RegionGeometry>,
    padding: Padding,
) -> Result<BoundingBox> {
    let geometry = geometry.ok_or(RegionscanError::GeometryMissing)?;
    from_geometry(geometry, padding)
}

fn merge_rects(a: Rect<f64>, b: Rect<f64>) -> Rect<f64> {
    Rect::new(
        geo::coord! { x: a.min().x.min(b.min().x), y: a.min().y.min(b.min().y) },
        geo::coord! { x: a.max().x.max(b.max().x), y: a.max().y.max(b.max().y) },
    )
}
