//! Boundary geometry, padding and bounding box types.
//!
//! Coordinates follow the `geo` convention: `x` is longitude and `y` is
//! latitude, both in degrees (EPSG:4326).

use geo::{coord, MultiPolygon, Polygon, Rect};
use serde::{Deserialize, Serialize};

use crate::error::{RegionscanError, Result};

/// Shape of a resolved boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeometryVariant {
    Polygon,
    MultiPolygon,
}

impl std::fmt::Display for GeometryVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeometryVariant::Polygon => f.write_str("Polygon"),
            GeometryVariant::MultiPolygon => f.write_str("MultiPolygon"),
        }
    }
}

/// A resolved region boundary
///
/// Only polygonal shapes can bound a region, so the variants are limited to
/// single and multi-part polygons. Callers dispatch on the variant explicitly.
#[derive(Debug, Clone, PartialEq)]
pub enum RegionGeometry {
    Polygon(Polygon<f64>),
    MultiPolygon(MultiPolygon<f64>),
}

impl RegionGeometry {
    /// Build a geometry from a list of polygons.
    ///
    /// A single polygon stays a `Polygon`; several become a `MultiPolygon`.
    pub fn from_polygons(mut polygons: Vec<Polygon<f64>>) -> Result<Self> {
        match polygons.len() {
            0 => Err(RegionscanError::EmptyGeometry),
            1 => Ok(RegionGeometry::Polygon(polygons.remove(0))),
            _ => Ok(RegionGeometry::MultiPolygon(MultiPolygon::new(polygons))),
        }
    }

    pub fn variant(&self) -> GeometryVariant {
        match self {
            RegionGeometry::Polygon(_) => GeometryVariant::Polygon,
            RegionGeometry::MultiPolygon(_) => GeometryVariant::MultiPolygon,
        }
    }

    /// All constituent polygons (one for a `Polygon`)
    pub fn parts(&self) -> &[Polygon<f64>] {
        match self {
            RegionGeometry::Polygon(polygon) => std::slice::from_ref(polygon),
            RegionGeometry::MultiPolygon(multi) => &multi.0,
        }
    }

    pub fn part_count(&self) -> usize {
        self.parts().len()
    }

    /// True when no part has an exterior coordinate
    pub fn is_empty(&self) -> bool {
        self.parts().iter().all(|part| part.exterior().0.is_empty())
    }

    /// Convert to a GeoJSON geometry for presentation
    pub fn to_geojson(&self) -> geojson::Geometry {
        let value = match self {
            RegionGeometry::Polygon(polygon) => geojson::Value::from(polygon),
            RegionGeometry::MultiPolygon(multi) => geojson::Value::from(multi),
        };
        geojson::Geometry::new(value)
    }
}

/// Padding applied to a bounding box, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Padding {
    pub lat: f64,
    pub lon: f64,
}

impl Padding {
    /// Create a padding, rejecting negative or non-finite values
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        let padding = Self { lat, lon };
        padding.validate()?;
        Ok(padding)
    }

    /// Zero padding
    pub fn none() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> Result<()> {
        for (axis, value) in [("latitude", self.lat), ("longitude", self.lon)] {
            if !value.is_finite() || value < 0.0 {
                return Err(RegionscanError::InvalidPadding {
                    reason: format!("{} padding must be a finite value >= 0, got {}", axis, value),
                });
            }
        }
        Ok(())
    }

    pub fn is_zero(&self) -> bool {
        self.lat == 0.0 && self.lon == 0.0
    }
}

/// Axis-aligned bounding box in degrees
///
/// Invariant: `north >= south` and `east >= west`. Boxes crossing the
/// antimeridian are not represented; see [`BoundingBox::is_global_span`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoundingBoxEdges")]
pub struct BoundingBox {
    north: f64,
    south: f64,
    east: f64,
    west: f64,
}

/// Unchecked edges as they appear on the wire
#[derive(Deserialize)]
struct BoundingBoxEdges {
    north: f64,
    south: f64,
    east: f64,
    west: f64,
}

impl TryFrom<BoundingBoxEdges> for BoundingBox {
    type Error = RegionscanError;

    fn try_from(edges: BoundingBoxEdges) -> Result<Self> {
        Self::new(edges.north, edges.south, edges.east, edges.west)
    }
}

impl BoundingBox {
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> Result<Self> {
        if [north, south, east, west].iter().any(|v| !v.is_finite()) {
            return Err(RegionscanError::InvalidBoundingBox {
                reason: "edges must be finite".to_string(),
            });
        }
        if north < south {
            return Err(RegionscanError::InvalidBoundingBox {
                reason: format!("north ({}) is below south ({})", north, south),
            });
        }
        if east < west {
            return Err(RegionscanError::InvalidBoundingBox {
                reason: format!("east ({}) is west of west ({})", east, west),
            });
        }
        Ok(Self { north, south, east, west })
    }

    /// Build from a `geo::Rect` (x = longitude, y = latitude)
    pub fn from_rect(rect: Rect<f64>) -> Self {
        Self {
            north: rect.max().y,
            south: rect.min().y,
            east: rect.max().x,
            west: rect.min().x,
        }
    }

    /// Widen every edge outward by the padding
    pub fn with_padding(&self, padding: Padding) -> Result<Self> {
        padding.validate()?;
        Ok(Self {
            north: self.north + padding.lat,
            south: self.south - padding.lat,
            east: self.east + padding.lon,
            west: self.west - padding.lon,
        })
    }

    /// Closed-rectangle membership test
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat <= self.north && lat >= self.south && lon <= self.east && lon >= self.west
    }

    /// True when `other` lies entirely inside this box
    pub fn encloses(&self, other: &BoundingBox) -> bool {
        other.north <= self.north
            && other.south >= self.south
            && other.east <= self.east
            && other.west >= self.west
    }

    pub fn north(&self) -> f64 {
        self.north
    }

    pub fn south(&self) -> f64 {
        self.south
    }

    pub fn east(&self) -> f64 {
        self.east
    }

    pub fn west(&self) -> f64 {
        self.west
    }

    pub fn width(&self) -> f64 {
        self.east - self.west
    }

    pub fn height(&self) -> f64 {
        self.north - self.south
    }

    /// A box wider than half the globe usually means the region straddles
    /// the antimeridian and min/max longitudes wrapped around.
    pub fn is_global_span(&self) -> bool {
        self.width() > 180.0
    }

    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(coord! { x: self.west, y: self.south }, coord! { x: self.east, y: self.north })
    }

    pub fn to_polygon(&self) -> Polygon<f64> {
        self.to_rect().to_polygon()
    }

    /// `[west, south, east, north]`, the GeoJSON bbox order
    pub fn to_array(&self) -> [f64; 4] {
        [self.west, self.south, self.east, self.north]
    }
}
