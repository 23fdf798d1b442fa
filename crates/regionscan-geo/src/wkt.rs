//! Parsing of stored WKT boundaries

use ::wkt::TryFromWkt;
use geo::Geometry;
use regionscan_core::error::{RegionscanError, Result};
use regionscan_core::models::RegionGeometry;

use crate::validation::validate_region_geometry;

/// Parse a WKT boundary into a region geometry.
///
/// Only `POLYGON` and `MULTIPOLYGON` can bound a region; any other geometry
/// type is a parse error. An optional EWKT `SRID=...;` prefix is ignored.
pub fn parse_region_wkt(text: &str) -> Result<RegionGeometry> {
    let body = strip_srid(text.trim());
    if body.is_empty() {
        return Err(RegionscanError::GeometryParse {
            reason: "boundary WKT is empty".to_string(),
        });
    }

    let geometry: Geometry<f64> =
        Geometry::try_from_wkt_str(body).map_err(|e| RegionscanError::GeometryParse {
            reason: e.to_string(),
        })?;

    let region = match geometry {
        Geometry::Polygon(polygon) => RegionGeometry::Polygon(polygon),
        Geometry::MultiPolygon(multi) => RegionGeometry::MultiPolygon(multi),
        other => {
            return Err(RegionscanError::GeometryParse {
                reason: format!("expected POLYGON or MULTIPOLYGON, found {}", geometry_name(&other)),
            })
        }
    };

    let validation = validate_region_geometry(&region);
    if !validation.is_valid {
        return Err(RegionscanError::GeometryParse {
            reason: validation.summary().unwrap_or_else(|| "invalid geometry".to_string()),
        });
    }

    Ok(region)
}

fn strip_srid(text: &str) -> &str {
    let has_srid = text
        .get(..5)
        .map(|prefix| prefix.eq_ignore_ascii_case("SRID="))
        .unwrap_or(false);
    if has_srid {
        if let Some((_, rest)) = text.split_once(';') {
            return rest.trim();
        }
    }
    text
}

fn geometry_name(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "POINT",
        Geometry::Line(_) => "LINE",
        Geometry::LineString(_) => "LINESTRING",
        Geometry::Polygon(_) => "POLYGON",
        Geometry::MultiPoint(_) => "MULTIPOINT",
        Geometry::MultiLineString(_) => "MULTILINESTRING",
        Geometry::MultiPolygon(_) => "MULTIPOLYGON",
        Geometry::GeometryCollection(_) => "GEOMETRYCOLLECTION",
        Geometry::Rect(_) => "RECT",
        Geometry::Triangle(_) => "TRIANGLE",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regionscan_core::models::GeometryVariant;

    #[test]
    fn test_parse_polygon() {
        let geometry = parse_region_wkt("POLYGON((0 0, 1 0, 1 1, 0 1, 0 0))").unwrap();
        assert_eq!(geometry.variant(), GeometryVariant::Polygon);
        assert_eq!(geometry.parts()[0].exterior().0.len(), 5);
    }

    #[test]
    fn test_parse_multipolygon() {
        let geometry = parse_region_wkt(
            "MULTIPOLYGON(((0 0, 1 0, 1 1, 0 0)), ((10 10, 11 10, 11 11, 10 10)))",
        )
        .unwrap();
        assert_eq!(geometry.variant(), GeometryVariant::MultiPolygon);
        assert_eq!(geometry.part_count(), 2);
    }

    #[test]
    fn test_parse_ewkt_prefix() {
        let geometry = parse_region_wkt("SRID=4326;POLYGON((0 0, 1 0, 1 1, 0 0))").unwrap();
        assert_eq!(geometry.variant(), GeometryVariant::Polygon);
    }

    #[test]
    fn test_rejects_point() {
        let err = parse_region_wkt("POINT(1 2)").unwrap_err();
        match err {
            RegionscanError::GeometryParse { reason } => assert!(reason.contains("POINT")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            parse_region_wkt("POLYGON((0 0, 1"),
            Err(RegionscanError::GeometryParse { .. })
        ));
        assert!(matches!(parse_region_wkt("   "), Err(RegionscanError::GeometryParse { .. })));
    }
}
