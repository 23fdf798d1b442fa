//! Natural Earth shapefile layer reader
//!
//! A shapefile consists of several component files (.shp, .shx, .dbf) that
//! must all be present. Only polygonal shapes are kept; the ISO code of each
//! feature is read from a named DBF attribute.

use geo::{coord, LineString, Polygon};
use shapefile::dbase::{FieldValue, Record};
use shapefile::{PolygonRing, Shape};
use std::path::{Path, PathBuf};

use crate::error::{RegionscanError, Result};
use crate::formats::BoundaryRecord;
use crate::models::RegionGeometry;

/// Reads one boundary layer keyed by a code attribute
pub struct ShapefileLayerReader {
    code_attribute: String,
}

impl ShapefileLayerReader {
    pub fn new(code_attribute: impl Into<String>) -> Self {
        Self {
            code_attribute: code_attribute.into(),
        }
    }

    /// Read every polygonal feature of the layer at `path`
    pub fn read(&self, path: &Path) -> Result<Vec<BoundaryRecord>> {
        verify_components(path)?;

        let mut reader =
            shapefile::Reader::from_path(path).map_err(|e| RegionscanError::BoundaryDataset {
                path: path.to_path_buf(),
                reason: format!("Failed to open shapefile: {}", e),
            })?;

        let mut records = Vec::new();
        let mut skipped = 0usize;

        for result in reader.iter_shapes_and_records() {
            let (shape, record) = result.map_err(|e| RegionscanError::BoundaryDataset {
                path: path.to_path_buf(),
                reason: format!("Failed to read feature: {}", e),
            })?;

            let Some(polygons) = shape_to_polygons(&shape) else {
                skipped += 1;
                continue;
            };

            let geometry = match RegionGeometry::from_polygons(polygons) {
                Ok(geometry) => geometry,
                Err(_) => {
                    skipped += 1;
                    continue;
                }
            };

            let code = self.read_code(&record);
            records.push(BoundaryRecord::new(code, geometry));
        }

        if skipped > 0 {
            tracing::debug!(
                path = %path.display(),
                skipped,
                "Skipped features without polygon geometry"
            );
        }

        Ok(records)
    }

    /// Value of the code attribute, tolerating differences in attribute case
    fn read_code(&self, record: &Record) -> Option<String> {
        let value = record
            .get(&self.code_attribute)
            .or_else(|| record.get(&self.code_attribute.to_uppercase()))
            .or_else(|| record.get(&self.code_attribute.to_lowercase()))?;

        match value {
            FieldValue::Character(Some(s)) => Some(s.clone()),
            FieldValue::Memo(s) => Some(s.clone()),
            _ => None,
        }
    }
}

/// Fail early when a required component file is missing
pub fn verify_components(path: &Path) -> Result<()> {
    let is_shp = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("shp"))
        .unwrap_or(false);

    if !is_shp {
        return Err(RegionscanError::BoundaryDataset {
            path: path.to_path_buf(),
            reason: "Not a shapefile (.shp)".to_string(),
        });
    }

    let base: PathBuf = path.with_extension("");
    let missing: Vec<String> = ["shp", "shx", "dbf"]
        .iter()
        .filter(|ext| !base.with_extension(ext).exists())
        .map(|ext| format!(".{}", ext))
        .collect();

    if !missing.is_empty() {
        return Err(RegionscanError::BoundaryDataset {
            path: path.to_path_buf(),
            reason: format!("Missing required component files: {}", missing.join(", ")),
        });
    }

    Ok(())
}

/// Convert a polygonal shape into `geo` polygons.
///
/// Returns `None` for non-polygonal and null shapes.
pub fn shape_to_polygons(shape: &Shape) -> Option<Vec<Polygon<f64>>> {
    match shape {
        Shape::Polygon(polygon) => Some(rings_to_polygons(polygon.rings(), |p| (p.x, p.y))),
        Shape::PolygonM(polygon) => Some(rings_to_polygons(polygon.rings(), |p| (p.x, p.y))),
        Shape::PolygonZ(polygon) => Some(rings_to_polygons(polygon.rings(), |p| (p.x, p.y))),
        _ => None,
    }
}

/// Group shapefile rings into polygons.
///
/// Each outer ring opens a new polygon and the inner rings that follow it
/// become its holes. An inner ring with no preceding outer ring is kept as
/// an exterior.
fn rings_to_polygons<P>(rings: &[PolygonRing<P>], xy: impl Fn(&P) -> (f64, f64)) -> Vec<Polygon<f64>> {
    let mut groups: Vec<(LineString<f64>, Vec<LineString<f64>>)> = Vec::new();

    for ring in rings {
        let line: LineString<f64> = ring
            .points()
            .iter()
            .map(|p| {
                let (x, y) = xy(p);
                coord! { x: x, y: y }
            })
            .collect();

        match ring {
            PolygonRing::Outer(_) => groups.push((line, Vec::new())),
            PolygonRing::Inner(_) => match groups.last_mut() {
                Some((_, holes)) => holes.push(line),
                None => groups.push((line, Vec::new())),
            },
        }
    }

    groups
        .into_iter()
        .filter(|(exterior, _)| !exterior.0.is_empty())
        .map(|(exterior, holes)| Polygon::new(exterior, holes))
        .collect()
}
