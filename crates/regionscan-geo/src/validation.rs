use geo::{LineString, Polygon};
use regionscan_core::models::RegionGeometry;

/// Validation result with details
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

/// Validation error with location details
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub location: String,
    pub reason: String,
}

impl ValidationResult {
    /// Create a valid result
    pub fn valid() -> Self {
        Self { is_valid: true, errors: Vec::new() }
    }

    /// Add an error to the result
    pub fn add_error(&mut self, location: String, reason: String) {
        self.is_valid = false;
        self.errors.push(ValidationError { location, reason });
    }

    /// First error as a single line, for error messages
    pub fn summary(&self) -> Option<String> {
        self.errors.first().map(|e| format!("{}: {}", e.location, e.reason))
    }
}

/// Validate a boundary geometry.
///
/// Coordinates must be finite and every ring must have at least four
/// points. Empty geometries are left to the bounding box extractor.
pub fn validate_region_geometry(geometry: &RegionGeometry) -> ValidationResult {
    match geometry {
        RegionGeometry::Polygon(polygon) => validate_polygon(polygon, "Polygon"),
        RegionGeometry::MultiPolygon(multi) => {
            let mut result = ValidationResult::valid();
            for (i, polygon) in multi.iter().enumerate() {
                let part = validate_polygon(polygon, &format!("MultiPolygon[{}]", i));
                for error in part.errors {
                    result.add_error(error.location, error.reason);
                }
            }
            result
        }
    }
}

fn validate_polygon(polygon: &Polygon<f64>, location: &str) -> ValidationResult {
    let mut result = ValidationResult::valid();

    if polygon.exterior().0.is_empty() {
        return result;
    }

    validate_ring(polygon.exterior(), &format!("{} exterior", location), &mut result);

    for (i, interior) in polygon.interiors().iter().enumerate() {
        validate_ring(interior, &format!("{} interior[{}]", location, i), &mut result);
    }

    result
}

fn validate_ring(ring: &LineString<f64>, location: &str, result: &mut ValidationResult) {
    if ring.0.len() < 4 {
        result.add_error(
            location.to_string(),
            format!("ring must have at least 4 points, found {}", ring.0.len()),
        );
    }

    if let Some((i, _)) = ring
        .0
        .iter()
        .enumerate()
        .find(|(_, c)| !c.x.is_finite() || !c.y.is_finite())
    {
        result.add_error(format!("{}[{}]", location, i), "coordinates must be finite".to_string());
    }

    if ring.0.first() != ring.0.last() {
        result.add_error(location.to_string(), "ring must be closed".to_string());
    }
}

/// Count invalid geometries in a collection
pub fn count_invalid_geometries<'a>(geometries: impl IntoIterator<Item = &'a RegionGeometry>) -> usize {
    geometries
        .into_iter()
        .filter(|g| !validate_region_geometry(g).is_valid)
        .count()
}
