use serde::{Deserialize, Serialize};

use super::geometry::BoundingBox;

/// A row of the locode boundary table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocodeBoundary {
    pub locode: String,
    /// Boundary as well-known text
    pub geometry_wkt: String,
    /// Bounding box stored alongside the boundary, when all four edges are set
    pub stored_bbox: Option<BoundingBox>,
}

impl LocodeBoundary {
    pub fn new(locode: impl Into<String>, geometry_wkt: impl Into<String>) -> Self {
        Self {
            locode: locode.into(),
            geometry_wkt: geometry_wkt.into(),
            stored_bbox: None,
        }
    }

    /// Attach the stored bbox columns, dropping them unless all four are
    /// present and form a valid box
    pub fn with_stored_bbox(
        mut self,
        north: Option<f64>,
        south: Option<f64>,
        east: Option<f64>,
        west: Option<f64>,
    ) -> Self {
        self.stored_bbox = match (north, south, east, west) {
            (Some(n), Some(s), Some(e), Some(w)) => BoundingBox::new(n, s, e, w).ok(),
            _ => None,
        };
        self
    }
}

/// Result row of a locode name search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocodeMatch {
    pub locode: String,
    pub name: String,
    pub display_name: Option<String>,
}

/// Asset of a locode within an emissions sector, by year
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SectorRecord {
    pub locode: String,
    pub year: Option<i32>,
    pub reference_number: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_bbox_requires_all_edges() {
        let full = LocodeBoundary::new("US NYC", "POINT(0 0)").with_stored_bbox(
            Some(40.9),
            Some(40.4),
            Some(-73.7),
            Some(-74.3),
        );
        assert!(full.stored_bbox.is_some());

        let partial = LocodeBoundary::new("US NYC", "POINT(0 0)").with_stored_bbox(
            Some(40.9),
            None,
            Some(-73.7),
            Some(-74.3),
        );
        assert!(partial.stored_bbox.is_none());

        let inverted = LocodeBoundary::new("US NYC", "POINT(0 0)").with_stored_bbox(
            Some(40.0),
            Some(41.0),
            Some(-73.7),
            Some(-74.3),
        );
        assert!(inverted.stored_bbox.is_none());
    }
}
