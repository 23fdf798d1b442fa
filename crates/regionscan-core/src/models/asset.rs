use geo::Point;
use serde::{Deserialize, Serialize};

/// A geolocated row of the `asset` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRecord {
    pub lat: f64,
    pub lon: f64,
    /// Source file the asset was ingested from
    pub filename: String,
    /// Emissions category identifier (e.g. `II.1.1`); NULL in the table stays `None`
    pub reference_number: Option<String>,
    /// City locode, when the asset has been attributed to one
    pub locode: Option<String>,
}

impl AssetRecord {
    pub fn new(
        lat: f64,
        lon: f64,
        filename: impl Into<String>,
        reference_number: impl Into<String>,
    ) -> Self {
        Self {
            lat,
            lon,
            filename: filename.into(),
            reference_number: Some(reference_number.into()),
            locode: None,
        }
    }

    pub fn without_reference_number(mut self) -> Self {
        self.reference_number = None;
        self
    }

    pub fn reference(&self) -> Option<&str> {
        self.reference_number.as_deref()
    }

    pub fn with_locode(mut self, locode: impl Into<String>) -> Self {
        self.locode = Some(locode.into());
        self
    }

    /// Point in (longitude, latitude) order
    pub fn point(&self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_axis_order() {
        let record = AssetRecord::new(37.0, -122.0, "power.csv", "I.1.1");
        let point = record.point();
        assert_eq!(point.x(), -122.0);
        assert_eq!(point.y(), 37.0);
        assert!(record.locode.is_none());
    }

    #[test]
    fn test_null_reference_number_deserializes_to_none() {
        let record: AssetRecord = serde_json::from_str(
            r#"{"lat": 1.0, "lon": 2.0, "filename": "a.csv", "reference_number": null, "locode": "US NYC"}"#,
        )
        .unwrap();
        assert_eq!(record.reference(), None);

        let record = AssetRecord::new(1.0, 2.0, "a.csv", "I.1").without_reference_number();
        assert!(record.reference_number.is_none());
    }
}
