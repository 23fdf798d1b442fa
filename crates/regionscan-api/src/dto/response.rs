use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use regionscan_core::models::{
    AggregatedSummary, AssetRecord, BoundingBox, GeometryVariant, Granularity, LocodeMatch,
    SectorRecord,
};
use regionscan_pipeline::{QueryExplanation, RegionReport};
use serde::Serialize;

/// Region query response
#[derive(Debug, Serialize)]
pub struct RegionResponse {
    pub granularity: Granularity,
    pub code: String,
    pub geometry_type: GeometryVariant,
    /// Resolved boundary as a GeoJSON geometry
    pub boundary: Geometry,
    /// Padded box the asset table was scanned with, as a GeoJSON polygon
    pub search_box: Geometry,
    /// `[west, south, east, north]` of the search box
    pub bbox: [f64; 4],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stored_bbox: Option<BoundingBox>,
    pub candidates: usize,
    pub summary: AggregatedSummary,
    pub assets: FeatureCollection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outside: Option<FeatureCollection>,
    pub explanation: QueryExplanation,
}

impl From<RegionReport> for RegionResponse {
    fn from(report: RegionReport) -> Self {
        Self {
            granularity: report.query.granularity,
            code: report.query.code.to_string(),
            geometry_type: report.geometry.variant(),
            boundary: report.geometry.to_geojson(),
            search_box: Geometry::new(Value::from(&report.search_box.to_polygon())),
            bbox: report.search_box.to_array(),
            stored_bbox: report.stored_bbox,
            candidates: report.candidates,
            summary: report.summary,
            assets: asset_collection(&report.contained),
            outside: report.outside.as_deref().map(asset_collection),
            explanation: report.explanation,
        }
    }
}

/// Asset records as GeoJSON point features
fn asset_collection(records: &[AssetRecord]) -> FeatureCollection {
    let features = records
        .iter()
        .map(|record| {
            let mut properties = JsonObject::new();
            properties.insert("filename".to_string(), record.filename.clone().into());
            properties.insert(
                "reference_number".to_string(),
                record.reference_number.clone().into(),
            );
            properties.insert("locode".to_string(), record.locode.clone().into());

            Feature {
                bbox: None,
                geometry: Some(Geometry::new(Value::Point(vec![record.lon, record.lat]))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// Locode search response
#[derive(Debug, Serialize)]
pub struct LocodeSearchResponse {
    pub name: String,
    pub matches: Vec<LocodeMatch>,
}

/// Sector query response
#[derive(Debug, Serialize)]
pub struct SectorResponse {
    pub locode: String,
    pub sector: String,
    pub records: Vec<SectorRecord>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok",
            service: "regionscan-api",
        }
    }
}
