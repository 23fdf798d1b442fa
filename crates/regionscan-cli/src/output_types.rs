use regionscan_core::models::{
    AggregatedSummary, AssetRecord, BoundingBox, GeometryVariant, Granularity, LocodeMatch,
    SectorRecord,
};
use regionscan_pipeline::{QueryExplanation, RegionReport};
use serde::Serialize;

/// Output for country, state and city commands
#[derive(Debug, Serialize)]
pub struct RegionOutput {
    pub granularity: Granularity,
    pub code: String,
    pub geometry_type: GeometryVariant,
    pub parts: usize,
    pub search_box: BoundingBox,
    pub stored_bbox: Option<BoundingBox>,
    pub candidates: usize,
    pub summary: AggregatedSummary,
    pub assets: Vec<AssetRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outside: Option<Vec<AssetRecord>>,
    /// Boundary geometry, only with --explain
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boundary: Option<geojson::Geometry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<QueryExplanation>,
}

impl RegionOutput {
    pub fn from_report(report: RegionReport, explain: bool) -> Self {
        Self {
            granularity: report.query.granularity,
            code: report.query.code.to_string(),
            geometry_type: report.geometry.variant(),
            parts: report.geometry.part_count(),
            search_box: report.search_box,
            stored_bbox: report.stored_bbox,
            candidates: report.candidates,
            summary: report.summary,
            assets: report.contained,
            outside: report.outside,
            boundary: explain.then(|| report.geometry.to_geojson()),
            explanation: explain.then_some(report.explanation),
        }
    }
}

/// Output for search command
#[derive(Debug, Serialize)]
pub struct SearchOutput {
    pub name: String,
    pub matches: Vec<LocodeMatch>,
}

/// Output for sector command
#[derive(Debug, Serialize)]
pub struct SectorOutput {
    pub locode: String,
    pub sector: String,
    pub records: Vec<SectorRecord>,
}

/// Output for config command
#[derive(Debug, Serialize)]
pub struct ConfigOutput {
    pub values: Vec<ConfigEntry>,
}

#[derive(Debug, Serialize)]
pub struct ConfigEntry {
    pub key: String,
    pub value: String,
    pub source: String,
}

/// Output for doctor command
#[derive(Debug, Serialize)]
pub struct DoctorOutput {
    pub checks: Vec<DoctorCheck>,
    pub passed: usize,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct DoctorCheck {
    pub name: String,
    pub status: CheckStatus,
    pub detail: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}
