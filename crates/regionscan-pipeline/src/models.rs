use regionscan_core::error::Result;
use regionscan_core::models::{
    AggregatedSummary, AssetRecord, BoundingBox, GeometryVariant, Granularity, Padding, RegionCode,
    RegionGeometry,
};
use serde::{Deserialize, Serialize};

/// Parameters of one region query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionQuery {
    pub code: RegionCode,
    pub granularity: Granularity,
    /// Padding added to the search box
    pub padding: Padding,
    /// Whether to also return candidates that fall outside the boundary
    pub include_outside: bool,
}

impl RegionQuery {
    /// Create a query with no padding
    pub fn new(granularity: Granularity, code: impl AsRef<str>) -> Result<Self> {
        Ok(Self {
            code: RegionCode::new(code)?,
            granularity,
            padding: Padding::none(),
            include_outside: false,
        })
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_outside(mut self, include_outside: bool) -> Self {
        self.include_outside = include_outside;
        self
    }
}

/// A resolved boundary and what the source knew about it
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRegion {
    pub geometry: RegionGeometry,
    /// Bounding box stored next to a city boundary, for reference only
    pub stored_bbox: Option<BoundingBox>,
}

/// Output of a region query
#[derive(Debug, Clone)]
pub struct RegionReport {
    pub query: RegionQuery,
    pub geometry: RegionGeometry,
    pub stored_bbox: Option<BoundingBox>,
    /// Envelope of the boundary without padding
    pub envelope: BoundingBox,
    /// Padded box the asset table was scanned with
    pub search_box: BoundingBox,
    /// Number of records returned by the range query
    pub candidates: usize,
    /// Records inside the boundary
    pub contained: Vec<AssetRecord>,
    /// Candidates outside the boundary, when requested
    pub outside: Option<Vec<AssetRecord>>,
    pub summary: AggregatedSummary,
    pub explanation: QueryExplanation,
}

/// How a region query was answered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryExplanation {
    pub geometry_variant: GeometryVariant,
    pub part_count: usize,
    pub padding: Padding,
    /// Whether the search box spans more than half the globe
    pub wide_search_box: bool,
    pub records_scanned: usize,
    pub records_kept: usize,
    pub records_rejected: usize,
    pub phases: Vec<PhaseTiming>,
}

impl QueryExplanation {
    /// Sum of all phase timings
    pub fn total_ms(&self) -> f64 {
        self.phases.iter().map(|p| p.elapsed_ms).sum()
    }
}

/// Wall time spent in one pipeline phase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseTiming {
    pub phase: String,
    pub elapsed_ms: f64,
}
