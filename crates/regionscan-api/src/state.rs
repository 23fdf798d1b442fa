use regionscan_core::models::Padding;
use regionscan_pipeline::RegionPipeline;

/// Shared state of the API server, built once at startup
#[derive(Clone)]
pub struct AppState {
    pub pipeline: RegionPipeline,
    /// Padding used when a request does not specify one
    pub default_padding: Padding,
}

impl AppState {
    pub fn new(pipeline: RegionPipeline, default_padding: Padding) -> Self {
        Self {
            pipeline,
            default_padding,
        }
    }
}
