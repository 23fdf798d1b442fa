//! RegionScan Pipeline - Region asset queries
//!
//! This crate resolves a region code to its boundary and runs the
//! bounding box scan, containment refinement, and aggregation steps
//! against an asset store.

pub mod models;
pub mod pipeline;
pub mod resolver;

pub use models::{PhaseTiming, QueryExplanation, RegionQuery, RegionReport, ResolvedRegion};
pub use pipeline::RegionPipeline;
pub use resolver::GeometryResolver;
