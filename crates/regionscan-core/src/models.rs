pub mod asset;
pub mod geometry;
pub mod locode;
pub mod region;
pub mod summary;

pub use asset::AssetRecord;
pub use geometry::{BoundingBox, GeometryVariant, Padding, RegionGeometry};
pub use locode::{LocodeBoundary, LocodeMatch, SectorRecord};
pub use region::{BoundaryLayer, Granularity, RegionCode, Resolution};
pub use summary::{AggregatedSummary, LocodeReference};
