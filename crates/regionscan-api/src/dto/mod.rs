mod request;
mod response;

pub use request::{RegionParams, SearchParams};
pub use response::{HealthResponse, LocodeSearchResponse, RegionResponse, SectorResponse};
