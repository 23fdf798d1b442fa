use regionscan_core::error::Result;
use regionscan_core::models::Padding;
use serde::Deserialize;

/// Query string of a region request
#[derive(Debug, Default, Deserialize)]
pub struct RegionParams {
    pub lat_pad: Option<f64>,
    pub lon_pad: Option<f64>,
    #[serde(default)]
    pub include_outside: bool,
}

impl RegionParams {
    /// Requested padding, falling back per axis to `default`
    pub fn padding(&self, default: Padding) -> Result<Padding> {
        Padding::new(
            self.lat_pad.unwrap_or(default.lat),
            self.lon_pad.unwrap_or(default.lon),
        )
    }
}

/// Query string of a locode search
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub name: String,
}
