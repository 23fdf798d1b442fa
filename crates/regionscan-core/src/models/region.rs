//! Region identifiers and the granularity they are resolved at.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{RegionscanError, Result};

/// Granularity a region code is resolved at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// ISO 3166-1 alpha-2 country code (e.g. `US`)
    Country,
    /// ISO 3166-2 subdivision code (e.g. `US-CA`)
    State,
    /// UN/LOCODE city code (e.g. `US NYC`)
    City,
}

impl Granularity {
    /// Static boundary layer backing this granularity, if any.
    ///
    /// Cities are resolved from the locode table instead.
    pub fn boundary_layer(&self) -> Option<BoundaryLayer> {
        match self {
            Granularity::Country => Some(BoundaryLayer::Countries),
            Granularity::State => Some(BoundaryLayer::States),
            Granularity::City => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Country => "country",
            Granularity::State => "state",
            Granularity::City => "city",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = RegionscanError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "country" => Ok(Granularity::Country),
            "state" | "province" => Ok(Granularity::State),
            "city" | "locode" => Ok(Granularity::City),
            other => Err(RegionscanError::InvalidQuery {
                reason: format!("Unknown granularity '{}'. Use country, state, or city", other),
            }),
        }
    }
}

/// A region identifier, trimmed and upper-cased once at construction
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RegionCode(String);

impl RegionCode {
    pub fn new(code: impl AsRef<str>) -> Result<Self> {
        let raw = code.as_ref();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(RegionscanError::InvalidRegionCode {
                code: raw.to_string(),
                reason: "code cannot be empty".to_string(),
            });
        }
        Ok(Self(trimmed.to_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison against a stored code
    pub fn matches(&self, stored: &str) -> bool {
        self.0.eq_ignore_ascii_case(stored.trim())
    }
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for RegionCode {
    type Error = RegionscanError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<RegionCode> for String {
    fn from(code: RegionCode) -> Self {
        code.0
    }
}

/// Administrative boundary layer of the static boundary dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoundaryLayer {
    /// National boundaries (`admin_0_countries`)
    Countries,
    /// First-level subdivisions (`admin_1_states_provinces_lakes`)
    States,
}

impl BoundaryLayer {
    /// Dataset name of the layer
    pub fn dataset_name(&self) -> &'static str {
        match self {
            BoundaryLayer::Countries => "admin_0_countries",
            BoundaryLayer::States => "admin_1_states_provinces_lakes",
        }
    }

    /// DBF attribute holding the ISO code of each record
    pub fn code_attribute(&self) -> &'static str {
        match self {
            BoundaryLayer::Countries => "ISO_A2",
            BoundaryLayer::States => "iso_3166_2",
        }
    }

    /// Shapefile name for the layer at a given resolution
    pub fn file_name(&self, resolution: Resolution) -> String {
        format!("ne_{}_{}.shp", resolution.as_str(), self.dataset_name())
    }
}

impl fmt::Display for BoundaryLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dataset_name())
    }
}

/// Natural Earth resolution tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Resolution {
    #[default]
    #[serde(rename = "110m")]
    Low,
    #[serde(rename = "50m")]
    Medium,
    #[serde(rename = "10m")]
    High,
}

impl Resolution {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::Low => "110m",
            Resolution::Medium => "50m",
            Resolution::High => "10m",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resolution {
    type Err = RegionscanError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "110m" | "low" => Ok(Resolution::Low),
            "50m" | "medium" => Ok(Resolution::Medium),
            "10m" | "high" => Ok(Resolution::High),
            _ => Err(RegionscanError::ConfigInvalid {
                key: "resolution".to_string(),
                reason: format!("Invalid resolution: {}. Use 110m, 50m, or 10m", s),
            }),
        }
    }
}
