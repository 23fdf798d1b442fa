//! Error types for RegionScan

use std::path::PathBuf;
use thiserror::Error;

use crate::models::Granularity;

#[derive(Debug, Error)]
pub enum RegionscanError {
    // Region resolution errors
    #[error("No {granularity} boundary found for region code '{code}'")]
    RegionNotFound { granularity: Granularity, code: String },

    #[error("Region not found: there is no boundary geometry to bound")]
    GeometryMissing,

    #[error("Locode '{locode}' not found")]
    LocodeNotFound { locode: String },

    #[error("Locode '{locode}' is ambiguous: {count} boundary rows match")]
    AmbiguousLocode { locode: String, count: usize },

    #[error("Invalid region code '{code}': {reason}")]
    InvalidRegionCode { code: String, reason: String },

    // Geometry errors
    #[error("Failed to parse boundary geometry: {reason}")]
    GeometryParse { reason: String },

    #[error("Boundary geometry has no coordinates")]
    EmptyGeometry,

    #[error("Invalid padding: {reason}")]
    InvalidPadding { reason: String },

    #[error("Invalid bounding box: {reason}")]
    InvalidBoundingBox { reason: String },

    // Boundary dataset errors
    #[error("Boundary dataset {path} could not be read: {reason}")]
    BoundaryDataset { path: PathBuf, reason: String },

    // Store errors
    #[error("Asset store unavailable: {reason}")]
    StoreUnavailable { reason: String },

    #[error("Invalid query: {reason}")]
    InvalidQuery { reason: String },

    // Configuration errors
    #[error("Missing required configuration: {key}")]
    ConfigMissing { key: String },

    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RegionscanError {
    /// Whether the error means "the requested region does not exist"
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            RegionscanError::RegionNotFound { .. }
                | RegionscanError::GeometryMissing
                | RegionscanError::LocodeNotFound { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, RegionscanError>;
