//! RegionScan Store - Storage ports and adapters
//!
//! This crate defines the asset store and boundary source ports and provides
//! PostgreSQL, in-memory, and shapefile-backed adapters for them.

pub mod boundaries;
pub mod memory;
pub mod pattern;
pub mod ports;
pub mod postgres;

pub use boundaries::ShapefileBoundarySource;
pub use memory::{MemoryAssetStore, MemoryBoundarySource};
pub use ports::{AssetStore, BoundarySource};
pub use postgres::{PostgresConfig, PostgresStore};
