//! RegionScan Core - Domain models, error taxonomy, and configuration
//!
//! This crate contains the core domain types shared by the region query
//! pipeline and its adapters.

pub mod config;
pub mod error;
pub mod formats;
pub mod models;

pub use error::{RegionscanError, Result};
