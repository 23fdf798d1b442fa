//! RegionScan Geo - Bounding boxes, containment, and boundary parsing
//!
//! This crate holds the pure geometric steps of the region query pipeline:
//! deriving a search box from a boundary, refining candidate points by
//! point-in-polygon containment, and parsing stored WKT boundaries.

pub mod bbox;
pub mod containment;
pub mod validation;
pub mod wkt;

pub use bbox::{envelope, extract_bounding_box, from_geometry, pad_envelope};
pub use containment::{filter_contained, partition_contained, point_in_geometry};
pub use self::wkt::parse_region_wkt;
