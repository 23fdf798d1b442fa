mod health;
mod locodes;
mod regions;

pub use health::health_check;
pub use locodes::{search_locodes, sector_assets};
pub use regions::query_region;
