use clap::{Parser, Subcommand};
use regionscan_core::config::CliConfigOverrides;
use regionscan_core::models::Resolution;
use std::path::PathBuf;

/// RegionScan - Region-scoped asset queries
#[derive(Parser, Debug)]
#[command(name = "regionscan")]
#[command(about = "Find the assets inside a country, state or city boundary", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Show how the query was answered
    #[arg(long, global = true)]
    pub explain: bool,

    /// Storage backend to use (memory or postgres)
    #[arg(long, global = true, default_value = "postgres")]
    pub storage: StorageBackend,

    /// Configuration file (defaults to ./regionscan.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Database URL, overriding DATABASE_URL
    #[arg(long, global = true, value_name = "URL")]
    pub database_url: Option<String>,

    /// Directory holding the Natural Earth shapefiles
    #[arg(long, global = true, value_name = "DIR")]
    pub boundaries_dir: Option<PathBuf>,

    /// Natural Earth resolution (110m, 50m or 10m)
    #[arg(long, global = true)]
    pub resolution: Option<Resolution>,

    /// JSON fixture of assets and locodes for the memory backend
    #[arg(long, global = true, value_name = "FILE")]
    pub fixture: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Configuration overrides carried by global flags and the region
    /// command's padding flags
    pub fn overrides(&self) -> CliConfigOverrides {
        let (lat_padding, lon_padding) = match &self.command {
            Commands::Country(args) | Commands::State(args) | Commands::City(args) => {
                (args.lat_pad, args.lon_pad)
            }
            _ => (None, None),
        };

        CliConfigOverrides {
            database_url: self.database_url.clone(),
            boundaries_dir: self.boundaries_dir.clone(),
            resolution: self.resolution,
            lat_padding,
            lon_padding,
        }
    }
}

/// Storage backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum StorageBackend {
    /// In-memory asset store, optionally seeded from --fixture
    Memory,
    /// PostgreSQL asset database
    Postgres,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assets inside a country (ISO 3166-1 alpha-2 code)
    Country(RegionArgs),

    /// Assets inside a state or province (ISO 3166-2 code)
    State(RegionArgs),

    /// Assets inside a city (UN/LOCODE, e.g. "US NYC")
    City(RegionArgs),

    /// Find locodes by city name
    Search(SearchArgs),

    /// Assets of a city within an emissions sector
    Sector(SectorArgs),

    /// Show the effective configuration and where each value came from
    Config,

    /// Run health checks on the database and boundary dataset
    Doctor(DoctorArgs),
}

#[derive(Parser, Debug)]
pub struct RegionArgs {
    /// Region code
    pub code: String,

    /// Degrees of latitude added above and below the search box
    #[arg(long, value_name = "DEGREES")]
    pub lat_pad: Option<f64>,

    /// Degrees of longitude added left and right of the search box
    #[arg(long, value_name = "DEGREES")]
    pub lon_pad: Option<f64>,

    /// Also list candidates that fell outside the boundary
    #[arg(long)]
    pub show_outside: bool,

    /// Print at most this many asset rows in table output
    #[arg(long, default_value = "50")]
    pub limit: usize,
}

#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Part of the city name, matched case-insensitively
    pub name: String,
}

#[derive(Parser, Debug)]
pub struct SectorArgs {
    /// City locode
    pub locode: String,

    /// Reference number prefix of the sector (e.g. "II")
    pub sector: String,
}

#[derive(Parser, Debug)]
pub struct DoctorArgs {
    /// Show detailed diagnostic information
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
