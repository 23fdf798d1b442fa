use regionscan_core::config::LayeredConfig;
use regionscan_core::error::Result;
use std::env;
use std::path::PathBuf;

/// Port used when REGIONSCAN_PORT is unset or invalid
pub const DEFAULT_PORT: u16 = 3001;

/// Origin allowed by CORS when REGIONSCAN_CORS_ORIGIN is unset
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub port: u16,
    pub cors_origin: String,
    /// Database, boundary dataset and padding settings shared with the CLI
    pub regions: LayeredConfig,
}

impl ApiConfig {
    /// Load configuration from the optional config file and the environment.
    ///
    /// The file is `regionscan.toml` in the working directory unless
    /// REGIONSCAN_CONFIG names another one.
    pub fn from_env() -> Result<Self> {
        let port = match env::var("REGIONSCAN_PORT") {
            Ok(value) => value.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(value = %value, "Invalid REGIONSCAN_PORT, using {}", DEFAULT_PORT);
                DEFAULT_PORT
            }),
            Err(_) => DEFAULT_PORT,
        };

        let cors_origin =
            env::var("REGIONSCAN_CORS_ORIGIN").unwrap_or_else(|_| DEFAULT_CORS_ORIGIN.to_string());

        let regions = match env::var("REGIONSCAN_CONFIG") {
            Ok(path) => LayeredConfig::with_defaults().load_from_file(PathBuf::from(path))?,
            Err(_) => LayeredConfig::with_defaults().load_from_optional_file("regionscan.toml")?,
        }
        .load_from_env();

        Ok(Self {
            port,
            cors_origin,
            regions,
        })
    }

    /// Get the server bind address
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    /// Check if PostgreSQL storage is configured
    pub fn uses_postgres(&self) -> bool {
        self.regions.database_url.value.is_some()
    }
}
