//! Connection settings for the emissions database

use regionscan_core::config::{validate_table_name, DEFAULT_LOCODE_TABLE};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("database URL cannot be empty")]
    EmptyUrl,

    #[error("locode table '{table}' rejected: {reason}")]
    LocodeTable { table: String, reason: String },

    #[error("pool bounds invalid: min {min}, max {max}")]
    PoolBounds { min: u32, max: u32 },
}

/// Where the `asset` table lives and which table carries locode boundaries.
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    pub database_url: String,
    /// Interpolated into SQL, so only validated identifiers are accepted.
    pub locode_table: String,
    pub pool: PoolConfig,
}

impl PostgresConfig {
    pub fn new(database_url: String) -> Result<Self, ConfigError> {
        let config = Self {
            database_url,
            locode_table: DEFAULT_LOCODE_TABLE.to_string(),
            pool: PoolConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_locode_table(mut self, table: impl Into<String>) -> Result<Self, ConfigError> {
        self.locode_table = table.into();
        self.validate()?;
        Ok(self)
    }

    pub fn with_pool(mut self, pool: PoolConfig) -> Result<Self, ConfigError> {
        self.pool = pool;
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database_url.trim().is_empty() {
            return Err(ConfigError::EmptyUrl);
        }

        validate_table_name(&self.locode_table).map_err(|e| ConfigError::LocodeTable {
            table: self.locode_table.clone(),
            reason: e.to_string(),
        })?;

        self.pool.validate()
    }
}

/// Pool sizing. Region queries are short read-only scans, so a small pool
/// is enough for the CLI and the API alike.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub min_connections: u32,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            min_connections: 1,
            max_connections: 5,
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            max_lifetime: Duration::from_secs(1800),
        }
    }
}

impl PoolConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_connections == 0 || self.min_connections > self.max_connections {
            return Err(ConfigError::PoolBounds {
                min: self.min_connections,
                max: self.max_connections,
            });
        }
        Ok(())
    }
}
