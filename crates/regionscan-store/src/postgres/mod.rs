//! PostgreSQL adapter over the emissions `asset` table and the locode table

pub mod assets;
pub mod config;
pub mod locode;

pub use config::{ConfigError, PoolConfig, PostgresConfig};

use regionscan_core::error::{RegionscanError, Result};
use sqlx::{postgres::PgPoolOptions, PgPool};

/// `AssetStore` backed by a sqlx pool
pub struct PostgresStore {
    pool: PgPool,
    config: PostgresConfig,
}

impl PostgresStore {
    /// Open the pool and ping the server once
    pub async fn new(config: PostgresConfig) -> Result<Self> {
        config.validate().map_err(|e| RegionscanError::ConfigInvalid {
            key: "database".to_string(),
            reason: e.to_string(),
        })?;

        let pool = PgPoolOptions::new()
            .min_connections(config.pool.min_connections)
            .max_connections(config.pool.max_connections)
            .acquire_timeout(config.pool.acquire_timeout)
            .idle_timeout(config.pool.idle_timeout)
            .max_lifetime(config.pool.max_lifetime)
            .connect(&config.database_url)
            .await
            .map_err(|e| store_error("Failed to connect to database", e))?;

        tracing::debug!(
            max_connections = config.pool.max_connections,
            locode_table = %config.locode_table,
            "Connected to asset database"
        );

        let store = Self { pool, config };
        store.ping().await?;
        Ok(store)
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn config(&self) -> &PostgresConfig {
        &self.config
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| store_error("Health check failed", e))?;
        Ok(())
    }
}

/// Map a driver error to `StoreUnavailable`
pub(crate) fn store_error(context: &str, error: sqlx::Error) -> RegionscanError {
    RegionscanError::StoreUnavailable {
        reason: format!("{}: {}", context, error),
    }
}
