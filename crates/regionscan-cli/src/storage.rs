use crate::cli::StorageBackend;
use crate::errors;
use anyhow::{Context, Result};
use regionscan_core::config::LayeredConfig;
use regionscan_core::models::{AssetRecord, LocodeBoundary};
use regionscan_pipeline::RegionPipeline;
use regionscan_store::{
    AssetStore, MemoryAssetStore, PostgresConfig, PostgresStore, ShapefileBoundarySource,
};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

/// Seed data for the memory backend
#[derive(Debug, Default, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub assets: Vec<AssetRecord>,
    #[serde(default)]
    pub locodes: Vec<FixtureLocode>,
}

#[derive(Debug, Deserialize)]
pub struct FixtureLocode {
    pub locode: String,
    pub name: String,
    pub display_name: Option<String>,
    pub geometry_wkt: String,
}

impl Fixture {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read fixture {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse fixture {}", path.display()))
    }

    fn into_store(self) -> MemoryAssetStore {
        let store = MemoryAssetStore::with_assets(self.assets);
        for row in self.locodes {
            store.insert_locode(
                LocodeBoundary::new(row.locode, row.geometry_wkt),
                row.name,
                row.display_name,
            );
        }
        store
    }
}

/// Region pipeline wired to the selected asset backend, built once per process
pub struct Storage {
    pub pipeline: RegionPipeline,
}

impl Storage {
    pub async fn new(
        backend: StorageBackend,
        config: &LayeredConfig,
        fixture: Option<&Path>,
    ) -> Result<Self> {
        let assets: Arc<dyn AssetStore> = match backend {
            StorageBackend::Memory => Arc::new(Self::new_memory(fixture)?),
            StorageBackend::Postgres => Arc::new(Self::new_postgres(config).await?),
        };

        let boundaries = Arc::new(ShapefileBoundarySource::new(
            config.boundaries_dir.value.clone(),
            config.resolution.value,
        ));

        Ok(Self {
            pipeline: RegionPipeline::new(boundaries, assets),
        })
    }

    /// Create the in-memory asset store
    fn new_memory(fixture: Option<&Path>) -> Result<MemoryAssetStore> {
        let fixture = match fixture {
            Some(path) => Fixture::load(path)?,
            None => Fixture::default(),
        };

        tracing::debug!(
            assets = fixture.assets.len(),
            locodes = fixture.locodes.len(),
            "Using in-memory asset store"
        );

        Ok(fixture.into_store())
    }

    /// Connect to the PostgreSQL asset database
    async fn new_postgres(config: &LayeredConfig) -> Result<PostgresStore> {
        let database_url = config
            .require_database_url()
            .map_err(|_| errors::database_url_missing())?;

        let pg_config = PostgresConfig::new(database_url.to_string())
            .and_then(|c| c.with_locode_table(config.locode_table.value.clone()))
            .context("Invalid PostgreSQL configuration")?;

        let store = PostgresStore::new(pg_config)
            .await
            .map_err(|e| errors::database_connection_failed(database_url, &e.to_string()))?;

        Ok(store)
    }
}
