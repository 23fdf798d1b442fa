use std::sync::Arc;

use anyhow::Context;
use axum::http::{header, HeaderValue, Method};
use regionscan_pipeline::RegionPipeline;
use regionscan_store::{
    AssetStore, MemoryAssetStore, PostgresConfig, PostgresStore, ShapefileBoundarySource,
};
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use regionscan_api::{create_router, ApiConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "regionscan_api=info,regionscan_pipeline=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env().context("Failed to load configuration")?;
    let regions = &config.regions;

    tracing::info!(
        port = config.port,
        boundaries_dir = %regions.boundaries_dir.value.display(),
        resolution = %regions.resolution.value,
        "Starting RegionScan API server"
    );

    let assets: Arc<dyn AssetStore> = match regions.database_url.value.as_deref() {
        Some(database_url) => {
            tracing::info!("DATABASE_URL found, connecting to PostgreSQL...");
            let pg_config = PostgresConfig::new(database_url.to_string())
                .and_then(|c| c.with_locode_table(regions.locode_table.value.clone()))
                .context("Invalid PostgreSQL configuration")?;
            let store = PostgresStore::new(pg_config).await.context(
                "Failed to connect to PostgreSQL. Ensure it is running and DATABASE_URL is correct",
            )?;
            tracing::info!("Connected to PostgreSQL");
            Arc::new(store)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, serving an empty in-memory asset store");
            Arc::new(MemoryAssetStore::new())
        }
    };

    let boundaries = Arc::new(ShapefileBoundarySource::new(
        regions.boundaries_dir.value.clone(),
        regions.resolution.value,
    ));

    let padding = regions.padding().context("Invalid default padding")?;
    let state = Arc::new(AppState::new(RegionPipeline::new(boundaries, assets), padding));

    let origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid REGIONSCAN_CORS_ORIGIN '{}'", config.cors_origin))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let app = create_router(state).layer(cors);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Listening on {}", addr);
    tracing::info!("CORS enabled for {}", config.cors_origin);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
