use std::sync::Arc;

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the API router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health
        .route("/health", get(handlers::health_check))

        // Region queries
        .route("/api/v1/regions/{granularity}/{code}", get(handlers::query_region))

        // Locodes
        .route("/api/v1/locodes", get(handlers::search_locodes))
        .route("/api/v1/locodes/{locode}/sectors/{sector}", get(handlers::sector_assets))

        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
