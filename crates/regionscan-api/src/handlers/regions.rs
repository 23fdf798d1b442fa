use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use regionscan_core::models::Granularity;
use regionscan_pipeline::RegionQuery;

use crate::dto::{RegionParams, RegionResponse};
use crate::error::ApiError;
use crate::state::AppState;

pub async fn query_region(
    State(state): State<Arc<AppState>>,
    Path((granularity, code)): Path<(String, String)>,
    Query(params): Query<RegionParams>,
) -> Result<Json<RegionResponse>, ApiError> {
    let granularity: Granularity = granularity.parse()?;
    let query = RegionQuery::new(granularity, &code)?
        .with_padding(params.padding(state.default_padding)?)
        .with_outside(params.include_outside);

    tracing::info!(
        granularity = %granularity,
        code = %query.code,
        include_outside = query.include_outside,
        "Processing region request"
    );

    let report = state.pipeline.run(&query).await?;

    Ok(Json(RegionResponse::from(report)))
}
