use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use regionscan_core::models::RegionCode;

use crate::dto::{LocodeSearchResponse, SearchParams, SectorResponse};
use crate::error::ApiError;
use crate::state::AppState;

pub async fn search_locodes(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<LocodeSearchResponse>, ApiError> {
    let matches = state.pipeline.search_locodes(&params.name).await?;

    Ok(Json(LocodeSearchResponse {
        name: params.name,
        matches,
    }))
}

pub async fn sector_assets(
    State(state): State<Arc<AppState>>,
    Path((locode, sector)): Path<(String, String)>,
) -> Result<Json<SectorResponse>, ApiError> {
    let locode = RegionCode::new(&locode)?;
    let records = state.pipeline.sector_assets(&locode, &sector).await?;

    Ok(Json(SectorResponse {
        locode: locode.to_string(),
        sector,
        records,
    }))
}
