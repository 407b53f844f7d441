//! Platform analytics endpoints

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    repository::bookings::OwnerEarnings,
    services::analytics::OverviewResponse,
};

#[derive(Serialize, ToSchema)]
pub struct EarningsResponse {
    pub earnings: Vec<OwnerEarnings>,
}

/// Platform overview counters and breakdowns
#[utoipa::path(
    get,
    path = "/analytics/overview",
    tag = "analytics",
    responses(
        (status = 200, description = "Platform overview", body = OverviewResponse)
    )
)]
pub async fn overview(
    State(state): State<crate::AppState>,
) -> AppResult<Json<OverviewResponse>> {
    let overview = state.services.analytics.overview().await?;
    Ok(Json(overview))
}

/// Per-owner earnings over completed bookings
#[utoipa::path(
    get,
    path = "/analytics/earnings",
    tag = "analytics",
    responses(
        (status = 200, description = "Earnings by owner, highest first", body = EarningsResponse)
    )
)]
pub async fn earnings(
    State(state): State<crate::AppState>,
) -> AppResult<Json<EarningsResponse>> {
    let earnings = state.services.analytics.earnings().await?;
    Ok(Json(EarningsResponse { earnings }))
}
