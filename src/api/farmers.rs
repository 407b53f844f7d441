//! Farmer profile endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    models::farmer::{Farmer, FarmerDashboard, FarmerProfile, UpdateProfile},
};

use super::AuthenticatedFarmer;

/// Get the authenticated farmer's profile
#[utoipa::path(
    get,
    path = "/farmers/me",
    tag = "farmers",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Farmer profile", body = Farmer),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn me(
    State(state): State<crate::AppState>,
    AuthenticatedFarmer(claims): AuthenticatedFarmer,
) -> AppResult<Json<Farmer>> {
    let farmer = state.services.farmers.me(claims.farmer_id).await?;
    Ok(Json(farmer))
}

/// Update the authenticated farmer's profile
#[utoipa::path(
    put,
    path = "/farmers/me",
    tag = "farmers",
    security(("bearer_auth" = [])),
    request_body = UpdateProfile,
    responses(
        (status = 200, description = "Profile updated", body = Farmer)
    )
)]
pub async fn update_me(
    State(state): State<crate::AppState>,
    AuthenticatedFarmer(claims): AuthenticatedFarmer,
    Json(request): Json<UpdateProfile>,
) -> AppResult<Json<Farmer>> {
    request.validate()?;
    let farmer = state
        .services
        .farmers
        .update_profile(claims.farmer_id, &request)
        .await?;
    Ok(Json(farmer))
}

/// Public farmer profile with equipment and booking counts
#[utoipa::path(
    get,
    path = "/farmers/{id}",
    tag = "farmers",
    params(("id" = Uuid, Path, description = "Farmer ID")),
    responses(
        (status = 200, description = "Public profile", body = FarmerProfile),
        (status = 404, description = "Farmer not found")
    )
)]
pub async fn get_farmer(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<FarmerProfile>> {
    let profile = state.services.farmers.profile(id).await?;
    Ok(Json(profile))
}

/// Owner dashboard counters and earnings
#[utoipa::path(
    get,
    path = "/farmers/me/dashboard",
    tag = "farmers",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Dashboard counters", body = FarmerDashboard)
    )
)]
pub async fn dashboard(
    State(state): State<crate::AppState>,
    AuthenticatedFarmer(claims): AuthenticatedFarmer,
) -> AppResult<Json<FarmerDashboard>> {
    let dashboard = state.services.farmers.dashboard(claims.farmer_id).await?;
    Ok(Json(dashboard))
}
