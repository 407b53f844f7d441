//! Equipment listing and discovery endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::equipment::{
        CreateEquipment, Equipment, EquipmentListing, EquipmentQuery, UpdateEquipment,
    },
};

use super::AuthenticatedFarmer;

/// Discovery response wrapper
#[derive(Serialize, ToSchema)]
pub struct EquipmentListResponse {
    pub count: usize,
    pub equipment: Vec<EquipmentListing>,
}

/// Search available equipment (public)
#[utoipa::path(
    get,
    path = "/equipment",
    tag = "equipment",
    params(
        ("lat" = Option<f64>, Query, description = "Center latitude for radius search"),
        ("lng" = Option<f64>, Query, description = "Center longitude for radius search"),
        ("radius" = Option<f64>, Query, description = "Search radius in km (default 50)"),
        ("type" = Option<String>, Query, description = "Equipment category filter"),
        ("min_price" = Option<f64>, Query, description = "Minimum hourly rate"),
        ("max_price" = Option<f64>, Query, description = "Maximum hourly rate"),
        ("panchayat" = Option<String>, Query, description = "Panchayat substring match"),
        ("district" = Option<String>, Query, description = "District substring match")
    ),
    responses(
        (status = 200, description = "Available equipment, up to 50 results", body = EquipmentListResponse)
    )
)]
pub async fn search_equipment(
    State(state): State<crate::AppState>,
    Query(query): Query<EquipmentQuery>,
) -> AppResult<Json<EquipmentListResponse>> {
    let equipment = state.services.equipment.search(&query).await?;
    Ok(Json(EquipmentListResponse {
        count: equipment.len(),
        equipment,
    }))
}

/// Get a single equipment listing (public)
#[utoipa::path(
    get,
    path = "/equipment/{id}",
    tag = "equipment",
    params(("id" = Uuid, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Equipment details", body = EquipmentListing),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn get_equipment(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<EquipmentListing>> {
    let listing = state.services.equipment.get(id).await?;
    Ok(Json(listing))
}

/// List the authenticated owner's equipment
#[utoipa::path(
    get,
    path = "/equipment/my",
    tag = "equipment",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Owner's equipment", body = Vec<Equipment>)
    )
)]
pub async fn my_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedFarmer(claims): AuthenticatedFarmer,
) -> AppResult<Json<Vec<Equipment>>> {
    let equipment = state.services.equipment.my_equipment(claims.farmer_id).await?;
    Ok(Json(equipment))
}

/// Create an equipment listing
#[utoipa::path(
    post,
    path = "/equipment",
    tag = "equipment",
    security(("bearer_auth" = [])),
    request_body = CreateEquipment,
    responses(
        (status = 201, description = "Equipment created", body = Equipment),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedFarmer(claims): AuthenticatedFarmer,
    Json(request): Json<CreateEquipment>,
) -> AppResult<(StatusCode, Json<Equipment>)> {
    let equipment = state
        .services
        .equipment
        .create(claims.farmer_id, request)
        .await?;
    Ok((StatusCode::CREATED, Json(equipment)))
}

/// Update an equipment listing (owner only)
#[utoipa::path(
    put,
    path = "/equipment/{id}",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Equipment ID")),
    request_body = UpdateEquipment,
    responses(
        (status = 200, description = "Equipment updated", body = Equipment),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn update_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedFarmer(claims): AuthenticatedFarmer,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateEquipment>,
) -> AppResult<Json<Equipment>> {
    let equipment = state
        .services
        .equipment
        .update(claims.farmer_id, id, request)
        .await?;
    Ok(Json(equipment))
}

/// Delete an equipment listing (owner only, never while booked)
#[utoipa::path(
    delete,
    path = "/equipment/{id}",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Equipment ID")),
    responses(
        (status = 204, description = "Equipment deleted"),
        (status = 400, description = "Equipment is currently booked"),
        (status = 403, description = "Not the owner")
    )
)]
pub async fn delete_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedFarmer(claims): AuthenticatedFarmer,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.equipment.delete(claims.farmer_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
