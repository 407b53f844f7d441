//! Geocoding and proximity endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::{
        equipment::{EquipmentListing, EquipmentQuery},
        geo::GeoPoint,
    },
    services::geocoding::Place,
};

use super::equipment::EquipmentListResponse;

#[derive(Debug, Deserialize, ToSchema)]
pub struct NearbyQuery {
    pub lat: f64,
    pub lng: f64,
    /// Radius in kilometers (default 10)
    pub radius: Option<f64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct GeocodeRequest {
    pub address: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReverseQuery {
    pub lat: f64,
    pub lng: f64,
}

/// Find available equipment around a point
#[utoipa::path(
    get,
    path = "/location/nearby",
    tag = "location",
    params(
        ("lat" = f64, Query, description = "Center latitude"),
        ("lng" = f64, Query, description = "Center longitude"),
        ("radius" = Option<f64>, Query, description = "Radius in km (default 10)")
    ),
    responses(
        (status = 200, description = "Nearby available equipment", body = EquipmentListResponse),
        (status = 400, description = "Missing coordinates")
    )
)]
pub async fn nearby(
    State(state): State<crate::AppState>,
    Query(query): Query<NearbyQuery>,
) -> AppResult<Json<EquipmentListResponse>> {
    let search = EquipmentQuery {
        lat: Some(query.lat),
        lng: Some(query.lng),
        radius: Some(query.radius.unwrap_or(10.0)),
        ..Default::default()
    };
    let equipment: Vec<EquipmentListing> = state.services.equipment.search(&search).await?;
    Ok(Json(EquipmentListResponse {
        count: equipment.len(),
        equipment,
    }))
}

/// Convert an address to coordinates
#[utoipa::path(
    post,
    path = "/location/geocode",
    tag = "location",
    request_body = GeocodeRequest,
    responses(
        (status = 200, description = "Geocoded place", body = Place),
        (status = 502, description = "Geocoding provider failure")
    )
)]
pub async fn geocode(
    State(state): State<crate::AppState>,
    Json(request): Json<GeocodeRequest>,
) -> AppResult<Json<Place>> {
    if request.address.trim().is_empty() {
        return Err(AppError::Validation("Address is required".to_string()));
    }
    let place = state.services.geocoding.geocode(&request.address).await?;
    Ok(Json(place))
}

/// Convert coordinates to an address
#[utoipa::path(
    get,
    path = "/location/reverse",
    tag = "location",
    params(
        ("lat" = f64, Query, description = "Latitude"),
        ("lng" = f64, Query, description = "Longitude")
    ),
    responses(
        (status = 200, description = "Resolved place", body = Place),
        (status = 502, description = "Geocoding provider failure")
    )
)]
pub async fn reverse(
    State(state): State<crate::AppState>,
    Query(query): Query<ReverseQuery>,
) -> AppResult<Json<Place>> {
    let place = state
        .services
        .geocoding
        .reverse(GeoPoint::new(query.lng, query.lat))
        .await?;
    Ok(Json(place))
}
