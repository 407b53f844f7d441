//! Booking lifecycle endpoints

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
    models::booking::{BookingDetails, BookingListQuery, CancelBooking, CreateBooking},
};

use super::AuthenticatedFarmer;

/// Booking response with a status message
#[derive(Serialize, ToSchema)]
pub struct BookingResponse {
    pub message: String,
    pub booking: BookingDetails,
}

/// Listing response wrapper
#[derive(Serialize, ToSchema)]
pub struct BookingListResponse {
    pub count: usize,
    pub bookings: Vec<BookingDetails>,
}

/// Create a new booking for an available equipment item
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "bookings",
    security(("bearer_auth" = [])),
    request_body = CreateBooking,
    responses(
        (status = 201, description = "Booking created", body = BookingResponse),
        (status = 400, description = "Invalid interval, self-booking or equipment unavailable"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn create_booking(
    State(state): State<crate::AppState>,
    AuthenticatedFarmer(claims): AuthenticatedFarmer,
    Json(request): Json<CreateBooking>,
) -> AppResult<(StatusCode, Json<BookingResponse>)> {
    let booking = state
        .services
        .bookings
        .create(claims.farmer_id, request)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(BookingResponse {
            message: "Booking created successfully".to_string(),
            booking,
        }),
    ))
}

/// Bookings where the authenticated farmer is the renter
#[utoipa::path(
    get,
    path = "/bookings/my-rentals",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(("status" = Option<String>, Query, description = "Booking status filter")),
    responses(
        (status = 200, description = "Rentals, newest first", body = BookingListResponse)
    )
)]
pub async fn my_rentals(
    State(state): State<crate::AppState>,
    AuthenticatedFarmer(claims): AuthenticatedFarmer,
    Query(query): Query<BookingListQuery>,
) -> AppResult<Json<BookingListResponse>> {
    let bookings = state
        .services
        .bookings
        .my_rentals(claims.farmer_id, query.status)
        .await?;
    Ok(Json(BookingListResponse {
        count: bookings.len(),
        bookings,
    }))
}

/// Bookings against the authenticated farmer's own equipment
#[utoipa::path(
    get,
    path = "/bookings/my-bookings",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(("status" = Option<String>, Query, description = "Booking status filter")),
    responses(
        (status = 200, description = "Bookings, newest first", body = BookingListResponse)
    )
)]
pub async fn my_bookings(
    State(state): State<crate::AppState>,
    AuthenticatedFarmer(claims): AuthenticatedFarmer,
    Query(query): Query<BookingListQuery>,
) -> AppResult<Json<BookingListResponse>> {
    let bookings = state
        .services
        .bookings
        .my_bookings(claims.farmer_id, query.status)
        .await?;
    Ok(Json(BookingListResponse {
        count: bookings.len(),
        bookings,
    }))
}

/// Get a booking (visible to its parties only)
#[utoipa::path(
    get,
    path = "/bookings/{id}",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking details", body = BookingDetails),
        (status = 403, description = "Not a party to this booking"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn get_booking(
    State(state): State<crate::AppState>,
    AuthenticatedFarmer(claims): AuthenticatedFarmer,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BookingDetails>> {
    let booking = state.services.bookings.get(claims.farmer_id, id).await?;
    Ok(Json(booking))
}

/// Confirm a pending booking (owner only)
#[utoipa::path(
    patch,
    path = "/bookings/{id}/confirm",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking confirmed", body = BookingResponse),
        (status = 400, description = "Booking is not pending"),
        (status = 403, description = "Only the owner can confirm"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn confirm_booking(
    State(state): State<crate::AppState>,
    AuthenticatedFarmer(claims): AuthenticatedFarmer,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BookingResponse>> {
    let booking = state.services.bookings.confirm(claims.farmer_id, id).await?;
    Ok(Json(BookingResponse {
        message: "Booking confirmed".to_string(),
        booking,
    }))
}

/// Complete a booking (owner or renter); releases the equipment
#[utoipa::path(
    patch,
    path = "/bookings/{id}/complete",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking completed", body = BookingResponse),
        (status = 400, description = "Booking already closed"),
        (status = 403, description = "Not a party to this booking")
    )
)]
pub async fn complete_booking(
    State(state): State<crate::AppState>,
    AuthenticatedFarmer(claims): AuthenticatedFarmer,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BookingResponse>> {
    let booking = state.services.bookings.complete(claims.farmer_id, id).await?;
    Ok(Json(BookingResponse {
        message: "Booking completed successfully".to_string(),
        booking,
    }))
}

/// Cancel a booking (owner or renter); releases the equipment
#[utoipa::path(
    patch,
    path = "/bookings/{id}/cancel",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Booking ID")),
    request_body = CancelBooking,
    responses(
        (status = 200, description = "Booking cancelled", body = BookingResponse),
        (status = 400, description = "Booking already closed"),
        (status = 403, description = "Not a party to this booking")
    )
)]
pub async fn cancel_booking(
    State(state): State<crate::AppState>,
    AuthenticatedFarmer(claims): AuthenticatedFarmer,
    Path(id): Path<Uuid>,
    Json(request): Json<CancelBooking>,
) -> AppResult<Json<BookingResponse>> {
    let booking = state
        .services
        .bookings
        .cancel(claims.farmer_id, id, request)
        .await?;
    Ok(Json(BookingResponse {
        message: "Booking cancelled".to_string(),
        booking,
    }))
}
