//! Registration and login endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    models::farmer::{Farmer, LoginFarmer, RegisterFarmer},
};

/// Abbreviated farmer returned alongside a fresh token
#[derive(Serialize, ToSchema)]
pub struct AuthFarmer {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub village: String,
}

/// Token response
#[derive(Serialize, ToSchema)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub farmer: AuthFarmer,
}

impl AuthResponse {
    fn new(message: &str, token: String, farmer: &Farmer) -> Self {
        Self {
            message: message.to_string(),
            token,
            farmer: AuthFarmer {
                id: farmer.id,
                name: farmer.name.clone(),
                phone: farmer.phone.clone(),
                village: farmer.village.clone(),
            },
        }
    }
}

/// Register a new farmer
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "auth",
    request_body = RegisterFarmer,
    responses(
        (status = 201, description = "Registration successful", body = AuthResponse),
        (status = 400, description = "Invalid input or phone already registered")
    )
)]
pub async fn register(
    State(state): State<crate::AppState>,
    Json(request): Json<RegisterFarmer>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    request.validate()?;

    let (farmer, token) = state.services.farmers.register(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse::new("Registration successful", token, &farmer)),
    ))
}

/// Login with phone and password
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginFarmer,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    Json(request): Json<LoginFarmer>,
) -> AppResult<Json<AuthResponse>> {
    request.validate()?;

    let (farmer, token) = state.services.farmers.login(request).await?;

    Ok(Json(AuthResponse::new("Login successful", token, &farmer)))
}
