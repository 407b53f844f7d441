//! API handlers for MittiMobil REST endpoints

pub mod analytics;
pub mod auth;
pub mod bookings;
pub mod equipment;
pub mod farmers;
pub mod health;
pub mod location;
pub mod openapi;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::{error::AppError, models::farmer::FarmerClaims, AppState};

/// Extractor for the authenticated farmer from a JWT bearer token
pub struct AuthenticatedFarmer(pub FarmerClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedFarmer {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        // Get the Authorization header
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

        // Check for Bearer token
        if !auth_header.starts_with("Bearer ") {
            return Err(AppError::Authentication("Invalid authorization header format".to_string()));
        }

        let token = &auth_header[7..];

        // Validate JWT token using the secret from configuration
        let claims = FarmerClaims::from_token(token, &state.config.auth.jwt_secret)
            .map_err(|e| AppError::Authentication(e.to_string()))?;

        Ok(AuthenticatedFarmer(claims))
    }
}
