//! Error types for MittiMobil server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error codes exposed in API error bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    Failure = 1,
    NotAuthenticated = 2,
    NotAuthorized = 3,
    DbFailure = 4,
    NoSuchRecord = 5,
    BadValue = 6,
    EquipmentUnavailable = 7,
    SelfBookingForbidden = 8,
    InvalidTransition = 9,
    Duplicate = 10,
    EquipmentBooked = 11,
    GeocodingFailure = 12,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Authorization failed: {0}")]
    Authorization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Conflict: {1}")]
    Conflict(ErrorCode, String),

    #[error("Geocoding error: {0}")]
    Geocoding(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Equipment is not available for booking (state guard or lost race)
    pub fn equipment_unavailable() -> Self {
        AppError::Conflict(
            ErrorCode::EquipmentUnavailable,
            "Equipment is not available".to_string(),
        )
    }

    /// Renter and owner are the same farmer
    pub fn self_booking() -> Self {
        AppError::Conflict(
            ErrorCode::SelfBookingForbidden,
            "Cannot book your own equipment".to_string(),
        )
    }

    /// Booking status does not admit the requested transition
    pub fn invalid_transition(msg: impl Into<String>) -> Self {
        AppError::Conflict(ErrorCode::InvalidTransition, msg.into())
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Authentication(msg) => {
                (StatusCode::UNAUTHORIZED, ErrorCode::NotAuthenticated, msg.clone())
            }
            AppError::Authorization(msg) => {
                (StatusCode::FORBIDDEN, ErrorCode::NotAuthorized, msg.clone())
            }
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, ErrorCode::NoSuchRecord, msg.clone())
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DbFailure,
                    "Database error".to_string(),
                )
            }
            // State-machine guard failures are reported as 400, not 409:
            // the mobile clients surface the message to the farmer as-is.
            AppError::Conflict(code, msg) => (StatusCode::BAD_REQUEST, *code, msg.clone()),
            AppError::Geocoding(msg) => {
                (StatusCode::BAD_GATEWAY, ErrorCode::GeocodingFailure, msg.clone())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::Validation(e.to_string())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_maps_to_bad_request() {
        let response = AppError::equipment_unavailable().into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn taxonomy_status_codes() {
        let cases = [
            (AppError::Authentication("no token".into()), StatusCode::UNAUTHORIZED),
            (AppError::Authorization("not owner".into()), StatusCode::FORBIDDEN),
            (AppError::NotFound("booking".into()), StatusCode::NOT_FOUND),
            (AppError::Validation("bad interval".into()), StatusCode::BAD_REQUEST),
            (AppError::self_booking(), StatusCode::BAD_REQUEST),
            (AppError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
