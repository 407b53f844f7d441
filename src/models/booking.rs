//! Booking model and related types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::enums::{BookingStatus, DeliveryType, PaymentStatus};
use super::equipment::EquipmentSummary;
use super::farmer::FarmerSummary;
use super::geo::GeoPoint;

/// Booking record from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Booking {
    pub id: Uuid,
    pub equipment_id: Uuid,
    pub renter_id: Uuid,
    pub owner_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub duration_hours: i64,
    pub duration_days: i64,
    /// Hourly rate in force when the booking was created
    pub price_per_unit: Decimal,
    pub total_price: Decimal,
    pub status: BookingStatus,
    /// Placeholder; no lifecycle transition touches this field
    pub payment_status: PaymentStatus,
    pub delivery_type: DeliveryType,
    pub delivery_longitude: Option<f64>,
    pub delivery_latitude: Option<f64>,
    pub delivery_address: Option<String>,
    pub notes: Option<String>,
    pub cancelled_by: Option<Uuid>,
    pub cancellation_reason: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Booking with populated equipment and parties, as returned by the API
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookingDetails {
    #[serde(flatten)]
    pub booking: Booking,
    pub equipment: EquipmentSummary,
    pub owner: FarmerSummary,
    pub renter: FarmerSummary,
}

/// Delivery drop-off requested by the renter
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct DeliveryLocation {
    #[serde(flatten)]
    pub point: GeoPoint,
    pub address: Option<String>,
}

/// Create booking request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBooking {
    pub equipment_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub delivery_type: Option<DeliveryType>,
    pub delivery_location: Option<DeliveryLocation>,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

/// Cancel booking request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CancelBooking {
    pub reason: Option<String>,
}

/// Status filter for my-rentals / my-bookings listings
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct BookingListQuery {
    pub status: Option<BookingStatus>,
}
