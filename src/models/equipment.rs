//! Equipment model and related types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::enums::{AvailabilityStatus, EquipmentCategory};
use super::farmer::FarmerSummary;
use super::geo::GeoPoint;

/// Equipment record from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Equipment {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub category: EquipmentCategory,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub horse_power: Option<i32>,
    pub year_of_purchase: Option<i32>,
    pub price_per_hour: Decimal,
    pub price_per_day: Option<Decimal>,
    pub description: Option<String>,
    pub longitude: f64,
    pub latitude: f64,
    pub village: String,
    pub panchayat: String,
    pub district: String,
    pub availability_status: AvailabilityStatus,
    /// Weak reference to the active booking; non-null iff status is `booked`
    pub current_booking_id: Option<Uuid>,
    pub total_bookings: i32,
    pub rating: f64,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Equipment {
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.longitude, self.latitude)
    }

    /// Status and current booking reference must agree
    pub fn booking_reference_consistent(&self) -> bool {
        (self.availability_status == AvailabilityStatus::Booked)
            == self.current_booking_id.is_some()
    }
}

/// Abbreviated equipment embedded in booking responses
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EquipmentSummary {
    pub id: Uuid,
    pub name: String,
    pub category: EquipmentCategory,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub price_per_hour: Decimal,
}

/// A discovery result: equipment joined with its owner and, when the
/// query had a center point, the rounded distance to it
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EquipmentListing {
    #[serde(flatten)]
    pub equipment: Equipment,
    pub owner: FarmerSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

fn validate_positive_price(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_positive() && !value.is_zero() {
        Ok(())
    } else {
        Err(ValidationError::new("price_not_positive"))
    }
}

/// Create equipment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEquipment {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub category: EquipmentCategory,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub horse_power: Option<i32>,
    pub year_of_purchase: Option<i32>,
    #[validate(custom(function = validate_positive_price, message = "Hourly rate must be positive"))]
    pub price_per_hour: Decimal,
    #[validate(custom(function = validate_optional_positive_price, message = "Daily rate must be positive"))]
    pub price_per_day: Option<Decimal>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    /// Defaults to the owner's location, or a geocoded village/district
    pub location: Option<GeoPoint>,
    pub village: Option<String>,
    pub panchayat: Option<String>,
    pub district: Option<String>,
}

fn validate_optional_positive_price(value: &Decimal) -> Result<(), ValidationError> {
    validate_positive_price(value)
}

/// Update equipment request (owner edits)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateEquipment {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub category: Option<EquipmentCategory>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub horse_power: Option<i32>,
    pub year_of_purchase: Option<i32>,
    #[validate(custom(function = validate_optional_positive_price))]
    pub price_per_hour: Option<Decimal>,
    #[validate(custom(function = validate_optional_positive_price))]
    pub price_per_day: Option<Decimal>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    pub location: Option<GeoPoint>,
    pub village: Option<String>,
    pub panchayat: Option<String>,
    pub district: Option<String>,
    /// Owner may park the listing in maintenance/unavailable; `booked`
    /// is reserved for the booking lifecycle
    pub availability_status: Option<AvailabilityStatus>,
}

/// Discovery query parameters
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct EquipmentQuery {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    /// Search radius in kilometers (default 50)
    pub radius: Option<f64>,
    #[serde(rename = "type")]
    pub category: Option<EquipmentCategory>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub panchayat: Option<String>,
    pub district: Option<String>,
}

impl EquipmentQuery {
    pub fn center(&self) -> Option<GeoPoint> {
        match (self.lng, self.lat) {
            (Some(lng), Some(lat)) => Some(GeoPoint::new(lng, lat)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn create_request(price: Decimal) -> CreateEquipment {
        CreateEquipment {
            name: "Mahindra 575".to_string(),
            category: EquipmentCategory::Tractor,
            brand: Some("Mahindra".to_string()),
            model: Some("575 DI".to_string()),
            horse_power: Some(45),
            year_of_purchase: Some(2021),
            price_per_hour: price,
            price_per_day: None,
            description: None,
            location: None,
            village: None,
            panchayat: None,
            district: None,
        }
    }

    #[test]
    fn hourly_rate_must_be_positive() {
        assert!(create_request(dec!(150)).validate().is_ok());
        assert!(create_request(dec!(0)).validate().is_err());
        assert!(create_request(dec!(-10)).validate().is_err());
    }

    #[test]
    fn query_center_requires_both_coordinates() {
        let mut query = EquipmentQuery::default();
        assert!(query.center().is_none());
        query.lat = Some(19.0);
        assert!(query.center().is_none());
        query.lng = Some(72.8);
        let center = query.center().unwrap();
        assert_eq!(center.latitude, 19.0);
        assert_eq!(center.longitude, 72.8);
    }
}
