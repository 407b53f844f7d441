//! Shared domain enums

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// EquipmentCategory
// ---------------------------------------------------------------------------

/// Kind of rentable agricultural asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "equipment_category", rename_all = "lowercase")]
pub enum EquipmentCategory {
    Tractor,
    Harvester,
    Plow,
    Tiller,
    Thresher,
    Sprayer,
    Seeder,
    Other,
}

impl std::fmt::Display for EquipmentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            EquipmentCategory::Tractor => "tractor",
            EquipmentCategory::Harvester => "harvester",
            EquipmentCategory::Plow => "plow",
            EquipmentCategory::Tiller => "tiller",
            EquipmentCategory::Thresher => "thresher",
            EquipmentCategory::Sprayer => "sprayer",
            EquipmentCategory::Seeder => "seeder",
            EquipmentCategory::Other => "other",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// AvailabilityStatus
// ---------------------------------------------------------------------------

/// Equipment-side state gating whether a new booking may be created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "availability_status", rename_all = "lowercase")]
pub enum AvailabilityStatus {
    Available,
    Booked,
    Maintenance,
    Unavailable,
}

impl AvailabilityStatus {
    /// Statuses an owner may set directly. `Booked` is reserved for the
    /// booking lifecycle so the current-booking reference stays in sync.
    pub fn owner_settable(self) -> bool {
        !matches!(self, AvailabilityStatus::Booked)
    }
}

impl std::fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            AvailabilityStatus::Available => "available",
            AvailabilityStatus::Booked => "booked",
            AvailabilityStatus::Maintenance => "maintenance",
            AvailabilityStatus::Unavailable => "unavailable",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// BookingStatus
// ---------------------------------------------------------------------------

/// Booking lifecycle state machine states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "booking_status", rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Active,
    Completed,
    Cancelled,
}

impl sqlx::postgres::PgHasArrayType for BookingStatus {
    fn array_type_info() -> sqlx::postgres::PgTypeInfo {
        sqlx::postgres::PgTypeInfo::with_name("_booking_status")
    }
}

impl BookingStatus {
    /// Terminal states admit no further transitions
    pub fn is_terminal(self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }

    /// Only pending bookings can be confirmed by the owner
    pub fn can_confirm(self) -> bool {
        self == BookingStatus::Pending
    }

    /// Complete and cancel are accepted from any non-terminal status
    pub fn can_close(self) -> bool {
        !self.is_terminal()
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Active => "active",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// PaymentStatus
// ---------------------------------------------------------------------------

/// Payment tracking placeholder. No lifecycle transition mutates this field;
/// it stays `Pending` until a payment subsystem exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "payment_status", rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Partial,
    Completed,
    Refunded,
}

// ---------------------------------------------------------------------------
// DeliveryType
// ---------------------------------------------------------------------------

/// How the equipment reaches the renter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "delivery_type", rename_all = "lowercase")]
pub enum DeliveryType {
    Pickup,
    Delivery,
}

impl Default for DeliveryType {
    fn default() -> Self {
        DeliveryType::Pickup
    }
}

// ---------------------------------------------------------------------------
// Language
// ---------------------------------------------------------------------------

/// Farmer interface language preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "farmer_language", rename_all = "lowercase")]
pub enum Language {
    Hindi,
    English,
    Tamil,
    Telugu,
    Marathi,
    Punjabi,
}

impl Default for Language {
    fn default() -> Self {
        Language::Hindi
    }
}
