//! Domain models for MittiMobil

pub mod booking;
pub mod enums;
pub mod equipment;
pub mod farmer;
pub mod geo;

pub use enums::{
    AvailabilityStatus, BookingStatus, DeliveryType, EquipmentCategory, Language, PaymentStatus,
};
