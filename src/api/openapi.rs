//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{analytics, auth, bookings, equipment, farmers, health, location};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "MittiMobil API",
        version = "1.0.0",
        description = "Agricultural Equipment Rental Marketplace REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html"),
        contact(name = "MittiMobil Team")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::register,
        auth::login,
        // Farmers
        farmers::me,
        farmers::update_me,
        farmers::dashboard,
        farmers::get_farmer,
        // Equipment
        equipment::search_equipment,
        equipment::get_equipment,
        equipment::my_equipment,
        equipment::create_equipment,
        equipment::update_equipment,
        equipment::delete_equipment,
        // Bookings
        bookings::create_booking,
        bookings::my_rentals,
        bookings::my_bookings,
        bookings::get_booking,
        bookings::confirm_booking,
        bookings::complete_booking,
        bookings::cancel_booking,
        // Location
        location::nearby,
        location::geocode,
        location::reverse,
        // Analytics
        analytics::overview,
        analytics::earnings,
    ),
    components(
        schemas(
            // Auth
            auth::AuthFarmer,
            auth::AuthResponse,
            // Farmers
            crate::models::farmer::Farmer,
            crate::models::farmer::FarmerSummary,
            crate::models::farmer::RegisterFarmer,
            crate::models::farmer::LoginFarmer,
            crate::models::farmer::UpdateProfile,
            crate::models::farmer::FarmerDashboard,
            crate::models::farmer::PublicFarmer,
            crate::models::farmer::FarmerProfile,
            crate::models::farmer::FarmerStats,
            // Equipment
            crate::models::equipment::Equipment,
            crate::models::equipment::EquipmentSummary,
            crate::models::equipment::EquipmentListing,
            crate::models::equipment::CreateEquipment,
            crate::models::equipment::UpdateEquipment,
            equipment::EquipmentListResponse,
            // Bookings
            crate::models::booking::Booking,
            crate::models::booking::BookingDetails,
            crate::models::booking::CreateBooking,
            crate::models::booking::CancelBooking,
            crate::models::booking::DeliveryLocation,
            bookings::BookingResponse,
            bookings::BookingListResponse,
            // Geo
            crate::models::geo::GeoPoint,
            crate::services::geocoding::Place,
            location::GeocodeRequest,
            // Enums
            crate::models::enums::EquipmentCategory,
            crate::models::enums::AvailabilityStatus,
            crate::models::enums::BookingStatus,
            crate::models::enums::PaymentStatus,
            crate::models::enums::DeliveryType,
            crate::models::enums::Language,
            // Analytics
            crate::services::analytics::Overview,
            crate::services::analytics::OverviewResponse,
            crate::services::analytics::CategoryCount,
            crate::services::analytics::LocationCount,
            crate::services::analytics::RecentBooking,
            crate::repository::bookings::OwnerEarnings,
            analytics::EarningsResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Registration and login"),
        (name = "farmers", description = "Farmer profiles"),
        (name = "equipment", description = "Equipment listings and discovery"),
        (name = "bookings", description = "Booking lifecycle"),
        (name = "location", description = "Geocoding and proximity"),
        (name = "analytics", description = "Platform analytics")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
