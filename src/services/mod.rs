//! Business logic services

pub mod analytics;
pub mod bookings;
pub mod equipment;
pub mod farmers;
pub mod geocoding;
pub mod pricing;

use crate::{
    config::{AuthConfig, DiscoveryConfig, GeocodingConfig},
    error::AppResult,
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub farmers: farmers::FarmersService,
    pub equipment: equipment::EquipmentService,
    pub bookings: bookings::BookingsService,
    pub analytics: analytics::AnalyticsService,
    pub geocoding: geocoding::GeocodingService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(
        repository: Repository,
        auth_config: AuthConfig,
        geocoding_config: GeocodingConfig,
        discovery_config: DiscoveryConfig,
    ) -> AppResult<Self> {
        let geocoding = geocoding::GeocodingService::new(geocoding_config)?;
        Ok(Self {
            farmers: farmers::FarmersService::new(repository.clone(), auth_config),
            equipment: equipment::EquipmentService::new(
                repository.clone(),
                geocoding.clone(),
                discovery_config,
            ),
            bookings: bookings::BookingsService::new(repository.clone()),
            analytics: analytics::AnalyticsService::new(repository),
            geocoding,
        })
    }
}
