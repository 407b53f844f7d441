//! Equipment catalog and discovery service

use uuid::Uuid;
use validator::Validate;

use crate::{
    config::DiscoveryConfig,
    error::{AppError, AppResult, ErrorCode},
    models::{
        enums::AvailabilityStatus,
        equipment::{CreateEquipment, Equipment, EquipmentListing, EquipmentQuery, UpdateEquipment},
        geo::{self, GeoPoint},
    },
    repository::Repository,
};

use super::geocoding::GeocodingService;

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
    geocoding: GeocodingService,
    discovery: DiscoveryConfig,
}

impl EquipmentService {
    pub fn new(
        repository: Repository,
        geocoding: GeocodingService,
        discovery: DiscoveryConfig,
    ) -> Self {
        Self {
            repository,
            geocoding,
            discovery,
        }
    }

    /// Discovery search over available equipment.
    ///
    /// With a center point, results are those within the radius (default
    /// 50 km, `distance <= radius`), ordered by proximity with the distance
    /// rounded to one decimal. Without one, newest listings come first.
    /// Either way the result set is capped at the configured maximum.
    pub async fn search(&self, query: &EquipmentQuery) -> AppResult<Vec<EquipmentListing>> {
        let mut listings = self.repository.equipment.search_available(query).await?;
        let cap = self.discovery.max_results as usize;

        if let Some(center) = query.center() {
            let radius = query.radius.unwrap_or(self.discovery.default_radius_km);
            let mut with_distance: Vec<(f64, EquipmentListing)> = listings
                .into_iter()
                .filter_map(|mut listing| {
                    let distance = center.distance_km(&listing.equipment.location());
                    if distance <= radius {
                        listing.distance_km = Some(geo::round_km(distance));
                        Some((distance, listing))
                    } else {
                        None
                    }
                })
                .collect();
            with_distance.sort_by(|a, b| a.0.total_cmp(&b.0));
            listings = with_distance
                .into_iter()
                .take(cap)
                .map(|(_, listing)| listing)
                .collect();
        } else {
            listings.truncate(cap);
        }

        Ok(listings)
    }

    /// Get a single listing with its owner
    pub async fn get(&self, id: Uuid) -> AppResult<EquipmentListing> {
        self.repository.equipment.get_listing(id).await
    }

    /// List the authenticated owner's equipment
    pub async fn my_equipment(&self, owner_id: Uuid) -> AppResult<Vec<Equipment>> {
        self.repository.equipment.list_by_owner(owner_id).await
    }

    /// Create a listing. Location resolution degrades gracefully: caller
    /// coordinates win, then a geocoded village/district, then the owner's
    /// stored location, then the configured default point. A geocoding
    /// outage never fails the request.
    pub async fn create(&self, owner_id: Uuid, data: CreateEquipment) -> AppResult<Equipment> {
        data.validate()?;

        let owner = self.repository.farmers.get_by_id(owner_id).await?;

        let village = data.village.clone().unwrap_or_else(|| owner.village.clone());
        let panchayat = data
            .panchayat
            .clone()
            .unwrap_or_else(|| owner.panchayat.clone());
        let district = data
            .district
            .clone()
            .unwrap_or_else(|| owner.district.clone());

        let location = match data.location {
            Some(point) => point,
            None => self.resolve_location(&owner, &village, &district).await,
        };

        let equipment = self
            .repository
            .equipment
            .create(owner_id, &data, location, &village, &panchayat, &district)
            .await?;

        self.repository.farmers.mark_equipment_owner(owner_id).await?;

        tracing::info!(equipment_id = %equipment.id, owner_id = %owner_id, "Equipment listed");
        Ok(equipment)
    }

    /// Update a listing (owner only)
    pub async fn update(
        &self,
        actor_id: Uuid,
        id: Uuid,
        data: UpdateEquipment,
    ) -> AppResult<Equipment> {
        data.validate()?;

        let equipment = self.repository.equipment.get_by_id(id).await?;
        if equipment.owner_id != actor_id {
            return Err(AppError::Authorization("Not the equipment owner".to_string()));
        }

        if let Some(status) = data.availability_status {
            if !status.owner_settable() {
                return Err(AppError::Validation(
                    "Availability status 'booked' is managed by bookings".to_string(),
                ));
            }
            if equipment.availability_status == AvailabilityStatus::Booked {
                return Err(AppError::Conflict(
                    ErrorCode::EquipmentBooked,
                    "Cannot change availability while booked".to_string(),
                ));
            }
        }

        self.repository.equipment.update(id, &data).await
    }

    /// Delete a listing (owner only, never while booked)
    pub async fn delete(&self, actor_id: Uuid, id: Uuid) -> AppResult<()> {
        let equipment = self.repository.equipment.get_by_id(id).await?;
        if equipment.owner_id != actor_id {
            return Err(AppError::Authorization("Not the equipment owner".to_string()));
        }
        if equipment.availability_status == AvailabilityStatus::Booked {
            return Err(AppError::Conflict(
                ErrorCode::EquipmentBooked,
                "Cannot delete equipment with active bookings".to_string(),
            ));
        }
        self.repository.equipment.delete(id).await
    }

    async fn resolve_location(
        &self,
        owner: &crate::models::farmer::Farmer,
        village: &str,
        district: &str,
    ) -> GeoPoint {
        match self.geocoding.geocode(&format!("{}, {}", village, district)).await {
            Ok(place) => GeoPoint::new(place.longitude, place.latitude),
            Err(e) => {
                tracing::warn!("Geocoding failed, using fallback location: {}", e);
                let stored = owner.location();
                if stored.longitude == 0.0 && stored.latitude == 0.0 {
                    GeoPoint::new(
                        self.discovery.default_longitude,
                        self.discovery.default_latitude,
                    )
                } else {
                    stored
                }
            }
        }
    }
}
