//! Platform analytics service: read-only SQL aggregates

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::enums::{BookingStatus, EquipmentCategory},
    repository::{bookings::OwnerEarnings, Repository},
};

/// Headline platform counters
#[derive(Debug, Serialize, ToSchema)]
pub struct Overview {
    pub total_equipment: i64,
    pub total_farmers: i64,
    pub total_bookings: i64,
    pub active_equipment: i64,
    pub total_revenue: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryCount {
    pub category: EquipmentCategory,
    pub count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LocationCount {
    pub location: String,
    pub count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RecentBooking {
    pub id: Uuid,
    pub farmer: String,
    pub equipment: String,
    pub category: EquipmentCategory,
    pub date: DateTime<Utc>,
    pub amount: Decimal,
    pub status: BookingStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OverviewResponse {
    pub overview: Overview,
    pub equipment_by_category: Vec<CategoryCount>,
    pub top_locations: Vec<LocationCount>,
    pub recent_bookings: Vec<RecentBooking>,
}

#[derive(Clone)]
pub struct AnalyticsService {
    repository: Repository,
}

impl AnalyticsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Platform overview: counts, revenue, category and district breakdowns,
    /// and the five most recent bookings
    pub async fn overview(&self) -> AppResult<OverviewResponse> {
        let overview = Overview {
            total_equipment: self.repository.equipment.count().await?,
            total_farmers: self.repository.farmers.count().await?,
            total_bookings: self.repository.bookings.count().await?,
            active_equipment: self.repository.equipment.count_available().await?,
            total_revenue: self.repository.bookings.total_revenue().await?,
        };

        let equipment_by_category = self
            .repository
            .equipment
            .count_by_category()
            .await?
            .into_iter()
            .map(|(category, count)| CategoryCount { category, count })
            .collect();

        let top_locations = self
            .repository
            .equipment
            .top_districts(5)
            .await?
            .into_iter()
            .map(|(location, count)| LocationCount { location, count })
            .collect();

        let recent_bookings = self
            .repository
            .bookings
            .recent(5)
            .await?
            .into_iter()
            .map(|details| RecentBooking {
                id: details.booking.id,
                farmer: details.renter.name,
                equipment: details.equipment.name,
                category: details.equipment.category,
                date: details.booking.start_date,
                amount: details.booking.total_price,
                status: details.booking.status,
            })
            .collect();

        Ok(OverviewResponse {
            overview,
            equipment_by_category,
            top_locations,
            recent_bookings,
        })
    }

    /// Per-owner earnings over completed bookings, highest first
    pub async fn earnings(&self) -> AppResult<Vec<OwnerEarnings>> {
        self.repository.bookings.earnings_by_owner().await
    }
}
