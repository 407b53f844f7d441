//! Equipment repository for database operations

use sqlx::{FromRow, Pool, Postgres, Row};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::{AvailabilityStatus, EquipmentCategory},
        equipment::{CreateEquipment, Equipment, EquipmentListing, EquipmentQuery, UpdateEquipment},
        farmer::FarmerSummary,
        geo::GeoPoint,
    },
};

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: Pool<Postgres>,
}

impl EquipmentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get equipment by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Get equipment joined with its owner
    pub async fn get_listing(&self, id: Uuid) -> AppResult<EquipmentListing> {
        let row = sqlx::query(
            r#"
            SELECT e.*, f.id AS o_id, f.name AS o_name, f.phone AS o_phone,
                   f.village AS o_village, f.rating AS o_rating
            FROM equipment e
            JOIN farmers f ON e.owner_id = f.id
            WHERE e.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))?;

        listing_from_row(&row)
    }

    /// Create an equipment listing with a resolved location
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        owner_id: Uuid,
        data: &CreateEquipment,
        location: GeoPoint,
        village: &str,
        panchayat: &str,
        district: &str,
    ) -> AppResult<Equipment> {
        let equipment = sqlx::query_as::<_, Equipment>(
            r#"
            INSERT INTO equipment (
                owner_id, name, category, brand, model, horse_power, year_of_purchase,
                price_per_hour, price_per_day, description,
                longitude, latitude, village, panchayat, district
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING *
            "#,
        )
        .bind(owner_id)
        .bind(&data.name)
        .bind(data.category)
        .bind(data.brand.as_deref())
        .bind(data.model.as_deref())
        .bind(data.horse_power)
        .bind(data.year_of_purchase)
        .bind(data.price_per_hour)
        .bind(data.price_per_day)
        .bind(data.description.as_deref())
        .bind(location.longitude)
        .bind(location.latitude)
        .bind(village)
        .bind(panchayat)
        .bind(district)
        .fetch_one(&self.pool)
        .await?;
        Ok(equipment)
    }

    /// Update owner-editable fields
    pub async fn update(&self, id: Uuid, data: &UpdateEquipment) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>(
            r#"
            UPDATE equipment SET
                name = COALESCE($2, name),
                category = COALESCE($3, category),
                brand = COALESCE($4, brand),
                model = COALESCE($5, model),
                horse_power = COALESCE($6, horse_power),
                year_of_purchase = COALESCE($7, year_of_purchase),
                price_per_hour = COALESCE($8, price_per_hour),
                price_per_day = COALESCE($9, price_per_day),
                description = COALESCE($10, description),
                longitude = COALESCE($11, longitude),
                latitude = COALESCE($12, latitude),
                village = COALESCE($13, village),
                panchayat = COALESCE($14, panchayat),
                district = COALESCE($15, district),
                availability_status = COALESCE($16, availability_status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(data.name.as_deref())
        .bind(data.category)
        .bind(data.brand.as_deref())
        .bind(data.model.as_deref())
        .bind(data.horse_power)
        .bind(data.year_of_purchase)
        .bind(data.price_per_hour)
        .bind(data.price_per_day)
        .bind(data.description.as_deref())
        .bind(data.location.map(|l| l.longitude))
        .bind(data.location.map(|l| l.latitude))
        .bind(data.village.as_deref())
        .bind(data.panchayat.as_deref())
        .bind(data.district.as_deref())
        .bind(data.availability_status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Delete an equipment listing. The caller checks the booked guard;
    /// the conditional delete keeps it safe under concurrent bookings.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query(
            "DELETE FROM equipment WHERE id = $1 AND availability_status != 'booked'",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::Conflict(
                crate::error::ErrorCode::EquipmentBooked,
                "Cannot delete equipment with active bookings".to_string(),
            ));
        }
        Ok(())
    }

    /// List an owner's equipment, newest first
    pub async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Equipment>> {
        let rows = sqlx::query_as::<_, Equipment>(
            "SELECT * FROM equipment WHERE owner_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Discovery base query: available equipment matching the non-spatial
    /// filters, newest first. Radius filtering and proximity ordering happen
    /// in the service where the haversine lives.
    pub async fn search_available(&self, query: &EquipmentQuery) -> AppResult<Vec<EquipmentListing>> {
        let rows = sqlx::query(
            r#"
            SELECT e.*, f.id AS o_id, f.name AS o_name, f.phone AS o_phone,
                   f.village AS o_village, f.rating AS o_rating
            FROM equipment e
            JOIN farmers f ON e.owner_id = f.id
            WHERE e.availability_status = 'available'
              AND ($1::equipment_category IS NULL OR e.category = $1)
              AND ($2::numeric IS NULL OR e.price_per_hour >= $2)
              AND ($3::numeric IS NULL OR e.price_per_hour <= $3)
              AND ($4::text IS NULL OR e.panchayat ILIKE '%' || $4 || '%')
              AND ($5::text IS NULL OR e.district ILIKE '%' || $5 || '%')
            ORDER BY e.created_at DESC
            "#,
        )
        .bind(query.category)
        .bind(query.min_price)
        .bind(query.max_price)
        .bind(query.panchayat.as_deref())
        .bind(query.district.as_deref())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(listing_from_row).collect()
    }

    /// Count all equipment listings
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM equipment")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Count listings currently open for booking
    pub async fn count_available(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM equipment WHERE availability_status = 'available'",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Count the owner's listings in a given availability status
    pub async fn count_by_owner(
        &self,
        owner_id: Uuid,
        status: Option<AvailabilityStatus>,
    ) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM equipment
            WHERE owner_id = $1
              AND ($2::availability_status IS NULL OR availability_status = $2)
            "#,
        )
        .bind(owner_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Listing counts grouped by category, for analytics
    pub async fn count_by_category(&self) -> AppResult<Vec<(EquipmentCategory, i64)>> {
        let rows = sqlx::query(
            "SELECT category, COUNT(*) AS count FROM equipment GROUP BY category ORDER BY count DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        rows.iter()
            .map(|row| Ok((row.try_get("category")?, row.try_get("count")?)))
            .collect()
    }

    /// Districts with the most listings, for analytics
    pub async fn top_districts(&self, limit: i64) -> AppResult<Vec<(String, i64)>> {
        let rows = sqlx::query(
            r#"
            SELECT district, COUNT(*) AS count FROM equipment
            GROUP BY district ORDER BY count DESC LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        rows.iter()
            .map(|row| Ok((row.try_get("district")?, row.try_get("count")?)))
            .collect()
    }
}

fn listing_from_row(row: &sqlx::postgres::PgRow) -> AppResult<EquipmentListing> {
    let equipment = Equipment::from_row(row)?;
    let owner = FarmerSummary {
        id: row.try_get("o_id")?,
        name: row.try_get("o_name")?,
        phone: row.try_get("o_phone")?,
        village: row.try_get("o_village")?,
        rating: row.try_get("o_rating")?,
    };
    Ok(EquipmentListing {
        equipment,
        owner,
        distance_km: None,
    })
}
