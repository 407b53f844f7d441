//! Farmers repository for database operations

use rust_decimal::Decimal;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        farmer::{Farmer, FarmerSummary, PublicFarmer, RegisterFarmer, UpdateProfile},
        geo::GeoPoint,
    },
};

#[derive(Clone)]
pub struct FarmersRepository {
    pool: Pool<Postgres>,
}

impl FarmersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get farmer by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Farmer> {
        sqlx::query_as::<_, Farmer>("SELECT * FROM farmers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Farmer {} not found", id)))
    }

    /// Get farmer by phone number, if registered
    pub async fn get_by_phone(&self, phone: &str) -> AppResult<Option<Farmer>> {
        let farmer = sqlx::query_as::<_, Farmer>("SELECT * FROM farmers WHERE phone = $1")
            .bind(phone)
            .fetch_optional(&self.pool)
            .await?;
        Ok(farmer)
    }

    /// Create a new farmer with a pre-hashed password
    pub async fn create(&self, data: &RegisterFarmer, password_hash: &str) -> AppResult<Farmer> {
        let location = data.location.unwrap_or(GeoPoint::new(0.0, 0.0));
        let farmer = sqlx::query_as::<_, Farmer>(
            r#"
            INSERT INTO farmers (
                name, phone, password_hash, village, panchayat, district, state,
                longitude, latitude, land_size, language
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.phone)
        .bind(password_hash)
        .bind(&data.village)
        .bind(&data.panchayat)
        .bind(&data.district)
        .bind(&data.state)
        .bind(location.longitude)
        .bind(location.latitude)
        .bind(data.land_size)
        .bind(data.language.unwrap_or_default())
        .fetch_one(&self.pool)
        .await?;
        Ok(farmer)
    }

    /// Update the mutable profile fields
    pub async fn update_profile(&self, id: Uuid, data: &UpdateProfile) -> AppResult<Farmer> {
        sqlx::query_as::<_, Farmer>(
            r#"
            UPDATE farmers SET
                name = COALESCE($2, name),
                village = COALESCE($3, village),
                panchayat = COALESCE($4, panchayat),
                district = COALESCE($5, district),
                state = COALESCE($6, state),
                longitude = COALESCE($7, longitude),
                latitude = COALESCE($8, latitude),
                land_size = COALESCE($9, land_size),
                language = COALESCE($10, language),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(data.name.as_deref())
        .bind(data.village.as_deref())
        .bind(data.panchayat.as_deref())
        .bind(data.district.as_deref())
        .bind(data.state.as_deref())
        .bind(data.location.map(|l| l.longitude))
        .bind(data.location.map(|l| l.latitude))
        .bind(data.land_size)
        .bind(data.language)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Farmer {} not found", id)))
    }

    /// Mark a farmer as an equipment owner after their first listing
    pub async fn mark_equipment_owner(&self, id: Uuid) -> AppResult<()> {
        sqlx::query("UPDATE farmers SET is_equipment_owner = TRUE, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Public farmer fields for the unauthenticated profile endpoint
    pub async fn public_by_id(&self, id: Uuid) -> AppResult<PublicFarmer> {
        sqlx::query_as::<_, PublicFarmer>(
            r#"
            SELECT id, name, village, panchayat, district,
                   rating, total_ratings, is_equipment_owner
            FROM farmers WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Farmer {} not found", id)))
    }

    /// Abbreviated farmer for embedding in responses
    pub async fn summary(&self, id: Uuid) -> AppResult<FarmerSummary> {
        sqlx::query_as::<_, FarmerSummary>(
            "SELECT id, name, phone, village, rating FROM farmers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Farmer {} not found", id)))
    }

    /// Count registered farmers
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM farmers")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Earnings from completed bookings for a given owner
    pub async fn total_earnings(&self, owner_id: Uuid) -> AppResult<Decimal> {
        let total: Decimal = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(total_price), 0)
            FROM bookings
            WHERE owner_id = $1 AND status = 'completed'
            "#,
        )
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }
}
