//! Bookings repository: the booking ledger and its equipment side-effects
//!
//! Every transition that touches `equipment.availability_status` also updates
//! `equipment.current_booking_id` in the same statement, inside the same
//! transaction as the booking mutation. No observable state has
//! status = booked with a null booking reference, or the reverse.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, Pool, Postgres, Row};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        booking::{Booking, BookingDetails},
        enums::{BookingStatus, DeliveryType},
        equipment::EquipmentSummary,
        farmer::FarmerSummary,
    },
};

/// Fully-resolved booking ready for insertion (pricing already computed)
#[derive(Debug)]
pub struct NewBooking {
    pub equipment_id: Uuid,
    pub renter_id: Uuid,
    pub owner_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub duration_hours: i64,
    pub duration_days: i64,
    pub price_per_unit: Decimal,
    pub total_price: Decimal,
    pub delivery_type: DeliveryType,
    pub delivery_longitude: Option<f64>,
    pub delivery_latitude: Option<f64>,
    pub delivery_address: Option<String>,
    pub notes: Option<String>,
}

/// Per-owner aggregate over completed bookings
#[derive(Debug, Clone, serde::Serialize, utoipa::ToSchema)]
pub struct OwnerEarnings {
    pub farmer_id: Uuid,
    pub name: String,
    pub total_earnings: Decimal,
    pub booking_count: i64,
}

#[derive(Clone)]
pub struct BookingsRepository {
    pool: Pool<Postgres>,
}

impl BookingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get booking by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking {} not found", id)))
    }

    /// Create a booking and flip the equipment to booked, atomically.
    ///
    /// The equipment update is conditional on `availability_status =
    /// 'available'` still holding at write time. When two renters race, the
    /// second update matches zero rows and the whole transaction rolls back,
    /// so the loser leaves neither a booking row nor a mutated equipment
    /// record.
    pub async fn create(&self, data: &NewBooking) -> AppResult<Booking> {
        let mut tx = self.pool.begin().await?;

        let booking = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (
                equipment_id, renter_id, owner_id, start_date, end_date,
                duration_hours, duration_days, price_per_unit, total_price,
                delivery_type, delivery_longitude, delivery_latitude,
                delivery_address, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(data.equipment_id)
        .bind(data.renter_id)
        .bind(data.owner_id)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(data.duration_hours)
        .bind(data.duration_days)
        .bind(data.price_per_unit)
        .bind(data.total_price)
        .bind(data.delivery_type)
        .bind(data.delivery_longitude)
        .bind(data.delivery_latitude)
        .bind(data.delivery_address.as_deref())
        .bind(data.notes.as_deref())
        .fetch_one(&mut *tx)
        .await?;

        let flipped = sqlx::query(
            r#"
            UPDATE equipment
            SET availability_status = 'booked',
                current_booking_id = $2,
                total_bookings = total_bookings + 1,
                updated_at = NOW()
            WHERE id = $1 AND availability_status = 'available'
            "#,
        )
        .bind(data.equipment_id)
        .bind(booking.id)
        .execute(&mut *tx)
        .await?;

        if flipped.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(AppError::equipment_unavailable());
        }

        tx.commit().await?;
        Ok(booking)
    }

    /// pending -> confirmed. The status guard is re-checked at write time.
    pub async fn confirm(&self, id: Uuid) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET status = 'confirmed', updated_at = NOW()
            WHERE id = $1 AND status = 'pending'
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::invalid_transition("Booking cannot be confirmed"))
    }

    /// Any non-terminal status -> completed; releases the equipment.
    pub async fn complete(&self, id: Uuid) -> AppResult<Booking> {
        let mut tx = self.pool.begin().await?;

        let booking = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET status = 'completed', completed_at = NOW(), updated_at = NOW()
            WHERE id = $1 AND status IN ('pending', 'confirmed', 'active')
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::invalid_transition("Booking is already closed"))?;

        release_equipment(&mut tx, booking.equipment_id, booking.id).await?;

        tx.commit().await?;
        Ok(booking)
    }

    /// Any non-terminal status -> cancelled; releases the equipment.
    pub async fn cancel(
        &self,
        id: Uuid,
        cancelled_by: Uuid,
        reason: Option<&str>,
    ) -> AppResult<Booking> {
        let mut tx = self.pool.begin().await?;

        let booking = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET status = 'cancelled', cancelled_by = $2, cancellation_reason = $3,
                cancelled_at = NOW(), updated_at = NOW()
            WHERE id = $1 AND status IN ('pending', 'confirmed', 'active')
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(cancelled_by)
        .bind(reason)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::invalid_transition("Booking is already closed"))?;

        release_equipment(&mut tx, booking.equipment_id, booking.id).await?;

        tx.commit().await?;
        Ok(booking)
    }

    /// Booking joined with equipment and both parties
    pub async fn get_details(&self, id: Uuid) -> AppResult<BookingDetails> {
        let row = sqlx::query(&details_query("b.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking {} not found", id)))?;
        details_from_row(&row)
    }

    /// Bookings where the farmer is the renter, newest first
    pub async fn list_by_renter(
        &self,
        renter_id: Uuid,
        status: Option<BookingStatus>,
    ) -> AppResult<Vec<BookingDetails>> {
        let rows = sqlx::query(&details_query(
            "b.renter_id = $1 AND ($2::booking_status IS NULL OR b.status = $2)",
        ))
        .bind(renter_id)
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(details_from_row).collect()
    }

    /// Bookings where the farmer is the equipment owner, newest first
    pub async fn list_by_owner(
        &self,
        owner_id: Uuid,
        status: Option<BookingStatus>,
    ) -> AppResult<Vec<BookingDetails>> {
        let rows = sqlx::query(&details_query(
            "b.owner_id = $1 AND ($2::booking_status IS NULL OR b.status = $2)",
        ))
        .bind(owner_id)
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(details_from_row).collect()
    }

    /// Count all bookings
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Count a farmer's bookings in a given role and status
    pub async fn count_for(
        &self,
        farmer_id: Uuid,
        as_owner: bool,
        statuses: &[BookingStatus],
    ) -> AppResult<i64> {
        let column = if as_owner { "owner_id" } else { "renter_id" };
        let query = format!(
            "SELECT COUNT(*) FROM bookings WHERE {} = $1 AND status = ANY($2)",
            column
        );
        let count: i64 = sqlx::query_scalar(&query)
            .bind(farmer_id)
            .bind(statuses)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Platform-wide revenue over completed bookings
    pub async fn total_revenue(&self) -> AppResult<Decimal> {
        let total: Decimal = sqlx::query_scalar(
            "SELECT COALESCE(SUM(total_price), 0) FROM bookings WHERE status = 'completed'",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }

    /// Most recent bookings, for the analytics overview
    pub async fn recent(&self, limit: i64) -> AppResult<Vec<BookingDetails>> {
        let rows = sqlx::query(&format!("{} LIMIT {}", details_query("TRUE"), limit))
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(details_from_row).collect()
    }

    /// Per-owner earnings over completed bookings, highest first
    pub async fn earnings_by_owner(&self) -> AppResult<Vec<OwnerEarnings>> {
        let rows = sqlx::query(
            r#"
            SELECT b.owner_id AS farmer_id, f.name,
                   SUM(b.total_price) AS total_earnings,
                   COUNT(*) AS booking_count
            FROM bookings b
            JOIN farmers f ON b.owner_id = f.id
            WHERE b.status = 'completed'
            GROUP BY b.owner_id, f.name
            ORDER BY total_earnings DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                Ok(OwnerEarnings {
                    farmer_id: row.try_get("farmer_id")?,
                    name: row.try_get("name")?,
                    total_earnings: row.try_get("total_earnings")?,
                    booking_count: row.try_get("booking_count")?,
                })
            })
            .collect()
    }
}

/// Release the equipment held by a closing booking. Conditional on the
/// booking still being the current one, so a stale close never clobbers a
/// newer booking's hold.
async fn release_equipment(
    tx: &mut sqlx::Transaction<'_, Postgres>,
    equipment_id: Uuid,
    booking_id: Uuid,
) -> AppResult<()> {
    sqlx::query(
        r#"
        UPDATE equipment
        SET availability_status = 'available',
            current_booking_id = NULL,
            updated_at = NOW()
        WHERE id = $1 AND current_booking_id = $2
        "#,
    )
    .bind(equipment_id)
    .bind(booking_id)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

fn details_query(condition: &str) -> String {
    format!(
        r#"
        SELECT b.*,
               e.id AS e_id, e.name AS e_name, e.category AS e_category,
               e.brand AS e_brand, e.model AS e_model, e.price_per_hour AS e_price_per_hour,
               o.id AS o_id, o.name AS o_name, o.phone AS o_phone,
               o.village AS o_village, o.rating AS o_rating,
               r.id AS r_id, r.name AS r_name, r.phone AS r_phone,
               r.village AS r_village, r.rating AS r_rating
        FROM bookings b
        JOIN equipment e ON b.equipment_id = e.id
        JOIN farmers o ON b.owner_id = o.id
        JOIN farmers r ON b.renter_id = r.id
        WHERE {}
        ORDER BY b.created_at DESC
        "#,
        condition
    )
}

fn details_from_row(row: &sqlx::postgres::PgRow) -> AppResult<BookingDetails> {
    let booking = Booking::from_row(row)?;
    Ok(BookingDetails {
        booking,
        equipment: EquipmentSummary {
            id: row.try_get("e_id")?,
            name: row.try_get("e_name")?,
            category: row.try_get("e_category")?,
            brand: row.try_get("e_brand")?,
            model: row.try_get("e_model")?,
            price_per_hour: row.try_get("e_price_per_hour")?,
        },
        owner: FarmerSummary {
            id: row.try_get("o_id")?,
            name: row.try_get("o_name")?,
            phone: row.try_get("o_phone")?,
            village: row.try_get("o_village")?,
            rating: row.try_get("o_rating")?,
        },
        renter: FarmerSummary {
            id: row.try_get("r_id")?,
            name: row.try_get("r_name")?,
            phone: row.try_get("r_phone")?,
            village: row.try_get("r_village")?,
            rating: row.try_get("r_rating")?,
        },
    })
}
