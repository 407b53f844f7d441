//! Repository layer for database operations

pub mod bookings;
pub mod equipment;
pub mod farmers;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub farmers: farmers::FarmersRepository,
    pub equipment: equipment::EquipmentRepository,
    pub bookings: bookings::BookingsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            farmers: farmers::FarmersRepository::new(pool.clone()),
            equipment: equipment::EquipmentRepository::new(pool.clone()),
            bookings: bookings::BookingsRepository::new(pool.clone()),
            pool,
        }
    }
}
