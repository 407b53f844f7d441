//! Farmer account service: registration, login, profile, dashboard

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use uuid::Uuid;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult, ErrorCode},
    models::{
        enums::BookingStatus,
        farmer::{
            Farmer, FarmerClaims, FarmerDashboard, FarmerProfile, FarmerStats, LoginFarmer,
            RegisterFarmer, UpdateProfile,
        },
        AvailabilityStatus,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct FarmersService {
    repository: Repository,
    auth_config: AuthConfig,
}

impl FarmersService {
    pub fn new(repository: Repository, auth_config: AuthConfig) -> Self {
        Self {
            repository,
            auth_config,
        }
    }

    /// Register a new farmer and issue a token
    pub async fn register(&self, data: RegisterFarmer) -> AppResult<(Farmer, String)> {
        if self.repository.farmers.get_by_phone(&data.phone).await?.is_some() {
            return Err(AppError::Conflict(
                ErrorCode::Duplicate,
                "Phone number already registered".to_string(),
            ));
        }

        let password_hash = self.hash_password(&data.password)?;
        let farmer = self.repository.farmers.create(&data, &password_hash).await?;

        tracing::info!(farmer_id = %farmer.id, "Farmer registered");

        let token = self.issue_token(&farmer)?;
        Ok((farmer, token))
    }

    /// Authenticate by phone and password
    pub async fn login(&self, data: LoginFarmer) -> AppResult<(Farmer, String)> {
        let farmer = self
            .repository
            .farmers
            .get_by_phone(&data.phone)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid credentials".to_string()))?;

        if !self.verify_password(&farmer, &data.password)? {
            return Err(AppError::Authentication("Invalid credentials".to_string()));
        }

        let token = self.issue_token(&farmer)?;
        Ok((farmer, token))
    }

    /// Get the authenticated farmer's profile
    pub async fn me(&self, farmer_id: Uuid) -> AppResult<Farmer> {
        self.repository.farmers.get_by_id(farmer_id).await
    }

    /// Update the authenticated farmer's profile
    pub async fn update_profile(&self, farmer_id: Uuid, data: &UpdateProfile) -> AppResult<Farmer> {
        self.repository.farmers.update_profile(farmer_id, data).await
    }

    /// Public profile: farmer plus their marketplace track record
    pub async fn profile(&self, farmer_id: Uuid) -> AppResult<FarmerProfile> {
        let farmer = self.repository.farmers.public_by_id(farmer_id).await?;
        let stats = FarmerStats {
            equipment_count: self
                .repository
                .equipment
                .count_by_owner(farmer_id, None)
                .await?,
            completed_bookings: self
                .repository
                .bookings
                .count_for(farmer_id, true, &[BookingStatus::Completed])
                .await?,
        };
        Ok(FarmerProfile { farmer, stats })
    }

    /// Owner dashboard counters and earnings
    pub async fn dashboard(&self, farmer_id: Uuid) -> AppResult<FarmerDashboard> {
        let farmers = &self.repository.farmers;
        let equipment = &self.repository.equipment;
        let bookings = &self.repository.bookings;

        Ok(FarmerDashboard {
            my_equipment: equipment.count_by_owner(farmer_id, None).await?,
            available_equipment: equipment
                .count_by_owner(farmer_id, Some(AvailabilityStatus::Available))
                .await?,
            booked_equipment: equipment
                .count_by_owner(farmer_id, Some(AvailabilityStatus::Booked))
                .await?,
            pending_bookings: bookings
                .count_for(farmer_id, true, &[BookingStatus::Pending])
                .await?,
            active_bookings: bookings
                .count_for(farmer_id, true, &[BookingStatus::Active])
                .await?,
            completed_bookings: bookings
                .count_for(farmer_id, true, &[BookingStatus::Completed])
                .await?,
            my_active_rentals: bookings
                .count_for(
                    farmer_id,
                    false,
                    &[BookingStatus::Confirmed, BookingStatus::Active],
                )
                .await?,
            my_completed_rentals: bookings
                .count_for(farmer_id, false, &[BookingStatus::Completed])
                .await?,
            total_earnings: farmers.total_earnings(farmer_id).await?,
        })
    }

    fn issue_token(&self, farmer: &Farmer) -> AppResult<String> {
        FarmerClaims::new(farmer, self.auth_config.jwt_expiration_days)
            .create_token(&self.auth_config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to issue token: {}", e)))
    }

    fn verify_password(&self, farmer: &Farmer, password: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(&farmer.password_hash)
            .map_err(|e| AppError::Internal(format!("Invalid password hash: {}", e)))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }
}
