//! Farmer model, requests and JWT claims

use chrono::{DateTime, Duration, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::enums::Language;
use super::geo::GeoPoint;

/// Indian mobile number format accepted at registration
pub static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[6-9]\d{9}$").unwrap());

/// Farmer record from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Farmer {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub village: String,
    pub panchayat: String,
    pub district: String,
    pub state: String,
    pub longitude: f64,
    pub latitude: f64,
    pub land_size: Option<Decimal>,
    pub language: Language,
    pub rating: f64,
    pub total_ratings: i32,
    pub is_equipment_owner: bool,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Farmer {
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.longitude, self.latitude)
    }
}

/// Abbreviated farmer embedded in listing and booking responses
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct FarmerSummary {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub village: String,
    pub rating: f64,
}

/// Registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterFarmer {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(regex(path = *PHONE_RE, message = "Invalid phone number"))]
    pub phone: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[validate(length(min = 1, message = "Village is required"))]
    pub village: String,
    #[validate(length(min = 1, message = "Panchayat is required"))]
    pub panchayat: String,
    #[validate(length(min = 1, message = "District is required"))]
    pub district: String,
    #[validate(length(min = 1, message = "State is required"))]
    pub state: String,
    pub location: Option<GeoPoint>,
    pub land_size: Option<Decimal>,
    pub language: Option<Language>,
}

/// Login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginFarmer {
    #[validate(regex(path = *PHONE_RE, message = "Invalid phone number"))]
    pub phone: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Profile update; only these fields may change after registration
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProfile {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[validate(length(min = 1))]
    pub village: Option<String>,
    #[validate(length(min = 1))]
    pub panchayat: Option<String>,
    #[validate(length(min = 1))]
    pub district: Option<String>,
    #[validate(length(min = 1))]
    pub state: Option<String>,
    pub location: Option<GeoPoint>,
    pub land_size: Option<Decimal>,
    pub language: Option<Language>,
}

/// Public farmer fields, visible without authentication
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PublicFarmer {
    pub id: Uuid,
    pub name: String,
    pub village: String,
    pub panchayat: String,
    pub district: String,
    pub rating: f64,
    pub total_ratings: i32,
    pub is_equipment_owner: bool,
}

/// Public profile: farmer plus marketplace track record
#[derive(Debug, Serialize, ToSchema)]
pub struct FarmerProfile {
    pub farmer: PublicFarmer,
    pub stats: FarmerStats,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FarmerStats {
    pub equipment_count: i64,
    pub completed_bookings: i64,
}

/// Owner dashboard counters
#[derive(Debug, Serialize, ToSchema)]
pub struct FarmerDashboard {
    pub my_equipment: i64,
    pub available_equipment: i64,
    pub booked_equipment: i64,
    pub pending_bookings: i64,
    pub active_bookings: i64,
    pub completed_bookings: i64,
    pub my_active_rentals: i64,
    pub my_completed_rentals: i64,
    pub total_earnings: Decimal,
}

/// JWT claims for authenticated farmers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FarmerClaims {
    pub sub: String,
    pub farmer_id: Uuid,
    pub exp: i64,
    pub iat: i64,
}

impl FarmerClaims {
    pub fn new(farmer: &Farmer, validity_days: i64) -> Self {
        let now = Utc::now();
        Self {
            sub: farmer.phone.clone(),
            farmer_id: farmer.id,
            iat: now.timestamp(),
            exp: (now + Duration::days(validity_days)).timestamp(),
        }
    }

    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_pattern() {
        assert!(PHONE_RE.is_match("9876543210"));
        assert!(PHONE_RE.is_match("6000000000"));
        assert!(!PHONE_RE.is_match("5876543210"));
        assert!(!PHONE_RE.is_match("98765"));
        assert!(!PHONE_RE.is_match("98765432100"));
    }

    #[test]
    fn register_validation() {
        let req = RegisterFarmer {
            name: "Asha".to_string(),
            phone: "12345".to_string(),
            password: "short".to_string(),
            village: "Wadgaon".to_string(),
            panchayat: "Wadgaon GP".to_string(),
            district: "Pune".to_string(),
            state: "Maharashtra".to_string(),
            location: None,
            land_size: None,
            language: None,
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("phone"));
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn token_round_trip() {
        let farmer = Farmer {
            id: Uuid::new_v4(),
            name: "Asha".to_string(),
            phone: "9876543210".to_string(),
            password_hash: String::new(),
            village: "Wadgaon".to_string(),
            panchayat: "Wadgaon GP".to_string(),
            district: "Pune".to_string(),
            state: "Maharashtra".to_string(),
            longitude: 73.85,
            latitude: 18.52,
            land_size: None,
            language: Language::Marathi,
            rating: 0.0,
            total_ratings: 0,
            is_equipment_owner: false,
            verified: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let claims = FarmerClaims::new(&farmer, 30);
        let token = claims.create_token("secret").unwrap();
        let parsed = FarmerClaims::from_token(&token, "secret").unwrap();
        assert_eq!(parsed.farmer_id, farmer.id);
        assert_eq!(parsed.sub, farmer.phone);
        assert!(FarmerClaims::from_token(&token, "wrong").is_err());
    }
}
