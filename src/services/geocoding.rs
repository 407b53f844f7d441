//! Nominatim (OpenStreetMap) geocoding client
//!
//! External collaborator: every call is time-bounded and fallible, and
//! callers must be able to proceed without it.

use std::time::Duration;

use serde::Deserialize;

use crate::{
    config::GeocodingConfig,
    error::{AppError, AppResult},
    models::geo::GeoPoint,
};

/// A geocoded place returned by Nominatim
#[derive(Debug, Clone, serde::Serialize, utoipa::ToSchema)]
pub struct Place {
    pub display_name: String,
    pub longitude: f64,
    pub latitude: f64,
    pub village: Option<String>,
    pub district: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
    display_name: String,
    #[serde(default)]
    address: NominatimAddress,
}

#[derive(Debug, Default, Deserialize)]
struct NominatimAddress {
    village: Option<String>,
    town: Option<String>,
    city: Option<String>,
    state_district: Option<String>,
    state: Option<String>,
}

#[derive(Clone)]
pub struct GeocodingService {
    client: reqwest::Client,
    config: GeocodingConfig,
}

impl GeocodingService {
    pub fn new(config: GeocodingConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }

    /// Resolve a free-text address to coordinates
    pub async fn geocode(&self, query: &str) -> AppResult<Place> {
        let url = format!("{}/search", self.config.base_url);
        let results: Vec<NominatimResult> = self
            .client
            .get(&url)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("addressdetails", "1"),
                ("limit", "1"),
                ("countrycodes", &self.config.country_codes),
            ])
            .send()
            .await
            .map_err(|e| AppError::Geocoding(format!("Geocoding request failed: {}", e)))?
            .json()
            .await
            .map_err(|e| AppError::Geocoding(format!("Invalid geocoding response: {}", e)))?;

        let result = results
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Geocoding(format!("Address not found: {}", query)))?;

        place_from(result)
    }

    /// Resolve coordinates back to an address
    pub async fn reverse(&self, point: GeoPoint) -> AppResult<Place> {
        let url = format!("{}/reverse", self.config.base_url);
        let result: NominatimResult = self
            .client
            .get(&url)
            .query(&[
                ("lat", point.latitude.to_string()),
                ("lon", point.longitude.to_string()),
                ("format", "json".to_string()),
                ("addressdetails", "1".to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Geocoding(format!("Reverse geocoding failed: {}", e)))?
            .json()
            .await
            .map_err(|e| AppError::Geocoding(format!("Invalid geocoding response: {}", e)))?;

        place_from(result)
    }
}

fn place_from(result: NominatimResult) -> AppResult<Place> {
    let latitude: f64 = result
        .lat
        .parse()
        .map_err(|_| AppError::Geocoding("Malformed latitude in response".to_string()))?;
    let longitude: f64 = result
        .lon
        .parse()
        .map_err(|_| AppError::Geocoding("Malformed longitude in response".to_string()))?;

    Ok(Place {
        display_name: result.display_name,
        longitude,
        latitude,
        village: result
            .address
            .village
            .or(result.address.town)
            .or(result.address.city),
        district: result.address.state_district,
        state: result.address.state,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nominatim_payload() {
        let raw = r#"[{
            "lat": "18.5204",
            "lon": "73.8567",
            "display_name": "Pune, Maharashtra, India",
            "address": {"city": "Pune", "state_district": "Pune", "state": "Maharashtra"}
        }]"#;
        let results: Vec<NominatimResult> = serde_json::from_str(raw).unwrap();
        let place = place_from(results.into_iter().next().unwrap()).unwrap();
        assert_eq!(place.latitude, 18.5204);
        assert_eq!(place.longitude, 73.8567);
        assert_eq!(place.village.as_deref(), Some("Pune"));
        assert_eq!(place.state.as_deref(), Some("Maharashtra"));
    }

    #[test]
    fn rejects_malformed_coordinates() {
        let result = NominatimResult {
            lat: "not-a-number".to_string(),
            lon: "73.0".to_string(),
            display_name: "x".to_string(),
            address: NominatimAddress::default(),
        };
        assert!(place_from(result).is_err());
    }
}
