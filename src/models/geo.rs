//! Geospatial primitives and the haversine distance used by discovery

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Mean Earth radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A longitude/latitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl GeoPoint {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self { longitude, latitude }
    }

    /// Great-circle distance to another point, in kilometers
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        haversine_km(self.latitude, self.longitude, other.latitude, other.longitude)
    }
}

/// Spherical law-of-haversines distance; inputs in degrees, output in km
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Round a distance to one decimal place for discovery results
pub fn round_km(distance: f64) -> f64 {
    (distance * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_distance_for_same_point() {
        assert!(haversine_km(19.0760, 72.8777, 19.0760, 72.8777).abs() < 1e-9);
    }

    #[test]
    fn known_city_pairs() {
        // Mumbai - Pune, reference value from an independent haversine
        let d = haversine_km(19.0760, 72.8777, 18.5204, 73.8567);
        assert!((d - 119.5).abs() < 0.5, "Mumbai-Pune was {}", d);

        // Mumbai - Delhi
        let d = haversine_km(19.0760, 72.8777, 28.7041, 77.1025);
        assert!((d - 1153.0).abs() < 5.0, "Mumbai-Delhi was {}", d);
    }

    #[test]
    fn symmetric() {
        let a = haversine_km(12.97, 77.59, 13.08, 80.27);
        let b = haversine_km(13.08, 80.27, 12.97, 77.59);
        assert!((a - b).abs() < 1e-9);
    }

    #[test]
    fn one_degree_arcs_match_the_closed_form() {
        // Along the equator or a meridian the formula reduces to
        // R * delta in radians, so 1 degree is exactly 6371 * pi / 180 km
        let expected = EARTH_RADIUS_KM * std::f64::consts::PI / 180.0;

        let d = haversine_km(0.0, 0.0, 0.0, 1.0);
        assert!((d - expected).abs() < 1e-9, "equator arc was {}", d);

        let d = haversine_km(18.0, 77.0, 19.0, 77.0);
        assert!((d - expected).abs() < 1e-9, "meridian arc was {}", d);
    }

    #[test]
    fn rounding_to_one_decimal() {
        assert_eq!(round_km(12.34), 12.3);
        assert_eq!(round_km(12.35), 12.4);
        assert_eq!(round_km(0.04), 0.0);
    }
}
