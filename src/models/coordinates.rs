use crate::models::geo;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Result<Self, String> {
        let point = GeoPoint { lat, lng };
        point.validate()?;
        Ok(point)
    }

    /// Check that both components are finite and inside their geographic range.
    /// Points deserialized from requests bypass `new`, so callers validate them here.
    pub fn validate(&self) -> Result<(), String> {
        if !self.lat.is_finite() || !(-90.0..=90.0).contains(&self.lat) {
            return Err(format!(
                "Invalid latitude: {} (must be between -90 and 90)",
                self.lat
            ));
        }
        if !self.lng.is_finite() || !(-180.0..=180.0).contains(&self.lng) {
            return Err(format!(
                "Invalid longitude: {} (must be between -180 and 180)",
                self.lng
            ));
        }
        Ok(())
    }

    /// Great-circle distance in kilometers
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        geo::haversine_km(self, other)
    }

    /// Euclidean distance in degree-space, for ranking and small-area thresholds only
    pub fn degree_distance_to(&self, other: &GeoPoint) -> f64 {
        geo::degree_proximity(self, other)
    }

    /// Round coordinates to specified decimal places for caching
    pub fn round(&self, decimal_places: u32) -> Self {
        let multiplier = 10_f64.powi(decimal_places as i32);
        GeoPoint {
            lat: (self.lat * multiplier).round() / multiplier,
            lng: (self.lng * multiplier).round() / multiplier,
        }
    }
}
