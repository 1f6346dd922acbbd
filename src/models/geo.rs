//! Distance primitives shared by the fare engine.
//!
//! `haversine_km` is the only distance that may reach a fare or the user.
//! `degree_proximity` is a cheap planar metric over raw lat/lng, good enough to rank
//! candidates and test thresholds across a few kilometers of one municipality.

use crate::constants::EARTH_RADIUS_KM;
use crate::models::GeoPoint;

/// Great-circle distance between two points in kilometers.
pub fn haversine_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat1_rad = a.lat.to_radians();
    let lat2_rad = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lng = (b.lng - a.lng).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Euclidean distance in degree-space.
pub fn degree_proximity(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let d_lat = a.lat - b.lat;
    let d_lng = a.lng - b.lng;
    (d_lat * d_lat + d_lng * d_lng).sqrt()
}

/// Round a peso amount to centavos.
pub fn round_centavos(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
