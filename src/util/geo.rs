//! Great-circle distances
//!
//! Uses the haversine formula on a spherical Earth. Plane geometry would be
//! wrong for points more than a few kilometres apart.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometres
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Geographic coordinate in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Distance to another coordinate in kilometres
    pub fn distance_km(&self, other: &Coordinate) -> f64 {
        haversine_distance_km(self.latitude, self.longitude, other.latitude, other.longitude)
    }
}

/// Haversine distance between two latitude/longitude pairs (degrees), in kilometres
///
/// # Example
///
/// ```
/// use peoplestats::util::geo::haversine_distance_km;
///
/// let d = haversine_distance_km(0.0, 0.0, 0.0, 90.0);
/// assert!((d - 10007.54).abs() < 0.01);
/// ```
pub fn haversine_distance_km(lat1: f64, long1: f64, lat2: f64, long2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let half_dlat = (lat2 - lat1).to_radians() / 2.0;
    let half_dlong = (long2 - long1).to_radians() / 2.0;

    let a = half_dlat.sin().powi(2) + lat1_rad.cos() * lat2_rad.cos() * half_dlong.sin().powi(2);

    // Rounding can push `a` a hair above 1 for antipodal points; NaN stays NaN
    2.0 * EARTH_RADIUS_KM * a.sqrt().clamp(0.0, 1.0).asin()
}
