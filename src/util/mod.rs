//! Shared helpers used by the statistic units

pub mod geo;
pub mod top_k;

pub use geo::{haversine_distance_km, Coordinate};
pub use top_k::select_top_k;
