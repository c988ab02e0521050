//! Conversion between physical distances and the angular eps used by DBSCAN
//!
//! Clustering runs on coordinates in radians with the haversine metric, i.e.
//! on the unit sphere, so a radius in meters has to be divided by the Earth
//! radius before it can be used as eps.

use super::distance::EARTH_R;

/// Converts a distance in meters to radians
pub fn meters_to_angular(meters: f64) -> f64 {
    meters / EARTH_R
}

/// Converts an angular distance in radians back to meters
pub fn angular_to_meters(radians: f64) -> f64 {
    radians * EARTH_R
}

/// Returns the eps (radians) matching a desired cluster radius in meters
pub fn calculate_eps(distance_meters: f64) -> f64 {
    meters_to_angular(distance_meters)
}
