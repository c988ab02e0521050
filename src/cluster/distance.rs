use std::f64::consts::PI;

use rand::Rng;

use super::point::Point;
use crate::error::{Error, Result};

/// Coefficient to translate from degrees to radians
pub const DEGREE_RAD: f64 = PI / 180.0;

/// Mean Earth radius in meters
///
/// Shared by distance reporting and eps calibration so that meters and
/// radians convert back and forth exactly.
pub const EARTH_R: f64 = 6_371_008.8;

/// Calculates the haversine central angle between two `[lat, lon]` pairs
///
/// Both arguments are in radians, the result is an angle in radians
/// (great-circle distance on the unit sphere).
pub fn haversine_angle(a: [f64; 2], b: [f64; 2]) -> f64 {
    let sin_dlat = ((b[0] - a[0]) / 2.0).sin();
    let sin_dlon = ((b[1] - a[1]) / 2.0).sin();
    let h = sin_dlat * sin_dlat + a[0].cos() * b[0].cos() * sin_dlon * sin_dlon;

    2.0 * h.sqrt().min(1.0).asin()
}

/// Calculates great-circle distance between two points
///
/// # Returns
///
/// Distance in meters
pub fn distance_haversine(p1: &Point, p2: &Point) -> f64 {
    EARTH_R * haversine_angle(p1.to_radians(), p2.to_radians())
}

/// Summary of pairwise distances over a sample, in meters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceStats {
    pub mean: f64,
    /// Mean of the two middle values for an even count
    pub median: f64,
    pub min: f64,
    pub max: f64,
}

/// Samples `sample_size` points uniformly without replacement and summarizes
/// their full pairwise distance matrix, self-distances included
///
/// Meant as a hint for choosing the clustering radius, not as an exact
/// population statistic.
pub fn distance_stats<R: Rng + ?Sized>(
    points: &[Point],
    sample_size: usize,
    rng: &mut R,
) -> Result<DistanceStats> {
    if sample_size == 0 {
        return Err(Error::InvalidParameter {
            name: "sample_size",
            message: "must be at least 1",
        });
    }
    if sample_size > points.len() {
        return Err(Error::InsufficientData {
            requested: sample_size,
            available: points.len(),
        });
    }

    let sample: Vec<[f64; 2]> = rand::seq::index::sample(rng, points.len(), sample_size)
        .iter()
        .map(|i| points[i].to_radians())
        .collect();

    let mut distances = Vec::with_capacity(sample_size * sample_size);
    for &a in &sample {
        for &b in &sample {
            distances.push(EARTH_R * haversine_angle(a, b));
        }
    }
    distances.sort_by(f64::total_cmp);

    let n = distances.len();
    let median = if n % 2 == 1 {
        distances[n / 2]
    } else {
        (distances[n / 2 - 1] + distances[n / 2]) / 2.0
    };

    Ok(DistanceStats {
        mean: distances.iter().sum::<f64>() / n as f64,
        median,
        min: distances[0],
        max: distances[n - 1],
    })
}
