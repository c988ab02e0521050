//! Neighborhood index for eps-range queries on the sphere
//!
//! Points are kept sorted by latitude. The great-circle angle between two
//! points is never smaller than their latitude difference, so a query only
//! has to scan the latitude band `[lat - eps, lat + eps]` and check the
//! haversine angle of each candidate. Longitude is not pruned, which keeps
//! queries correct across the antimeridian and near the poles.

use super::distance::haversine_angle;
use super::point::Point;

/// Latitude-sorted index over a point list
pub struct NeighborIndex {
    /// `[lat, lon]` of every point, in radians
    coords: Vec<[f64; 2]>,
    /// Point ids sorted by latitude
    by_lat: Vec<usize>,
}

impl NeighborIndex {
    /// Finds all points within `eps` radians of point `i` (including `i`)
    ///
    /// Result is sorted by point index.
    pub fn in_range(&self, i: usize, eps: f64) -> Vec<usize> {
        let center = self.coords[i];
        let lo = self
            .by_lat
            .partition_point(|&j| self.coords[j][0] < center[0] - eps);

        let mut nodes = Vec::new();
        for &j in &self.by_lat[lo..] {
            if self.coords[j][0] > center[0] + eps {
                break;
            }
            if haversine_angle(center, self.coords[j]) <= eps {
                nodes.push(j);
            }
        }

        nodes.sort_unstable();
        nodes
    }
}

/// Creates a new neighbor index built from the given points
pub fn new_neighbor_index(points: &[Point]) -> NeighborIndex {
    let coords: Vec<[f64; 2]> = points.iter().map(Point::to_radians).collect();
    let mut by_lat: Vec<usize> = (0..coords.len()).collect();
    // Ties on latitude keep input order
    by_lat.sort_by(|&a, &b| coords[a][0].total_cmp(&coords[b][0]));

    NeighborIndex { coords, by_lat }
}
