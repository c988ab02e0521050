use super::distance::haversine_angle;
use super::index::new_neighbor_index;
use super::point::{Cluster, NOISE, Point};
use crate::error::{Error, Result};
use bitvec::prelude::*;

// DBSCAN algorithm pseudocode (from <http://en.wikipedia.org/wiki/DBSCAN>):
//
// DBSCAN(D, eps, MinPts)
//    C = 0
//    for each unvisited point P in dataset D
//       mark P as visited
//       NeighborPts = regionQuery(P, eps)
//       if sizeof(NeighborPts) < MinPts
//          mark P as NOISE
//       else
//          C = next cluster
//          expandCluster(P, NeighborPts, C, eps, MinPts)
//
// expandCluster(P, NeighborPts, C, eps, MinPts)
//    add P to cluster C
//    for each point P' in NeighborPts
//       if P' is not visited
//          mark P' as visited
//          NeighborPts' = regionQuery(P', eps)
//          if sizeof(NeighborPts') >= MinPts
//             NeighborPts = NeighborPts joined with NeighborPts'
//       if P' is not yet member of any cluster
//          add P' to cluster C
//
// regionQuery(P, eps)
//    return all points within P's eps-neighborhood (including P)

/// Clusters incoming points using DBSCAN algorithm with the haversine metric
///
/// # Arguments
///
/// * `points` - List of points to cluster
/// * `eps` - Clustering radius in radians (see [`super::calibration::meters_to_angular`])
/// * `min_points` - Minimum number of points in eps-neighbourhood, the point itself included
///
/// # Returns
///
/// A tuple `(clusters, noise)` where:
/// - `clusters` is a vector of found clusters, ids in discovery order, members in input order
/// - `noise` is a vector of point indices that are outliers (not in any cluster)
///
/// Points are scanned in input order and neighbourhoods are expanded in
/// index order, so the result is fully determined by the input order.
pub fn db_scan(
    points: &[Point],
    eps: f64,
    min_points: usize,
) -> Result<(Vec<Cluster>, Vec<usize>)> {
    if !eps.is_finite() || eps <= 0.0 {
        return Err(Error::InvalidParameter {
            name: "eps",
            message: "must be positive and finite",
        });
    }
    if min_points == 0 {
        return Err(Error::InvalidParameter {
            name: "min_samples",
            message: "must be at least 1",
        });
    }

    let mut visited = bitvec![0; points.len()];
    let mut members = bitvec![0; points.len()];
    let mut neighbor_unique = bitvec![0; points.len()];
    let mut clusters = Vec::new();
    let mut c = 0;
    let index = new_neighbor_index(points);

    for i in 0..points.len() {
        if visited[i] {
            continue;
        }
        visited.set(i, true);

        let mut neighbor_pts = index.in_range(i, eps);
        if neighbor_pts.len() < min_points {
            // Stays noise unless a later cluster reaches it as a border point
            continue;
        }

        let mut cluster = Cluster { c, points: vec![i] };
        members.set(i, true);
        c += 1;

        neighbor_unique.fill(false);
        for &j in &neighbor_pts {
            neighbor_unique.set(j, true);
        }

        // neighbor_pts grows while it is being walked
        let mut j = 0;
        while j < neighbor_pts.len() {
            let k = neighbor_pts[j];
            if !visited[k] {
                visited.set(k, true);
                let more_neighbors = index.in_range(k, eps);
                if more_neighbors.len() >= min_points {
                    for p in more_neighbors {
                        if !neighbor_unique[p] {
                            neighbor_pts.push(p);
                            neighbor_unique.set(p, true);
                        }
                    }
                }
            }

            if !members[k] {
                cluster.points.push(k);
                members.set(k, true);
            }
            j += 1;
        }

        cluster.points.sort_unstable();
        log::debug!(
            "dbscan: cluster={} size={} seed={}",
            cluster.c,
            cluster.points.len(),
            i
        );
        clusters.push(cluster);
    }

    let noise = members.iter_zeros().collect();

    Ok((clusters, noise))
}

/// Simple O(N) way to find points in neighbourhood
///
/// Reference for [`super::index::NeighborIndex::in_range`]; `eps` in radians.
pub fn region_query(points: &[Point], p: &Point, eps: f64) -> Vec<usize> {
    let center = p.to_radians();
    let mut result = Vec::new();

    for (i, point) in points.iter().enumerate() {
        if haversine_angle(center, point.to_radians()) <= eps {
            result.push(i);
        }
    }

    result
}

/// Creates a labels array from clusters
///
/// `labels[i]` = cluster ID for point i, or [`NOISE`] when no cluster claims it
pub fn build_labels(clusters: &[Cluster], num_points: usize) -> Vec<i32> {
    let mut labels = vec![NOISE; num_points];

    for cluster in clusters {
        for &idx in &cluster.points {
            labels[idx] = cluster.c as i32;
        }
    }

    labels
}
