//! Package cluster implements DBScan clustering on (lat, lon) with the haversine metric
pub mod calibration;
pub mod clusterer;
pub mod dbscan;
pub mod distance;
pub mod grid_search;
pub mod index;
pub mod point;
pub mod quality;

#[cfg(test)]
mod clusterer_test;

pub use calibration::{angular_to_meters, calculate_eps, meters_to_angular};
pub use clusterer::LocationClusterer;
pub use dbscan::{build_labels, db_scan, region_query};
pub use distance::{
    DEGREE_RAD, DistanceStats, EARTH_R, distance_haversine, distance_stats, haversine_angle,
};
pub use grid_search::{SearchOutcome, grid_search};
pub use index::{NeighborIndex, new_neighbor_index};
pub use point::{Cluster, ClusteredPoints, NOISE, Point, PointSet};
pub use quality::{
    QualityScores, calinski_harabasz_score, davies_bouldin_score, evaluate, silhouette_score,
};
