//! Geo point clustering and visit routing.
//!
//! Points are grouped with DBSCAN under the haversine metric, clusters are
//! scored with silhouette / Calinski-Harabasz / Davies-Bouldin, and every
//! cluster gets a closed nearest-neighbor tour that fixes the visiting order
//! of its points.

pub mod cluster;
pub mod error;
pub mod route;

pub use cluster::{
    Cluster, ClusteredPoints, DistanceStats, LocationClusterer, NOISE, Point, PointSet,
    QualityScores, SearchOutcome,
};
pub use error::{Error, Result};
pub use route::{Route, RouteOptimizer, RouteSet, RoutedPoints};
