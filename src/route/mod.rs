//! Per-cluster visit routing
pub mod optimizer;

#[cfg(test)]
mod optimizer_test;

pub use optimizer::{
    Route, RouteOptimizer, RouteSet, RoutedPoints, assign_order, nearest_neighbor_tour,
    optimize_routes, tour_length,
};
