//! Nearest-neighbor visit routes, one closed tour per cluster
//!
//! The tour starts at the first member of the cluster (input order) and
//! repeatedly moves to the closest unvisited member by haversine distance.
//! Equidistant candidates resolve to the lowest index. The start is appended
//! again at the end to close the cycle, so a route over `n` points has
//! `n + 1` entries. O(n²) per cluster.

use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::cluster::{
    ClusteredPoints, EARTH_R, LocationClusterer, Point, PointSet, haversine_angle,
};
use crate::error::{Error, Result};

/// Closed tour over the members of one cluster
///
/// Entries are positions within the cluster's member list (input order).
pub type Route = Vec<usize>;

/// Routes keyed by cluster id
pub type RouteSet = BTreeMap<usize, Route>;

/// Builds the nearest-neighbor closed tour over `points`
///
/// Returns an empty route for an empty slice.
pub fn nearest_neighbor_tour(points: &[Point]) -> Route {
    if points.is_empty() {
        return Vec::new();
    }

    let coords: Vec<[f64; 2]> = points.iter().map(Point::to_radians).collect();
    let mut remaining: Vec<usize> = (1..coords.len()).collect();
    let mut route = Vec::with_capacity(coords.len() + 1);
    route.push(0);

    while !remaining.is_empty() {
        let last = coords[route[route.len() - 1]];
        let mut nearest = 0;
        let mut nearest_dist = f64::INFINITY;
        // `remaining` stays sorted, strict `<` keeps the lowest index on ties
        for (pos, &i) in remaining.iter().enumerate() {
            let d = haversine_angle(last, coords[i]);
            if d < nearest_dist {
                nearest = pos;
                nearest_dist = d;
            }
        }
        route.push(remaining.remove(nearest));
    }

    route.push(route[0]);
    route
}

/// Total length of a closed route in meters
pub fn tour_length(points: &[Point], route: &[usize]) -> f64 {
    route
        .windows(2)
        .map(|w| haversine_angle(points[w[0]].to_radians(), points[w[1]].to_radians()))
        .sum::<f64>()
        * EARTH_R
}

/// Builds one route per non-noise cluster
///
/// Clusters are independent, so tours are built in parallel.
pub fn optimize_routes(clustered: &ClusteredPoints) -> RouteSet {
    clustered
        .clusters()
        .par_iter()
        .map(|cluster| {
            let members: Vec<Point> = cluster
                .points
                .iter()
                .map(|&i| clustered.points()[i])
                .collect();
            let route = nearest_neighbor_tour(&members);
            log::debug!(
                "route: cluster={} stops={} length_m={:.1}",
                cluster.c,
                members.len(),
                tour_length(&members, &route)
            );
            (cluster.c, route)
        })
        .collect()
}

/// Attaches to every clustered point its position in its cluster's route
///
/// Noise points get no order. Fails when a cluster has no route or its
/// route does not cover exactly that cluster's members.
pub fn assign_order(clustered: &ClusteredPoints, routes: &RouteSet) -> Result<RoutedPoints> {
    let mut order = vec![None; clustered.len()];

    for cluster in clustered.clusters() {
        let route = routes.get(&cluster.c).ok_or(Error::InvalidParameter {
            name: "routes",
            message: "missing route for a cluster",
        })?;
        let n = cluster.points.len();
        if route.len() != n + 1 || route.first() != route.last() {
            return Err(Error::InvalidParameter {
                name: "routes",
                message: "route must close over every cluster member",
            });
        }

        for (position, &member) in route[..n].iter().enumerate() {
            let slot = cluster
                .points
                .get(member)
                .and_then(|&i| order.get_mut(i))
                .ok_or(Error::InvalidParameter {
                    name: "routes",
                    message: "route refers to a point outside its cluster",
                })?;
            if slot.is_some() {
                return Err(Error::InvalidParameter {
                    name: "routes",
                    message: "route visits a point twice",
                });
            }
            *slot = Some(position);
        }
    }

    let (points, labels) = clustered.clone().into_parts();
    Ok(RoutedPoints {
        points,
        labels,
        order,
    })
}

/// Points annotated with cluster label and visit order
#[derive(Debug, Clone, PartialEq)]
pub struct RoutedPoints {
    points: PointSet,
    labels: Vec<i32>,
    order: Vec<Option<usize>>,
}

impl RoutedPoints {
    /// Source points in input order
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Cluster id per point, [`NOISE`](crate::cluster::NOISE) for outliers
    pub fn labels(&self) -> &[i32] {
        &self.labels
    }

    /// Position of each point within its cluster's route, `None` for noise
    pub fn order(&self) -> &[Option<usize>] {
        &self.order
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when there are no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterates `(point, label, order)` in input order
    pub fn rows(&self) -> impl Iterator<Item = (&Point, i32, Option<usize>)> {
        self.points
            .iter()
            .zip(&self.labels)
            .zip(&self.order)
            .map(|((p, &l), &o)| (p, l, o))
    }
}

/// Route construction over one clustering result
pub struct RouteOptimizer {
    clustered: ClusteredPoints,
    routes: RouteSet,
}

impl RouteOptimizer {
    /// Wraps a clustering result, no routes computed yet
    pub fn new(clustered: ClusteredPoints) -> Self {
        Self {
            clustered,
            routes: RouteSet::new(),
        }
    }

    /// Fails with [`Error::NotClustered`] if the clusterer has not run yet
    pub fn from_clusterer(clusterer: &LocationClusterer<'_>) -> Result<Self> {
        Ok(Self::new(clusterer.clustered()?))
    }

    /// Computes (or recomputes) the route of every cluster
    pub fn optimize_routes(&mut self) -> &RouteSet {
        self.routes = optimize_routes(&self.clustered);
        log::info!("routes: built {} cluster routes", self.routes.len());
        &self.routes
    }

    /// Routes computed so far, keyed by cluster id
    pub fn routes(&self) -> &RouteSet {
        &self.routes
    }

    /// Points with visit order taken from the computed routes
    ///
    /// Routes are computed first if [`optimize_routes`](Self::optimize_routes)
    /// has not been called.
    pub fn optimized_points(&mut self) -> Result<RoutedPoints> {
        if self.routes.is_empty() && self.clustered.n_clusters() > 0 {
            self.optimize_routes();
        }
        assign_order(&self.clustered, &self.routes)
    }
}
