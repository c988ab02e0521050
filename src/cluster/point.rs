//! Geo points and the labeled views produced by clustering

use std::collections::{BTreeMap, BTreeSet};

use super::distance::DEGREE_RAD;
use crate::error::{Error, Result};

/// Label assigned to points that belong to no cluster
pub const NOISE: i32 = -1;

/// Point represents a geographic coordinate in decimal degrees (WGS84)
///
/// `id` is the stable row index of the point in its source collection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Row index in the source collection
    pub id: usize,
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
}

/// PointSet is an ordered collection of Points
///
/// Insertion order is the iteration order used to align every output.
pub type PointSet = Vec<Point>;

impl Point {
    /// Creates a point from degrees, without range checks
    pub fn new(id: usize, lat: f64, lon: f64) -> Self {
        Self { id, lat, lon }
    }

    /// Returns `[lat, lon]` in radians
    pub fn to_radians(&self) -> [f64; 2] {
        [self.lat * DEGREE_RAD, self.lon * DEGREE_RAD]
    }

    /// Checks that both coordinates are finite and inside the valid range
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

/// Cluster represents a result of DBScan clustering work
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    /// Cluster ID
    pub c: usize,
    /// Indices of points belonging to this cluster, in input order
    pub points: Vec<usize>,
}

impl Cluster {
    /// Calculates the cluster centroid as `[lat, lon]` mean in degrees
    ///
    /// # Panics
    ///
    /// Panics if the cluster is empty
    pub fn centroid(&self, points: &[Point]) -> [f64; 2] {
        if self.points.is_empty() {
            panic!("empty cluster");
        }

        let mut center = [0.0, 0.0];
        for &i in &self.points {
            center[0] += points[i].lat;
            center[1] += points[i].lon;
        }

        let n = self.points.len() as f64;
        [center[0] / n, center[1] / n]
    }
}

/// A PointSet annotated with one cluster label per point
///
/// Produced once per clustering run; the source points are never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusteredPoints {
    points: PointSet,
    labels: Vec<i32>,
}

impl ClusteredPoints {
    /// Pairs points with their labels
    ///
    /// Every point needs exactly one label, either [`NOISE`] or a
    /// non-negative cluster id.
    pub fn new(points: PointSet, labels: Vec<i32>) -> Result<Self> {
        if points.len() != labels.len() {
            return Err(Error::InvalidParameter {
                name: "labels",
                message: "must hold exactly one label per point",
            });
        }
        if labels.iter().any(|&l| l < NOISE) {
            return Err(Error::InvalidParameter {
                name: "labels",
                message: "must be a cluster id or the noise marker",
            });
        }
        Ok(Self { points, labels })
    }

    /// Source points in input order
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Cluster id per point, [`NOISE`] for outliers
    pub fn labels(&self) -> &[i32] {
        &self.labels
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when there are no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of distinct non-noise labels
    pub fn n_clusters(&self) -> usize {
        self.labels
            .iter()
            .filter(|&&l| l != NOISE)
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Indices of noise points
    pub fn noise(&self) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|&(_, &l)| l == NOISE)
            .map(|(i, _)| i)
            .collect()
    }

    /// Groups point indices by cluster id, ordered by id, members in input order
    pub fn clusters(&self) -> Vec<Cluster> {
        let mut groups: BTreeMap<i32, Vec<usize>> = BTreeMap::new();
        for (i, &label) in self.labels.iter().enumerate() {
            if label != NOISE {
                groups.entry(label).or_default().push(i);
            }
        }
        groups
            .into_iter()
            .map(|(c, points)| Cluster {
                c: c as usize,
                points,
            })
            .collect()
    }

    /// Splits into points and labels
    pub fn into_parts(self) -> (PointSet, Vec<i32>) {
        (self.points, self.labels)
    }
}
