//! Cluster quality scores over the non-noise subset of a labeling
//!
//! - Silhouette uses the haversine angle between points (radians).
//! - Calinski-Harabasz and Davies-Bouldin use plain Euclidean distance on
//!   `[lat, lon]` degrees.
//!
//! All three need at least two distinct clusters once noise is removed.

use std::collections::BTreeMap;

use super::distance::haversine_angle;
use super::point::{Cluster, NOISE, Point};
use crate::error::{Error, Result};

/// Scores of one clustering run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityScores {
    /// In `[-1, 1]`, higher is better
    pub silhouette: f64,
    /// Higher is better
    pub calinski_harabasz: f64,
    /// Lower is better, 0 at best
    pub davies_bouldin: f64,
}

/// Non-noise points with labels remapped to `0..k`
struct Filtered {
    points: Vec<Point>,
    labels: Vec<usize>,
    k: usize,
}

fn filter_noise(points: &[Point], labels: &[i32]) -> Result<Filtered> {
    if points.len() != labels.len() {
        return Err(Error::InvalidParameter {
            name: "labels",
            message: "must hold exactly one label per point",
        });
    }

    let mut dense: BTreeMap<i32, usize> = BTreeMap::new();
    for &l in labels.iter().filter(|&&l| l != NOISE) {
        let next = dense.len();
        dense.entry(l).or_insert(next);
    }
    if dense.len() < 2 {
        return Err(Error::InsufficientClusters { found: dense.len() });
    }

    let mut filtered = Filtered {
        points: Vec::new(),
        labels: Vec::new(),
        k: dense.len(),
    };
    for (p, l) in points.iter().zip(labels) {
        if let Some(&d) = dense.get(l) {
            filtered.points.push(*p);
            filtered.labels.push(d);
        }
    }
    Ok(filtered)
}

/// Computes all three scores at once
pub fn evaluate(points: &[Point], labels: &[i32]) -> Result<QualityScores> {
    let f = filter_noise(points, labels)?;
    Ok(QualityScores {
        silhouette: silhouette(&f),
        calinski_harabasz: calinski_harabasz(&f),
        davies_bouldin: davies_bouldin(&f),
    })
}

/// Mean silhouette coefficient with the haversine metric
///
/// A point alone in its cluster scores 0.
pub fn silhouette_score(points: &[Point], labels: &[i32]) -> Result<f64> {
    filter_noise(points, labels).map(|f| silhouette(&f))
}

/// Calinski-Harabasz index on lat/lon degrees, 1.0 with zero dispersion
pub fn calinski_harabasz_score(points: &[Point], labels: &[i32]) -> Result<f64> {
    filter_noise(points, labels).map(|f| calinski_harabasz(&f))
}

/// Davies-Bouldin index on lat/lon degrees, lower is better
pub fn davies_bouldin_score(points: &[Point], labels: &[i32]) -> Result<f64> {
    filter_noise(points, labels).map(|f| davies_bouldin(&f))
}

fn silhouette(f: &Filtered) -> f64 {
    let coords: Vec<[f64; 2]> = f.points.iter().map(Point::to_radians).collect();
    let mut sizes = vec![0usize; f.k];
    for &l in &f.labels {
        sizes[l] += 1;
    }

    let mut total = 0.0;
    let mut sums = vec![0.0; f.k];
    for (i, &a) in coords.iter().enumerate() {
        sums.fill(0.0);
        for (j, &b) in coords.iter().enumerate() {
            if i != j {
                sums[f.labels[j]] += haversine_angle(a, b);
            }
        }

        let own = f.labels[i];
        if sizes[own] < 2 {
            continue;
        }
        let intra = sums[own] / (sizes[own] - 1) as f64;
        let nearest = (0..f.k)
            .filter(|&c| c != own)
            .map(|c| sums[c] / sizes[c] as f64)
            .fold(f64::INFINITY, f64::min);

        let denom = intra.max(nearest);
        if denom > 0.0 {
            total += (nearest - intra) / denom;
        }
    }

    total / coords.len() as f64
}

fn degrees(p: &Point) -> [f64; 2] {
    [p.lat, p.lon]
}

fn sq_euclidean(a: [f64; 2], b: [f64; 2]) -> f64 {
    let d0 = a[0] - b[0];
    let d1 = a[1] - b[1];
    d0 * d0 + d1 * d1
}

/// Per-cluster centroids in degrees, indexed by dense label
fn centroids(f: &Filtered) -> Vec<[f64; 2]> {
    let mut clusters: Vec<Cluster> = (0..f.k)
        .map(|c| Cluster { c, points: Vec::new() })
        .collect();
    for (i, &l) in f.labels.iter().enumerate() {
        clusters[l].points.push(i);
    }
    clusters.iter().map(|c| c.centroid(&f.points)).collect()
}

fn calinski_harabasz(f: &Filtered) -> f64 {
    let n = f.points.len();
    let centers = centroids(f);

    let mut mean = [0.0, 0.0];
    for p in &f.points {
        mean[0] += p.lat;
        mean[1] += p.lon;
    }
    mean = [mean[0] / n as f64, mean[1] / n as f64];

    let mut sizes = vec![0usize; f.k];
    let mut within = 0.0;
    for (p, &l) in f.points.iter().zip(&f.labels) {
        sizes[l] += 1;
        within += sq_euclidean(degrees(p), centers[l]);
    }
    let between: f64 = centers
        .iter()
        .zip(&sizes)
        .map(|(&c, &size)| size as f64 * sq_euclidean(c, mean))
        .sum();

    if within == 0.0 {
        return 1.0;
    }
    between * (n - f.k) as f64 / (within * (f.k - 1) as f64)
}

fn davies_bouldin(f: &Filtered) -> f64 {
    let centers = centroids(f);

    let mut scatter = vec![0.0; f.k];
    let mut sizes = vec![0usize; f.k];
    for (p, &l) in f.points.iter().zip(&f.labels) {
        scatter[l] += sq_euclidean(degrees(p), centers[l]).sqrt();
        sizes[l] += 1;
    }
    for (s, &n) in scatter.iter_mut().zip(&sizes) {
        *s /= n as f64;
    }

    let mut total = 0.0;
    for i in 0..f.k {
        let mut worst: f64 = 0.0;
        for j in (0..f.k).filter(|&j| j != i) {
            let separation = sq_euclidean(centers[i], centers[j]).sqrt();
            // Coincident centroids count as infinitely far apart
            if separation > 0.0 {
                worst = worst.max((scatter[i] + scatter[j]) / separation);
            }
        }
        total += worst;
    }

    total / f.k as f64
}
