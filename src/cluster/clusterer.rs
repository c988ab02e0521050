use rand::Rng;

use super::dbscan::{build_labels, db_scan};
use super::distance::{DistanceStats, distance_stats};
use super::point::{ClusteredPoints, Point};
use super::quality::{QualityScores, evaluate};
use crate::error::{Error, Result};

/// Runs DBSCAN over a borrowed point set and keeps the labels of the last run
///
/// Starts unclustered; [`cluster`](Self::cluster) moves it to clustered.
/// Re-clustering overwrites the labels. A failed run leaves the previous
/// labels untouched.
pub struct LocationClusterer<'a> {
    points: &'a [Point],
    labels: Option<Vec<i32>>,
}

impl<'a> LocationClusterer<'a> {
    /// Borrows the points, unclustered
    pub fn new(points: &'a [Point]) -> Self {
        Self {
            points,
            labels: None,
        }
    }

    /// Points being clustered
    pub fn points(&self) -> &'a [Point] {
        self.points
    }

    /// Labels of the last run, `None` before clustering
    pub fn labels(&self) -> Option<&[i32]> {
        self.labels.as_deref()
    }

    /// True once a clustering run succeeded
    pub fn is_clustered(&self) -> bool {
        self.labels.is_some()
    }

    /// Clusters the points, `eps` in radians
    pub fn cluster(&mut self, eps: f64, min_samples: usize) -> Result<&[i32]> {
        let (clusters, noise) = db_scan(self.points, eps, min_samples)?;
        log::info!(
            "clustered points={} eps={:.6} min_samples={} clusters={} noise={}",
            self.points.len(),
            eps,
            min_samples,
            clusters.len(),
            noise.len()
        );

        let labels = self.labels.insert(build_labels(&clusters, self.points.len()));
        Ok(labels.as_slice())
    }

    /// Quality scores over the non-noise points of the last run
    pub fn evaluate(&self) -> Result<QualityScores> {
        let labels = self.labels.as_deref().ok_or(Error::NotClustered)?;
        evaluate(self.points, labels)
    }

    /// Copy of the points annotated with the labels of the last run
    pub fn clustered(&self) -> Result<ClusteredPoints> {
        let labels = self.labels.clone().ok_or(Error::NotClustered)?;
        ClusteredPoints::new(self.points.to_vec(), labels)
    }

    /// Pairwise distance statistics over a random sample, see [`distance_stats`]
    pub fn distance_stats<R: Rng + ?Sized>(
        &self,
        sample_size: usize,
        rng: &mut R,
    ) -> Result<DistanceStats> {
        distance_stats(self.points, sample_size, rng)
    }
}
