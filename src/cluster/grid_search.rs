//! Offline tuning of DBSCAN parameters
//!
//! Every `(eps, min_samples)` pair of the candidate grid is clustered and
//! scored by silhouette. Pairs that leave fewer than two clusters are
//! skipped. Cost is `|eps| * |min_samples|` clustering runs.

use super::dbscan::{build_labels, db_scan};
use super::point::Point;
use super::quality::silhouette_score;
use crate::error::{Error, Result};

/// Best combination found by [`grid_search`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOutcome {
    /// Silhouette score of the winning labels
    pub score: f64,
    /// Radians
    pub eps: f64,
    /// Neighborhood size, the point itself included
    pub min_samples: usize,
}

/// Searches the Cartesian product of the candidates for the highest silhouette
///
/// Returns `Ok(None)` when no combination produced at least two clusters.
/// Ties keep the combination seen first (eps-major order).
pub fn grid_search(
    points: &[Point],
    eps_values: &[f64],
    min_samples_values: &[usize],
) -> Result<Option<SearchOutcome>> {
    let mut best: Option<SearchOutcome> = None;

    for &eps in eps_values {
        for &min_samples in min_samples_values {
            let (clusters, _) = db_scan(points, eps, min_samples)?;
            let labels = build_labels(&clusters, points.len());

            let score = match silhouette_score(points, &labels) {
                Ok(score) => score,
                Err(Error::InsufficientClusters { found }) => {
                    log::debug!(
                        "grid_search: skip eps={eps:.6} min_samples={min_samples} clusters={found}"
                    );
                    continue;
                }
                Err(e) => return Err(e),
            };
            log::debug!("grid_search: eps={eps:.6} min_samples={min_samples} score={score:.4}");

            if best.is_none_or(|b| score > b.score) {
                best = Some(SearchOutcome {
                    score,
                    eps,
                    min_samples,
                });
            }
        }
    }

    match &best {
        Some(b) => log::info!(
            "grid_search: best eps={:.6} min_samples={} score={:.4}",
            b.eps,
            b.min_samples,
            b.score
        ),
        None => log::warn!("grid_search: no combination produced two or more clusters"),
    }

    Ok(best)
}
