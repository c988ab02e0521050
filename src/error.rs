use thiserror::Error;

/// Errors returned by the clustering and routing engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Parameter rejected before any computation.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// Evaluation or routing requested before clustering ran.
    #[error("points are not clustered yet")]
    NotClustered,

    /// Quality metrics need at least two non-noise clusters.
    #[error("insufficient clusters: need at least 2 non-noise clusters, found {found}")]
    InsufficientClusters {
        /// Number of distinct non-noise labels found.
        found: usize,
    },

    /// Requested sample is larger than the dataset.
    #[error("insufficient data: requested {requested} points, but dataset has {available}")]
    InsufficientData {
        /// Requested sample size.
        requested: usize,
        /// Number of points available.
        available: usize,
    },
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
