//! Error and warning types for region growing.

use thiserror::Error;

/// Result type for region growing operations.
pub type GrowResult<T> = Result<T, GrowError>;

/// Errors raised before the propagator runs, or by the I/O layer around it.
///
/// The relaxation loop itself never fails.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GrowError {
    /// Input rank is not 2 or 3.
    #[error("invalid dimensionality: rank {rank} (expected 2 or 3)")]
    InvalidDimensionality {
        /// Rank of the rejected input.
        rank: usize,
    },

    /// Input holds no seed cell (no value that is neither 0 nor blocked).
    #[error("input contains no seed cells")]
    NoSeed,

    /// Element count does not match the product of the shape extents.
    #[error("shape expects {expected} cells, data holds {actual}")]
    ShapeMismatch {
        /// Cell count implied by the shape.
        expected: usize,
        /// Cell count actually supplied.
        actual: usize,
    },

    /// Extents whose cell count does not fit the index space.
    #[error("shape {extents:?} is too large")]
    ShapeTooLarge {
        /// The rejected extents.
        extents: Vec<usize>,
    },

    /// Metric name not recognised.
    #[error("unknown metric '{name}' (expected chessboard, cityblock or quasi-euclidean)")]
    UnknownMetric {
        /// The rejected name.
        name: String,
    },

    /// Requested depth slice is outside the grid.
    #[error("slice {z} out of range (grid depth {depth})")]
    SliceOutOfRange {
        /// Requested slice.
        z: usize,
        /// Grid depth.
        depth: usize,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),
}

/// Non-fatal diagnostics attached to a finished run.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GrowWarning {
    /// Traversable cells with no path to any seed. They keep label 0 and
    /// distance +inf.
    UnreachableCells {
        /// Number of such cells.
        count: usize,
    },
}

impl std::fmt::Display for GrowWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnreachableCells { count } => {
                write!(f, "{count} traversable cells are unreachable from every seed")
            }
        }
    }
}
