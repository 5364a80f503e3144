use serde::{Deserialize, Serialize};

use crate::metric::Metric;

/// All tunable parameters for a growing run. Every field is optional in JSON requests.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    pub metric: Metric,

    /// Round budget for the wavefront loop. `None` runs to convergence.
    pub max_rounds: Option<usize>,

    /// Hand single-label inputs to the one-source geodesic solver.
    pub single_seed_fast_path: bool,

    /// Frontiers smaller than this are expanded on the calling thread.
    pub parallel_min_frontier: usize,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            metric: Metric::QuasiEuclidean,
            max_rounds: None,
            single_seed_fast_path: true,
            parallel_min_frontier: 4096,
        }
    }
}

impl Params {
    pub fn with_metric(metric: Metric) -> Self {
        Self {
            metric,
            ..Self::default()
        }
    }
}
