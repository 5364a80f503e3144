use crate::error::{GrowError, GrowResult};
use crate::grid::Grid;

/// Label carried by traversable cells nobody has reached yet.
pub const UNLABELED: f64 = 0.0;

/// Status of one input cell. NaN encodes blocked, 0 unlabeled, anything else a seed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Cell {
    Blocked,
    Unlabeled,
    Seed(f64),
}

impl Cell {
    #[inline]
    pub fn classify(v: f64) -> Self {
        if v.is_nan() {
            Cell::Blocked
        } else if v == UNLABELED {
            Cell::Unlabeled
        } else {
            Cell::Seed(v)
        }
    }
}

/// Labels and distance transform owned by a single growing run.
#[derive(Clone, Debug)]
pub struct GrowState {
    pub labels: Grid<f64>,
    pub dist: Grid<f64>,
}

impl GrowState {
    /// Copy the input labels and set distances to 0 at seeds, +inf elsewhere.
    pub fn from_input(input: &Grid<f64>) -> Self {
        let dist = input.map(|v| match Cell::classify(v) {
            Cell::Seed(_) => 0.0,
            _ => f64::INFINITY,
        });
        Self {
            labels: input.clone(),
            dist,
        }
    }

    #[inline]
    pub fn is_blocked(&self, i: usize) -> bool {
        self.labels.data[i].is_nan()
    }

    /// Traversable cells still carrying no label.
    pub fn unreachable_count(&self) -> usize {
        self.labels.data.iter().filter(|&&v| v == UNLABELED).count()
    }
}

/// Linear indices of every seed, ascending.
pub fn seed_indices(input: &Grid<f64>) -> Vec<usize> {
    input
        .data
        .iter()
        .enumerate()
        .filter(|&(_, &v)| matches!(Cell::classify(v), Cell::Seed(_)))
        .map(|(i, _)| i)
        .collect()
}

/// Distinct seed labels in first-seen order.
pub fn distinct_labels(input: &Grid<f64>) -> Vec<f64> {
    let mut out: Vec<f64> = Vec::new();
    for &v in &input.data {
        if let Cell::Seed(label) = Cell::classify(v) {
            // bit comparison keeps -0.0 and 0.0 apart, but 0.0 is never a seed
            if !out.iter().any(|l| l.to_bits() == label.to_bits()) {
                out.push(label);
            }
        }
    }
    out
}

/// Fail fast when there is nothing to grow from.
pub fn require_seeds(input: &Grid<f64>) -> GrowResult<()> {
    let any_seed = input
        .data
        .iter()
        .any(|&v| matches!(Cell::classify(v), Cell::Seed(_)));
    if any_seed { Ok(()) } else { Err(GrowError::NoSeed) }
}
