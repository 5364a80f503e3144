use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GrowError;

/// Chamfer metric used to weight steps between neighbouring cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Metric {
    /// Every step costs 1.
    Chessboard,
    /// Step cost is the L1 norm of the offset.
    Cityblock,
    /// Step cost is the Euclidean norm of the offset: 1, sqrt(2) or sqrt(3).
    #[default]
    QuasiEuclidean,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Chessboard, Metric::Cityblock, Metric::QuasiEuclidean];

    pub fn name(self) -> &'static str {
        match self {
            Metric::Chessboard => "chessboard",
            Metric::Cityblock => "cityblock",
            Metric::QuasiEuclidean => "quasi-euclidean",
        }
    }

    /// Weight of a single step along `offset`.
    pub fn weight(self, offset: [i32; 3]) -> f64 {
        let moved = offset.iter().filter(|&&d| d != 0).count();
        match self {
            Metric::Chessboard => 1.0,
            Metric::Cityblock => moved as f64,
            Metric::QuasiEuclidean => (moved as f64).sqrt(),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = GrowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| GrowError::UnknownMetric { name: s.to_string() })
    }
}

/// Full Moore neighbourhood with per-offset weights.
///
/// Offsets are enumerated lexicographically over `{-1,0,1}^rank` with the zero
/// vector skipped; that order is the canonical offset index the propagator
/// iterates in. The table is identical for every cell; edge cells are handled
/// by [`Shape::step`](crate::grid::Shape::step) rejecting out-of-range steps.
#[derive(Clone, Debug, PartialEq)]
pub struct Neighborhood {
    pub metric: Metric,
    offsets: Vec<[i32; 3]>,
    weights: Vec<f64>,
}

impl Neighborhood {
    pub fn new(rank: usize, metric: Metric) -> Self {
        let span = |axis: usize| if axis < rank { -1..=1 } else { 0..=0 };
        let mut offsets = Vec::with_capacity(26);
        for dr in span(0) {
            for dc in span(1) {
                for dz in span(2) {
                    if dr == 0 && dc == 0 && dz == 0 {
                        continue;
                    }
                    offsets.push([dr, dc, dz]);
                }
            }
        }
        let weights = offsets.iter().map(|&o| metric.weight(o)).collect();
        Self {
            metric,
            offsets,
            weights,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// (offset, weight) pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = ([i32; 3], f64)> + '_ {
        self.offsets.iter().copied().zip(self.weights.iter().copied())
    }
}
