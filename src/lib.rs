pub mod config;
pub mod error;
pub mod geodesic;
pub mod grid;
pub mod grow;
pub mod io;
pub mod metric;
pub mod render;
pub mod rng;
pub mod scene;

use std::time::Instant;

use log::{info, warn};
use serde::Serialize;

use config::Params;
use error::{GrowResult, GrowWarning};
use grid::Grid;
use metric::{Metric, Neighborhood};

/// Which engine produced a result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GrowPath {
    /// Multi-label wavefront relaxation.
    Wavefront,
    /// Only one label present, handed to the single-source geodesic solver.
    SingleSeed,
}

/// Converged labels and distance transform for one input grid.
#[derive(Clone, Debug)]
pub struct Regions {
    /// Input labels with reached cells overwritten by their nearest seed's label.
    pub labels: Grid<f64>,
    /// Geodesic distance to the nearest seed; +inf for blocked and unreachable cells.
    pub distance: Grid<f64>,
    pub rounds: usize,
    pub converged: bool,
    pub path: GrowPath,
    pub warnings: Vec<GrowWarning>,
}

pub struct Timing {
    pub name: &'static str,
    pub ms: f64,
}

/// Grow every seed's region across the traversable cells of `input`.
///
/// `input` cells are NaN (blocked), 0 (unlabeled) or a seed label. Fails with
/// `NoSeed` before touching anything when there is nothing to grow from.
pub fn grow(input: &Grid<f64>, params: &Params) -> GrowResult<(Regions, Vec<Timing>)> {
    let mut timings = Vec::new();
    let total_start = Instant::now();

    // 1. Validate and collect the label set
    let t = Instant::now();
    grow::cells::require_seeds(input)?;
    let labels = grow::cells::distinct_labels(input);
    let nbhd = Neighborhood::new(input.shape.rank(), params.metric);
    timings.push(Timing {
        name: "validate",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    info!(
        "growing {} labels over {:?} with {} metric",
        labels.len(),
        input.shape.extents(),
        params.metric
    );

    // 2. Grow: single-source solver when only one label exists, wavefront otherwise
    let t = Instant::now();
    let (state, path, rounds, converged) = match labels.as_slice() {
        [label] if params.single_seed_fast_path => {
            let state = grow::single::grow_single(input, *label, &nbhd);
            (state, GrowPath::SingleSeed, 0, true)
        }
        _ => {
            let mut state = grow::GrowState::from_input(input);
            let prop = grow::wavefront::propagate(&mut state, &nbhd, params);
            (state, GrowPath::Wavefront, prop.rounds, prop.converged)
        }
    };
    timings.push(Timing {
        name: "grow",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    // 3. Report traversable cells no seed could reach. A budget-limited run has
    // unlabeled cells that are merely not reached yet, so it reports nothing.
    let t = Instant::now();
    let mut warnings = Vec::new();
    let unreachable = if converged { state.unreachable_count() } else { 0 };
    if unreachable > 0 {
        let w = GrowWarning::UnreachableCells { count: unreachable };
        warn!("{}", w);
        warnings.push(w);
    }
    timings.push(Timing {
        name: "unreachable_check",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    let total_ms = total_start.elapsed().as_secs_f64() * 1000.0;
    timings.push(Timing {
        name: "TOTAL",
        ms: total_ms,
    });

    let regions = Regions {
        labels: state.labels,
        distance: state.dist,
        rounds,
        converged,
        path,
        warnings,
    };

    Ok((regions, timings))
}

/// [`grow`] with default parameters apart from the metric, timings dropped.
pub fn grow_regions(input: &Grid<f64>, metric: Metric) -> GrowResult<Regions> {
    grow(input, &Params::with_metric(metric)).map(|(regions, _)| regions)
}
