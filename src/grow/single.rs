use log::debug;

use crate::geodesic::geodesic_distance;
use crate::grid::Grid;
use crate::metric::Neighborhood;

use super::cells::{Cell, GrowState};

/// Grow a single-label input with the one-source geodesic solver.
///
/// Traversable = everything but blocked; sources = cells holding `label`.
/// Every cell the solver reaches takes `label` and the solver's field becomes
/// the distance transform. Produces the same state as a wavefront run.
pub fn grow_single(input: &Grid<f64>, label: f64, nbhd: &Neighborhood) -> GrowState {
    let mask = input.map(|v| Cell::classify(v) != Cell::Blocked);
    let sources = input.map(|v| Cell::classify(v) == Cell::Seed(label));
    let dist = geodesic_distance(&mask, &sources, nbhd);

    let mut labels = input.clone();
    let mut reached = 0usize;
    for (l, d) in labels.data.iter_mut().zip(&dist.data) {
        if d.is_finite() {
            *l = label;
            reached += 1;
        }
    }
    debug!("single-seed path reached {} of {} cells", reached, input.len());

    GrowState { labels, dist }
}
