use log::{debug, trace, warn};
use rayon::prelude::*;

use crate::config::Params;
use crate::metric::Neighborhood;

use super::cells::{GrowState, seed_indices};
use super::resolve::{Candidate, resolve};

/// Frontier cells handed to one rayon task.
const CHUNK: usize = 1024;

/// Outcome of a wavefront run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Propagation {
    /// Rounds that wrote at least one cell.
    pub rounds: usize,
    /// Total cell writes, counting re-lowered cells each time.
    pub writes: usize,
    /// False only when `Params::max_rounds` cut the loop short.
    pub converged: bool,
}

/// Multi-source label-correcting relaxation from every seed at once.
///
/// Each round expands the cells written by the previous round. A neighbour is
/// rewritten whenever the new path is strictly shorter than what it currently
/// holds, so cells can be corrected again in later rounds; the loop ends once a
/// round proposes nothing. Candidates are always read from the pre-round
/// snapshot and merged in canonical order, so the outcome does not depend on
/// how generation was split across threads.
pub fn propagate(state: &mut GrowState, nbhd: &Neighborhood, params: &Params) -> Propagation {
    let mut frontier = seed_indices(&state.labels);
    let mut rounds = 0usize;
    let mut writes = 0usize;

    let converged = loop {
        let candidates = round_candidates(state, nbhd, &frontier, params.parallel_min_frontier);
        if candidates.is_empty() {
            break true;
        }
        if params.max_rounds.is_some_and(|max| rounds >= max) {
            warn!(
                "round budget of {} exhausted with {} cells still on the frontier",
                rounds,
                frontier.len()
            );
            break false;
        }

        let proposed = candidates.len();
        let winners = resolve(candidates);
        let mut next = Vec::with_capacity(winners.len());
        for w in winners {
            state.labels.data[w.dest] = w.label;
            state.dist.data[w.dest] = w.dist;
            next.push(w.dest);
        }
        next.sort_unstable();

        rounds += 1;
        writes += next.len();
        trace!(
            "round {}: {} candidates, {} cells written",
            rounds,
            proposed,
            next.len()
        );
        frontier = next;
    };

    debug!(
        "wavefront finished after {} rounds, {} writes, converged={}",
        rounds, writes, converged
    );

    Propagation {
        rounds,
        writes,
        converged,
    }
}

/// Surviving candidates for one round, in canonical order.
fn round_candidates(
    state: &GrowState,
    nbhd: &Neighborhood,
    frontier: &[usize],
    parallel_min: usize,
) -> Vec<Candidate> {
    if frontier.len() < parallel_min {
        let mut out = Vec::new();
        for &src in frontier {
            expand(state, nbhd, src, &mut out);
        }
        return out;
    }

    // Chunks are collected in order, so flattening restores the sequential sequence.
    let chunks: Vec<Vec<Candidate>> = frontier
        .par_chunks(CHUNK)
        .map(|chunk| {
            let mut out = Vec::new();
            for &src in chunk {
                expand(state, nbhd, src, &mut out);
            }
            out
        })
        .collect();
    chunks.into_iter().flatten().collect()
}

#[inline]
fn expand(state: &GrowState, nbhd: &Neighborhood, src: usize, out: &mut Vec<Candidate>) {
    let shape = state.dist.shape;
    let base = state.dist.data[src];
    let label = state.labels.data[src];
    for (offset, weight) in nbhd.iter() {
        let Some(dest) = shape.step(src, offset) else {
            continue;
        };
        if state.is_blocked(dest) {
            continue;
        }
        let dist = base + weight;
        if dist < state.dist.data[dest] {
            out.push(Candidate { dest, dist, label });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::metric::Metric;
    use crate::rng::Rng;
    use approx::assert_relative_eq;

    fn run(extents: &[usize], data: Vec<f64>, metric: Metric) -> (GrowState, Propagation) {
        let input = Grid::from_shape_vec(extents, data).unwrap();
        let mut state = GrowState::from_input(&input);
        let nbhd = Neighborhood::new(input.shape.rank(), metric);
        let prop = propagate(&mut state, &nbhd, &Params::with_metric(metric));
        (state, prop)
    }

    #[test]
    fn two_seeds_on_a_line() {
        let (s, p) = run(&[1, 6], vec![1.0, 0.0, 0.0, 0.0, 0.0, 2.0], Metric::Cityblock);
        assert_eq!(s.labels.data, vec![1.0, 1.0, 1.0, 2.0, 2.0, 2.0]);
        assert_eq!(s.dist.data, vec![0.0, 1.0, 2.0, 2.0, 1.0, 0.0]);
        assert!(p.converged);
        assert_eq!(p.rounds, 2);
    }

    #[test]
    fn exact_tie_goes_to_lower_source_index() {
        // middle cell is 2 away from both seeds
        let (s, _) = run(&[1, 5], vec![7.0, 0.0, 0.0, 0.0, 3.0], Metric::Chessboard);
        assert_eq!(s.labels.data[2], 7.0);
        assert_eq!(s.dist.data[2], 2.0);
    }

    #[test]
    fn later_round_corrects_earlier_write() {
        // (3,3) is 3 diagonal steps from the left seed (4.24, round 3) but only
        // 4 straight steps from the right seed (4.0, round 4).
        let mut data = vec![0.0; 4 * 8];
        data[0] = 1.0;
        data[3 * 8 + 7] = 2.0;
        let (s, p) = run(&[4, 8], data, Metric::QuasiEuclidean);
        assert!(p.converged);
        assert_eq!(s.labels.get(3, 3, 0), 2.0);
        assert_eq!(s.dist.get(3, 3, 0), 4.0);
        assert!(p.writes > 30);
    }

    #[test]
    fn routes_around_blocked_wall() {
        let nan = f64::NAN;
        #[rustfmt::skip]
        let data = vec![
            1.0, 0.0, 0.0, 0.0,
            nan, nan, nan, 0.0,
            0.0, 0.0, 0.0, 0.0,
        ];
        let (s, p) = run(&[3, 4], data, Metric::QuasiEuclidean);
        assert!(p.converged);
        let expected = 2.0 + 2f64.sqrt() + 2f64.sqrt() + 2.0;
        assert_relative_eq!(s.dist.get(2, 0, 0), expected, epsilon = 1e-12);
        assert!(s.labels.data.iter().all(|&v| v.is_nan() || v == 1.0));
        assert!(s.dist.data[4..7].iter().all(|d| d.is_infinite()));
    }

    #[test]
    fn budget_stops_early() {
        let input = Grid::from_shape_vec(&[1, 8], {
            let mut v = vec![0.0; 8];
            v[0] = 5.0;
            v
        })
        .unwrap();
        let mut state = GrowState::from_input(&input);
        let nbhd = Neighborhood::new(2, Metric::Cityblock);
        let params = Params {
            max_rounds: Some(3),
            ..Params::default()
        };
        let p = propagate(&mut state, &nbhd, &params);
        assert!(!p.converged);
        assert_eq!(p.rounds, 3);
        assert_eq!(state.dist.data[3], 3.0);
        assert_eq!(state.dist.data[4], f64::INFINITY);
        assert_eq!(state.labels.data[4], 0.0);
    }

    fn bits(v: &[f64]) -> Vec<u64> {
        v.iter().map(|x| x.to_bits()).collect()
    }

    #[test]
    fn parallel_and_sequential_agree() {
        const N: usize = 300;
        let mut rng = Rng::new(7);
        let mut data = vec![0.0; N * N];
        for v in data.iter_mut() {
            if rng.chance(0.15) {
                *v = f64::NAN;
            }
        }
        for c in 20..280 {
            data[150 * N + c] = f64::NAN;
        }
        for label in 1..=40 {
            data[rng.range_usize(N * N)] = f64::from(label);
        }
        let input = Grid::from_shape_vec(&[N, N], data).unwrap();
        let nbhd = Neighborhood::new(2, Metric::QuasiEuclidean);

        let mut seq = GrowState::from_input(&input);
        let seq_params = Params {
            parallel_min_frontier: usize::MAX,
            ..Params::default()
        };
        let seq_prop = propagate(&mut seq, &nbhd, &seq_params);

        let mut par = GrowState::from_input(&input);
        let par_params = Params {
            parallel_min_frontier: 0,
            ..Params::default()
        };
        let par_prop = propagate(&mut par, &nbhd, &par_params);

        // rings around 40 seeds outgrow a single chunk within a few rounds
        assert!(seq_prop.writes > 40 * CHUNK);
        assert_eq!(seq_prop, par_prop);
        assert_eq!(bits(&seq.labels.data), bits(&par.labels.data));
        assert_eq!(bits(&seq.dist.data), bits(&par.dist.data));
    }

    #[test]
    fn chunked_generation_keeps_canonical_order() {
        // checkerboard of seeds: a frontier several chunks long in round one
        const N: usize = 100;
        let data = (0..N * N)
            .map(|i| if (i / N + i % N) % 2 == 0 { (i % 5 + 1) as f64 } else { 0.0 })
            .collect();
        let input = Grid::from_shape_vec(&[N, N], data).unwrap();
        let state = GrowState::from_input(&input);
        let nbhd = Neighborhood::new(2, Metric::Chessboard);
        let frontier = seed_indices(&state.labels);
        assert!(frontier.len() > 4 * CHUNK);

        let seq = round_candidates(&state, &nbhd, &frontier, usize::MAX);
        let par = round_candidates(&state, &nbhd, &frontier, 0);
        assert!(!seq.is_empty());
        assert_eq!(seq, par);
        assert_eq!(resolve(seq), resolve(par));
    }
}
