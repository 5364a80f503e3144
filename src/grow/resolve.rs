use indexmap::IndexMap;
use indexmap::map::Entry;

/// One proposed write: reach `dest` at `dist` carrying `label`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    pub dest: usize,
    pub dist: f64,
    pub label: f64,
}

/// Pick one winner per destination.
///
/// The lowest distance wins. A later candidate only displaces the held one when
/// it is strictly closer, so on exact ties the first one seen keeps the cell.
/// Candidates must arrive in canonical order (ascending source index, then
/// ascending offset index) for the result to be reproducible. Winners come back
/// in first-seen destination order.
pub fn resolve(candidates: impl IntoIterator<Item = Candidate>) -> Vec<Candidate> {
    let candidates = candidates.into_iter();
    let mut best: IndexMap<usize, Candidate> = IndexMap::with_capacity(candidates.size_hint().0);
    for cand in candidates {
        match best.entry(cand.dest) {
            Entry::Vacant(slot) => {
                slot.insert(cand);
            }
            Entry::Occupied(mut slot) => {
                if cand.dist < slot.get().dist {
                    slot.insert(cand);
                }
            }
        }
    }
    best.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(dest: usize, dist: f64, label: f64) -> Candidate {
        Candidate { dest, dist, label }
    }

    #[test]
    fn lowest_distance_wins() {
        let out = resolve([c(4, 3.0, 1.0), c(4, 2.0, 2.0), c(4, 2.5, 3.0)]);
        assert_eq!(out, vec![c(4, 2.0, 2.0)]);
    }

    #[test]
    fn first_seen_wins_exact_ties() {
        let out = resolve([c(7, 1.5, 9.0), c(7, 1.5, 4.0)]);
        assert_eq!(out, vec![c(7, 1.5, 9.0)]);

        let out = resolve([c(7, 1.5, 4.0), c(7, 1.5, 9.0)]);
        assert_eq!(out, vec![c(7, 1.5, 4.0)]);
    }

    #[test]
    fn one_winner_per_destination_in_first_seen_order() {
        let out = resolve([
            c(5, 1.0, 1.0),
            c(2, 1.0, 1.0),
            c(5, 0.5, 2.0),
            c(9, 3.0, 2.0),
            c(2, 4.0, 2.0),
        ]);
        let dests: Vec<usize> = out.iter().map(|w| w.dest).collect();
        assert_eq!(dests, vec![5, 2, 9]);
        assert_eq!(out[0].label, 2.0);
        assert_eq!(out[1].label, 1.0);
    }

    #[test]
    fn empty_round() {
        assert!(resolve(Vec::new()).is_empty());
    }
}
