use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::grid::Grid;
use crate::metric::Neighborhood;

/// Priority queue entry. Reversed ordering turns `BinaryHeap` into a min-heap.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Entry {
    dist: f64,
    idx: usize,
}

impl Eq for Entry {}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .dist
            .total_cmp(&self.dist)
            .then_with(|| other.idx.cmp(&self.idx))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Single-source geodesic distance over a traversability mask.
///
/// Every `true` cell of `sources` that is also traversable starts at 0; all
/// sources are treated as one source set. Cells outside `mask`, or with no
/// path through it, stay at +inf. Step weights come from `nbhd`, so the result
/// matches a full wavefront run with a single label.
pub fn geodesic_distance(mask: &Grid<bool>, sources: &Grid<bool>, nbhd: &Neighborhood) -> Grid<f64> {
    debug_assert_eq!(mask.shape, sources.shape);
    let shape = mask.shape;
    let mut dist = Grid::filled(shape, f64::INFINITY);
    let mut heap = BinaryHeap::new();

    for (i, (&open, &src)) in mask.data.iter().zip(&sources.data).enumerate() {
        if open && src {
            dist.data[i] = 0.0;
            heap.push(Entry { dist: 0.0, idx: i });
        }
    }

    while let Some(Entry { dist: d, idx }) = heap.pop() {
        // stale entry, a shorter path already settled this cell
        if d > dist.data[idx] {
            continue;
        }
        for (offset, weight) in nbhd.iter() {
            let Some(n) = shape.step(idx, offset) else {
                continue;
            };
            if !mask.data[n] {
                continue;
            }
            let nd = d + weight;
            if nd < dist.data[n] {
                dist.data[n] = nd;
                heap.push(Entry { dist: nd, idx: n });
            }
        }
    }

    dist
}
