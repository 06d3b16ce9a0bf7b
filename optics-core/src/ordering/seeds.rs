//! Priority queue of points awaiting expansion.

use std::{
    cmp::{Ordering, Reverse},
    collections::BinaryHeap,
};

#[derive(Clone, Copy, Debug)]
struct Seed {
    reachability: f64,
    point: usize,
}

impl PartialEq for Seed {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Seed {}

impl PartialOrd for Seed {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Seed {
    fn cmp(&self, other: &Self) -> Ordering {
        self.reachability
            .total_cmp(&other.reachability)
            .then_with(|| self.point.cmp(&other.point))
    }
}

/// Min-heap keyed by `(reachability, point)`.
///
/// Decreasing a key pushes a fresh entry and leaves the old one behind. The
/// old entry always carries a larger key, so it surfaces only after the point
/// has been processed and [`SeedQueue::pop`] discards it.
#[derive(Debug, Default)]
pub(crate) struct SeedQueue {
    heap: BinaryHeap<Reverse<Seed>>,
    stale: usize,
}

impl SeedQueue {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queues `point` at `reachability`, superseding any earlier entry.
    pub(crate) fn push(&mut self, point: usize, reachability: f64) {
        self.heap.push(Reverse(Seed {
            reachability,
            point,
        }));
    }

    /// Removes the unprocessed point with the smallest reachability, lowest
    /// index first on ties.
    pub(crate) fn pop(&mut self, is_processed: impl Fn(usize) -> bool) -> Option<usize> {
        while let Some(Reverse(seed)) = self.heap.pop() {
            if is_processed(seed.point) {
                self.stale += 1;
                continue;
            }
            return Some(seed.point);
        }
        None
    }

    /// Number of superseded entries discarded so far.
    pub(crate) const fn stale(&self) -> usize {
        self.stale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pops_smallest_reachability_first() {
        let mut seeds = SeedQueue::new();
        seeds.push(3, 0.9);
        seeds.push(1, 0.2);
        seeds.push(2, 0.5);

        let popped: Vec<_> = std::iter::from_fn(|| seeds.pop(|_| false)).collect();
        assert_eq!(popped, vec![1, 2, 3]);
    }

    #[rstest]
    fn equal_keys_pop_lowest_index_first() {
        let mut seeds = SeedQueue::new();
        seeds.push(7, 1.0);
        seeds.push(2, 1.0);
        seeds.push(5, 1.0);

        let popped: Vec<_> = std::iter::from_fn(|| seeds.pop(|_| false)).collect();
        assert_eq!(popped, vec![2, 5, 7]);
    }

    #[rstest]
    fn superseded_entries_are_skipped_once_processed() {
        let mut seeds = SeedQueue::new();
        let mut processed = [false; 3];
        seeds.push(0, 4.0);
        seeds.push(1, 3.0);
        seeds.push(0, 1.0);

        let first = seeds.pop(|p| processed[p]).expect("seed available");
        assert_eq!(first, 0);
        processed[first] = true;

        let second = seeds.pop(|p| processed[p]).expect("seed available");
        assert_eq!(second, 1);
        processed[second] = true;

        assert_eq!(seeds.pop(|p| processed[p]), None);
        assert_eq!(seeds.stale(), 1);
    }
}
