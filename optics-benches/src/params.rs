//! Benchmark parameter types.
//!
//! Each struct renders as a compact Criterion benchmark identifier.

use std::fmt;

use optics_core::ExecutionStrategy;

/// Parameters for an ordering benchmark run.
#[derive(Clone, Debug)]
pub struct OrderingBenchParams {
    /// Number of points in the dataset.
    pub point_count: usize,
    /// Neighbour count required for a core point.
    pub min_pts: usize,
    /// How the distance matrix is filled.
    pub strategy: ExecutionStrategy,
}

impl fmt::Display for OrderingBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n={},min_pts={},{:?}",
            self.point_count, self.min_pts, self.strategy,
        )
    }
}

/// Parameters for a cluster extraction benchmark run.
#[derive(Clone, Debug)]
pub struct ExtractionBenchParams {
    /// Number of points in the dataset.
    pub point_count: usize,
    /// Minimum span length for steep-area extraction.
    pub min_cluster_size: usize,
}

impl fmt::Display for ExtractionBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},min={}", self.point_count, self.min_cluster_size)
    }
}
