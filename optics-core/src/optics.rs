//! OPTICS orchestration.
//!
//! Provides the [`Optics`] runtime entry point, which validates the input,
//! precomputes distances and runs the ordering engine.

use std::{num::NonZeroUsize, sync::Arc, time::Instant};

use tracing::{info, instrument, warn};

use crate::{
    Result,
    builder::{ExecutionStrategy, NeighbourCounting},
    datasource::DataSource,
    error::OpticsError,
    ordering::{ClusterOrdering, order_points},
    precompute::{DistanceMatrix, core_distances},
};

/// Configured OPTICS run. Build one with [`crate::OpticsBuilder`].
///
/// # Examples
/// ```
/// use optics_core::{OpticsBuilder, PointSet};
///
/// let points = PointSet::new(
///     "squares",
///     vec![vec![0.0, 0.0], vec![0.0, 1.0], vec![5.0, 5.0], vec![5.0, 6.0]],
/// );
/// let optics = OpticsBuilder::new().with_eps(2.0).with_min_pts(1).build()?;
/// let ordering = optics.run(&points)?;
/// assert_eq!(ordering.len(), 4);
///
/// let clusters = ordering.extract_dbscan(2.0)?;
/// assert_eq!(clusters.cluster_count(), 2);
/// assert_eq!(clusters.noise_count(), 0);
/// # Ok::<(), optics_core::OpticsError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Optics {
    eps: f64,
    min_pts: NonZeroUsize,
    neighbour_counting: NeighbourCounting,
    execution_strategy: ExecutionStrategy,
}

impl Optics {
    pub(crate) const fn new(
        eps: f64,
        min_pts: NonZeroUsize,
        neighbour_counting: NeighbourCounting,
        execution_strategy: ExecutionStrategy,
    ) -> Self {
        Self {
            eps,
            min_pts,
            neighbour_counting,
            execution_strategy,
        }
    }

    /// Returns the neighbourhood radius.
    #[must_use]
    pub const fn eps(&self) -> f64 {
        self.eps
    }

    /// Returns the neighbour count required for a core point.
    #[must_use]
    pub const fn min_pts(&self) -> NonZeroUsize {
        self.min_pts
    }

    /// Returns the neighbour-counting convention.
    #[must_use]
    pub const fn neighbour_counting(&self) -> NeighbourCounting {
        self.neighbour_counting
    }

    /// Returns the execution strategy used for precomputation.
    #[must_use]
    pub const fn execution_strategy(&self) -> ExecutionStrategy {
        self.execution_strategy
    }

    /// Orders every point of `source`.
    ///
    /// # Errors
    /// Returns [`OpticsError::EmptySource`] when the source has no items,
    /// [`OpticsError::DataSource`] when a distance cannot be computed and
    /// [`OpticsError::InvalidDistance`] when a distance is negative or
    /// non-finite. Nothing is ordered unless every distance is valid.
    #[instrument(
        name = "optics.run",
        err,
        skip(self, source),
        fields(
            data_source = %source.name(),
            points = source.len(),
            eps = self.eps,
            min_pts = self.min_pts.get(),
            strategy = ?self.execution_strategy,
        ),
    )]
    pub fn run<D: DataSource + Sync>(&self, source: &D) -> Result<ClusterOrdering> {
        let started = Instant::now();
        if source.is_empty() {
            warn!(
                data_source = source.name(),
                "data source is empty, returning error"
            );
            return Err(OpticsError::EmptySource {
                data_source: Arc::from(source.name()),
            });
        }

        let (matrix, cores) = self.precompute(source)?;
        let ordering = order_points(&matrix, &cores, self.eps, self.min_pts);

        record_run(ordering.len(), started);
        info!(
            points = ordering.len(),
            runs = ordering.run_count(),
            "ordering completed"
        );
        Ok(ordering)
    }

    #[instrument(
        name = "optics.precompute",
        err,
        skip(self, source),
        fields(points = source.len(), counting = ?self.neighbour_counting),
    )]
    fn precompute<D: DataSource + Sync>(
        &self,
        source: &D,
    ) -> Result<(DistanceMatrix, Vec<Option<f64>>)> {
        let matrix = DistanceMatrix::compute(source, self.execution_strategy)?;
        let cores = core_distances(&matrix, self.eps, self.min_pts, self.neighbour_counting);
        Ok((matrix, cores))
    }
}

#[cfg(feature = "metrics")]
fn record_run(points: usize, started: Instant) {
    metrics::counter!("optics_runs_total").increment(1);
    metrics::counter!("optics_points_ordered_total").increment(points as u64);
    metrics::histogram!("optics_run_latency_seconds").record(started.elapsed().as_secs_f64());
}

#[cfg(not(feature = "metrics"))]
fn record_run(_points: usize, _started: Instant) {}
