//! The OPTICS cluster ordering and the engine that produces it.
//!
//! The engine performs a best-first expansion of each density-connected
//! region: the next point is always the unprocessed seed with the smallest
//! reachability, where reaching `q` from a core point `p` costs
//! `max(core(p), dist(p, q))`. When the seeds run dry the next unprocessed
//! point in index order starts a new run with undefined reachability.

mod seeds;

use std::num::NonZeroUsize;

use tracing::{debug, instrument};

use self::seeds::SeedQueue;
use crate::{
    Result,
    error::OpticsError,
    ids::{OrderPosition, PointId},
    precompute::DistanceMatrix,
};

/// One position of a [`ClusterOrdering`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderingEntry {
    /// Position within the ordering.
    pub position: OrderPosition,
    /// Original index of the point at this position.
    pub point: PointId,
    /// Frozen reachability, `None` for the first point of each run.
    pub reachability: Option<f64>,
    /// Core distance, `None` when the point is not a core point.
    pub core_distance: Option<f64>,
}

/// Output of an OPTICS run: the visitation order together with the
/// reachability and core distance of each position.
///
/// All arrays are indexed by [`OrderPosition`]; use [`Self::order`] or
/// [`Self::position_of`] to translate between positions and original point
/// ids.
///
/// # Examples
/// ```
/// use optics_core::{OpticsBuilder, PointId, PointSet};
///
/// let points = PointSet::from_scalars("line", &[0.0, 0.3, 9.0]);
/// let ordering = OpticsBuilder::new()
///     .with_eps(1.0)
///     .with_min_pts(1)
///     .build()?
///     .run(&points)?;
///
/// assert_eq!(ordering.order(), [PointId::new(0), PointId::new(1), PointId::new(2)]);
/// assert_eq!(ordering.reachability(), [None, Some(0.3), None]);
/// assert_eq!(ordering.run_count(), 2);
/// # Ok::<(), optics_core::OpticsError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterOrdering {
    order: Vec<PointId>,
    positions: Vec<OrderPosition>,
    reachability: Vec<Option<f64>>,
    core_distances: Vec<Option<f64>>,
    eps: f64,
    min_pts: NonZeroUsize,
}

impl ClusterOrdering {
    /// Builds an ordering from externally produced arrays.
    ///
    /// `reachability` and `core_distances` are indexed by position in `order`.
    ///
    /// # Errors
    /// Returns [`OpticsError::InvalidEps`] or [`OpticsError::InvalidMinPts`]
    /// for out-of-range parameters and [`OpticsError::InvalidOrdering`] when
    /// the arrays differ in length, `order` is not a permutation of
    /// `0..order.len()`, or a defined value is negative or non-finite.
    ///
    /// # Examples
    /// ```
    /// use optics_core::{ClusterOrdering, OpticsError, PointId};
    ///
    /// let ordering = ClusterOrdering::try_from_parts(
    ///     vec![PointId::new(1), PointId::new(0)],
    ///     vec![None, Some(0.4)],
    ///     vec![Some(0.4), Some(0.4)],
    ///     1.0,
    ///     1,
    /// )?;
    /// assert_eq!(ordering.len(), 2);
    ///
    /// let err = ClusterOrdering::try_from_parts(
    ///     vec![PointId::new(0), PointId::new(0)],
    ///     vec![None, None],
    ///     vec![None, None],
    ///     1.0,
    ///     1,
    /// );
    /// assert!(matches!(err, Err(OpticsError::InvalidOrdering { .. })));
    /// # Ok::<(), OpticsError>(())
    /// ```
    pub fn try_from_parts(
        order: Vec<PointId>,
        reachability: Vec<Option<f64>>,
        core_distances: Vec<Option<f64>>,
        eps: f64,
        min_pts: usize,
    ) -> Result<Self> {
        if eps.is_nan() || eps < 0.0 {
            return Err(OpticsError::InvalidEps { got: eps });
        }
        let min_pts =
            NonZeroUsize::new(min_pts).ok_or(OpticsError::InvalidMinPts { got: min_pts })?;
        if reachability.len() != order.len() || core_distances.len() != order.len() {
            return Err(OpticsError::InvalidOrdering {
                reason: "order, reachability and core distances must have equal lengths",
            });
        }
        let valid = |value: &Option<f64>| value.is_none_or(|v| v.is_finite() && v >= 0.0);
        if !reachability.iter().all(valid) {
            return Err(OpticsError::InvalidOrdering {
                reason: "reachability values must be finite and non-negative",
            });
        }
        if !core_distances.iter().all(valid) {
            return Err(OpticsError::InvalidOrdering {
                reason: "core distances must be finite and non-negative",
            });
        }
        let positions = invert(&order).ok_or(OpticsError::InvalidOrdering {
            reason: "order must be a permutation of the point indices",
        })?;

        Ok(Self {
            order,
            positions,
            reachability,
            core_distances,
            eps,
            min_pts,
        })
    }

    /// Number of ordered points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the ordering holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Neighbourhood radius the ordering was computed with.
    #[must_use]
    pub const fn eps(&self) -> f64 {
        self.eps
    }

    /// `min_pts` the ordering was computed with.
    #[must_use]
    pub const fn min_pts(&self) -> NonZeroUsize {
        self.min_pts
    }

    /// Original point ids in visitation order.
    #[must_use]
    pub fn order(&self) -> &[PointId] {
        &self.order
    }

    /// Reachability by position.
    #[must_use]
    pub fn reachability(&self) -> &[Option<f64>] {
        &self.reachability
    }

    /// Core distance by position.
    #[must_use]
    pub fn core_distances(&self) -> &[Option<f64>] {
        &self.core_distances
    }

    /// Iterates over every position with its point and distances.
    pub fn entries(&self) -> impl ExactSizeIterator<Item = OrderingEntry> + '_ {
        self.order
            .iter()
            .zip(&self.reachability)
            .zip(&self.core_distances)
            .enumerate()
            .map(|(position, ((&point, &reachability), &core_distance))| OrderingEntry {
                position: OrderPosition::new(position),
                point,
                reachability,
                core_distance,
            })
    }

    /// Position of `point` in the ordering.
    #[must_use]
    pub fn position_of(&self, point: PointId) -> Option<OrderPosition> {
        self.positions.get(point.get()).copied()
    }

    /// Reachability by position with undefined values as `f64::INFINITY`,
    /// ready for plotting.
    #[must_use]
    pub fn reachability_plot(&self) -> Vec<f64> {
        self.reachability
            .iter()
            .map(|value| value.unwrap_or(f64::INFINITY))
            .collect()
    }

    /// Number of runs, i.e. positions whose reachability is undefined.
    #[must_use]
    pub fn run_count(&self) -> usize {
        self.reachability.iter().filter(|value| value.is_none()).count()
    }
}

fn invert(order: &[PointId]) -> Option<Vec<OrderPosition>> {
    let mut positions: Vec<Option<OrderPosition>> = vec![None; order.len()];
    for (position, point) in order.iter().enumerate() {
        let slot = positions.get_mut(point.get())?;
        if slot.is_some() {
            return None;
        }
        *slot = Some(OrderPosition::new(position));
    }
    positions.into_iter().collect()
}

/// Runs the ordering engine over precomputed distances.
///
/// `core_distances` is indexed by original point id and must cover every
/// point of `matrix`.
#[instrument(
    name = "optics.order",
    skip(matrix, core_distances),
    fields(points = matrix.len(), eps = eps, min_pts = min_pts.get()),
)]
pub(crate) fn order_points(
    matrix: &DistanceMatrix,
    core_distances: &[Option<f64>],
    eps: f64,
    min_pts: NonZeroUsize,
) -> ClusterOrdering {
    let mut engine = Engine::new(matrix, core_distances, eps);
    for start in 0..matrix.len() {
        if engine.processed[start] {
            continue;
        }
        engine.process(start);
        while let Some(next) = engine.seeds.pop(|point| engine.processed[point]) {
            engine.process(next);
        }
    }
    debug!(stale_seeds = engine.seeds.stale(), "seed expansion finished");
    engine.finish(min_pts)
}

struct Engine<'a> {
    matrix: &'a DistanceMatrix,
    core_distances: &'a [Option<f64>],
    eps: f64,
    processed: Vec<bool>,
    reachability: Vec<Option<f64>>,
    order: Vec<PointId>,
    seeds: SeedQueue,
}

impl<'a> Engine<'a> {
    fn new(matrix: &'a DistanceMatrix, core_distances: &'a [Option<f64>], eps: f64) -> Self {
        let len = matrix.len();
        Self {
            matrix,
            core_distances,
            eps,
            processed: vec![false; len],
            reachability: vec![None; len],
            order: Vec::with_capacity(len),
            seeds: SeedQueue::new(),
        }
    }

    fn process(&mut self, point: usize) {
        self.processed[point] = true;
        self.order.push(PointId::new(point));

        let Some(core) = self.core_distances.get(point).copied().flatten() else {
            return;
        };
        let matrix = self.matrix;
        for (neighbour, distance) in matrix.neighbours(point, self.eps) {
            if self.processed[neighbour] {
                continue;
            }
            let candidate = core.max(distance);
            let current = &mut self.reachability[neighbour];
            if current.is_none_or(|reach| candidate < reach) {
                *current = Some(candidate);
                self.seeds.push(neighbour, candidate);
            }
        }
    }

    fn finish(self, min_pts: NonZeroUsize) -> ClusterOrdering {
        let mut positions = vec![OrderPosition::new(0); self.order.len()];
        let mut reachability = Vec::with_capacity(self.order.len());
        let mut core_distances = Vec::with_capacity(self.order.len());
        for (position, point) in self.order.iter().enumerate() {
            positions[point.get()] = OrderPosition::new(position);
            reachability.push(self.reachability[point.get()]);
            core_distances.push(self.core_distances.get(point.get()).copied().flatten());
        }
        ClusterOrdering {
            order: self.order,
            positions,
            reachability,
            core_distances,
            eps: self.eps,
            min_pts,
        }
    }
}
