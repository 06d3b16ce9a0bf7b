use std::num::NonZeroUsize;

use crate::{builder::NeighbourCounting, precompute::DistanceMatrix};

/// Core distance of every point, or `None` where the `eps`-neighbourhood holds
/// fewer than `min_pts` points.
///
/// With [`NeighbourCounting::ExcludeSelf`] the core distance is the
/// `min_pts`-th smallest distance to another point within `eps`. With
/// [`NeighbourCounting::IncludeSelf`] the point itself is the first
/// neighbour at distance zero, so `min_pts = 1` makes every point core at
/// distance zero.
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
/// use optics_core::{
///     DistanceMatrix, ExecutionStrategy, NeighbourCounting, PointSet, core_distances,
/// };
///
/// let points = PointSet::from_scalars("line", &[0.0, 1.0, 3.0]);
/// let matrix = DistanceMatrix::compute(&points, ExecutionStrategy::Sequential)?;
/// let two = NonZeroUsize::new(2).expect("non-zero");
///
/// let exclusive = core_distances(&matrix, 2.5, two, NeighbourCounting::ExcludeSelf);
/// assert_eq!(exclusive, [None, Some(2.0), None]);
///
/// let inclusive = core_distances(&matrix, 2.5, two, NeighbourCounting::IncludeSelf);
/// assert_eq!(inclusive, [Some(1.0), Some(1.0), Some(2.0)]);
/// # Ok::<(), optics_core::OpticsError>(())
/// ```
#[must_use]
pub fn core_distances(
    matrix: &DistanceMatrix,
    eps: f64,
    min_pts: NonZeroUsize,
    counting: NeighbourCounting,
) -> Vec<Option<f64>> {
    (0..matrix.len())
        .map(|point| core_distance_of(matrix, point, eps, min_pts, counting))
        .collect()
}

fn core_distance_of(
    matrix: &DistanceMatrix,
    point: usize,
    eps: f64,
    min_pts: NonZeroUsize,
    counting: NeighbourCounting,
) -> Option<f64> {
    // Rank among the other points once the point itself is accounted for.
    let rank = match counting {
        NeighbourCounting::ExcludeSelf => min_pts.get() - 1,
        NeighbourCounting::IncludeSelf => match min_pts.get() - 1 {
            0 => return Some(0.0),
            others => others - 1,
        },
    };

    let mut distances: Vec<f64> = matrix
        .neighbours(point, eps)
        .map(|(_, distance)| distance)
        .collect();
    if distances.len() <= rank {
        return None;
    }
    let (_, kth, _) = distances.select_nth_unstable_by(rank, f64::total_cmp);
    Some(*kth)
}
