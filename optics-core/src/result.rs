//! Result types for cluster extraction.
//!
//! Provides the per-point cluster assignment produced by the extractors and
//! validation of the cluster identifier constraints.

use std::fmt;

use thiserror::Error;

use crate::ids::PointId;

/// Identifier assigned to a cluster. `0` is reserved for noise.
///
/// # Examples
/// ```
/// use optics_core::ClusterId;
///
/// let id = ClusterId::new(4);
/// assert_eq!(id.get(), 4);
/// assert!(!id.is_noise());
/// assert!(ClusterId::NOISE.is_noise());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClusterId(usize);

impl ClusterId {
    /// The noise label.
    pub const NOISE: Self = Self(0);

    /// Creates a new cluster identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn new(id: usize) -> Self { Self(id) }

    /// Returns the underlying numeric identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn get(self) -> usize { self.0 }

    /// Whether this identifier marks noise.
    #[rustfmt::skip]
    #[must_use]
    pub const fn is_noise(self) -> bool { self.0 == 0 }
}

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_noise() {
            f.write_str("noise")
        } else {
            write!(f, "cluster {}", self.0)
        }
    }
}

/// Error returned when cluster identifiers do not form `1..=K`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NonContiguousClusterIds {
    /// Identifier `missing` is absent although a larger one is present.
    #[error("cluster identifiers must be contiguous from 1; {missing} is missing")]
    Gap {
        /// The smallest absent identifier.
        missing: usize,
    },
}

/// Cluster assignment for every original point, produced by
/// [`crate::ClusterOrdering::extract_dbscan`] or
/// [`crate::ClusterOrdering::extract_xi`].
///
/// # Examples
/// ```
/// use optics_core::{ClusterId, ClusteringResult, PointId};
///
/// let result = ClusteringResult::try_from_assignments(vec![
///     ClusterId::new(1),
///     ClusterId::NOISE,
///     ClusterId::new(2),
///     ClusterId::new(1),
/// ])?;
/// assert_eq!(result.cluster_count(), 2);
/// assert_eq!(result.noise_points(), [PointId::new(1)]);
/// assert_eq!(result.labels(), [1, 0, 2, 1]);
/// # Ok::<(), optics_core::NonContiguousClusterIds>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusteringResult {
    assignments: Vec<ClusterId>,
    cluster_count: usize,
}

impl ClusteringResult {
    /// Wraps assignments already known to use ids `1..=cluster_count`.
    pub(crate) const fn from_parts(assignments: Vec<ClusterId>, cluster_count: usize) -> Self {
        Self {
            assignments,
            cluster_count,
        }
    }

    /// Attempts to build a result from cluster assignments indexed by point.
    ///
    /// Non-noise identifiers must cover `1..=K` without gaps. An empty or
    /// all-noise vector yields `cluster_count == 0`.
    ///
    /// # Errors
    /// Returns [`NonContiguousClusterIds::Gap`] when an identifier between 1
    /// and the largest one present is unused.
    pub fn try_from_assignments(
        assignments: Vec<ClusterId>,
    ) -> Result<Self, NonContiguousClusterIds> {
        let max_id = assignments.iter().map(|id| id.get()).max().unwrap_or(0);
        let mut seen = vec![false; max_id];
        for id in &assignments {
            if let Some(slot) = id.get().checked_sub(1).and_then(|i| seen.get_mut(i)) {
                *slot = true;
            }
        }
        if let Some(missing) = seen.iter().position(|&present| !present) {
            return Err(NonContiguousClusterIds::Gap {
                missing: missing + 1,
            });
        }
        Ok(Self::from_parts(assignments, max_id))
    }

    /// Returns the assignments indexed by original point id.
    #[must_use]
    pub fn assignments(&self) -> &[ClusterId] {
        &self.assignments
    }

    /// Number of points covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Whether the result covers no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Number of clusters, excluding noise.
    #[must_use]
    pub const fn cluster_count(&self) -> usize {
        self.cluster_count
    }

    /// Number of points labelled as noise.
    #[must_use]
    pub fn noise_count(&self) -> usize {
        self.assignments.iter().filter(|id| id.is_noise()).count()
    }

    /// Points labelled as noise, in index order.
    #[must_use]
    pub fn noise_points(&self) -> Vec<PointId> {
        self.assignments
            .iter()
            .enumerate()
            .filter(|(_, id)| id.is_noise())
            .map(|(point, _)| PointId::new(point))
            .collect()
    }

    /// Members of each cluster; entry `k` holds cluster `k + 1`.
    #[must_use]
    pub fn clusters(&self) -> Vec<Vec<PointId>> {
        let mut clusters = vec![Vec::new(); self.cluster_count];
        for (point, id) in self.assignments.iter().enumerate() {
            if let Some(members) = id.get().checked_sub(1).and_then(|k| clusters.get_mut(k)) {
                members.push(PointId::new(point));
            }
        }
        clusters
    }

    /// Cluster of `point`, or `None` when it is out of range.
    #[must_use]
    pub fn label_of(&self, point: PointId) -> Option<ClusterId> {
        self.assignments.get(point.get()).copied()
    }

    /// Raw labels, `0` for noise, suitable for the quality metrics.
    #[must_use]
    pub fn labels(&self) -> Vec<usize> {
        self.assignments.iter().map(|id| id.get()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn ids(raw: &[usize]) -> Vec<ClusterId> {
        raw.iter().copied().map(ClusterId::new).collect()
    }

    #[rstest]
    #[case(&[], 0)]
    #[case(&[0, 0], 0)]
    #[case(&[1, 1, 0], 1)]
    #[case(&[2, 0, 1, 3], 3)]
    fn accepts_contiguous_ids(#[case] raw: &[usize], #[case] clusters: usize) {
        let result = ClusteringResult::try_from_assignments(ids(raw)).expect("ids are contiguous");
        assert_eq!(result.cluster_count(), clusters);
        assert_eq!(result.labels(), raw);
    }

    #[rstest]
    #[case(&[2], 1)]
    #[case(&[1, 3, 0], 2)]
    fn rejects_gaps(#[case] raw: &[usize], #[case] missing: usize) {
        let err = ClusteringResult::try_from_assignments(ids(raw)).expect_err("gap must fail");
        assert_eq!(err, NonContiguousClusterIds::Gap { missing });
    }

    #[rstest]
    fn groups_members_by_cluster() {
        let result =
            ClusteringResult::try_from_assignments(ids(&[2, 1, 0, 2])).expect("contiguous");
        assert_eq!(
            result.clusters(),
            vec![
                vec![PointId::new(1)],
                vec![PointId::new(0), PointId::new(3)],
            ]
        );
        assert_eq!(result.noise_count(), 1);
        assert_eq!(result.label_of(PointId::new(3)), Some(ClusterId::new(2)));
        assert_eq!(result.label_of(PointId::new(4)), None);
    }

    #[rstest]
    fn display_distinguishes_noise() {
        assert_eq!(ClusterId::NOISE.to_string(), "noise");
        assert_eq!(ClusterId::new(3).to_string(), "cluster 3");
    }
}
