//! Flat clusterings extracted from a [`ClusterOrdering`].
//!
//! Both extractors label positions of the ordering and then map the labels
//! back to original point ids. Orderings with fewer than two points never
//! form a cluster.

mod dbscan;
mod xi;

use tracing::{info, instrument};

use crate::{
    Result,
    error::OpticsError,
    ordering::ClusterOrdering,
    result::{ClusterId, ClusteringResult},
};

/// Cluster labels indexed by position together with the number of clusters.
struct PositionLabels {
    labels: Vec<ClusterId>,
    cluster_count: usize,
}

impl ClusterOrdering {
    /// Extracts the DBSCAN clustering at radius `eps_cluster`.
    ///
    /// A position whose reachability exceeds `eps_cluster` opens a new cluster
    /// when its own core distance is within `eps_cluster` and is noise
    /// otherwise; every other position joins the current cluster. Undefined
    /// values count as exceeding any threshold.
    ///
    /// # Errors
    /// Returns [`OpticsError::InvalidClusterEps`] when `eps_cluster` is
    /// negative, NaN or larger than [`ClusterOrdering::eps`].
    ///
    /// # Examples
    /// ```
    /// use optics_core::{ClusterId, OpticsBuilder, PointId, PointSet};
    ///
    /// let points = PointSet::from_scalars("line", &[0.0, 0.2, 0.4, 7.0, 7.1, 7.3, 20.0]);
    /// let ordering = OpticsBuilder::new()
    ///     .with_eps(1.0)
    ///     .with_min_pts(2)
    ///     .build()?
    ///     .run(&points)?;
    ///
    /// let result = ordering.extract_dbscan(0.5)?;
    /// assert_eq!(result.cluster_count(), 2);
    /// assert_eq!(result.label_of(PointId::new(6)), Some(ClusterId::NOISE));
    /// # Ok::<(), optics_core::OpticsError>(())
    /// ```
    #[instrument(
        name = "optics.extract_dbscan",
        err,
        skip(self),
        fields(points = self.len()),
    )]
    pub fn extract_dbscan(&self, eps_cluster: f64) -> Result<ClusteringResult> {
        if eps_cluster.is_nan() || eps_cluster < 0.0 || eps_cluster > self.eps() {
            return Err(OpticsError::InvalidClusterEps {
                got: eps_cluster,
                max: self.eps(),
            });
        }
        let labels = if self.len() < 2 {
            PositionLabels::noise(self.len())
        } else {
            dbscan::label_positions(self.reachability(), self.core_distances(), eps_cluster)
        };
        let result = self.to_point_labels(labels);
        info!(
            clusters = result.cluster_count(),
            noise = result.noise_count(),
            "flat extraction completed"
        );
        Ok(result)
    }

    /// Extracts clusters from steep areas of the reachability plot.
    ///
    /// Each steep-down position is paired with the first steep-up position
    /// after it; pairs spanning at least `min_cluster_size` positions become
    /// clusters in ascending order of their start. Spans are not nested, so a
    /// later overlapping span takes over the shared positions.
    ///
    /// # Errors
    /// Returns [`OpticsError::InvalidXi`] unless `0 < xi < 1` and
    /// [`OpticsError::InvalidMinClusterSize`] when `min_cluster_size` is zero.
    ///
    /// # Examples
    /// ```
    /// use optics_core::{ClusterOrdering, PointId};
    ///
    /// let ordering = ClusterOrdering::try_from_parts(
    ///     (0..5).map(PointId::new).collect(),
    ///     vec![None, Some(1.0), Some(1.0), Some(1.0), Some(9.0)],
    ///     vec![Some(1.0); 5],
    ///     10.0,
    ///     2,
    /// )?;
    /// let result = ordering.extract_xi(0.2, 3)?;
    /// assert_eq!(result.labels(), [0, 1, 1, 1, 1]);
    /// # Ok::<(), optics_core::OpticsError>(())
    /// ```
    #[instrument(
        name = "optics.extract_xi",
        err,
        skip(self),
        fields(points = self.len()),
    )]
    pub fn extract_xi(&self, xi: f64, min_cluster_size: usize) -> Result<ClusteringResult> {
        if xi.is_nan() || xi <= 0.0 || xi >= 1.0 {
            return Err(OpticsError::InvalidXi { got: xi });
        }
        if min_cluster_size == 0 {
            return Err(OpticsError::InvalidMinClusterSize {
                got: min_cluster_size,
            });
        }
        let labels = if self.len() < 2 {
            PositionLabels::noise(self.len())
        } else {
            xi::label_positions(self.reachability(), xi, min_cluster_size)
        };
        let result = self.to_point_labels(labels);
        info!(
            clusters = result.cluster_count(),
            noise = result.noise_count(),
            "xi extraction completed"
        );
        Ok(result)
    }

    fn to_point_labels(&self, labels: PositionLabels) -> ClusteringResult {
        let mut assignments = vec![ClusterId::NOISE; self.len()];
        for (point, label) in self.order().iter().zip(labels.labels) {
            if let Some(slot) = assignments.get_mut(point.get()) {
                *slot = label;
            }
        }
        ClusteringResult::from_parts(assignments, labels.cluster_count)
    }
}

impl PositionLabels {
    fn noise(len: usize) -> Self {
        Self {
            labels: vec![ClusterId::NOISE; len],
            cluster_count: 0,
        }
    }
}
