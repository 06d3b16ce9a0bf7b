//! Symmetric `N × N` distance matrix.

use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{
    Result,
    builder::ExecutionStrategy,
    datasource::DataSource,
    error::{DataSourceError, OpticsError},
};

/// Row-major matrix of validated pairwise distances.
///
/// Each unordered pair is evaluated once as `source.distance(i, j)` with
/// `i < j` and mirrored, so the matrix is exactly symmetric and its diagonal is
/// zero.
///
/// # Examples
/// ```
/// use optics_core::{DistanceMatrix, ExecutionStrategy, PointSet};
///
/// let points = PointSet::from_scalars("line", &[0.0, 1.0, 3.0]);
/// let matrix = DistanceMatrix::compute(&points, ExecutionStrategy::Sequential)?;
/// assert_eq!(matrix.len(), 3);
/// assert_eq!(matrix.get(2, 0), Some(3.0));
/// assert_eq!(matrix.get(1, 1), Some(0.0));
/// # Ok::<(), optics_core::OpticsError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    len: usize,
    values: Vec<f64>,
}

impl DistanceMatrix {
    /// Computes every pairwise distance of `source`.
    ///
    /// # Errors
    /// Returns [`OpticsError::EmptySource`] for an empty source,
    /// [`OpticsError::BackendUnavailable`] when [`ExecutionStrategy::Parallel`]
    /// is requested without the `parallel` feature,
    /// [`OpticsError::DataSource`] when the source fails, and
    /// [`OpticsError::InvalidDistance`] when it yields a negative or
    /// non-finite distance. Under [`ExecutionStrategy::Parallel`] the error
    /// reported for a source with several failing pairs is not guaranteed to
    /// be the first in index order.
    pub fn compute<D: DataSource + Sync>(source: &D, strategy: ExecutionStrategy) -> Result<Self> {
        let len = source.len();
        if len == 0 {
            return Err(OpticsError::EmptySource {
                data_source: Arc::from(source.name()),
            });
        }
        if strategy == ExecutionStrategy::Parallel && !cfg!(feature = "parallel") {
            return Err(OpticsError::BackendUnavailable {
                requested: strategy,
            });
        }

        let rows = if strategy.is_parallel() {
            upper_rows_parallel(source, len)
        } else {
            upper_rows_sequential(source, len)
        }
        .map_err(|error| OpticsError::DataSource {
            data_source: Arc::from(source.name()),
            error,
        })?;

        let mut values = vec![0.0; len * len];
        for (i, row) in rows.into_iter().enumerate() {
            for (offset, value) in row.into_iter().enumerate() {
                let j = i + 1 + offset;
                if !value.is_finite() || value < 0.0 {
                    return Err(OpticsError::InvalidDistance {
                        left: i,
                        right: j,
                        value,
                    });
                }
                values[i * len + j] = value;
                values[j * len + i] = value;
            }
        }

        Ok(Self { len, values })
    }

    /// Number of points covered by the matrix.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the matrix covers no points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Distance between points `i` and `j`, or `None` when either is out of
    /// range.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i >= self.len || j >= self.len {
            return None;
        }
        self.values.get(i * self.len + j).copied()
    }

    /// All distances from point `i`, indexed by the other point.
    #[must_use]
    pub fn row(&self, i: usize) -> Option<&[f64]> {
        if i >= self.len {
            return None;
        }
        self.values.get(i * self.len..(i + 1) * self.len)
    }

    /// Other points within `eps` of `i`, with their distances, in index order.
    pub(crate) fn neighbours(&self, i: usize, eps: f64) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.row(i)
            .unwrap_or_default()
            .iter()
            .copied()
            .enumerate()
            .filter(move |&(j, distance)| j != i && distance <= eps)
    }
}

fn upper_row<D: DataSource>(
    source: &D,
    i: usize,
    len: usize,
) -> core::result::Result<Vec<f64>, DataSourceError> {
    let candidates: Vec<usize> = (i + 1..len).collect();
    if candidates.is_empty() {
        return Ok(Vec::new());
    }
    source.batch_distances(i, &candidates)
}

fn upper_rows_sequential<D: DataSource>(
    source: &D,
    len: usize,
) -> core::result::Result<Vec<Vec<f64>>, DataSourceError> {
    (0..len).map(|i| upper_row(source, i, len)).collect()
}

#[cfg(feature = "parallel")]
fn upper_rows_parallel<D: DataSource + Sync>(
    source: &D,
    len: usize,
) -> core::result::Result<Vec<Vec<f64>>, DataSourceError> {
    (0..len)
        .into_par_iter()
        .map(|i| upper_row(source, i, len))
        .collect()
}

// Without the feature `Parallel` is rejected up front and `Auto` resolves to
// sequential, so callers never reach this.
#[cfg(not(feature = "parallel"))]
fn upper_rows_parallel<D: DataSource + Sync>(
    source: &D,
    len: usize,
) -> core::result::Result<Vec<Vec<f64>>, DataSourceError> {
    upper_rows_sequential(source, len)
}
