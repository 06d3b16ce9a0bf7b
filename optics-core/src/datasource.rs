//! Data source abstractions for the OPTICS runtime.

use crate::error::DataSourceError;

/// Abstraction over a collection of items that can yield pairwise distances.
///
/// Items are addressed by their index in `0..len()`; that index is the
/// original point id reported in orderings and clusterings.
///
/// # Examples
/// ```
/// use optics_core::{DataSource, DataSourceError};
///
/// struct Line(Vec<f64>);
///
/// impl DataSource for Line {
///     fn len(&self) -> usize { self.0.len() }
///     fn name(&self) -> &str { "line" }
///     fn distance(&self, i: usize, j: usize) -> Result<f64, DataSourceError> {
///         let a = self.0.get(i).ok_or(DataSourceError::OutOfBounds { index: i })?;
///         let b = self.0.get(j).ok_or(DataSourceError::OutOfBounds { index: j })?;
///         Ok((a - b).abs())
///     }
/// }
///
/// let src = Line(vec![1.0, 2.0, 4.0]);
/// assert_eq!(src.len(), 3);
/// assert_eq!(src.name(), "line");
/// assert_eq!(src.distance(0, 2)?, 3.0);
/// assert_eq!(src.batch_distances(0, &[1, 2])?, [1.0, 3.0]);
/// # Ok::<(), DataSourceError>(())
/// ```
pub trait DataSource {
    /// Returns number of items in the source.
    fn len(&self) -> usize;

    /// Returns whether the source contains no items.
    #[must_use]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a human-readable name.
    fn name(&self) -> &str;

    /// Computes the distance between two items.
    ///
    /// Implementations must be deterministic and symmetric. Distances must be
    /// finite and non-negative; OPTICS rejects anything else.
    ///
    /// # Errors
    /// Returns [`DataSourceError`] when either index is invalid or the items
    /// cannot be compared.
    fn distance(&self, i: usize, j: usize) -> Result<f64, DataSourceError>;

    /// Computes the distances from `query` to every entry in `candidates`.
    ///
    /// The default implementation calls [`DataSource::distance`] repeatedly.
    ///
    /// # Errors
    /// Returns the first [`DataSourceError`] surfaced by
    /// [`DataSource::distance`].
    fn batch_distances(
        &self,
        query: usize,
        candidates: &[usize],
    ) -> Result<Vec<f64>, DataSourceError> {
        candidates
            .iter()
            .map(|&candidate| self.distance(query, candidate))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{ConstantSource, CountingSource};
    use rstest::rstest;
    use std::sync::{Arc, atomic::AtomicUsize};

    #[rstest]
    fn batch_keeps_candidate_order_and_counts_calls() {
        let source = CountingSource::new(vec![0.0, 1.0, 3.0], Arc::new(AtomicUsize::new(0)));
        let distances = source
            .batch_distances(1, &[2, 0])
            .expect("candidates are in range");
        assert_eq!(distances, [2.0, 1.0]);
        assert_eq!(source.calls(), 2);
    }

    #[rstest]
    fn batch_stops_at_first_failing_candidate() {
        let source = CountingSource::new(vec![0.0, 1.0], Arc::new(AtomicUsize::new(0)));
        let err = source
            .batch_distances(0, &[7, 1])
            .expect_err("candidate 7 is out of range");
        assert_eq!(err, DataSourceError::OutOfBounds { index: 7 });
        assert_eq!(source.calls(), 1);
    }

    #[rstest]
    #[case(0, true)]
    #[case(3, false)]
    fn emptiness_follows_len(#[case] len: usize, #[case] empty: bool) {
        assert_eq!(ConstantSource::new(len, 1.0).is_empty(), empty);
    }
}
