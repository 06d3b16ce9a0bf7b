//! Dense in-memory point set measured with Euclidean distance.

use crate::{
    datasource::DataSource,
    distance::{DistanceError, VectorKind, euclidean_distance},
    error::DataSourceError,
};

/// Rows of `f64` coordinates addressed by index.
///
/// Rows are stored as given. Ragged rows, empty rows and non-finite
/// coordinates are reported as [`DataSourceError`]s when a distance touching
/// them is requested, so an OPTICS run over such a set fails before ordering.
///
/// # Examples
/// ```
/// use optics_core::{DataSource, PointSet};
///
/// let points = PointSet::new("plane", vec![vec![0.0, 0.0], vec![3.0, 4.0]]);
/// assert_eq!(points.len(), 2);
/// assert_eq!(points.distance(0, 1)?, 5.0);
/// # Ok::<(), optics_core::DataSourceError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PointSet {
    rows: Vec<Vec<f64>>,
    name: String,
}

impl PointSet {
    /// Creates a named point set from its rows.
    #[must_use]
    pub fn new(name: impl Into<String>, rows: Vec<Vec<f64>>) -> Self {
        Self {
            rows,
            name: name.into(),
        }
    }

    /// Builds a one-dimensional point set from scalar values.
    ///
    /// # Examples
    /// ```
    /// use optics_core::{DataSource, PointSet};
    ///
    /// let line = PointSet::from_scalars("line", &[1.0, 4.0]);
    /// assert_eq!(line.distance(1, 0)?, 3.0);
    /// # Ok::<(), optics_core::DataSourceError>(())
    /// ```
    #[must_use]
    pub fn from_scalars(name: impl Into<String>, values: &[f64]) -> Self {
        Self::new(name, values.iter().map(|&value| vec![value]).collect())
    }

    /// Returns the stored rows.
    #[must_use]
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    fn row(&self, index: usize) -> Result<&[f64], DataSourceError> {
        self.rows
            .get(index)
            .map(Vec::as_slice)
            .ok_or(DataSourceError::OutOfBounds { index })
    }
}

impl DataSource for PointSet {
    fn len(&self) -> usize {
        self.rows.len()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn distance(&self, i: usize, j: usize) -> Result<f64, DataSourceError> {
        let left = self.row(i)?;
        let right = self.row(j)?;
        euclidean_distance(left, right)
            .map(|distance| distance.value())
            .map_err(|error| match error {
                DistanceError::ZeroLength => DataSourceError::ZeroDimension,
                DistanceError::DimensionMismatch { left, right } => {
                    DataSourceError::DimensionMismatch { left, right }
                }
                DistanceError::NonFinite { which, index, .. } => DataSourceError::NonFinite {
                    point: match which {
                        VectorKind::Left => i,
                        VectorKind::Right => j,
                    },
                    component: index,
                },
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn euclidean_between_rows() {
        let points = PointSet::new("t", vec![vec![1.0, 1.0], vec![4.0, 5.0]]);
        assert_eq!(points.distance(0, 1), Ok(5.0));
        assert_eq!(points.distance(1, 0), Ok(5.0));
        assert_eq!(points.distance(1, 1), Ok(0.0));
    }

    #[rstest]
    #[case(vec![vec![0.0], vec![1.0, 2.0]], DataSourceError::DimensionMismatch { left: 1, right: 2 })]
    #[case(vec![vec![], vec![]], DataSourceError::ZeroDimension)]
    #[case(vec![vec![0.0], vec![f64::NAN]], DataSourceError::NonFinite { point: 1, component: 0 })]
    #[case(vec![vec![0.0, f64::INFINITY], vec![1.0, 1.0]], DataSourceError::NonFinite { point: 0, component: 1 })]
    fn invalid_rows_surface_as_data_source_errors(
        #[case] rows: Vec<Vec<f64>>,
        #[case] expected: DataSourceError,
    ) {
        let points = PointSet::new("bad", rows);
        assert_eq!(points.distance(0, 1), Err(expected));
    }

    #[rstest]
    fn out_of_bounds_index_is_reported() {
        let points = PointSet::from_scalars("t", &[0.0]);
        assert_eq!(
            points.distance(0, 3),
            Err(DataSourceError::OutOfBounds { index: 3 })
        );
    }
}
