//! Validated inputs and outputs of the distance routines.

use core::fmt;

use thiserror::Error;

/// Which argument of a two-vector distance call an error refers to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VectorKind {
    /// The first argument.
    Left,
    /// The second argument.
    Right,
}

impl VectorKind {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for VectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors emitted while computing distances.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DistanceError {
    /// Either input vector had zero length.
    #[error("vectors must have positive dimension")]
    ZeroLength,
    /// Input vectors had different lengths.
    #[error("dimension mismatch: left={left}, right={right}")]
    DimensionMismatch {
        /// Length of the left vector.
        left: usize,
        /// Length of the right vector.
        right: usize,
    },
    /// A component was NaN or infinite.
    #[error("{which} vector has non-finite component {index}: {value}")]
    NonFinite {
        /// Which argument held the value.
        which: VectorKind,
        /// Component index of the value.
        index: usize,
        /// The offending value.
        value: f64,
    },
}

/// Result alias for distance computations.
pub type Result<T> = core::result::Result<T, DistanceError>;

/// A non-empty slice of finite components.
///
/// # Examples
/// ```
/// use optics_core::{DistanceError, Vector, VectorKind};
///
/// let vector = Vector::new(&[1.0, 2.0], VectorKind::Left)?;
/// assert_eq!(vector.dimension(), 2);
///
/// let err = Vector::new(&[f64::NAN], VectorKind::Right).unwrap_err();
/// assert!(matches!(err, DistanceError::NonFinite { index: 0, .. }));
/// # Ok::<(), DistanceError>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Vector<'a> {
    components: &'a [f64],
}

impl<'a> Vector<'a> {
    /// Validates `components` as argument `which`.
    ///
    /// # Errors
    /// Returns [`DistanceError::ZeroLength`] for an empty slice and
    /// [`DistanceError::NonFinite`] for the first NaN or infinite component.
    pub fn new(components: &'a [f64], which: VectorKind) -> Result<Self> {
        if components.is_empty() {
            return Err(DistanceError::ZeroLength);
        }
        match components.iter().position(|value| !value.is_finite()) {
            Some(index) => Err(DistanceError::NonFinite {
                which,
                index,
                value: components.get(index).copied().unwrap_or(f64::NAN),
            }),
            None => Ok(Self { components }),
        }
    }

    /// Number of components.
    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.components.len()
    }

    /// Underlying components.
    #[must_use]
    pub const fn components(&self) -> &'a [f64] {
        self.components
    }

    /// Pairs components with `other`, which must share the dimension.
    pub(crate) fn zip(self, other: Self) -> Result<impl Iterator<Item = (f64, f64)> + 'a> {
        if self.dimension() != other.dimension() {
            return Err(DistanceError::DimensionMismatch {
                left: self.dimension(),
                right: other.dimension(),
            });
        }
        Ok(self
            .components
            .iter()
            .copied()
            .zip(other.components.iter().copied()))
    }
}

/// A validated, finite and non-negative distance.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Distance(f64);

impl Distance {
    pub(crate) const fn from_raw(value: f64) -> Self {
        Self(value)
    }

    /// Returns the raw distance value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
