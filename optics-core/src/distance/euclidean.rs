use crate::distance::types::{Distance, Result, Vector, VectorKind};

/// Computes the Euclidean distance between two vectors.
///
/// Components are accumulated left to right, so `d(a, b)` and `d(b, a)` are
/// bit-identical.
///
/// # Examples
///
/// ```
/// use optics_core::{DistanceError, euclidean_distance};
///
/// fn main() -> Result<(), DistanceError> {
///     let distance = euclidean_distance(&[1.0, 2.0, 3.0], &[4.0, 6.0, 8.0])?;
///     assert!((distance.value() - 50.0_f64.sqrt()).abs() < 1e-12);
///     Ok(())
/// }
/// ```
///
/// # Errors
///
/// - [`crate::DistanceError::ZeroLength`] when any input is empty.
/// - [`crate::DistanceError::DimensionMismatch`] when input lengths differ.
/// - [`crate::DistanceError::NonFinite`] when a value is NaN or infinite.
#[expect(
    clippy::float_arithmetic,
    reason = "Euclidean distance requires floating-point arithmetic"
)]
pub fn euclidean_distance(left: &[f64], right: &[f64]) -> Result<Distance> {
    let left = Vector::new(left, VectorKind::Left)?;
    let right = Vector::new(right, VectorKind::Right)?;
    let pairs = left.zip(right)?;
    let sum: f64 = pairs
        .map(|(l, r)| {
            let diff = l - r;
            diff * diff
        })
        .sum();
    Ok(Distance::from_raw(sum.sqrt()))
}
