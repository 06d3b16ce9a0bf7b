//! Synthetic data source for benchmarking.
//!
//! Provides [`BlobSource`], a [`DataSource`] over seeded Gaussian blobs with
//! Euclidean distance. Blobs give OPTICS real density structure to order, so
//! extraction benchmarks see clusters rather than uniform noise.

use optics_core::{DataSource, DataSourceError};
use rand::{Rng, SeedableRng, rngs::SmallRng};

/// Errors that may occur during synthetic source generation.
#[derive(Clone, Debug, thiserror::Error, PartialEq)]
pub enum SyntheticError {
    /// The requested blob count was zero.
    #[error("blob count must be greater than zero")]
    ZeroBlobs,
    /// The requested number of points per blob was zero.
    #[error("points per blob must be greater than zero")]
    ZeroPoints,
    /// The requested dimension count was zero.
    #[error("dimension count must be greater than zero")]
    ZeroDimensions,
    /// A length scale was negative, NaN or infinite.
    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidScale {
        /// Which configuration field was rejected.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
}

/// Configuration for synthetic blob generation.
#[derive(Clone, Debug)]
pub struct BlobConfig {
    /// Number of blobs.
    pub blob_count: usize,
    /// Points drawn around each blob centre.
    pub points_per_blob: usize,
    /// Dimensionality of each vector.
    pub dimensions: usize,
    /// Standard deviation of every coordinate around its centre.
    pub spread: f64,
    /// Offset applied to every coordinate between consecutive centres.
    pub separation: f64,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

/// A [`DataSource`] of Gaussian blobs laid out along the main diagonal.
///
/// Blob `k` (zero-based) is centred on `k * separation` in every coordinate.
/// Vectors are stored row-major in a flat `Vec<f64>` and generated eagerly.
///
/// # Examples
///
/// ```
/// use optics_benches::source::{BlobConfig, BlobSource};
/// use optics_core::DataSource;
///
/// let config = BlobConfig {
///     blob_count: 3,
///     points_per_blob: 4,
///     dimensions: 2,
///     spread: 0.5,
///     separation: 10.0,
///     seed: 42,
/// };
/// let source = BlobSource::generate(&config).expect("valid config");
/// assert_eq!(source.len(), 12);
/// assert_eq!(source.labels()[4], 2);
/// ```
#[derive(Clone, Debug)]
pub struct BlobSource {
    data: Vec<f64>,
    labels: Vec<usize>,
    dimensions: usize,
}

impl BlobSource {
    /// Generates the blobs eagerly from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SyntheticError::ZeroBlobs`], [`SyntheticError::ZeroPoints`]
    /// or [`SyntheticError::ZeroDimensions`] when a count is zero, and
    /// [`SyntheticError::InvalidScale`] when `spread` or `separation` is not
    /// a finite non-negative number.
    #[expect(
        clippy::float_arithmetic,
        reason = "blob centres and offsets are computed in f64"
    )]
    pub fn generate(config: &BlobConfig) -> Result<Self, SyntheticError> {
        if config.blob_count == 0 {
            return Err(SyntheticError::ZeroBlobs);
        }
        if config.points_per_blob == 0 {
            return Err(SyntheticError::ZeroPoints);
        }
        if config.dimensions == 0 {
            return Err(SyntheticError::ZeroDimensions);
        }
        check_scale("spread", config.spread)?;
        check_scale("separation", config.separation)?;

        let point_count = config.blob_count.saturating_mul(config.points_per_blob);
        let mut rng = SmallRng::seed_from_u64(config.seed);
        let mut data = Vec::with_capacity(point_count.saturating_mul(config.dimensions));
        let mut labels = Vec::with_capacity(point_count);
        let mut centre = 0.0_f64;
        for blob in 1..=config.blob_count {
            for _ in 0..config.points_per_blob {
                data.extend(
                    (0..config.dimensions)
                        .map(|_| centre + config.spread * standard_normal(&mut rng)),
                );
                labels.push(blob);
            }
            centre += config.separation;
        }

        Ok(Self {
            data,
            labels,
            dimensions: config.dimensions,
        })
    }

    /// Returns the dimensionality of each vector.
    #[must_use]
    pub const fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Generating blob of each point, numbered from 1.
    #[must_use]
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    fn row(&self, index: usize) -> Result<&[f64], DataSourceError> {
        let start = index
            .checked_mul(self.dimensions)
            .ok_or(DataSourceError::OutOfBounds { index })?;
        let end = start
            .checked_add(self.dimensions)
            .ok_or(DataSourceError::OutOfBounds { index })?;
        self.data
            .get(start..end)
            .ok_or(DataSourceError::OutOfBounds { index })
    }
}

fn check_scale(name: &'static str, value: f64) -> Result<(), SyntheticError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SyntheticError::InvalidScale { name, value })
    }
}

/// Box-Muller transform of two uniform draws.
#[expect(
    clippy::float_arithmetic,
    reason = "the Box-Muller transform is defined in floating point"
)]
fn standard_normal(rng: &mut SmallRng) -> f64 {
    let u1: f64 = rng.gen_range(f64::EPSILON..1.0);
    let u2: f64 = rng.gen_range(0.0..1.0);
    (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}

impl DataSource for BlobSource {
    fn len(&self) -> usize {
        self.labels.len()
    }

    #[expect(
        clippy::unnecessary_literal_bound,
        reason = "DataSource trait constrains the return type to &str"
    )]
    fn name(&self) -> &str {
        "blobs"
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "Euclidean distance requires arithmetic on f64 values"
    )]
    fn distance(&self, i: usize, j: usize) -> Result<f64, DataSourceError> {
        let left = self.row(i)?;
        let right = self.row(j)?;
        let sum_sq = left.iter().zip(right).fold(0.0_f64, |acc, (a, b)| {
            let diff = a - b;
            acc + diff * diff
        });
        Ok(sum_sq.sqrt())
    }
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "distance comparison assertions require float arithmetic"
)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn config(blob_count: usize, points_per_blob: usize, dimensions: usize) -> BlobConfig {
        BlobConfig {
            blob_count,
            points_per_blob,
            dimensions,
            spread: 0.5,
            separation: 10.0,
            seed: 42,
        }
    }

    // -- happy path: generation -------------------------------------------

    #[rstest]
    #[case::small(2, 5, 2)]
    #[case::medium(4, 25, 8)]
    #[case::large(8, 100, 16)]
    fn generates_every_point(
        #[case] blob_count: usize,
        #[case] points_per_blob: usize,
        #[case] dimensions: usize,
    ) {
        let source = BlobSource::generate(&config(blob_count, points_per_blob, dimensions))
            .expect("generation must succeed");
        assert_eq!(source.len(), blob_count * points_per_blob);
        assert_eq!(source.dimensions(), dimensions);
    }

    #[rstest]
    fn labels_are_grouped_by_blob() {
        let source = BlobSource::generate(&config(3, 2, 2)).expect("generation must succeed");
        assert_eq!(source.labels(), [1, 1, 2, 2, 3, 3]);
    }

    #[rstest]
    fn same_seed_yields_same_points() {
        let first = BlobSource::generate(&config(2, 10, 3)).expect("generation must succeed");
        let second = BlobSource::generate(&config(2, 10, 3)).expect("generation must succeed");
        assert_eq!(first.data, second.data);
    }

    #[rstest]
    fn zero_spread_places_points_on_centres() {
        let source = BlobSource::generate(&BlobConfig {
            spread: 0.0,
            separation: 3.0,
            ..config(2, 2, 4)
        })
        .expect("generation must succeed");
        let within = source.distance(0, 1).expect("distance must succeed");
        let across = source.distance(1, 2).expect("distance must succeed");
        assert!(within.abs() < f64::EPSILON, "within={within}");
        assert!((across - 6.0).abs() < 1e-12, "across={across}");
    }

    // -- happy path: distance properties ----------------------------------

    #[rstest]
    fn distance_is_symmetric() {
        let source = BlobSource::generate(&config(2, 10, 8)).expect("generation must succeed");
        let d_ij = source.distance(3, 17).expect("distance must succeed");
        let d_ji = source.distance(17, 3).expect("distance must succeed");
        assert!(
            (d_ij - d_ji).abs() < f64::EPSILON,
            "distance must be symmetric: d(3,17)={d_ij}, d(17,3)={d_ji}",
        );
    }

    #[rstest]
    fn distance_to_self_is_zero() {
        let source = BlobSource::generate(&config(2, 10, 8)).expect("generation must succeed");
        let d = source.distance(5, 5).expect("distance must succeed");
        assert!(d.abs() < f64::EPSILON, "self-distance must be zero, got {d}");
    }

    // -- unhappy path -----------------------------------------------------

    #[rstest]
    #[case::no_blobs(config(0, 5, 2), SyntheticError::ZeroBlobs)]
    #[case::no_points(config(2, 0, 2), SyntheticError::ZeroPoints)]
    #[case::no_dimensions(config(2, 5, 0), SyntheticError::ZeroDimensions)]
    #[case::negative_spread(
        BlobConfig { spread: -1.0, ..config(2, 5, 2) },
        SyntheticError::InvalidScale { name: "spread", value: -1.0 },
    )]
    #[case::infinite_separation(
        BlobConfig { separation: f64::INFINITY, ..config(2, 5, 2) },
        SyntheticError::InvalidScale { name: "separation", value: f64::INFINITY },
    )]
    fn rejects_invalid_config(#[case] bad: BlobConfig, #[case] expected: SyntheticError) {
        let err = BlobSource::generate(&bad).expect_err("generation must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn out_of_bounds_index_is_reported() {
        let source = BlobSource::generate(&config(1, 3, 2)).expect("generation must succeed");
        let err = source.distance(0, 3).expect_err("index 3 is out of bounds");
        assert_eq!(err, DataSourceError::OutOfBounds { index: 3 });
    }
}
