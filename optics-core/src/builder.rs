//! Builder utilities for configuring OPTICS runs.
//!
//! Exposes the neighbourhood parameters, the neighbour-counting convention and
//! the execution strategy used to build the distance matrix. All validation
//! happens in [`OpticsBuilder::build`], before any distance is computed.

use std::num::NonZeroUsize;

use crate::{Result, error::OpticsError, optics::Optics};

/// Selects how the pairwise distance matrix is computed.
///
/// Only precomputation is affected; ordering and extraction always run on the
/// calling thread. `Auto` resolves deterministically: parallel when the
/// `parallel` feature is compiled in, sequential otherwise. Both paths produce
/// bit-identical matrices.
///
/// # Examples
/// ```
/// use optics_core::ExecutionStrategy;
///
/// let strategy = ExecutionStrategy::default();
/// assert_eq!(strategy, ExecutionStrategy::Auto);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExecutionStrategy {
    /// Let the library pick the fastest available path.
    #[default]
    Auto,
    /// Compute every row on the calling thread.
    Sequential,
    /// Compute rows on the Rayon thread pool. Requires the `parallel` feature.
    Parallel,
}

impl ExecutionStrategy {
    /// Whether this strategy resolves to the Rayon path in the current build.
    pub(crate) const fn is_parallel(self) -> bool {
        match self {
            Self::Sequential => false,
            Self::Parallel => true,
            Self::Auto => cfg!(feature = "parallel"),
        }
    }
}

/// Convention used when counting the `eps`-neighbourhood of a point against
/// `min_pts`.
///
/// # Examples
/// ```
/// use optics_core::NeighbourCounting;
///
/// assert_eq!(NeighbourCounting::default(), NeighbourCounting::ExcludeSelf);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NeighbourCounting {
    /// Only other points count. The core distance is the `min_pts`-th
    /// smallest distance to another point within `eps`.
    #[default]
    ExcludeSelf,
    /// The point counts itself at distance zero, so a point with
    /// `min_pts - 1` neighbours is already a core point.
    IncludeSelf,
}

/// Configures and constructs [`Optics`] instances.
///
/// Defaults: unbounded `eps`, `min_pts = 5`,
/// [`NeighbourCounting::ExcludeSelf`] and [`ExecutionStrategy::Auto`].
///
/// # Examples
/// ```
/// use optics_core::{ExecutionStrategy, OpticsBuilder};
///
/// let optics = OpticsBuilder::new()
///     .with_eps(0.5)
///     .with_min_pts(3)
///     .with_execution_strategy(ExecutionStrategy::Sequential)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(optics.eps(), 0.5);
/// assert_eq!(optics.min_pts().get(), 3);
/// assert_eq!(optics.execution_strategy(), ExecutionStrategy::Sequential);
/// ```
#[derive(Debug, Clone)]
pub struct OpticsBuilder {
    eps: f64,
    min_pts: usize,
    neighbour_counting: NeighbourCounting,
    execution_strategy: ExecutionStrategy,
}

impl Default for OpticsBuilder {
    fn default() -> Self {
        Self {
            eps: f64::INFINITY,
            min_pts: 5,
            neighbour_counting: NeighbourCounting::default(),
            execution_strategy: ExecutionStrategy::default(),
        }
    }
}

impl OpticsBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use optics_core::OpticsBuilder;
    ///
    /// let builder = OpticsBuilder::new();
    /// assert!(builder.eps().is_infinite());
    /// assert_eq!(builder.min_pts(), 5);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the neighbourhood radius. `f64::INFINITY` means unbounded.
    #[must_use]
    pub fn with_eps(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    /// Returns the configured neighbourhood radius.
    #[must_use]
    pub fn eps(&self) -> f64 {
        self.eps
    }

    /// Overrides the neighbour count required for a point to be core.
    ///
    /// # Examples
    /// ```
    /// use optics_core::OpticsBuilder;
    ///
    /// let builder = OpticsBuilder::new().with_min_pts(10);
    /// assert_eq!(builder.min_pts(), 10);
    /// ```
    #[must_use]
    pub fn with_min_pts(mut self, min_pts: usize) -> Self {
        self.min_pts = min_pts;
        self
    }

    /// Returns the configured `min_pts`.
    #[must_use]
    pub fn min_pts(&self) -> usize {
        self.min_pts
    }

    /// Chooses whether a point counts towards its own neighbourhood.
    #[must_use]
    pub fn with_neighbour_counting(mut self, counting: NeighbourCounting) -> Self {
        self.neighbour_counting = counting;
        self
    }

    /// Returns the configured neighbour-counting convention.
    #[must_use]
    pub fn neighbour_counting(&self) -> NeighbourCounting {
        self.neighbour_counting
    }

    /// Sets the execution strategy used for distance precomputation.
    ///
    /// # Examples
    /// ```
    /// use optics_core::{ExecutionStrategy, OpticsBuilder};
    ///
    /// let builder = OpticsBuilder::new().with_execution_strategy(ExecutionStrategy::Sequential);
    /// assert_eq!(builder.execution_strategy(), ExecutionStrategy::Sequential);
    /// ```
    #[must_use]
    pub fn with_execution_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.execution_strategy = strategy;
        self
    }

    /// Returns the currently configured execution strategy.
    #[must_use]
    pub fn execution_strategy(&self) -> ExecutionStrategy {
        self.execution_strategy
    }

    /// Validates the configuration and constructs an [`Optics`] instance.
    ///
    /// # Errors
    /// Returns [`OpticsError::InvalidMinPts`] when `min_pts` is zero,
    /// [`OpticsError::InvalidEps`] when `eps` is negative or NaN, and
    /// [`OpticsError::BackendUnavailable`] when
    /// [`ExecutionStrategy::Parallel`] is requested without the `parallel`
    /// feature.
    ///
    /// # Examples
    /// ```
    /// use optics_core::{OpticsBuilder, OpticsError};
    ///
    /// let err = OpticsBuilder::new().with_eps(-1.0).build().unwrap_err();
    /// assert!(matches!(err, OpticsError::InvalidEps { .. }));
    /// ```
    pub fn build(self) -> Result<Optics> {
        let min_pts = NonZeroUsize::new(self.min_pts).ok_or(
            OpticsError::InvalidMinPts {
                got: self.min_pts,
            },
        )?;

        if self.eps.is_nan() || self.eps < 0.0 {
            return Err(OpticsError::InvalidEps { got: self.eps });
        }

        if self.execution_strategy == ExecutionStrategy::Parallel && !cfg!(feature = "parallel") {
            return Err(OpticsError::BackendUnavailable {
                requested: self.execution_strategy,
            });
        }

        Ok(Optics::new(
            self.eps,
            min_pts,
            self.neighbour_counting,
            self.execution_strategy,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn defaults_match_documented_values() {
        let builder = OpticsBuilder::new();
        assert!(builder.eps().is_infinite());
        assert_eq!(builder.min_pts(), 5);
        assert_eq!(builder.neighbour_counting(), NeighbourCounting::ExcludeSelf);
        assert_eq!(builder.execution_strategy(), ExecutionStrategy::Auto);
    }

    #[rstest]
    #[case(-0.1)]
    #[case(f64::NAN)]
    #[case(f64::NEG_INFINITY)]
    fn rejects_invalid_eps(#[case] eps: f64) {
        let err = OpticsBuilder::new()
            .with_eps(eps)
            .build()
            .expect_err("eps must be rejected");
        assert!(matches!(err, OpticsError::InvalidEps { .. }), "{err:?}");
    }

    #[rstest]
    #[case(0.0)]
    #[case(2.5)]
    #[case(f64::INFINITY)]
    fn accepts_valid_eps(#[case] eps: f64) {
        let optics = OpticsBuilder::new()
            .with_eps(eps)
            .build()
            .expect("eps must be accepted");
        assert_eq!(optics.eps().to_bits(), eps.to_bits());
    }

    #[rstest]
    fn rejects_zero_min_pts() {
        let err = OpticsBuilder::new()
            .with_min_pts(0)
            .build()
            .expect_err("min_pts = 0 must be rejected");
        assert_eq!(err, OpticsError::InvalidMinPts { got: 0 });
    }

    #[rstest]
    #[case(ExecutionStrategy::Sequential, false)]
    #[case(ExecutionStrategy::Parallel, true)]
    #[case(ExecutionStrategy::Auto, cfg!(feature = "parallel"))]
    fn strategy_resolution(#[case] strategy: ExecutionStrategy, #[case] parallel: bool) {
        assert_eq!(strategy.is_parallel(), parallel);
    }

    #[cfg(not(feature = "parallel"))]
    #[rstest]
    fn parallel_requires_feature() {
        let err = OpticsBuilder::new()
            .with_execution_strategy(ExecutionStrategy::Parallel)
            .build()
            .expect_err("parallel strategy must be unavailable");
        assert_eq!(
            err,
            OpticsError::BackendUnavailable {
                requested: ExecutionStrategy::Parallel,
            }
        );
    }

    #[cfg(feature = "parallel")]
    #[rstest]
    fn parallel_available_with_feature() {
        let optics = OpticsBuilder::new()
            .with_execution_strategy(ExecutionStrategy::Parallel)
            .build()
            .expect("parallel strategy must be available");
        assert_eq!(optics.execution_strategy(), ExecutionStrategy::Parallel);
    }
}
