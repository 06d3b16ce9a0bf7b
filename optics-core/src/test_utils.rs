//! Shared test utilities for `optics-core`.

use optics_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::test_runner::Config as ProptestConfig;

use crate::{datasource::DataSource, error::DataSourceError};
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

/// Builds a proptest configuration from the shared CI profile so every
/// property suite honours the same overrides.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// One-dimensional [`DataSource`] that counts distance invocations.
#[derive(Clone)]
pub(crate) struct CountingSource {
    data: Vec<f64>,
    calls: Arc<AtomicUsize>,
}

impl CountingSource {
    #[must_use]
    pub(crate) fn new(data: Vec<f64>, calls: Arc<AtomicUsize>) -> Self {
        Self { data, calls }
    }

    /// Number of distance calls observed so far.
    #[must_use]
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl DataSource for CountingSource {
    fn len(&self) -> usize {
        self.data.len()
    }

    fn name(&self) -> &str {
        "counting"
    }

    fn distance(&self, left: usize, right: usize) -> Result<f64, DataSourceError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        let a = self
            .data
            .get(left)
            .ok_or(DataSourceError::OutOfBounds { index: left })?;
        let b = self
            .data
            .get(right)
            .ok_or(DataSourceError::OutOfBounds { index: right })?;
        Ok((a - b).abs())
    }
}

/// [`DataSource`] returning a fixed distance for every distinct pair.
pub(crate) struct ConstantSource {
    len: usize,
    value: f64,
}

impl ConstantSource {
    #[must_use]
    pub(crate) const fn new(len: usize, value: f64) -> Self {
        Self { len, value }
    }
}

impl DataSource for ConstantSource {
    fn len(&self) -> usize {
        self.len
    }

    fn name(&self) -> &str {
        "constant"
    }

    fn distance(&self, left: usize, right: usize) -> Result<f64, DataSourceError> {
        for index in [left, right] {
            if index >= self.len {
                return Err(DataSourceError::OutOfBounds { index });
            }
        }
        Ok(if left == right { 0.0 } else { self.value })
    }
}
