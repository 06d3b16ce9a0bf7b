//! Benchmark support crate for optics.
//!
//! Provides a seeded Gaussian blob data source and parameter types used by
//! the Criterion benchmarks for the two OPTICS stages: distance
//! precomputation with ordering, and cluster extraction.

pub mod error;
pub mod params;
pub mod source;
