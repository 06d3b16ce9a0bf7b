//! Distance primitives for dense numeric vectors.
//!
//! The routines validate their inputs and surface detailed errors so callers
//! such as [`crate::PointSet`] can translate them into data source failures.

mod euclidean;
mod types;

pub use self::euclidean::euclidean_distance;
pub use self::types::{Distance, DistanceError, Result, Vector, VectorKind};
