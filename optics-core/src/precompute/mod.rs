//! Pairwise distances and core distances computed before ordering.
//!
//! Everything here runs once per [`crate::Optics::run`] and is immutable
//! afterwards; the ordering engine only reads from it.

mod core_distance;
mod matrix;

pub use self::core_distance::core_distances;
pub use self::matrix::DistanceMatrix;
