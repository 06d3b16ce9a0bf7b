//! OPTICS density-based ordering with flat and steep-area cluster extraction.
//!
//! [`Optics::run`] computes every pairwise distance of a [`DataSource`],
//! derives core distances and produces a [`ClusterOrdering`]. The ordering is
//! then cut into a [`ClusteringResult`] with
//! [`ClusterOrdering::extract_dbscan`] or [`ClusterOrdering::extract_xi`].
//!
//! The ordering is fully deterministic. When several seeds share the smallest
//! reachability the one with the lowest original index is expanded first, and
//! new runs start from the lowest unprocessed index.
//!
//! With the `metrics` feature each successful run increments
//! `optics_runs_total` and `optics_points_ordered_total` and records
//! `optics_run_latency_seconds`.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod clustering_quality;
mod datasource;
mod distance;
mod error;
mod extract;
mod ids;
mod optics;
mod ordering;
mod point_set;
mod precompute;
mod result;

#[cfg(test)]
mod test_utils;

pub use crate::{
    builder::{ExecutionStrategy, NeighbourCounting, OpticsBuilder},
    clustering_quality::{
        ClusteringQualityError, ClusteringQualityScore, adjusted_rand_index,
        clustering_quality_score, normalized_mutual_information, silhouette_score,
    },
    datasource::DataSource,
    distance::{Distance, DistanceError, Vector, VectorKind, euclidean_distance},
    error::{DataSourceError, DataSourceErrorCode, OpticsError, OpticsErrorCode, Result},
    ids::{OrderPosition, PointId},
    optics::Optics,
    ordering::{ClusterOrdering, OrderingEntry},
    point_set::PointSet,
    precompute::{DistanceMatrix, core_distances},
    result::{ClusterId, ClusteringResult, NonContiguousClusterIds},
};
