//! Clustering-quality metrics.
//!
//! [`silhouette_score`] rates a clustering against the distances it was
//! computed from. Adjusted Rand Index (ARI) and Normalized Mutual Information
//! (NMI) compare a labelling with ground truth.

use std::collections::HashMap;

use crate::{ids::PointId, precompute::DistanceMatrix, result::ClusteringResult};

/// ARI and NMI values computed from two labellings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClusteringQualityScore {
    /// Adjusted Rand Index in `[-1.0, 1.0]`.
    pub ari: f64,
    /// Normalized Mutual Information in `[0.0, 1.0]`.
    pub nmi: f64,
}

/// Errors raised while computing clustering-quality metrics.
#[derive(Debug, thiserror::Error, Eq, PartialEq)]
pub enum ClusteringQualityError {
    /// Two label sources covered different numbers of points.
    #[error("label length mismatch: ground_truth={ground_truth_len}, predicted={predicted_len}")]
    LabelLengthMismatch {
        /// Number of reference labels or matrix rows.
        ground_truth_len: usize,
        /// Number of predicted labels.
        predicted_len: usize,
    },
    /// The silhouette needs at least two clusters to compare.
    #[error("silhouette requires at least two clusters (got {clusters})")]
    InsufficientClusters {
        /// Clusters present in the result.
        clusters: usize,
    },
}

/// Pair counts of two labellings over the same points.
struct Contingency {
    items: usize,
    left: HashMap<usize, usize>,
    right: HashMap<usize, usize>,
    joint: HashMap<(usize, usize), usize>,
}

impl Contingency {
    fn build(left: &[usize], right: &[usize]) -> Result<Self, ClusteringQualityError> {
        if left.len() != right.len() {
            return Err(ClusteringQualityError::LabelLengthMismatch {
                ground_truth_len: left.len(),
                predicted_len: right.len(),
            });
        }
        let mut table = Self {
            items: left.len(),
            left: HashMap::new(),
            right: HashMap::new(),
            joint: HashMap::new(),
        };
        for (&l, &r) in left.iter().zip(right) {
            *table.left.entry(l).or_default() += 1;
            *table.right.entry(r).or_default() += 1;
            *table.joint.entry((l, r)).or_default() += 1;
        }
        Ok(table)
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "ARI definition requires floating-point arithmetic."
    )]
    fn adjusted_rand_index(&self) -> f64 {
        let total = pairs(self.items);
        if total == 0.0 {
            return 1.0;
        }
        let index: f64 = self.joint.values().copied().map(pairs).sum();
        let left: f64 = self.left.values().copied().map(pairs).sum();
        let right: f64 = self.right.values().copied().map(pairs).sum();

        let expected = left * right / total;
        let denominator = 0.5 * (left + right) - expected;
        if denominator == 0.0 {
            1.0
        } else {
            (index - expected) / denominator
        }
    }

    #[expect(
        clippy::cast_precision_loss,
        clippy::float_arithmetic,
        reason = "NMI definition requires floating-point arithmetic."
    )]
    fn normalized_mutual_information(&self) -> f64 {
        if self.items == 0 {
            return 1.0;
        }
        let n = self.items as f64;
        let left_entropy = entropy(&self.left, n);
        let right_entropy = entropy(&self.right, n);
        match (left_entropy == 0.0, right_entropy == 0.0) {
            (true, true) => return 1.0,
            (true, false) | (false, true) => return 0.0,
            (false, false) => {}
        }

        let mutual_information: f64 = self
            .joint
            .iter()
            .map(|(&(l, r), &count)| {
                let marginal_left = self.left.get(&l).copied().unwrap_or(count) as f64;
                let marginal_right = self.right.get(&r).copied().unwrap_or(count) as f64;
                let joint = count as f64;
                (joint / n) * ((joint * n) / (marginal_left * marginal_right)).ln()
            })
            .sum();
        mutual_information / (left_entropy * right_entropy).sqrt()
    }
}

#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "pair counts are combinatorial floating-point quantities."
)]
fn pairs(count: usize) -> f64 {
    let as_float = count as f64;
    as_float * (as_float - 1.0) / 2.0
}

#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "entropy computation requires floating-point arithmetic."
)]
fn entropy(counts: &HashMap<usize, usize>, n: f64) -> f64 {
    counts
        .values()
        .map(|&count| {
            let p = count as f64 / n;
            -p * p.ln()
        })
        .sum()
}

/// Computes Adjusted Rand Index (ARI) for two cluster labellings.
///
/// # Errors
///
/// Returns [`ClusteringQualityError::LabelLengthMismatch`] when label vectors
/// have different lengths.
pub fn adjusted_rand_index(
    ground_truth: &[usize],
    predicted: &[usize],
) -> Result<f64, ClusteringQualityError> {
    Ok(Contingency::build(ground_truth, predicted)?.adjusted_rand_index())
}

/// Computes Normalized Mutual Information (NMI) for two cluster labellings.
///
/// # Errors
///
/// Returns [`ClusteringQualityError::LabelLengthMismatch`] when label vectors
/// have different lengths.
pub fn normalized_mutual_information(
    ground_truth: &[usize],
    predicted: &[usize],
) -> Result<f64, ClusteringQualityError> {
    Ok(Contingency::build(ground_truth, predicted)?.normalized_mutual_information())
}

/// Computes ARI and NMI from a single contingency table.
///
/// # Errors
///
/// Returns [`ClusteringQualityError::LabelLengthMismatch`] when label vectors
/// have different lengths.
pub fn clustering_quality_score(
    ground_truth: &[usize],
    predicted: &[usize],
) -> Result<ClusteringQualityScore, ClusteringQualityError> {
    let table = Contingency::build(ground_truth, predicted)?;
    Ok(ClusteringQualityScore {
        ari: table.adjusted_rand_index(),
        nmi: table.normalized_mutual_information(),
    })
}

/// Mean silhouette coefficient of the clustered points of `result`.
///
/// Noise points are ignored both as subjects and as neighbours. For a
/// clustered point, `a` is its mean distance to the rest of its cluster and
/// `b` the smallest mean distance to another cluster; its coefficient is
/// `(b - a) / max(a, b)`, or zero when it is alone in its cluster.
///
/// # Errors
/// Returns [`ClusteringQualityError::LabelLengthMismatch`] when `result` and
/// `matrix` cover different numbers of points, and
/// [`ClusteringQualityError::InsufficientClusters`] when `result` has fewer
/// than two clusters.
///
/// # Examples
/// ```
/// use optics_core::{
///     ClusterId, ClusteringResult, DistanceMatrix, ExecutionStrategy, PointSet,
///     silhouette_score,
/// };
///
/// let points = PointSet::from_scalars("line", &[0.0, 1.0, 10.0, 11.0]);
/// let matrix = DistanceMatrix::compute(&points, ExecutionStrategy::Sequential)?;
/// let result = ClusteringResult::try_from_assignments(
///     [1, 1, 2, 2].map(ClusterId::new).to_vec(),
/// )?;
/// let score = silhouette_score(&matrix, &result)?;
/// assert!(score > 0.85);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "silhouette averages distances in floating point."
)]
pub fn silhouette_score(
    matrix: &DistanceMatrix,
    result: &ClusteringResult,
) -> Result<f64, ClusteringQualityError> {
    if matrix.len() != result.len() {
        return Err(ClusteringQualityError::LabelLengthMismatch {
            ground_truth_len: matrix.len(),
            predicted_len: result.len(),
        });
    }
    let clusters = result.clusters();
    if clusters.len() < 2 {
        return Err(ClusteringQualityError::InsufficientClusters {
            clusters: clusters.len(),
        });
    }

    let mean_distance = |point: usize, members: &[PointId]| -> f64 {
        let (sum, count) = members
            .iter()
            .filter(|other| other.get() != point)
            .filter_map(|other| matrix.get(point, other.get()))
            .fold((0.0, 0_usize), |(sum, count), d| (sum + d, count + 1));
        if count == 0 { 0.0 } else { sum / count as f64 }
    };

    let mut total = 0.0;
    let mut scored = 0_usize;
    for (own, members) in clusters.iter().enumerate() {
        for point in members {
            scored += 1;
            if members.len() < 2 {
                continue;
            }
            let a = mean_distance(point.get(), members);
            let b = clusters
                .iter()
                .enumerate()
                .filter(|&(other, _)| other != own)
                .map(|(_, others)| mean_distance(point.get(), others))
                .fold(f64::INFINITY, f64::min);
            let scale = a.max(b);
            if scale > 0.0 {
                total += (b - a) / scale;
            }
        }
    }
    Ok(total / scored as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        builder::ExecutionStrategy,
        point_set::PointSet,
        result::{ClusterId, ClusteringResult},
    };
    use rstest::rstest;

    fn result(raw: &[usize]) -> ClusteringResult {
        ClusteringResult::try_from_assignments(raw.iter().copied().map(ClusterId::new).collect())
            .expect("ids are contiguous")
    }

    fn matrix(values: &[f64]) -> DistanceMatrix {
        DistanceMatrix::compute(
            &PointSet::from_scalars("line", values),
            ExecutionStrategy::Sequential,
        )
        .expect("matrix must build")
    }

    #[rstest]
    fn identical_labellings_score_one() {
        let labels = [0, 0, 1, 1, 2];
        let score = clustering_quality_score(&labels, &labels).expect("lengths match");
        assert!((score.ari - 1.0).abs() < 1e-12);
        assert!((score.nmi - 1.0).abs() < 1e-12);
    }

    #[rstest]
    fn relabelled_partition_scores_one() {
        let ari = adjusted_rand_index(&[0, 0, 1, 1], &[5, 5, 3, 3]).expect("lengths match");
        let nmi = normalized_mutual_information(&[0, 0, 1, 1], &[5, 5, 3, 3])
            .expect("lengths match");
        assert!((ari - 1.0).abs() < 1e-12);
        assert!((nmi - 1.0).abs() < 1e-12);
    }

    #[rstest]
    fn single_cluster_against_split_has_zero_nmi() {
        let nmi = normalized_mutual_information(&[0, 0, 0, 0], &[0, 0, 1, 1])
            .expect("lengths match");
        assert_eq!(nmi, 0.0);
    }

    #[rstest]
    fn length_mismatch_is_reported() {
        let err = adjusted_rand_index(&[0, 1], &[0]).expect_err("lengths differ");
        assert_eq!(
            err,
            ClusteringQualityError::LabelLengthMismatch {
                ground_truth_len: 2,
                predicted_len: 1,
            }
        );
    }

    #[rstest]
    fn silhouette_of_two_tight_pairs() {
        // a = 1, b = mean(10, 11) or mean(9, 10) depending on the point.
        let score = silhouette_score(&matrix(&[0.0, 1.0, 10.0, 11.0]), &result(&[1, 1, 2, 2]))
            .expect("two clusters");
        let expected = ((1.0 - 1.0 / 10.5) + (1.0 - 1.0 / 9.5)) / 2.0;
        assert!((score - expected).abs() < 1e-12, "{score} vs {expected}");
    }

    #[rstest]
    fn silhouette_ignores_noise_and_zeroes_singletons() {
        let score = silhouette_score(
            &matrix(&[0.0, 1.0, 50.0, 10.0]),
            &result(&[1, 1, 0, 2]),
        )
        .expect("two clusters");
        // Points 0 and 1 score 1 - 1/10 and 1 - 1/9; the singleton scores 0.
        let expected = ((1.0 - 1.0 / 10.0) + (1.0 - 1.0 / 9.0)) / 3.0;
        assert!((score - expected).abs() < 1e-12, "{score} vs {expected}");
    }

    #[rstest]
    fn silhouette_needs_two_clusters() {
        let err = silhouette_score(&matrix(&[0.0, 1.0, 2.0]), &result(&[1, 1, 0]))
            .expect_err("single cluster");
        assert_eq!(
            err,
            ClusteringQualityError::InsufficientClusters { clusters: 1 }
        );
    }

    #[rstest]
    fn silhouette_checks_lengths() {
        let err = silhouette_score(&matrix(&[0.0, 1.0]), &result(&[1, 2, 2]))
            .expect_err("lengths differ");
        assert!(matches!(
            err,
            ClusteringQualityError::LabelLengthMismatch { .. }
        ));
    }
}
