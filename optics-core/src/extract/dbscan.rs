use crate::{extract::PositionLabels, result::ClusterId};

fn within(value: Option<f64>, threshold: f64) -> bool {
    value.is_some_and(|v| v <= threshold)
}

/// Labels positions for the flat extractor. Callers guarantee at least two
/// positions and a validated threshold.
pub(super) fn label_positions(
    reachability: &[Option<f64>],
    core_distances: &[Option<f64>],
    eps_cluster: f64,
) -> PositionLabels {
    let mut current = 0;
    let labels = reachability
        .iter()
        .zip(core_distances)
        .map(|(&reach, &core)| {
            if within(reach, eps_cluster) {
                // Reachable from the previous cluster, or from a run whose
                // opening point did not qualify as core.
                if current == 0 {
                    current = 1;
                }
                ClusterId::new(current)
            } else if within(core, eps_cluster) {
                current += 1;
                ClusterId::new(current)
            } else {
                ClusterId::NOISE
            }
        })
        .collect();
    PositionLabels {
        labels,
        cluster_count: current,
    }
}
