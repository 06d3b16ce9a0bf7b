use crate::{extract::PositionLabels, result::ClusterId};

/// Reachability with undefined entries replaced by twice the largest finite
/// value, or `None` when no entry is defined.
fn finite_plot(reachability: &[Option<f64>]) -> Option<Vec<f64>> {
    let ceiling = reachability
        .iter()
        .flatten()
        .copied()
        .max_by(f64::total_cmp)?;
    Some(
        reachability
            .iter()
            .map(|value| value.unwrap_or(2.0 * ceiling))
            .collect(),
    )
}

/// Labels positions for the xi extractor. Callers guarantee at least two
/// positions and validated parameters.
#[expect(
    clippy::float_arithmetic,
    reason = "steepness thresholds are relative to the previous reachability"
)]
pub(super) fn label_positions(
    reachability: &[Option<f64>],
    xi: f64,
    min_cluster_size: usize,
) -> PositionLabels {
    let Some(plot) = finite_plot(reachability) else {
        return PositionLabels::noise(reachability.len());
    };

    let mut steep_down = Vec::new();
    let mut steep_up = Vec::new();
    for (offset, pair) in plot.windows(2).enumerate() {
        let &[previous, current] = pair else { continue };
        let position = offset + 1;
        if current > previous * (1.0 + xi) {
            steep_up.push(position);
        } else if current < previous * (1.0 - xi) {
            steep_down.push(position);
        }
    }

    let mut labels = vec![ClusterId::NOISE; plot.len()];
    let mut cluster_count = 0;
    for &start in &steep_down {
        let Some(&end) = steep_up
            .get(steep_up.partition_point(|&up| up <= start)..)
            .and_then(<[usize]>::first)
        else {
            continue;
        };
        if end - start < min_cluster_size {
            continue;
        }
        cluster_count += 1;
        if let Some(span) = labels.get_mut(start..=end) {
            span.fill(ClusterId::new(cluster_count));
        }
    }

    PositionLabels {
        labels,
        cluster_count,
    }
}
