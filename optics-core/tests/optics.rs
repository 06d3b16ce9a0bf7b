//! Tests for the `Optics` orchestration API.

mod common;

use common::{Line, Scripted};
use optics_core::{
    DataSourceError, ExecutionStrategy, NeighbourCounting, OpticsBuilder, OpticsError, PointId,
    PointSet,
};
use optics_test_support::tracing::RecordingLayer;
use rstest::{fixture, rstest};
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

#[fixture]
fn squares() -> PointSet {
    PointSet::new(
        "squares",
        vec![
            vec![0.0, 0.0],
            vec![0.0, 1.0],
            vec![5.0, 5.0],
            vec![5.0, 6.0],
        ],
    )
}

#[rstest]
#[case::include_self(NeighbourCounting::IncludeSelf, 2)]
#[case::exclude_self(NeighbourCounting::ExcludeSelf, 1)]
fn separated_pairs_form_two_clusters(
    squares: PointSet,
    #[case] counting: NeighbourCounting,
    #[case] min_pts: usize,
) {
    let ordering = OpticsBuilder::new()
        .with_eps(2.0)
        .with_min_pts(min_pts)
        .with_neighbour_counting(counting)
        .build()
        .expect("configuration must be valid")
        .run(&squares)
        .expect("run must succeed");

    let order: Vec<usize> = ordering.order().iter().map(|p| p.get()).collect();
    assert_eq!(order, vec![0, 1, 2, 3]);
    assert_eq!(ordering.reachability(), [None, Some(1.0), None, Some(1.0)]);
    assert_eq!(ordering.run_count(), 2);

    let result = ordering.extract_dbscan(2.0).expect("threshold is valid");
    assert_eq!(result.cluster_count(), 2);
    assert_eq!(result.noise_count(), 0);
    assert_eq!(result.labels(), vec![1, 1, 2, 2]);
}

#[rstest]
fn exclusive_counting_with_two_neighbours_required_is_all_noise(squares: PointSet) {
    let ordering = OpticsBuilder::new()
        .with_eps(2.0)
        .with_min_pts(2)
        .build()
        .expect("configuration must be valid")
        .run(&squares)
        .expect("run must succeed");
    assert!(ordering.core_distances().iter().all(Option::is_none));
    let result = ordering.extract_dbscan(2.0).expect("threshold is valid");
    assert_eq!(result.cluster_count(), 0);
    assert_eq!(result.noise_count(), 4);
}

#[rstest]
fn single_point_has_undefined_distances() {
    let ordering = OpticsBuilder::new()
        .with_eps(1.0)
        .with_min_pts(1)
        .build()
        .expect("configuration must be valid")
        .run(&Line::new(vec![4.0]))
        .expect("run must succeed");
    assert_eq!(ordering.order(), [PointId::new(0)]);
    assert_eq!(ordering.reachability(), [None]);
    assert_eq!(ordering.core_distances(), [None]);
}

#[rstest]
fn zero_min_pts_is_rejected_before_running() {
    let err = OpticsBuilder::new()
        .with_min_pts(0)
        .build()
        .expect_err("min_pts = 0 must be rejected");
    assert_eq!(err, OpticsError::InvalidMinPts { got: 0 });
}

#[rstest]
fn negative_eps_is_not_clamped() {
    let err = OpticsBuilder::new()
        .with_eps(-0.5)
        .build()
        .expect_err("negative eps must be rejected");
    assert!(matches!(err, OpticsError::InvalidEps { got } if got == -0.5));
}

#[rstest]
fn unbounded_eps_reaches_every_point() {
    let ordering = OpticsBuilder::new()
        .with_min_pts(1)
        .build()
        .expect("defaults must be valid")
        .run(&Line::new(vec![0.0, 100.0, 1.0]))
        .expect("run must succeed");
    assert_eq!(ordering.run_count(), 1);
    let order: Vec<usize> = ordering.order().iter().map(|p| p.get()).collect();
    assert_eq!(order, vec![0, 2, 1]);
    assert_eq!(ordering.reachability(), [None, Some(1.0), Some(99.0)]);
}

#[rstest]
fn empty_source_is_rejected() {
    let optics = OpticsBuilder::new().build().expect("defaults must be valid");
    let err = optics
        .run(&Line::new(vec![]))
        .expect_err("empty source must fail");
    assert_eq!(
        err,
        OpticsError::EmptySource {
            data_source: Arc::from("line"),
        }
    );
}

#[rstest]
fn data_source_failures_are_wrapped() {
    let source = Scripted::new(3, |i, j| {
        if j == 2 {
            Err(DataSourceError::OutOfBounds { index: j })
        } else {
            Ok((i + j) as f64)
        }
    });
    let err = OpticsBuilder::new()
        .with_execution_strategy(ExecutionStrategy::Sequential)
        .build()
        .expect("configuration must be valid")
        .run(&source)
        .expect_err("failing source must fail");
    assert_eq!(
        err.data_source_code().map(|code| code.as_str()),
        Some("DATA_SOURCE_OUT_OF_BOUNDS")
    );
}

#[rstest]
#[case(-1.0)]
#[case(f64::NAN)]
#[case(f64::INFINITY)]
fn invalid_distances_abort_the_run(#[case] value: f64) {
    let source = Scripted::new(2, move |_, _| Ok(value));
    let err = OpticsBuilder::new()
        .build()
        .expect("defaults must be valid")
        .run(&source)
        .expect_err("invalid distance must fail");
    assert!(
        matches!(err, OpticsError::InvalidDistance { left: 0, right: 1, .. }),
        "{err:?}"
    );
}

#[rstest]
fn ragged_points_fail_at_distance_time() {
    let points = PointSet::new("ragged", vec![vec![0.0, 1.0], vec![2.0]]);
    let err = OpticsBuilder::new()
        .build()
        .expect("defaults must be valid")
        .run(&points)
        .expect_err("ragged rows must fail");
    assert!(matches!(
        err,
        OpticsError::DataSource {
            error: DataSourceError::DimensionMismatch { left: 2, right: 1 },
            ..
        }
    ));
}

#[cfg(feature = "parallel")]
#[rstest]
fn strategies_produce_identical_orderings() {
    let values: Vec<f64> = (0..64).map(|i| f64::from(i * 7 % 23) * 0.37).collect();
    let run = |strategy| {
        OpticsBuilder::new()
            .with_eps(3.0)
            .with_min_pts(3)
            .with_execution_strategy(strategy)
            .build()
            .expect("configuration must be valid")
            .run(&Line::new(values.clone()))
            .expect("run must succeed")
    };
    assert_eq!(
        run(ExecutionStrategy::Sequential),
        run(ExecutionStrategy::Parallel)
    );
}

#[rstest]
fn run_records_tracing_spans(squares: PointSet) {
    let optics = OpticsBuilder::new()
        .with_eps(2.0)
        .with_min_pts(1)
        .with_execution_strategy(ExecutionStrategy::Sequential)
        .build()
        .expect("configuration must be valid");
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    let ordering = tracing::subscriber::with_default(subscriber, || {
        let ordering = optics.run(&squares)?;
        ordering.extract_dbscan(2.0)?;
        ordering.extract_xi(0.5, 2)?;
        Ok::<_, OpticsError>(ordering)
    })
    .expect("run must succeed");
    assert_eq!(ordering.len(), 4);

    let run = layer.span("optics.run").expect("optics.run span must exist");
    assert_eq!(run.field("data_source"), Some("squares"));
    assert_eq!(run.field("points"), Some("4"));
    assert_eq!(run.field("min_pts"), Some("1"));
    assert_eq!(run.field("strategy"), Some("Sequential"));

    let precompute = layer
        .span("optics.precompute")
        .expect("optics.precompute span must exist");
    assert_eq!(precompute.field("counting"), Some("ExcludeSelf"));

    let order = layer.span("optics.order").expect("optics.order span must exist");
    assert_eq!(order.field("points"), Some("4"));

    for name in ["optics.extract_dbscan", "optics.extract_xi"] {
        assert!(layer.span(name).is_some(), "{name} span must exist");
    }

    assert!(layer.has_event(Level::INFO, "ordering completed"));
    assert!(layer.has_event(Level::INFO, "flat extraction completed"));
    assert!(layer.has_event(Level::DEBUG, "seed expansion finished"));
    let completed = layer
        .events_at(Level::INFO)
        .into_iter()
        .find(|event| event.message() == Some("ordering completed"))
        .expect("completion event must exist");
    assert_eq!(completed.field("runs"), Some("2"));
    assert_eq!(completed.parent.as_deref(), Some("optics.run"));
}

#[rstest]
fn run_logs_empty_source_warning() {
    let optics = OpticsBuilder::new().build().expect("defaults must be valid");
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    let err = tracing::subscriber::with_default(subscriber, || optics.run(&Line::new(vec![])))
        .expect_err("empty sources must fail");
    assert!(matches!(err, OpticsError::EmptySource { .. }));

    let run = layer.span("optics.run").expect("optics.run span must exist");
    assert_eq!(run.field("points"), Some("0"));
    assert!(layer.has_event(Level::WARN, "data source is empty, returning error"));
    assert!(layer.span("optics.precompute").is_none());
}
