//! End-to-end estimation behavior on synthetic data with known ground truth.

use test_fixtures::{ExperimentSpec, experiment_roles, ACCOUNT_AGE, IS_POWER_USER, OUTCOME, TREATMENT};
use uplift_causal::{CausalPipeline, EstimatorMethod};
use uplift_core::{CausalError, Column, Dataset, Roles};

const TRUE_EFFECT: f64 = 10.0;

fn pipeline() -> CausalPipeline {
    CausalPipeline::new(experiment_roles()).unwrap()
}

// =============================================================================
// Bias recovery: adjustment must beat the naive contrast
// =============================================================================
#[test]
fn adjusted_estimate_closer_to_truth_than_naive() {
    let data = ExperimentSpec::new(5_000, 42).generate();
    let pipeline = pipeline();

    let naive = pipeline.naive_difference(&data).unwrap();
    let adjusted = pipeline.estimate(&data).unwrap();

    assert!(
        (naive - TRUE_EFFECT).abs() > (adjusted.value - TRUE_EFFECT).abs(),
        "naive {naive} should be further from {TRUE_EFFECT} than adjusted {}",
        adjusted.value
    );
}

// =============================================================================
// Recovery tolerance: matched ATE within ±2 of the true effect
// =============================================================================
#[test]
fn adjusted_estimate_within_tolerance_band() {
    let data = ExperimentSpec::new(5_000, 42).generate();
    let adjusted = pipeline().estimate(&data).unwrap();

    assert!(
        (adjusted.value - TRUE_EFFECT).abs() < 2.0,
        "adjusted {} outside ±2 of {TRUE_EFFECT}",
        adjusted.value
    );
    assert_eq!(adjusted.method, EstimatorMethod::PropensityScoreMatching);
    assert_eq!(adjusted.adjustment, vec![ACCOUNT_AGE, IS_POWER_USER]);
}

// =============================================================================
// Determinism: identical input and seeds give a bit-identical ATE
// =============================================================================
#[test]
fn estimation_is_bit_identical_across_runs() {
    let data = ExperimentSpec::new(3_000, 11).generate();
    let first = pipeline().estimate(&data).unwrap();
    let second = pipeline().estimate(&data).unwrap();

    assert_eq!(first.value.to_bits(), second.value.to_bits());
    assert_eq!(first.n_treated, second.n_treated);
    assert_eq!(first.n_control, second.n_control);
}

// =============================================================================
// Positivity: single-arm data errors instead of returning a number
// =============================================================================
#[test]
fn all_treated_dataset_is_positivity_violation() {
    let n = 200;
    let data = Dataset::from_columns(vec![
        Column::new(ACCOUNT_AGE, vec![30.0; n]),
        Column::new(IS_POWER_USER, vec![0.0; n]),
        Column::new(TREATMENT, vec![1.0; n]),
        Column::new(OUTCOME, vec![25.0; n]),
    ])
    .unwrap();

    let result = pipeline().estimate(&data);
    assert!(matches!(
        result,
        Err(CausalError::PositivityViolation { .. })
    ));
}

// =============================================================================
// Configuration errors abort immediately
// =============================================================================
#[test]
fn role_collisions_are_configuration_errors() {
    let same = Roles::new("spend", "spend", vec![]);
    assert!(matches!(
        CausalPipeline::new(same),
        Err(CausalError::Configuration { .. })
    ));

    let overlap = Roles::new("t", "y", vec!["y".to_string()]);
    assert!(matches!(
        CausalPipeline::new(overlap),
        Err(CausalError::Configuration { .. })
    ));
}

#[test]
fn unknown_columns_are_configuration_errors() {
    let data = ExperimentSpec::new(100, 1).generate();
    let roles = Roles::new(TREATMENT, OUTCOME, vec!["no_such_column".to_string()]);
    let pipeline = CausalPipeline::new(roles).unwrap();
    assert!(matches!(
        pipeline.estimate(&data),
        Err(CausalError::Configuration { .. })
    ));
}

// =============================================================================
// Empty adjustment set degenerates to the naive estimator, visibly
// =============================================================================
#[test]
fn empty_adjustment_reports_naive_method() {
    let data = ExperimentSpec::new(2_000, 5).generate();
    let roles = Roles::new(TREATMENT, OUTCOME, vec![]);
    let pipeline = CausalPipeline::new(roles).unwrap();

    let estimate = pipeline.estimate(&data).unwrap();
    assert_eq!(estimate.method, EstimatorMethod::NaiveMeanDifference);

    let naive = pipeline.naive_difference(&data).unwrap();
    assert_eq!(estimate.value.to_bits(), naive.to_bits());
}

// =============================================================================
// The full run returns every artifact at once
// =============================================================================
#[test]
fn full_run_reports_all_artifacts() {
    let data = ExperimentSpec::new(4_000, 9).generate();
    let report = pipeline().run(&data).unwrap();

    assert_eq!(report.estimand.adjustment, vec![ACCOUNT_AGE, IS_POWER_USER]);
    assert!(report.naive_estimate > report.estimate.value);
    assert!((report.estimate.value - TRUE_EFFECT).abs() < 2.0);
    assert!(report.segments.is_some());

    // Reports serialize for the presentation layer.
    let json = serde_json::to_value(&report).unwrap();
    assert!(json.get("estimate").is_some());
    assert!(json.get("placebo").is_some());
}

// =============================================================================
// Diagram export failures never affect results
// =============================================================================
#[test]
fn unwritable_diagram_path_does_not_fail_estimation() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"x").unwrap();

    let mut config = uplift_core::PipelineConfig::default();
    config.graph_export = Some(blocker.join("graph.dot"));

    let data = ExperimentSpec::new(1_000, 3).generate();
    let pipeline = CausalPipeline::with_config(experiment_roles(), config).unwrap();
    let estimate = pipeline.estimate(&data).unwrap();
    assert!(estimate.value.is_finite());
}

#[test]
fn diagram_export_writes_dot_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plots/causal_graph.dot");

    let mut config = uplift_core::PipelineConfig::default();
    config.graph_export = Some(path.clone());

    let pipeline = CausalPipeline::with_config(experiment_roles(), config).unwrap();
    pipeline.graph().unwrap();

    let contents = std::fs::read_to_string(path).unwrap();
    assert!(contents.contains(TREATMENT));
    assert!(contents.contains(OUTCOME));
}
