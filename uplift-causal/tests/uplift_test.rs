//! Stratified (per-segment) estimation on synthetic data.

use test_fixtures::{experiment_roles, ExperimentSpec, ACCOUNT_AGE, IS_POWER_USER};
use uplift_causal::{CausalPipeline, StratumOutcome};
use uplift_core::{PipelineConfig, UpliftConfig};

// =============================================================================
// Stratification consistency: the boosted segment reports the larger effect
// =============================================================================
#[test]
fn boosted_segment_reports_larger_effect() {
    // Power users get +8 on top of the base effect of 10.
    let data = ExperimentSpec::new(8_000, 42)
        .with_power_user_boost(8.0)
        .generate();
    let pipeline = CausalPipeline::new(experiment_roles()).unwrap();

    let result = pipeline.stratify(&data).unwrap();
    let standard = result.estimate_for(0.0).unwrap();
    let power = result.estimate_for(1.0).unwrap();

    assert!(
        power.value > standard.value,
        "power stratum {} should exceed standard stratum {}",
        power.value,
        standard.value
    );
    let uplift = result.uplift.unwrap();
    assert!(
        (uplift - 8.0).abs() < 3.0,
        "uplift {uplift} far from the generated boost of 8"
    );
}

// =============================================================================
// The segment column never adjusts its own stratum's model
// =============================================================================
#[test]
fn segment_column_excluded_from_stratum_adjustment() {
    let data = ExperimentSpec::new(4_000, 13).generate();
    let pipeline = CausalPipeline::new(experiment_roles()).unwrap();

    let result = pipeline.stratify(&data).unwrap();
    assert_eq!(result.segment_column, IS_POWER_USER);
    for stratum in &result.strata {
        let StratumOutcome::Estimated(estimate) = &stratum.outcome else {
            panic!("stratum {} unexpectedly skipped", stratum.value);
        };
        assert_eq!(estimate.adjustment, vec![ACCOUNT_AGE]);
    }
}

// =============================================================================
// Homogeneous effect: both strata near the shared truth
// =============================================================================
#[test]
fn homogeneous_strata_agree_with_ground_truth() {
    let data = ExperimentSpec::new(8_000, 42).generate();
    let pipeline = CausalPipeline::new(experiment_roles()).unwrap();

    let result = pipeline.stratify(&data).unwrap();
    for stratum in &result.strata {
        let StratumOutcome::Estimated(estimate) = &stratum.outcome else {
            panic!("stratum {} unexpectedly skipped", stratum.value);
        };
        assert!(
            (estimate.value - 10.0).abs() < 3.0,
            "stratum {} estimate {} far from 10",
            stratum.value,
            estimate.value
        );
    }
}

// =============================================================================
// Parallel stratification matches the sequential result exactly
// =============================================================================
#[test]
fn parallel_stratification_is_bit_identical() {
    let data = ExperimentSpec::new(4_000, 21).generate();

    let sequential = CausalPipeline::new(experiment_roles())
        .unwrap()
        .stratify(&data)
        .unwrap();

    let mut config = PipelineConfig::default();
    config.uplift = UpliftConfig {
        parallel: true,
        ..UpliftConfig::default()
    };
    let parallel = CausalPipeline::with_config(experiment_roles(), config)
        .unwrap()
        .stratify(&data)
        .unwrap();

    for (a, b) in sequential.strata.iter().zip(&parallel.strata) {
        let (StratumOutcome::Estimated(x), StratumOutcome::Estimated(y)) =
            (&a.outcome, &b.outcome)
        else {
            panic!("expected both runs to estimate every stratum");
        };
        assert_eq!(x.value.to_bits(), y.value.to_bits());
    }
}
