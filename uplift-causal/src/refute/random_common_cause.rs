//! Random-common-cause check.
//!
//! A standard-normal column, independent of everything by construction,
//! joins the adjustment set. A sufficient adjustment set should shrug it
//! off; a large shift means the original set was not actually sufficient.

use rand::distributions::Distribution;
use rand::rngs::StdRng;
use rand::SeedableRng;
use statrs::distribution::Normal;
use uplift_core::{CausalError, CausalResult, Column, Dataset, RefutationConfig, Roles};

use super::{Expectation, RefutationCheck, RefutationReport};
use crate::estimate::{Estimate, Estimator};
use crate::identify::Estimand;

/// Name of the synthetic confounder column added to the working copy.
const NOISE_COLUMN: &str = "__random_common_cause";

pub(super) fn run(
    estimator: &Estimator,
    config: &RefutationConfig,
    data: &Dataset,
    roles: &Roles,
    estimand: &Estimand,
    original: &Estimate,
) -> CausalResult<RefutationReport> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let normal = Normal::new(0.0, 1.0).map_err(|e| CausalError::Configuration {
        reason: format!("noise distribution: {e}"),
    })?;
    let noise: Vec<f64> = (0..data.n_rows()).map(|_| normal.sample(&mut rng)).collect();

    let augmented = data.with_column(Column::new(NOISE_COLUMN, noise))?;
    let mut adjustment = estimand.adjustment.clone();
    adjustment.push(NOISE_COLUMN.to_string());
    let augmented_estimand = estimand.with_adjustment(adjustment);

    let refit = estimator.estimate(&augmented, roles, &augmented_estimand)?;

    let drift = (refit.value - original.value).abs();
    let bound = config.rcc_tolerance * original.value.abs();
    let held = drift <= bound;

    Ok(RefutationReport {
        check: RefutationCheck::RandomCommonCause,
        original_estimate: original.value,
        new_estimate: refit.value,
        expectation: Expectation::RemainsUnchanged,
        tolerance: config.rcc_tolerance,
        held,
        detail: format!(
            "estimate moved by {drift:.4} with an independent confounder added (allowed {bound:.4})"
        ),
    })
}
