//! Placebo-treatment check.
//!
//! The treatment column is replaced with a seeded permutation of itself,
//! which preserves the marginal exactly while severing any link to the
//! outcome. The re-estimate should land near zero; anything else points at
//! residual confounding or estimator bias.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use uplift_core::{CausalResult, Dataset, RefutationConfig, Roles};

use super::{Expectation, RefutationCheck, RefutationReport};
use crate::estimate::{Estimate, Estimator};
use crate::identify::Estimand;

/// Offset separating the placebo stream from the noise-column stream.
const PLACEBO_SEED_OFFSET: u64 = 1;

pub(super) fn run(
    estimator: &Estimator,
    config: &RefutationConfig,
    data: &Dataset,
    roles: &Roles,
    estimand: &Estimand,
    original: &Estimate,
) -> CausalResult<RefutationReport> {
    let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(PLACEBO_SEED_OFFSET));
    let mut permuted = data.column(&roles.treatment)?.to_vec();
    permuted.shuffle(&mut rng);

    let placebo_data = data.replacing_column(&roles.treatment, permuted)?;
    let refit = estimator.estimate(&placebo_data, roles, estimand)?;

    let magnitude = refit.value.abs();
    let bound = config.placebo_fraction * original.value.abs();
    let held = magnitude <= bound;

    Ok(RefutationReport {
        check: RefutationCheck::PlaceboTreatment,
        original_estimate: original.value,
        new_estimate: refit.value,
        expectation: Expectation::CollapsesToZero,
        tolerance: config.placebo_fraction,
        held,
        detail: format!(
            "placebo treatment estimated {:.4} against an original of {:.4} (allowed {bound:.4})",
            refit.value, original.value
        ),
    })
}
