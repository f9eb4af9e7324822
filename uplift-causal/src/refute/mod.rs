//! Robustness refutation: perturb an assumption, re-estimate, compare.
//!
//! An expectation that fails to hold is data for the caller to interpret,
//! never an error. Errors are reserved for structural failures of the
//! re-estimation itself (for example positivity on the perturbed dataset).

mod placebo;
mod random_common_cause;

use serde::Serialize;
use tracing::info;
use uplift_core::{CausalResult, Dataset, EstimatorConfig, RefutationConfig, Roles};

use crate::estimate::{Estimate, Estimator};
use crate::identify::Estimand;

/// Which refutation check produced a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RefutationCheck {
    RandomCommonCause,
    PlaceboTreatment,
}

impl RefutationCheck {
    pub fn name(&self) -> &'static str {
        match self {
            RefutationCheck::RandomCommonCause => "random_common_cause",
            RefutationCheck::PlaceboTreatment => "placebo_treatment",
        }
    }
}

/// The relationship the perturbed estimate is expected to satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Expectation {
    /// An independent extra cause must not move the estimate.
    RemainsUnchanged,
    /// A treatment unrelated to the outcome must estimate near zero.
    CollapsesToZero,
}

/// Outcome of one refutation check.
#[derive(Debug, Clone, Serialize)]
pub struct RefutationReport {
    pub check: RefutationCheck,
    pub original_estimate: f64,
    pub new_estimate: f64,
    pub expectation: Expectation,
    /// Allowed deviation, as a fraction of |original_estimate|.
    pub tolerance: f64,
    /// Whether the expectation held within tolerance.
    pub held: bool,
    pub detail: String,
}

/// Runs the refutation checks against a fitted estimate.
pub struct Refuter {
    config: RefutationConfig,
    estimator: Estimator,
}

impl Refuter {
    pub fn new(config: RefutationConfig, estimator_config: EstimatorConfig) -> Self {
        Self {
            config,
            estimator: Estimator::new(estimator_config),
        }
    }

    /// Augment the dataset with an independent noise confounder and
    /// re-estimate; the estimate should not move.
    pub fn random_common_cause(
        &self,
        data: &Dataset,
        roles: &Roles,
        estimand: &Estimand,
        original: &Estimate,
    ) -> CausalResult<RefutationReport> {
        random_common_cause::run(&self.estimator, &self.config, data, roles, estimand, original)
    }

    /// Replace the treatment with a seeded permutation of itself and
    /// re-estimate; the estimate should collapse to zero.
    pub fn placebo_treatment(
        &self,
        data: &Dataset,
        roles: &Roles,
        estimand: &Estimand,
        original: &Estimate,
    ) -> CausalResult<RefutationReport> {
        placebo::run(&self.estimator, &self.config, data, roles, estimand, original)
    }

    /// Run both checks, in report order (random common cause, placebo).
    pub fn refute_all(
        &self,
        data: &Dataset,
        roles: &Roles,
        estimand: &Estimand,
        original: &Estimate,
    ) -> CausalResult<(RefutationReport, RefutationReport)> {
        let rcc = self.random_common_cause(data, roles, estimand, original)?;
        info!(check = rcc.check.name(), held = rcc.held, "refutation check finished");
        let placebo = self.placebo_treatment(data, roles, estimand, original)?;
        info!(check = placebo.check.name(), held = placebo.held, "refutation check finished");
        Ok((rcc, placebo))
    }
}
