//! ATE estimation behind a closed set of estimator methods.
//!
//! Every supported method is a variant of [`EstimatorMethod`] and runs
//! through the single [`Estimator::estimate`] entry point, so the full
//! method set is statically enumerable and testable.

pub mod matching;
pub mod propensity;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use uplift_core::{CausalError, CausalResult, Dataset, EstimatorConfig, Roles};

use crate::identify::Estimand;
use propensity::PropensityModel;

/// The statically enumerable estimation methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EstimatorMethod {
    /// Propensity-score matching on the adjustment set.
    PropensityScoreMatching,
    /// Unadjusted treated-vs-control mean difference. This is what matching
    /// degenerates to when the adjustment set is empty; it corrects for
    /// nothing and is reported as itself rather than hidden.
    NaiveMeanDifference,
}

impl EstimatorMethod {
    pub fn name(&self) -> &'static str {
        match self {
            EstimatorMethod::PropensityScoreMatching => "propensity_score_matching",
            EstimatorMethod::NaiveMeanDifference => "naive_mean_difference",
        }
    }
}

/// A point estimate of the average treatment effect, with provenance.
/// Created once per estimation call and never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct Estimate {
    /// The ATE, in the units of the outcome column.
    pub value: f64,
    pub method: EstimatorMethod,
    /// The adjustment set the estimate conditioned on.
    pub adjustment: Vec<String>,
    pub n_treated: usize,
    pub n_control: usize,
    pub estimated_at: DateTime<Utc>,
}

/// The estimation engine for one configuration.
pub struct Estimator {
    config: EstimatorConfig,
    method: EstimatorMethod,
}

impl Estimator {
    /// Estimator with the reference method, propensity-score matching.
    pub fn new(config: EstimatorConfig) -> Self {
        Self {
            config,
            method: EstimatorMethod::PropensityScoreMatching,
        }
    }

    /// Select a different method from the closed set.
    pub fn with_method(mut self, method: EstimatorMethod) -> Self {
        self.method = method;
        self
    }

    /// Estimate the ATE for an identified estimand.
    ///
    /// Either pool being empty is a positivity violation: there is no common
    /// support, so no estimate exists. An empty adjustment set degenerates to
    /// the naive mean difference and is reported as such.
    pub fn estimate(
        &self,
        data: &Dataset,
        roles: &Roles,
        estimand: &Estimand,
    ) -> CausalResult<Estimate> {
        let treatment = data.column(&roles.treatment)?;
        let outcome = data.column(&roles.outcome)?;

        let (treated, controls) = partition_pools(treatment);
        if treated.is_empty() || controls.is_empty() {
            return Err(CausalError::PositivityViolation {
                details: format!(
                    "no common support: {} treated and {} control units",
                    treated.len(),
                    controls.len()
                ),
            });
        }

        if self.method == EstimatorMethod::NaiveMeanDifference || estimand.adjustment.is_empty() {
            let value = pool_mean(outcome, &treated) - pool_mean(outcome, &controls);
            return Ok(Estimate {
                value,
                method: EstimatorMethod::NaiveMeanDifference,
                adjustment: Vec::new(),
                n_treated: treated.len(),
                n_control: controls.len(),
                estimated_at: Utc::now(),
            });
        }

        let model = PropensityModel::fit(data, treatment, &estimand.adjustment, &self.config)?;
        let scores = model.scores(data)?;
        let pairs = matching::match_with_replacement(&scores, &treated, &controls)?;
        let value = matching::matched_ate(outcome, &pairs);
        debug!(
            ate = value,
            n_treated = treated.len(),
            n_control = controls.len(),
            "propensity-score matching complete"
        );

        Ok(Estimate {
            value,
            method: EstimatorMethod::PropensityScoreMatching,
            adjustment: estimand.adjustment.clone(),
            n_treated: treated.len(),
            n_control: controls.len(),
            estimated_at: Utc::now(),
        })
    }
}

/// Unadjusted treated-vs-control mean difference: the "before correction"
/// contrast a dashboard shows next to the adjusted estimate.
pub fn naive_difference(data: &Dataset, roles: &Roles) -> CausalResult<f64> {
    let treatment = data.column(&roles.treatment)?;
    let outcome = data.column(&roles.outcome)?;
    let (treated, controls) = partition_pools(treatment);
    if treated.is_empty() || controls.is_empty() {
        return Err(CausalError::PositivityViolation {
            details: format!(
                "no common support: {} treated and {} control units",
                treated.len(),
                controls.len()
            ),
        });
    }
    Ok(pool_mean(outcome, &treated) - pool_mean(outcome, &controls))
}

/// Row indices of the treated and control pools, in row order.
fn partition_pools(treatment: &[f64]) -> (Vec<usize>, Vec<usize>) {
    let mut treated = Vec::new();
    let mut controls = Vec::new();
    for (i, &value) in treatment.iter().enumerate() {
        if value > 0.5 {
            treated.push(i);
        } else {
            controls.push(i);
        }
    }
    (treated, controls)
}

fn pool_mean(values: &[f64], pool: &[usize]) -> f64 {
    pool.iter().map(|&i| values[i]).sum::<f64>() / pool.len() as f64
}
