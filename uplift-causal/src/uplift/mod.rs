//! Stratified re-estimation per segment value.
//!
//! Each stratum runs the full graph → identify → estimate chain on its own
//! row subset, with the segment column dropped from the adjustment set to
//! avoid conditioning on a constant. Per-stratum data failures are recorded
//! and skipped; they never abort the run, so partial results survive.

use rayon::prelude::*;
use serde::Serialize;
use tracing::warn;
use uplift_core::{CausalError, CausalResult, Dataset, EstimatorConfig, Roles, UpliftConfig};

use crate::estimate::{Estimate, Estimator};
use crate::graph::GraphBuilder;
use crate::identify::Identifier;

/// Result of estimating one stratum.
#[derive(Debug, Clone, Serialize)]
pub enum StratumOutcome {
    Estimated(Estimate),
    /// The stratum could not be estimated; the reason is kept so the caller
    /// can surface it instead of silently dropping the segment.
    Skipped { reason: String },
}

/// One segment value with its estimation outcome.
#[derive(Debug, Clone, Serialize)]
pub struct Stratum {
    /// Raw segment value this stratum was filtered on.
    pub value: f64,
    pub outcome: StratumOutcome,
}

/// Per-segment estimates, ordered by ascending raw segment value.
#[derive(Debug, Clone, Serialize)]
pub struct SegmentResult {
    pub segment_column: String,
    pub strata: Vec<Stratum>,
    /// estimate[v1] − estimate[v0], present only when exactly two strata
    /// were estimated. With more strata the mapping stands on its own and
    /// [`SegmentResult::uplift_between`] serves explicit pairs.
    pub uplift: Option<f64>,
}

impl SegmentResult {
    /// The estimate for a given segment value, if that stratum succeeded.
    pub fn estimate_for(&self, value: f64) -> Option<&Estimate> {
        self.strata.iter().find_map(|stratum| {
            if stratum.value == value {
                match &stratum.outcome {
                    StratumOutcome::Estimated(estimate) => Some(estimate),
                    StratumOutcome::Skipped { .. } => None,
                }
            } else {
                None
            }
        })
    }

    /// Uplift between two caller-chosen segment values:
    /// estimate[high] − estimate[low].
    pub fn uplift_between(&self, low: f64, high: f64) -> Option<f64> {
        Some(self.estimate_for(high)?.value - self.estimate_for(low)?.value)
    }

    fn derive_uplift(strata: &[Stratum]) -> Option<f64> {
        let estimated: Vec<f64> = strata
            .iter()
            .filter_map(|stratum| match &stratum.outcome {
                StratumOutcome::Estimated(estimate) => Some(estimate.value),
                StratumOutcome::Skipped { .. } => None,
            })
            .collect();
        match estimated.as_slice() {
            // Strata are already in ascending segment-value order.
            [first, second] => Some(second - first),
            _ => None,
        }
    }
}

/// Repeats the estimation pipeline per segment value.
pub struct UpliftEngine {
    config: UpliftConfig,
    estimator_config: EstimatorConfig,
}

impl UpliftEngine {
    pub fn new(config: UpliftConfig, estimator_config: EstimatorConfig) -> Self {
        Self {
            config,
            estimator_config,
        }
    }

    /// Estimate the treatment effect separately for every distinct value of
    /// `segment`, excluding that column from each stratum's adjustment set.
    pub fn stratify(
        &self,
        data: &Dataset,
        roles: &Roles,
        segment: &str,
    ) -> CausalResult<SegmentResult> {
        let values = data.distinct_values(segment)?;
        let adjustment = roles.confounders_without(segment);

        let run_one = |&value: &f64| -> CausalResult<Stratum> {
            let outcome = match self.estimate_stratum(data, roles, segment, value, &adjustment) {
                Ok(estimate) => StratumOutcome::Estimated(estimate),
                // Data problems local to one stratum are recorded, not fatal.
                Err(
                    error @ (CausalError::InsufficientData { .. }
                    | CausalError::PositivityViolation { .. }),
                ) => {
                    warn!(segment, value, error = %error, "stratum skipped");
                    StratumOutcome::Skipped {
                        reason: error.to_string(),
                    }
                }
                // Structural errors mean the request itself is invalid.
                Err(error) => return Err(error),
            };
            Ok(Stratum { value, outcome })
        };

        let strata: Vec<Stratum> = if self.config.parallel {
            values
                .par_iter()
                .map(run_one)
                .collect::<CausalResult<_>>()?
        } else {
            values.iter().map(run_one).collect::<CausalResult<_>>()?
        };

        let uplift = SegmentResult::derive_uplift(&strata);
        Ok(SegmentResult {
            segment_column: segment.to_string(),
            strata,
            uplift,
        })
    }

    fn estimate_stratum(
        &self,
        data: &Dataset,
        roles: &Roles,
        segment: &str,
        value: f64,
        adjustment: &[String],
    ) -> CausalResult<Estimate> {
        let subset = data.filter_by(segment, |v| v == value)?;

        if subset.n_rows() < self.config.min_stratum_rows {
            return Err(CausalError::InsufficientData {
                stratum: format!("{segment}={value}"),
                reason: format!(
                    "{} rows, minimum {}",
                    subset.n_rows(),
                    self.config.min_stratum_rows
                ),
            });
        }
        let arms = subset.distinct_values(&roles.treatment)?;
        if arms.len() < 2 {
            return Err(CausalError::InsufficientData {
                stratum: format!("{segment}={value}"),
                reason: "fewer than 2 distinct treatment values".to_string(),
            });
        }

        let graph = GraphBuilder::build(&roles.treatment, &roles.outcome, adjustment)?;
        let estimand = Identifier::identify(&graph)?;
        Estimator::new(self.estimator_config.clone()).estimate(&subset, roles, &estimand)
    }
}
