use serde::{Deserialize, Serialize};

use super::defaults;

/// Estimator configuration.
///
/// The seed feeds only the propensity model's weight initialization; the
/// matching step is deterministic given the fitted scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    pub seed: u64,
    pub learning_rate: f64,
    pub max_iterations: usize,
    pub l2_penalty: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            seed: defaults::DEFAULT_PROPENSITY_SEED,
            learning_rate: defaults::DEFAULT_LEARNING_RATE,
            max_iterations: defaults::DEFAULT_MAX_ITERATIONS,
            l2_penalty: defaults::DEFAULT_L2_PENALTY,
        }
    }
}
