use serde::{Deserialize, Serialize};

use super::defaults;

/// Refutation-check configuration.
///
/// `seed` is the base seed; each check derives its own child seed so the two
/// checks stay independent and individually reproducible.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RefutationConfig {
    pub seed: u64,
    /// Random-common-cause: allowed drift, as a fraction of |original|.
    pub rcc_tolerance: f64,
    /// Placebo: allowed magnitude, as a fraction of |original|.
    pub placebo_fraction: f64,
}

impl Default for RefutationConfig {
    fn default() -> Self {
        Self {
            seed: defaults::DEFAULT_REFUTATION_SEED,
            rcc_tolerance: defaults::DEFAULT_RCC_TOLERANCE,
            placebo_fraction: defaults::DEFAULT_PLACEBO_FRACTION,
        }
    }
}
