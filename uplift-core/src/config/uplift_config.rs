use serde::{Deserialize, Serialize};

use super::defaults;

/// Stratification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpliftConfig {
    /// Strata smaller than this are skipped (recorded, not estimated).
    pub min_stratum_rows: usize,
    /// Estimate strata on a rayon pool. Results are identical to the
    /// sequential order either way.
    pub parallel: bool,
}

impl Default for UpliftConfig {
    fn default() -> Self {
        Self {
            min_stratum_rows: defaults::DEFAULT_MIN_STRATUM_ROWS,
            parallel: false,
        }
    }
}
