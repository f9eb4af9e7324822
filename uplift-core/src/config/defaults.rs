//! Default values shared by the config structs.

/// Seed for the propensity model's weight initialization.
pub const DEFAULT_PROPENSITY_SEED: u64 = 42;

/// Gradient-descent learning rate for the propensity model.
pub const DEFAULT_LEARNING_RATE: f64 = 0.5;

/// Gradient-descent iteration count for the propensity model.
pub const DEFAULT_MAX_ITERATIONS: usize = 400;

/// L2 penalty on the propensity model's weights.
pub const DEFAULT_L2_PENALTY: f64 = 1e-4;

/// Seed for the refuter's noise column and placebo permutation.
pub const DEFAULT_REFUTATION_SEED: u64 = 97;

/// Random-common-cause check: allowed estimate drift as a fraction of the
/// original estimate's magnitude.
pub const DEFAULT_RCC_TOLERANCE: f64 = 0.10;

/// Placebo check: allowed placebo-estimate magnitude as a fraction of the
/// original estimate's magnitude.
pub const DEFAULT_PLACEBO_FRACTION: f64 = 0.20;

/// Minimum rows for a stratum to be estimated at all.
pub const DEFAULT_MIN_STRATUM_ROWS: usize = 50;
