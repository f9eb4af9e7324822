//! Synthetic experiment generators for tests and benches.
//!
//! Reproduces a SaaS feature-rollout experiment with known causal structure:
//! account age and power-user status drive both feature uptake and spend, so
//! the naive treated-vs-control contrast overstates the true effect by
//! construction. The true effect is a generator parameter, which lets tests
//! assert recovery against ground truth.

use rand::distributions::Distribution;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use statrs::distribution::Normal;
use uplift_core::{Column, Dataset, Roles};

/// Treatment column name in generated datasets.
pub const TREATMENT: &str = "used_new_feature";
/// Outcome column name in generated datasets.
pub const OUTCOME: &str = "total_spend";
/// First confounder: account age in months, 1–59.
pub const ACCOUNT_AGE: &str = "account_age";
/// Second confounder: power-user flag, Bernoulli(0.3).
pub const IS_POWER_USER: &str = "is_power_user";

/// Generator parameters for the synthetic experiment.
#[derive(Debug, Clone)]
pub struct ExperimentSpec {
    pub n_samples: usize,
    pub seed: u64,
    /// True causal effect of the feature on spend.
    pub true_effect: f64,
    /// Extra effect for power users (heterogeneous treatment effect).
    /// Zero means the effect is homogeneous across segments.
    pub power_user_boost: f64,
    /// Outcome noise standard deviation.
    pub noise_std: f64,
}

impl Default for ExperimentSpec {
    fn default() -> Self {
        Self {
            n_samples: 10_000,
            seed: 42,
            true_effect: 10.0,
            power_user_boost: 0.0,
            noise_std: 5.0,
        }
    }
}

impl ExperimentSpec {
    pub fn new(n_samples: usize, seed: u64) -> Self {
        Self {
            n_samples,
            seed,
            ..Self::default()
        }
    }

    pub fn with_effect(mut self, effect: f64) -> Self {
        self.true_effect = effect;
        self
    }

    pub fn with_power_user_boost(mut self, boost: f64) -> Self {
        self.power_user_boost = boost;
        self
    }

    /// Generate the dataset. Deterministic for a given parameter set.
    ///
    /// Generative process:
    /// - account_age ~ Uniform{1..59}
    /// - is_power_user ~ Bernoulli(0.3)
    /// - P(treated) = clip(account_age / 100 + 0.4 · is_power_user, 0, 1)
    /// - spend = 0.5 · account_age + 20 · is_power_user
    ///   + (true_effect + boost · is_power_user) · treated + Normal(0, noise_std)
    ///
    /// # Panics
    /// Panics if `noise_std` is not a valid standard deviation.
    pub fn generate(&self) -> Dataset {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let noise = Normal::new(0.0, self.noise_std)
            .unwrap_or_else(|e| panic!("invalid noise_std {}: {e}", self.noise_std));

        let mut account_age = Vec::with_capacity(self.n_samples);
        let mut is_power_user = Vec::with_capacity(self.n_samples);
        let mut treatment = Vec::with_capacity(self.n_samples);
        let mut outcome = Vec::with_capacity(self.n_samples);

        for _ in 0..self.n_samples {
            let age = rng.gen_range(1..60) as f64;
            let power = if rng.gen_bool(0.3) { 1.0 } else { 0.0 };
            let p_treat = (age / 100.0 + power * 0.4).clamp(0.0, 1.0);
            let treated = if rng.gen_bool(p_treat) { 1.0 } else { 0.0 };
            let effect = self.true_effect + self.power_user_boost * power;
            let spend = age * 0.5 + power * 20.0 + treated * effect + noise.sample(&mut rng);

            account_age.push(age);
            is_power_user.push(power);
            treatment.push(treated);
            outcome.push(spend);
        }

        Dataset::from_columns(vec![
            Column::new(ACCOUNT_AGE, account_age),
            Column::new(IS_POWER_USER, is_power_user),
            Column::new(TREATMENT, treatment),
            Column::new(OUTCOME, outcome),
        ])
        .unwrap_or_else(|e| panic!("generator produced an invalid dataset: {e}"))
    }
}

/// Install a fmt subscriber honoring `RUST_LOG`, once per process, so
/// `RUST_LOG=debug cargo test` shows the pipeline events. Safe to call from
/// every test; later calls are no-ops.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// The standard role assignment for generated experiments.
pub fn experiment_roles() -> Roles {
    Roles::new(
        TREATMENT,
        OUTCOME,
        vec![ACCOUNT_AGE.to_string(), IS_POWER_USER.to_string()],
    )
    .with_segment(IS_POWER_USER)
}
