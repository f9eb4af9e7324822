//! Logistic propensity model fitted with full-batch gradient descent.
//!
//! Features are standardized before fitting; the returned scores are plain
//! probabilities in (0, 1). The only stochastic step is the weight
//! initialization, driven by the configured seed, so a fixed seed yields a
//! bit-identical fit.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uplift_core::{CausalResult, Dataset, EstimatorConfig};

/// Fitted logistic model for P(T = 1 | adjustment columns).
#[derive(Debug, Clone)]
pub struct PropensityModel {
    columns: Vec<String>,
    weights: Vec<f64>,
    intercept: f64,
    means: Vec<f64>,
    stds: Vec<f64>,
}

impl PropensityModel {
    /// Fit the model on the given adjustment columns.
    pub fn fit(
        data: &Dataset,
        treatment: &[f64],
        adjustment: &[String],
        config: &EstimatorConfig,
    ) -> CausalResult<Self> {
        let n = treatment.len();
        let n_f = n as f64;
        let features: Vec<&[f64]> = adjustment
            .iter()
            .map(|name| data.column(name))
            .collect::<CausalResult<_>>()?;

        let (means, stds) = standardization(&features, n_f);

        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut weights: Vec<f64> = (0..adjustment.len())
            .map(|_| rng.gen_range(-0.01..0.01))
            .collect();
        let mut intercept = 0.0;

        let mut grad = vec![0.0; adjustment.len()];
        for _ in 0..config.max_iterations {
            grad.iter_mut().for_each(|g| *g = 0.0);
            let mut grad_intercept = 0.0;

            for i in 0..n {
                let mut z = intercept;
                for (j, column) in features.iter().enumerate() {
                    z += weights[j] * (column[i] - means[j]) / stds[j];
                }
                let residual = sigmoid(z) - treatment[i];
                grad_intercept += residual;
                for (j, column) in features.iter().enumerate() {
                    grad[j] += residual * (column[i] - means[j]) / stds[j];
                }
            }

            intercept -= config.learning_rate * grad_intercept / n_f;
            for j in 0..weights.len() {
                weights[j] -=
                    config.learning_rate * (grad[j] / n_f + config.l2_penalty * weights[j]);
            }
        }

        Ok(Self {
            columns: adjustment.to_vec(),
            weights,
            intercept,
            means,
            stds,
        })
    }

    /// Propensity score for every row, each in (0, 1).
    pub fn scores(&self, data: &Dataset) -> CausalResult<Vec<f64>> {
        let features: Vec<&[f64]> = self
            .columns
            .iter()
            .map(|name| data.column(name))
            .collect::<CausalResult<_>>()?;
        let n = features.first().map(|c| c.len()).unwrap_or(0);

        let mut scores = Vec::with_capacity(n);
        for i in 0..n {
            let mut z = self.intercept;
            for (j, column) in features.iter().enumerate() {
                z += self.weights[j] * (column[i] - self.means[j]) / self.stds[j];
            }
            scores.push(sigmoid(z));
        }
        Ok(scores)
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }
}

/// Per-column mean and standard deviation; constant columns get std 1.0 so
/// standardization stays finite.
fn standardization(features: &[&[f64]], n_f: f64) -> (Vec<f64>, Vec<f64>) {
    let mut means = Vec::with_capacity(features.len());
    let mut stds = Vec::with_capacity(features.len());
    for column in features {
        let mean = column.iter().sum::<f64>() / n_f;
        let variance = column.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n_f;
        let std = variance.sqrt();
        means.push(mean);
        stds.push(if std > 0.0 { std } else { 1.0 });
    }
    (means, stds)
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}
