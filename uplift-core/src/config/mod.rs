//! Pipeline configuration, injected per instance rather than held in
//! process-global state.

mod estimator_config;
mod refutation_config;
mod uplift_config;

pub mod defaults;

pub use estimator_config::EstimatorConfig;
pub use refutation_config::RefutationConfig;
pub use uplift_config::UpliftConfig;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Aggregate configuration for one pipeline instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub estimator: EstimatorConfig,
    pub refutation: RefutationConfig,
    pub uplift: UpliftConfig,
    /// Where to write the causal-graph DOT diagram, if anywhere.
    /// Export is best-effort; failures never reach the estimation results.
    pub graph_export: Option<PathBuf>,
}
