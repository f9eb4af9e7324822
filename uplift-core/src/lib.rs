//! # uplift-core
//!
//! Foundation crate for the uplift causal-inference engine.
//! Defines the dataset model, role assignment, error taxonomy, and config.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod dataset;
pub mod errors;

// Re-export the most commonly used types at the crate root.
pub use config::{EstimatorConfig, PipelineConfig, RefutationConfig, UpliftConfig};
pub use dataset::{Column, Dataset, Roles};
pub use errors::{CausalError, CausalResult};
