//! # uplift-causal
//!
//! The estimation engine. Builds the assumed causal graph, identifies the
//! effect via the backdoor criterion, estimates the ATE with propensity-score
//! matching, stress-tests the estimate with refutation checks, and decomposes
//! it per segment.

pub mod engine;
pub mod estimate;
pub mod graph;
pub mod identify;
pub mod refute;
pub mod uplift;

pub use engine::{CausalPipeline, PipelineReport};
pub use estimate::{Estimate, Estimator, EstimatorMethod};
pub use graph::{CausalGraph, GraphBuilder};
pub use identify::{Estimand, EstimandTarget, Identifier};
pub use refute::{Expectation, RefutationCheck, RefutationReport, Refuter};
pub use uplift::{SegmentResult, Stratum, StratumOutcome, UpliftEngine};
