//! Error taxonomy for the causal pipeline.
//!
//! Structural errors (`Configuration`, `Unidentifiable`) abort a pipeline
//! call outright. `PositivityViolation` aborts a single estimation.
//! `InsufficientData` is recovered per-stratum inside the uplift engine.

/// Errors produced by the causal estimation pipeline.
#[derive(Debug, thiserror::Error)]
pub enum CausalError {
    #[error("invalid role assignment: {reason}")]
    Configuration { reason: String },

    #[error("adjustment set fails the backdoor criterion: {reason}")]
    Unidentifiable { reason: String },

    #[error("positivity violated: {details}")]
    PositivityViolation { details: String },

    #[error("insufficient data in stratum {stratum}: {reason}")]
    InsufficientData { stratum: String, reason: String },
}

pub type CausalResult<T> = std::result::Result<T, CausalError>;
