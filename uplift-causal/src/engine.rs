//! CausalPipeline: coordinates graph construction, identification,
//! estimation, refutation, and stratification for one role assignment.

use serde::Serialize;
use tracing::{info, info_span, Span};
use uplift_core::{CausalError, CausalResult, Dataset, PipelineConfig, Roles};

use crate::estimate::{self, Estimate, Estimator};
use crate::graph::{export, CausalGraph, GraphBuilder};
use crate::identify::{Estimand, Identifier};
use crate::refute::{RefutationReport, Refuter};
use crate::uplift::{SegmentResult, UpliftEngine};

/// Everything a full pipeline run produces, for the presentation layer to
/// render as it sees fit.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub estimand: Estimand,
    /// The unadjusted contrast, kept next to the adjusted estimate so the
    /// "bias corrected" delta is visible.
    pub naive_estimate: f64,
    pub estimate: Estimate,
    pub random_common_cause: RefutationReport,
    pub placebo: RefutationReport,
    /// Present when a segment column was assigned.
    pub segments: Option<SegmentResult>,
}

/// The main pipeline coordinator.
///
/// Configuration is injected at construction; instances share nothing, so
/// several pipelines can run concurrently without contending on globals.
pub struct CausalPipeline {
    roles: Roles,
    config: PipelineConfig,
    estimator: Estimator,
    refuter: Refuter,
    uplift: UpliftEngine,
    /// Instance-scoped span labeling every event this pipeline emits.
    span: Span,
}

impl CausalPipeline {
    /// Create a pipeline with default configuration.
    pub fn new(roles: Roles) -> CausalResult<Self> {
        Self::with_config(roles, PipelineConfig::default())
    }

    /// Create a pipeline with explicit configuration.
    /// Role-shape problems (collisions, duplicates) fail here, immediately.
    pub fn with_config(roles: Roles, config: PipelineConfig) -> CausalResult<Self> {
        roles.validate_shape()?;
        let span = info_span!(
            "causal_pipeline",
            treatment = %roles.treatment,
            outcome = %roles.outcome
        );
        Ok(Self {
            estimator: Estimator::new(config.estimator.clone()),
            refuter: Refuter::new(config.refutation.clone(), config.estimator.clone()),
            uplift: UpliftEngine::new(config.uplift.clone(), config.estimator.clone()),
            roles,
            config,
            span,
        })
    }

    pub fn roles(&self) -> &Roles {
        &self.roles
    }

    /// Build the assumed causal graph, exporting the diagram if configured.
    pub fn graph(&self) -> CausalResult<CausalGraph> {
        let _guard = self.span.enter();
        let graph = GraphBuilder::from_roles(&self.roles)?;
        if let Some(path) = &self.config.graph_export {
            export::write_dot(&graph, path);
        }
        Ok(graph)
    }

    /// Identify the effect on the assumed graph.
    pub fn identify(&self) -> CausalResult<Estimand> {
        let _guard = self.span.enter();
        let estimand = Identifier::identify(&self.graph()?)?;
        info!(adjustment = ?estimand.adjustment, "identified estimand");
        Ok(estimand)
    }

    /// Estimate the ATE: graph → identify → estimate.
    pub fn estimate(&self, data: &Dataset) -> CausalResult<Estimate> {
        let _guard = self.span.enter();
        self.roles.validate(data)?;
        let estimand = self.identify()?;
        let estimate = self.estimator.estimate(data, &self.roles, &estimand)?;
        info!(
            ate = estimate.value,
            method = estimate.method.name(),
            "estimated average treatment effect"
        );
        Ok(estimate)
    }

    /// The unadjusted treated-vs-control contrast.
    pub fn naive_difference(&self, data: &Dataset) -> CausalResult<f64> {
        self.roles.validate(data)?;
        estimate::naive_difference(data, &self.roles)
    }

    /// Run both refutation checks against an existing estimate.
    pub fn refute(
        &self,
        data: &Dataset,
        original: &Estimate,
    ) -> CausalResult<(RefutationReport, RefutationReport)> {
        let _guard = self.span.enter();
        self.roles.validate(data)?;
        let estimand = self.identify()?;
        self.refuter.refute_all(data, &self.roles, &estimand, original)
    }

    /// Stratify by the assigned segment column.
    pub fn stratify(&self, data: &Dataset) -> CausalResult<SegmentResult> {
        let _guard = self.span.enter();
        self.roles.validate(data)?;
        let segment = self
            .roles
            .segment
            .clone()
            .ok_or_else(|| CausalError::Configuration {
                reason: "no segment column assigned".to_string(),
            })?;
        let result = self.uplift.stratify(data, &self.roles, &segment)?;
        info!(
            segment = %segment,
            strata = result.strata.len(),
            uplift = ?result.uplift,
            "stratified estimation finished"
        );
        Ok(result)
    }

    /// The full flow: graph → identify → estimate → refute, plus
    /// stratification when a segment column is assigned.
    pub fn run(&self, data: &Dataset) -> CausalResult<PipelineReport> {
        let _guard = self.span.enter();
        self.roles.validate(data)?;

        let estimand = self.identify()?;
        let naive_estimate = estimate::naive_difference(data, &self.roles)?;
        let estimate = self.estimator.estimate(data, &self.roles, &estimand)?;
        info!(
            ate = estimate.value,
            naive = naive_estimate,
            "estimated average treatment effect"
        );

        let (random_common_cause, placebo) =
            self.refuter
                .refute_all(data, &self.roles, &estimand, &estimate)?;

        let segments = match &self.roles.segment {
            Some(segment) => Some(self.uplift.stratify(data, &self.roles, segment)?),
            None => None,
        };

        Ok(PipelineReport {
            estimand,
            naive_estimate,
            estimate,
            random_common_cause,
            placebo,
            segments,
        })
    }
}
