//! Backdoor-criterion identification.
//!
//! In the fixed graph shape the declared confounders always satisfy the
//! criterion, so identification succeeds by construction. The checks still
//! run on every call: they are the auditable step that rejects a future
//! graph shape where an adjustment candidate is really a mediator or
//! collider descendant.

use serde::Serialize;
use tracing::debug;
use uplift_core::{CausalError, CausalResult};

use crate::graph::CausalGraph;

/// Target quantity of an identified estimand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EstimandTarget {
    /// Average treatment effect over the whole population.
    Ate,
}

/// An identified adjustment strategy: the covariates to condition on and the
/// target quantity. Immutable once identified.
#[derive(Debug, Clone, Serialize)]
pub struct Estimand {
    pub adjustment: Vec<String>,
    pub target: EstimandTarget,
}

impl Estimand {
    /// Replace the adjustment set, keeping the target. Used by the refuter
    /// when it augments the set with a synthetic common cause.
    pub fn with_adjustment(&self, adjustment: Vec<String>) -> Self {
        Self {
            adjustment,
            target: self.target,
        }
    }
}

/// Applies the backdoor-adjustment rule to a causal graph.
pub struct Identifier;

impl Identifier {
    /// Identify the ATE estimand, with the declared confounders as the
    /// adjustment set.
    ///
    /// The backdoor criterion for an adjustment set Z relative to (T, Y):
    /// no member of Z is a descendant of T, and Z blocks every path from T
    /// to Y that enters T through an incoming edge.
    pub fn identify(graph: &CausalGraph) -> CausalResult<Estimand> {
        let adjustment: Vec<String> = graph
            .confounder_names()
            .into_iter()
            .map(String::from)
            .collect();

        // No adjustment node may be downstream of the treatment.
        for name in &adjustment {
            if graph.is_descendant_of_treatment(name) {
                return Err(CausalError::Unidentifiable {
                    reason: format!("adjustment candidate '{name}' is a descendant of treatment"),
                });
            }
        }

        // Every backdoor path T ← p → … → Y must be blocked by the set.
        // In this topology backdoor paths start at direct parents of T, so
        // each parent that also points at the outcome must be conditioned on.
        for parent in graph.parents_of_treatment() {
            if graph.points_at_outcome(parent) && !adjustment.iter().any(|a| a == parent) {
                return Err(CausalError::Unidentifiable {
                    reason: format!("backdoor path through '{parent}' is not blocked"),
                });
            }
        }

        debug!(
            adjustment = ?adjustment,
            "backdoor criterion satisfied"
        );
        Ok(Estimand {
            adjustment,
            target: EstimandTarget::Ate,
        })
    }
}
