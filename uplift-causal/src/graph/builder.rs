//! Constructs the assumed causal structure from a role assignment.

use std::collections::HashMap;

use petgraph::graph::DiGraph;
use uplift_core::{CausalError, CausalResult, Roles};

use super::{CausalGraph, CausalNode, NodeRole};

/// Builds the fixed-shape graph {c → T, c → Y : c ∈ confounders} ∪ {T → Y}.
pub struct GraphBuilder;

impl GraphBuilder {
    /// Build the graph for the given roles. Pure function of its inputs.
    pub fn build(treatment: &str, outcome: &str, confounders: &[String]) -> CausalResult<CausalGraph> {
        if treatment == outcome {
            return Err(CausalError::Configuration {
                reason: format!("treatment and outcome are the same column '{treatment}'"),
            });
        }
        for confounder in confounders {
            if confounder == treatment || confounder == outcome {
                return Err(CausalError::Configuration {
                    reason: format!("confounder '{confounder}' collides with treatment or outcome"),
                });
            }
        }

        let mut graph = DiGraph::new();
        let mut node_index = HashMap::with_capacity(confounders.len() + 2);

        let treatment_idx = graph.add_node(CausalNode {
            name: treatment.to_string(),
            role: NodeRole::Treatment,
        });
        node_index.insert(treatment.to_string(), treatment_idx);

        let outcome_idx = graph.add_node(CausalNode {
            name: outcome.to_string(),
            role: NodeRole::Outcome,
        });
        node_index.insert(outcome.to_string(), outcome_idx);

        for confounder in confounders {
            if node_index.contains_key(confounder) {
                return Err(CausalError::Configuration {
                    reason: format!("confounder '{confounder}' listed twice"),
                });
            }
            let idx = graph.add_node(CausalNode {
                name: confounder.clone(),
                role: NodeRole::Confounder,
            });
            node_index.insert(confounder.clone(), idx);
            graph.add_edge(idx, treatment_idx, ());
            graph.add_edge(idx, outcome_idx, ());
        }

        graph.add_edge(treatment_idx, outcome_idx, ());

        Ok(CausalGraph::new(graph, node_index, treatment_idx, outcome_idx))
    }

    /// Convenience wrapper over a full role assignment.
    pub fn from_roles(roles: &Roles) -> CausalResult<CausalGraph> {
        Self::build(&roles.treatment, &roles.outcome, &roles.confounders)
    }
}
