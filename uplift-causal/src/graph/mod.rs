//! Fixed-shape causal graph: confounders → {treatment, outcome},
//! treatment → outcome.

mod builder;
pub mod export;

pub use builder::GraphBuilder;

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Dfs;
use serde::Serialize;

/// The role a node plays in the assumed causal structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NodeRole {
    Treatment,
    Outcome,
    Confounder,
}

/// A node in the causal graph: a dataset column with its causal role.
#[derive(Debug, Clone, Serialize)]
pub struct CausalNode {
    pub name: String,
    pub role: NodeRole,
}

/// Directed causal graph over the declared roles.
///
/// Built fresh per estimation call and never mutated after construction.
pub struct CausalGraph {
    graph: DiGraph<CausalNode, ()>,
    /// Map from column name → NodeIndex for O(1) lookup.
    node_index: HashMap<String, NodeIndex>,
    treatment: NodeIndex,
    outcome: NodeIndex,
}

impl CausalGraph {
    pub(crate) fn new(
        graph: DiGraph<CausalNode, ()>,
        node_index: HashMap<String, NodeIndex>,
        treatment: NodeIndex,
        outcome: NodeIndex,
    ) -> Self {
        Self {
            graph,
            node_index,
            treatment,
            outcome,
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn treatment_name(&self) -> &str {
        &self.graph[self.treatment].name
    }

    pub fn outcome_name(&self) -> &str {
        &self.graph[self.outcome].name
    }

    /// Confounder names in declaration order.
    pub fn confounder_names(&self) -> Vec<&str> {
        self.graph
            .node_weights()
            .filter(|node| node.role == NodeRole::Confounder)
            .map(|node| node.name.as_str())
            .collect()
    }

    /// Whether the named node is reachable from the treatment node
    /// (i.e. is a descendant of treatment).
    pub fn is_descendant_of_treatment(&self, name: &str) -> bool {
        let Some(&target) = self.node_index.get(name) else {
            return false;
        };
        if target == self.treatment {
            return false;
        }
        let mut dfs = Dfs::new(&self.graph, self.treatment);
        while let Some(node) = dfs.next(&self.graph) {
            if node == target {
                return true;
            }
        }
        false
    }

    /// Names of direct parents of the treatment node (the heads of
    /// backdoor paths in this topology).
    pub fn parents_of_treatment(&self) -> Vec<&str> {
        self.graph
            .neighbors_directed(self.treatment, petgraph::Direction::Incoming)
            .map(|idx| self.graph[idx].name.as_str())
            .collect()
    }

    /// Whether the named node has a directed edge to the outcome.
    pub fn points_at_outcome(&self, name: &str) -> bool {
        self.node_index
            .get(name)
            .is_some_and(|&idx| self.graph.contains_edge(idx, self.outcome))
    }

    pub(crate) fn inner(&self) -> &DiGraph<CausalNode, ()> {
        &self.graph
    }
}
