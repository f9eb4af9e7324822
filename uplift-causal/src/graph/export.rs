//! Best-effort DOT export of the causal graph.
//!
//! Export is a fire-and-forget side channel for the presentation layer:
//! failures (unwritable path, missing directory) are logged and swallowed,
//! and can never reach the estimation results.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use petgraph::dot::{Config, Dot};
use tracing::{debug, warn};

use super::CausalGraph;

/// Render the graph as Graphviz DOT text.
pub fn to_dot(graph: &CausalGraph) -> String {
    let dot = Dot::with_attr_getters(
        graph.inner(),
        &[Config::EdgeNoLabel, Config::NodeNoLabel],
        &|_, _| String::new(),
        &|_, (_, node)| format!("label = \"{}\" shape = box", node.name),
    );
    format!("{dot:?}")
}

/// Write the DOT rendering to `path`, swallowing any failure.
pub fn write_dot(graph: &CausalGraph, path: &Path) {
    match try_write(path, &to_dot(graph)) {
        Ok(()) => debug!(path = %path.display(), "causal graph diagram written"),
        Err(e) => warn!(path = %path.display(), error = %e, "could not write causal graph diagram"),
    }
}

fn try_write(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    // File handle is scoped to this function; closed on drop either way.
    let mut file = File::create(path)?;
    file.write_all(contents.as_bytes())
}
