// neurallab-core/src/graph/mod.rs

//! Validated, index-based representation of a user-authored network graph.
//!
//! Nodes live in a dense arena addressed by [`NodeIndex`]; string ids are only
//! used at the boundary. The incoming-edge lists and the evaluation order are
//! derived once in [`Graph::build`] and never change afterwards.

pub mod node;

pub use node::{Connection, NodeKind, NodeSpec};

use crate::error::{NeuraLabError, ValidationError};
use log::{debug, warn};
use std::collections::HashMap;

/// Position of a node inside the graph arena.
pub type NodeIndex = usize;

/// Id of the node whose value is the network's prediction.
pub const DEFAULT_OUTPUT_NODE: &str = "output";

/// How strictly malformed graphs are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Reject dangling connections and any order that is not a linear
    /// extension of the edge relation.
    #[default]
    Strict,
    /// Compatibility fallback: drop dangling connections, skip unknown ids in
    /// the order, leave unordered nodes unevaluated and read any missing
    /// predecessor value as 0.
    Lenient,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphOptions {
    pub mode: ValidationMode,
    pub output_node: String,
}

impl Default for GraphOptions {
    fn default() -> Self {
        GraphOptions {
            mode: ValidationMode::Strict,
            output_node: DEFAULT_OUTPUT_NODE.to_string(),
        }
    }
}

impl GraphOptions {
    pub fn lenient() -> Self {
        GraphOptions {
            mode: ValidationMode::Lenient,
            ..GraphOptions::default()
        }
    }

    pub fn with_output_node(mut self, id: impl Into<String>) -> Self {
        self.output_node = id.into();
        self
    }
}

#[derive(Debug, Clone)]
pub struct Graph {
    nodes: Vec<NodeSpec>,
    index: HashMap<String, NodeIndex>,
    order: Vec<NodeIndex>,
    incoming: Vec<Vec<NodeIndex>>,
    /// Set for every node that is the target of at least one declared
    /// connection, including connections dropped in lenient mode.
    declared_inputs: Vec<bool>,
    output: Option<NodeIndex>,
    mode: ValidationMode,
}

impl Graph {
    /// Builds and validates a graph. Nothing is evaluated until this succeeds.
    pub fn build(
        nodes: Vec<NodeSpec>,
        connections: &[Connection],
        topo_order: &[String],
        options: &GraphOptions,
    ) -> Result<Graph, NeuraLabError> {
        let mut index = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            if index.insert(node.id.clone(), i).is_some() {
                return Err(ValidationError::DuplicateNodeId(node.id.clone()).into());
            }
        }

        let lenient = options.mode == ValidationMode::Lenient;

        let mut edges = Vec::with_capacity(connections.len());
        let mut declared_inputs = vec![false; nodes.len()];
        for conn in connections {
            if let Some(&to) = index.get(&conn.to) {
                declared_inputs[to] = true;
            }
            match (index.get(&conn.from), index.get(&conn.to)) {
                (Some(&from), Some(&to)) => edges.push((from, to)),
                (from, _) => {
                    let missing = if from.is_none() { &conn.from } else { &conn.to };
                    if lenient {
                        warn!(
                            "Dropping connection {} -> {}: node '{}' does not exist; it reads as 0",
                            conn.from, conn.to, missing
                        );
                        continue;
                    }
                    return Err(ValidationError::DanglingConnection {
                        from: conn.from.clone(),
                        to: conn.to.clone(),
                        missing: missing.clone(),
                    }
                    .into());
                }
            }
        }

        let order = resolve_order(&nodes, &index, topo_order, lenient)?;

        let mut position = vec![None; nodes.len()];
        for (pos, &idx) in order.iter().enumerate() {
            position[idx] = Some(pos);
        }
        for &(from, to) in &edges {
            let in_order = match (position[from], position[to]) {
                (Some(p_from), Some(p_to)) => p_from < p_to,
                _ => false,
            };
            if !in_order {
                if lenient {
                    warn!(
                        "Node '{}' is not evaluated before its consumer '{}'; its value reads as 0",
                        nodes[from].id, nodes[to].id
                    );
                    continue;
                }
                return Err(ValidationError::OrderViolation {
                    from: nodes[from].id.clone(),
                    to: nodes[to].id.clone(),
                }
                .into());
            }
        }

        let mut incoming = vec![Vec::new(); nodes.len()];
        for &(from, to) in &edges {
            incoming[to].push(from);
        }

        let output = index.get(&options.output_node).copied();
        if output.is_none() {
            warn!(
                "Output node '{}' not found; predictions will read as 0",
                options.output_node
            );
        }

        debug!(
            "Built graph: {} nodes, {} edges, {} ordered",
            nodes.len(),
            edges.len(),
            order.len()
        );

        Ok(Graph {
            nodes,
            index,
            order,
            incoming,
            declared_inputs,
            output,
            mode: options.mode,
        })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, idx: NodeIndex) -> &NodeSpec {
        &self.nodes[idx]
    }

    pub fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    /// Predecessors of `idx`, one entry per incoming connection.
    pub fn incoming(&self, idx: NodeIndex) -> &[NodeIndex] {
        &self.incoming[idx]
    }

    /// Whether any connection was declared into `idx`. Differs from
    /// `!incoming(idx).is_empty()` only for lenient graphs whose dangling
    /// sources were dropped.
    pub fn has_declared_inputs(&self, idx: NodeIndex) -> bool {
        self.declared_inputs[idx]
    }

    pub fn order(&self) -> &[NodeIndex] {
        &self.order
    }

    /// Nodes in evaluation order.
    pub fn iter_ordered(&self) -> impl Iterator<Item = (NodeIndex, &NodeSpec)> + '_ {
        self.order.iter().map(move |&idx| (idx, &self.nodes[idx]))
    }

    /// Weight and bias nodes in declaration order.
    pub fn trainable_nodes(&self) -> impl Iterator<Item = (NodeIndex, &NodeSpec)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.kind.is_trainable())
    }

    pub fn output(&self) -> Option<NodeIndex> {
        self.output
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }
}

/// Checks that `topo_order` is a permutation of the node ids and maps it to
/// arena indices.
fn resolve_order(
    nodes: &[NodeSpec],
    index: &HashMap<String, NodeIndex>,
    topo_order: &[String],
    lenient: bool,
) -> Result<Vec<NodeIndex>, NeuraLabError> {
    let mut seen = vec![false; nodes.len()];
    let mut order = Vec::with_capacity(nodes.len());

    for id in topo_order {
        let Some(&idx) = index.get(id) else {
            if lenient {
                warn!("Skipping unknown node '{}' in topological order", id);
                continue;
            }
            return Err(ValidationError::UnknownNodeInOrder(id.clone()).into());
        };
        if seen[idx] {
            if lenient {
                warn!("Ignoring repeated node '{}' in topological order", id);
                continue;
            }
            return Err(ValidationError::DuplicateInOrder(id.clone()).into());
        }
        seen[idx] = true;
        order.push(idx);
    }

    if let Some(missing) = seen.iter().position(|s| !s) {
        if !lenient {
            return Err(ValidationError::MissingFromOrder(nodes[missing].id.clone()).into());
        }
        for (idx, _) in seen.iter().enumerate().filter(|(_, s)| !**s) {
            warn!("Node '{}' is not in the topological order and will not be evaluated", nodes[idx].id);
        }
    }

    Ok(order)
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;
