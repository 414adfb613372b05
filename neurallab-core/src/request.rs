// neurallab-core/src/request.rs

//! Training request payload and the single entry point that turns it into a
//! [`TrainingReport`].
//!
//! Field names follow the browser client's JSON (`nodes`, `connections`,
//! `trainingData`, `learningRate`, `epochs`, `inputLabels`,
//! `topologicalOrder`). Node ids may be JSON strings or integers.

use crate::dataset::DatasetRow;
use crate::device::TrainingContext;
use crate::error::{NeuraLabError, ValidationError};
use crate::graph::{
    Connection, Graph, GraphOptions, NodeKind, NodeSpec, ValidationMode, DEFAULT_OUTPUT_NODE,
};
use crate::ops::Activation;
use crate::report::{report, TrainingReport};
use crate::training::config::{DEFAULT_EPOCHS, DEFAULT_LEARNING_RATE};
use crate::training::{TrainingConfig, TrainingLoop};
use log::warn;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NodePayload {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub activation: Option<String>,
    #[serde(default)]
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConnectionPayload {
    #[serde(deserialize_with = "deserialize_id")]
    pub from: String,
    #[serde(deserialize_with = "deserialize_id")]
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainRequest {
    /// `id -> node`, kept in document order.
    #[serde(deserialize_with = "deserialize_nodes")]
    pub nodes: Vec<(String, NodePayload)>,
    #[serde(default)]
    pub connections: Vec<ConnectionPayload>,
    #[serde(default)]
    pub training_data: Vec<DatasetRow>,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    #[serde(default = "default_epochs")]
    pub epochs: usize,
    #[serde(default)]
    pub input_labels: Vec<String>,
    #[serde(deserialize_with = "deserialize_ids")]
    pub topological_order: Vec<String>,
    #[serde(default = "default_output_node")]
    pub output_node: String,
    /// Opt-in compatibility mode for malformed graphs.
    #[serde(default)]
    pub lenient: bool,
}

fn default_learning_rate() -> f64 {
    DEFAULT_LEARNING_RATE
}

fn default_epochs() -> usize {
    DEFAULT_EPOCHS
}

fn default_output_node() -> String {
    DEFAULT_OUTPUT_NODE.to_string()
}

impl TrainRequest {
    pub fn from_json(payload: &str) -> Result<Self, NeuraLabError> {
        Ok(serde_json::from_str(payload)?)
    }

    pub fn graph_options(&self) -> GraphOptions {
        GraphOptions {
            mode: if self.lenient {
                ValidationMode::Lenient
            } else {
                ValidationMode::Strict
            },
            output_node: self.output_node.clone(),
        }
    }

    pub fn config(&self) -> TrainingConfig {
        TrainingConfig::new(self.learning_rate, self.epochs)
    }

    /// Converts the node map into typed node specs. Unknown activation names
    /// are an error in strict mode and fall back to linear in lenient mode.
    pub fn node_specs(&self) -> Result<Vec<NodeSpec>, NeuraLabError> {
        let lenient = self.lenient;
        self.nodes
            .iter()
            .map(|(id, node)| -> Result<NodeSpec, NeuraLabError> {
                let kind: NodeKind = node.kind.parse()?;
                let activation = match node.activation.as_deref() {
                    None => Activation::Linear,
                    Some(name) => match name.parse::<Activation>() {
                        Ok(a) => a,
                        Err(ValidationError::UnknownActivation(_)) if lenient => {
                            warn!("Node '{}': unknown activation '{}', using linear", id, name);
                            Activation::Linear
                        }
                        Err(e) => return Err(e.into()),
                    },
                };
                Ok(NodeSpec {
                    id: id.clone(),
                    kind,
                    label: node.label.clone(),
                    activation,
                    initial_value: node.value.unwrap_or(0.0),
                })
            })
            .collect()
    }

    pub fn connections(&self) -> Vec<Connection> {
        self.connections
            .iter()
            .map(|c| Connection::new(c.from.clone(), c.to.clone()))
            .collect()
    }

    pub fn build_graph(&self) -> Result<Graph, NeuraLabError> {
        Graph::build(
            self.node_specs()?,
            &self.connections(),
            &self.topological_order,
            &self.graph_options(),
        )
    }
}

/// Validates, trains and reports one request.
pub fn train_request(
    request: &TrainRequest,
    ctx: &TrainingContext,
) -> Result<TrainingReport, NeuraLabError> {
    let graph = request.build_graph()?;
    let mut run = TrainingLoop::new(
        &graph,
        &request.training_data,
        &request.input_labels,
        request.config(),
    );
    let outcome = run.run(ctx)?;
    Ok(report(
        &graph,
        &outcome.parameters,
        &outcome.loss_history,
        outcome.epochs,
        outcome.elapsed,
        &ctx.backend().name(),
    ))
}

/// JSON in, JSON out. Failures are rendered as `{"error": "..."}`.
pub fn train_json(payload: &str, ctx: &TrainingContext) -> String {
    match TrainRequest::from_json(payload).and_then(|req| train_request(&req, ctx)) {
        Ok(report) => {
            serde_json::to_string(&report).unwrap_or_else(|e| error_json(&e.to_string()))
        }
        Err(e) => error_json(&e.to_string()),
    }
}

fn error_json(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Int(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Int(i) => i.to_string(),
        }
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(String::from)
}

fn deserialize_ids<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<RawId>::deserialize(deserializer)?;
    Ok(raw.into_iter().map(String::from).collect())
}

fn deserialize_nodes<'de, D>(deserializer: D) -> Result<Vec<(String, NodePayload)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct NodesVisitor;

    impl<'de> Visitor<'de> for NodesVisitor {
        type Value = Vec<(String, NodePayload)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of node id to node")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut nodes = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry::<String, NodePayload>()? {
                nodes.push(entry);
            }
            Ok(nodes)
        }
    }

    deserializer.deserialize_map(NodesVisitor)
}

#[cfg(test)]
#[path = "request_test.rs"]
mod tests;
