use crate::error::ValidationError;
use crate::ops::Activation;
use std::fmt;
use std::str::FromStr;

/// The role a node plays when the graph is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Input,
    Weight,
    Bias,
    Neuron,
    Activation,
    Output,
}

impl NodeKind {
    /// Weight and bias nodes each own one trainable parameter.
    pub fn is_trainable(self) -> bool {
        matches!(self, NodeKind::Weight | NodeKind::Bias)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Input => "input",
            NodeKind::Weight => "weight",
            NodeKind::Bias => "bias",
            NodeKind::Neuron => "neuron",
            NodeKind::Activation => "activation",
            NodeKind::Output => "output",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "input" => Ok(NodeKind::Input),
            "weight" => Ok(NodeKind::Weight),
            "bias" => Ok(NodeKind::Bias),
            "neuron" => Ok(NodeKind::Neuron),
            "activation" => Ok(NodeKind::Activation),
            "output" => Ok(NodeKind::Output),
            _ => Err(ValidationError::UnknownNodeType(s.to_string())),
        }
    }
}

/// A node as declared by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSpec {
    pub id: String,
    pub kind: NodeKind,
    /// Input nodes use their label to pick a column from each dataset row.
    pub label: Option<String>,
    pub activation: Activation,
    /// Starting value of a weight/bias parameter. Ignored for other kinds.
    pub initial_value: f64,
}

impl NodeSpec {
    pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        NodeSpec {
            id: id.into(),
            kind,
            label: None,
            activation: Activation::Linear,
            initial_value: 0.0,
        }
    }

    pub fn input(id: impl Into<String>, label: impl Into<String>) -> Self {
        NodeSpec::new(id, NodeKind::Input).with_label(label)
    }

    pub fn weight(id: impl Into<String>, value: f64) -> Self {
        NodeSpec::new(id, NodeKind::Weight).with_value(value)
    }

    pub fn bias(id: impl Into<String>, value: f64) -> Self {
        NodeSpec::new(id, NodeKind::Bias).with_value(value)
    }

    pub fn neuron(id: impl Into<String>, activation: Activation) -> Self {
        NodeSpec::new(id, NodeKind::Neuron).with_activation(activation)
    }

    pub fn output(id: impl Into<String>) -> Self {
        NodeSpec::new(id, NodeKind::Output)
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_activation(mut self, activation: Activation) -> Self {
        self.activation = activation;
        self
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.initial_value = value;
        self
    }
}

/// Directed edge: `from` feeds into `to`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Connection {
    pub from: String,
    pub to: String,
}

impl Connection {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Connection {
            from: from.into(),
            to: to.into(),
        }
    }
}
