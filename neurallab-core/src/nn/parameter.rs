use crate::error::NeuraLabError;
use crate::graph::{Graph, NodeIndex};
use std::fmt;

/// Index of a parameter inside a [`ParameterStore`].
pub type ParamId = usize;

/// A trainable scalar backing one weight or bias node.
#[derive(Clone, PartialEq)]
pub struct Parameter {
    node: NodeIndex,
    value: f64,
    grad: f64,
}

impl Parameter {
    pub fn new(node: NodeIndex, value: f64) -> Self {
        Parameter {
            node,
            value,
            grad: 0.0,
        }
    }

    pub fn node(&self) -> NodeIndex {
        self.node
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn set_value(&mut self, value: f64) {
        self.value = value;
    }

    /// Gradient accumulated since the last `clear_grad`.
    pub fn grad(&self) -> f64 {
        self.grad
    }

    pub fn acc_grad(&mut self, delta: f64) {
        self.grad += delta;
    }

    pub fn clear_grad(&mut self) {
        self.grad = 0.0;
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parameter(node={}, value={}, grad={})",
            self.node, self.value, self.grad
        )
    }
}

/// All parameters of one training run, addressed by [`ParamId`] and by node.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterStore {
    params: Vec<Parameter>,
    by_node: Vec<Option<ParamId>>,
}

impl ParameterStore {
    /// Creates one parameter per weight/bias node, seeded with the node's
    /// initial value.
    pub fn from_graph(graph: &Graph) -> Result<Self, NeuraLabError> {
        let mut params = Vec::new();
        let mut by_node = vec![None; graph.len()];
        for (idx, node) in graph.trainable_nodes() {
            by_node[idx] = Some(params.len());
            params.push(Parameter::new(idx, node.initial_value));
        }
        if params.is_empty() {
            return Err(NeuraLabError::NoTrainableParameters);
        }
        Ok(ParameterStore { params, by_node })
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn param_for(&self, node: NodeIndex) -> Option<ParamId> {
        self.by_node.get(node).copied().flatten()
    }

    pub fn get(&self, id: ParamId) -> Result<&Parameter, NeuraLabError> {
        let len = self.params.len();
        self.params
            .get(id)
            .ok_or(NeuraLabError::IndexOutOfBounds { index: id, len })
    }

    pub fn get_mut(&mut self, id: ParamId) -> Result<&mut Parameter, NeuraLabError> {
        let len = self.params.len();
        self.params
            .get_mut(id)
            .ok_or(NeuraLabError::IndexOutOfBounds { index: id, len })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.params.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Parameter> {
        self.params.iter_mut()
    }

    pub fn values(&self) -> Vec<f64> {
        self.params.iter().map(Parameter::value).collect()
    }

    pub fn grads(&self) -> Vec<f64> {
        self.params.iter().map(Parameter::grad).collect()
    }

    pub fn zero_grad(&mut self) {
        self.params.iter_mut().for_each(Parameter::clear_grad);
    }
}

#[cfg(test)]
#[path = "parameter_test.rs"]
mod tests;
