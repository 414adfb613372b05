// neurallab-core/src/forward.rs

//! Graph interpreter: evaluates every node of a [`Graph`] for one dataset row.
//!
//! Evaluation always records onto a [`Tape`], so the same code path serves
//! plain inference and the training loop's reverse pass.

use crate::autograd::{Tape, Var};
use crate::dataset::DatasetRow;
use crate::error::NeuraLabError;
use crate::graph::{Graph, NodeIndex, NodeKind};
use crate::nn::parameter::ParameterStore;
use log::warn;

/// Per-node values and the prediction for one row.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Indexed by [`NodeIndex`]; `None` for nodes that were never evaluated.
    pub values: Vec<Option<f64>>,
    pub prediction: f64,
}

impl Evaluation {
    pub fn value(&self, node: NodeIndex) -> Option<f64> {
        self.values.get(node).copied().flatten()
    }
}

/// Tape handles produced while recording one row.
#[derive(Debug, Clone)]
pub struct RecordedRow {
    pub values: Vec<Option<Var>>,
    pub prediction: Var,
}

#[derive(Debug, Clone)]
pub struct ForwardEvaluator<'g> {
    graph: &'g Graph,
    /// Dataset column read by each input node, resolved once per run.
    columns: Vec<Option<usize>>,
}

impl<'g> ForwardEvaluator<'g> {
    pub fn new(graph: &'g Graph, input_labels: &[String]) -> Self {
        let mut columns = vec![None; graph.len()];
        for (idx, node) in graph.iter_ordered() {
            if node.kind != NodeKind::Input {
                continue;
            }
            let column = node
                .label
                .as_ref()
                .and_then(|label| input_labels.iter().position(|l| l == label));
            if column.is_none() {
                warn!(
                    "Input node '{}' has no matching input label; it will read as 0",
                    node.id
                );
            }
            columns[idx] = column;
        }
        ForwardEvaluator { graph, columns }
    }

    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    /// Evaluates one row without keeping the tape.
    pub fn evaluate(
        &self,
        params: &ParameterStore,
        row: &DatasetRow,
    ) -> Result<Evaluation, NeuraLabError> {
        let mut tape = Tape::with_capacity(self.graph.len() * 2);
        let recorded = self.record(&mut tape, params, row)?;
        Ok(Evaluation {
            values: recorded
                .values
                .iter()
                .map(|v| v.map(|var| tape.value(var)))
                .collect(),
            prediction: tape.value(recorded.prediction),
        })
    }

    /// Evaluates one row, appending every operation to `tape`.
    ///
    /// Fails if `params` was not built from this graph.
    pub fn record(
        &self,
        tape: &mut Tape,
        params: &ParameterStore,
        row: &DatasetRow,
    ) -> Result<RecordedRow, NeuraLabError> {
        let mut values: Vec<Option<Var>> = vec![None; self.graph.len()];

        for (idx, node) in self.graph.iter_ordered() {
            let var = match node.kind {
                NodeKind::Input => {
                    let x = self.columns[idx]
                        .and_then(|c| row.inputs.get(c).copied())
                        .unwrap_or(0.0);
                    tape.constant(x)
                }
                NodeKind::Bias => self.parameter(tape, params, idx)?,
                NodeKind::Weight => {
                    let p = self.parameter(tape, params, idx)?;
                    if !self.graph.has_declared_inputs(idx) {
                        p
                    } else {
                        let s = self.sum_incoming(tape, &values, idx);
                        tape.mul(s, p)
                    }
                }
                NodeKind::Neuron | NodeKind::Activation => {
                    let s = self.sum_incoming(tape, &values, idx);
                    tape.activate(node.activation, s)
                }
                NodeKind::Output => self.sum_incoming(tape, &values, idx),
            };
            values[idx] = Some(var);
        }

        let prediction = match self.graph.output().and_then(|o| values[o]) {
            Some(var) => var,
            None => tape.constant(0.0),
        };
        Ok(RecordedRow { values, prediction })
    }

    fn parameter(
        &self,
        tape: &mut Tape,
        params: &ParameterStore,
        idx: NodeIndex,
    ) -> Result<Var, NeuraLabError> {
        let id = params.param_for(idx).ok_or_else(|| {
            NeuraLabError::InternalError(format!(
                "node '{}' has no parameter in this store",
                self.graph.node(idx).id
            ))
        })?;
        let value = params.get(id)?.value();
        Ok(tape.parameter(id, value))
    }

    /// Sum of all predecessor values; a predecessor without a value adds 0.
    fn sum_incoming(&self, tape: &mut Tape, values: &[Option<Var>], idx: NodeIndex) -> Var {
        let operands: Vec<Var> = self
            .graph
            .incoming(idx)
            .iter()
            .filter_map(|&from| values[from])
            .collect();
        if operands.is_empty() {
            tape.constant(0.0)
        } else {
            tape.sum(operands)
        }
    }
}

/// Convenience wrapper over [`ForwardEvaluator::evaluate`].
pub fn evaluate(
    graph: &Graph,
    params: &ParameterStore,
    row: &DatasetRow,
    input_labels: &[String],
) -> Result<Evaluation, NeuraLabError> {
    ForwardEvaluator::new(graph, input_labels).evaluate(params, row)
}

#[cfg(test)]
#[path = "forward_test.rs"]
mod tests;
