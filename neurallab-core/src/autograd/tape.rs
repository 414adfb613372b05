use super::backward_op::BackwardOp;
use crate::error::NeuraLabError;
use crate::nn::parameter::{ParamId, ParameterStore};
use crate::ops::Activation;
use log::trace;

/// Handle to a value recorded on a [`Tape`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Var(pub(crate) usize);

impl Var {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Elementary scalar operations the tape knows how to differentiate.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    /// A value with no gradient path (dataset input, literal zero).
    Constant,
    /// Read of a trainable parameter.
    Parameter(ParamId),
    Sum(Vec<Var>),
    Mul(Var, Var),
    Activation(Activation, Var),
    /// `(prediction - expected)^2`
    SquaredError { prediction: Var, expected: f64 },
    Mean(Vec<Var>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TapeEntry {
    pub op: Op,
    pub value: f64,
}

/// Wengert list of scalar operations.
///
/// Operands always refer to earlier entries, so the recording order is a
/// topological order of the computation and walking it backwards visits
/// every consumer before its operands.
#[derive(Debug, Clone, Default)]
pub struct Tape {
    entries: Vec<TapeEntry>,
}

impl Tape {
    pub fn new() -> Self {
        Tape::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Tape {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[TapeEntry] {
        &self.entries
    }

    pub fn value(&self, var: Var) -> f64 {
        self.entries[var.0].value
    }

    fn push(&mut self, op: Op, value: f64) -> Var {
        debug_assert!(op.inputs().iter().all(|v| v.0 < self.entries.len()));
        self.entries.push(TapeEntry { op, value });
        Var(self.entries.len() - 1)
    }

    pub fn constant(&mut self, value: f64) -> Var {
        self.push(Op::Constant, value)
    }

    pub fn parameter(&mut self, id: ParamId, value: f64) -> Var {
        self.push(Op::Parameter(id), value)
    }

    pub fn sum(&mut self, operands: Vec<Var>) -> Var {
        let value: f64 = operands.iter().map(|v| self.value(*v)).sum();
        self.push(Op::Sum(operands), value)
    }

    pub fn mul(&mut self, a: Var, b: Var) -> Var {
        let value = self.value(a) * self.value(b);
        self.push(Op::Mul(a, b), value)
    }

    pub fn activate(&mut self, activation: Activation, x: Var) -> Var {
        let value = activation.apply(self.value(x));
        self.push(Op::Activation(activation, x), value)
    }

    pub fn squared_error(&mut self, prediction: Var, expected: f64) -> Var {
        let diff = self.value(prediction) - expected;
        self.push(Op::SquaredError { prediction, expected }, diff * diff)
    }

    pub fn mean(&mut self, operands: Vec<Var>) -> Var {
        let value = if operands.is_empty() {
            0.0
        } else {
            operands.iter().map(|v| self.value(*v)).sum::<f64>() / operands.len() as f64
        };
        self.push(Op::Mean(operands), value)
    }

    /// Reverse sweep from `root`, seeding `d(root)/d(root) = 1`.
    pub fn backward(&self, root: Var) -> Result<Gradients, NeuraLabError> {
        if root.0 >= self.entries.len() {
            return Err(NeuraLabError::IndexOutOfBounds {
                index: root.0,
                len: self.entries.len(),
            });
        }
        trace!("Backward over {} tape entries", root.0 + 1);

        let mut adjoints = vec![0.0; root.0 + 1];
        adjoints[root.0] = 1.0;
        for i in (0..=root.0).rev() {
            let grad_output = adjoints[i];
            let entry = &self.entries[i];
            entry
                .op
                .backward(entry.value, grad_output, self, &mut |operand, grad| {
                    adjoints[operand.0] += grad;
                });
        }
        Ok(Gradients { adjoints })
    }
}

/// Adjoints `d(root)/d(entry)` produced by [`Tape::backward`].
#[derive(Debug, Clone)]
pub struct Gradients {
    adjoints: Vec<f64>,
}

impl Gradients {
    pub fn wrt(&self, var: Var) -> f64 {
        self.adjoints.get(var.0).copied().unwrap_or(0.0)
    }

    /// Adds every parameter read's adjoint into that parameter's gradient.
    /// A parameter read several times receives the sum of all contributions.
    pub fn accumulate_into(
        &self,
        tape: &Tape,
        params: &mut ParameterStore,
    ) -> Result<(), NeuraLabError> {
        for (entry, adjoint) in tape.entries.iter().zip(self.adjoints.iter()) {
            if let Op::Parameter(id) = entry.op {
                params.get_mut(id)?.acc_grad(*adjoint);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tape_test.rs"]
mod tests;
