// neurallab-core/src/nn/losses/mse.rs

use crate::autograd::{Tape, Var};

/// Mean squared error over a full batch, recorded on the tape so the reverse
/// pass can differentiate through it.
#[derive(Debug, Clone, Copy, Default)]
pub struct MSELoss;

impl MSELoss {
    pub fn new() -> Self {
        MSELoss
    }

    /// Records `(prediction - expected)^2` for one row.
    pub fn row_loss(&self, tape: &mut Tape, prediction: Var, expected: f64) -> Var {
        tape.squared_error(prediction, expected)
    }

    /// Records the mean of the per-row losses.
    pub fn reduce(&self, tape: &mut Tape, row_losses: Vec<Var>) -> Var {
        tape.mean(row_losses)
    }
}

#[cfg(test)]
#[path = "mse_test.rs"]
mod tests;
