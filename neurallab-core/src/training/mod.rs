// neurallab-core/src/training/mod.rs

//! Full-batch training loop.
//!
//! A run moves `Validating -> Running(epoch) -> Done`, or ends in `Failed`.
//! Each epoch records every row on a fresh tape, reduces the row losses to
//! their mean, runs one reverse pass and applies one optimizer step.

pub mod config;

pub use config::TrainingConfig;

use crate::autograd::Tape;
use crate::dataset::DatasetRow;
use crate::device::TrainingContext;
use crate::error::{NeuraLabError, NumericalStage};
use crate::forward::ForwardEvaluator;
use crate::graph::Graph;
use crate::nn::{MSELoss, ParameterStore};
use crate::optim::{Optimizer, SgdOptimizer};
use log::{debug, info, trace};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq)]
pub enum TrainingState {
    Validating,
    Running { epoch: usize },
    Done,
    Failed(NeuraLabError),
}

/// Everything a finished run hands to the reporter.
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub parameters: ParameterStore,
    pub loss_history: Vec<f64>,
    pub epochs: usize,
    pub elapsed: Duration,
}

#[derive(Debug)]
pub struct TrainingLoop<'a> {
    graph: &'a Graph,
    rows: &'a [DatasetRow],
    input_labels: &'a [String],
    config: TrainingConfig,
    state: TrainingState,
}

impl<'a> TrainingLoop<'a> {
    pub fn new(
        graph: &'a Graph,
        rows: &'a [DatasetRow],
        input_labels: &'a [String],
        config: TrainingConfig,
    ) -> Self {
        TrainingLoop {
            graph,
            rows,
            input_labels,
            config,
            state: TrainingState::Validating,
        }
    }

    pub fn state(&self) -> &TrainingState {
        &self.state
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    pub fn run(&mut self, ctx: &TrainingContext) -> Result<TrainingOutcome, NeuraLabError> {
        self.state = TrainingState::Validating;
        let params = match self.validate() {
            Ok(params) => params,
            Err(e) => {
                self.state = TrainingState::Failed(e.clone());
                return Err(e);
            }
        };

        info!(
            "Training {} parameters over {} rows for {} epochs (lr={}) on {}",
            params.len(),
            self.rows.len(),
            self.config.epochs,
            self.config.learning_rate,
            ctx.backend().name()
        );

        let started = Instant::now();
        match self.run_epochs(params) {
            Ok((parameters, loss_history)) => {
                self.state = TrainingState::Done;
                let elapsed = started.elapsed();
                info!(
                    "Training finished in {:.3}s, final loss {:?}",
                    elapsed.as_secs_f64(),
                    loss_history.last()
                );
                Ok(TrainingOutcome {
                    parameters,
                    loss_history,
                    epochs: self.config.epochs,
                    elapsed,
                })
            }
            Err(e) => {
                self.state = TrainingState::Failed(e.clone());
                Err(e)
            }
        }
    }

    fn validate(&self) -> Result<ParameterStore, NeuraLabError> {
        self.config.validate()?;
        if self.rows.is_empty() {
            return Err(NeuraLabError::EmptyDataset);
        }
        ParameterStore::from_graph(self.graph)
    }

    fn run_epochs(
        &mut self,
        mut params: ParameterStore,
    ) -> Result<(ParameterStore, Vec<f64>), NeuraLabError> {
        let evaluator = ForwardEvaluator::new(self.graph, self.input_labels);
        let mut optimizer = SgdOptimizer::new(self.config.learning_rate);
        let epochs = self.config.epochs;
        let interval = self.config.report_interval();
        let mut loss_history = Vec::with_capacity(epochs / interval + 1);

        for epoch in 0..epochs {
            self.state = TrainingState::Running { epoch };

            let loss = accumulate_epoch_gradients(&evaluator, &mut params, self.rows, epoch)?;
            optimizer.step(&mut params)?;
            if let Some(bad) = params.values().into_iter().find(|v| !v.is_finite()) {
                return Err(NeuraLabError::Numerical {
                    epoch,
                    row: None,
                    stage: NumericalStage::Update,
                    value: bad,
                });
            }
            optimizer.zero_grad(&mut params);

            if epoch % interval == 0 || epoch == epochs - 1 {
                debug!("epoch {}/{}: loss {}", epoch + 1, epochs, loss);
                loss_history.push(loss);
            }
        }

        Ok((params, loss_history))
    }
}

/// Runs the forward pass over all rows and the reverse pass of their mean
/// squared error, leaving `d(loss)/d(param)` in each parameter's gradient.
/// Returns the epoch's mean loss.
pub fn accumulate_epoch_gradients(
    evaluator: &ForwardEvaluator<'_>,
    params: &mut ParameterStore,
    rows: &[DatasetRow],
    epoch: usize,
) -> Result<f64, NeuraLabError> {
    let mse = MSELoss::new();
    let mut tape = Tape::with_capacity(rows.len() * (evaluator.graph().len() * 2 + 1) + 1);
    let mut row_losses = Vec::with_capacity(rows.len());

    for (r, row) in rows.iter().enumerate() {
        let start = tape.len();
        let recorded = evaluator.record(&mut tape, params, row)?;
        let row_loss = mse.row_loss(&mut tape, recorded.prediction, row.expected);
        // Every node value of the row counts, including ones an activation
        // would squash back into range.
        if let Some(value) = tape.entries()[start..]
            .iter()
            .map(|entry| entry.value)
            .find(|v| !v.is_finite())
        {
            return Err(NeuraLabError::Numerical {
                epoch,
                row: Some(r),
                stage: NumericalStage::Forward,
                value,
            });
        }
        row_losses.push(row_loss);
    }

    let loss = mse.reduce(&mut tape, row_losses);
    let loss_value = tape.value(loss);
    if !loss_value.is_finite() {
        return Err(NeuraLabError::Numerical {
            epoch,
            row: None,
            stage: NumericalStage::Forward,
            value: loss_value,
        });
    }
    trace!("epoch {}: tape holds {} entries", epoch, tape.len());

    params.zero_grad();
    let grads = tape.backward(loss)?;
    grads.accumulate_into(&tape, params)?;
    if let Some(bad) = params.grads().into_iter().find(|g| !g.is_finite()) {
        return Err(NeuraLabError::Numerical {
            epoch,
            row: None,
            stage: NumericalStage::Backward,
            value: bad,
        });
    }

    Ok(loss_value)
}

#[cfg(test)]
#[path = "training_test.rs"]
mod tests;
