// neurallab-core/src/report.rs

//! Packages a finished run for the caller.

use crate::graph::Graph;
use crate::nn::parameter::ParameterStore;
use serde::Serialize;
use std::time::Duration;

/// Decimal digits kept for trained parameter values.
pub const PARAMETER_DECIMALS: i32 = 6;
/// Decimal digits kept for loss history entries.
pub const LOSS_DECIMALS: i32 = 8;
/// Decimal digits kept for the elapsed time in seconds.
pub const ELAPSED_DECIMALS: i32 = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainedWeight {
    pub id: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingReport {
    pub trained_weights: Vec<TrainedWeight>,
    pub loss_history: Vec<f64>,
    pub final_loss: f64,
    pub epochs: usize,
    /// Wall-clock seconds.
    pub elapsed: f64,
    pub device: String,
}

/// Rounds to `decimals` places. Values too large to scale are already
/// coarser than the requested precision and are returned unchanged.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    let scaled = value * scale;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / scale
}

pub fn report(
    graph: &Graph,
    params: &ParameterStore,
    loss_history: &[f64],
    epochs: usize,
    elapsed: Duration,
    backend_name: &str,
) -> TrainingReport {
    let trained_weights = params
        .iter()
        .map(|p| TrainedWeight {
            id: graph.node(p.node()).id.clone(),
            value: round_to(p.value(), PARAMETER_DECIMALS),
        })
        .collect();
    let loss_history: Vec<f64> = loss_history
        .iter()
        .map(|l| round_to(*l, LOSS_DECIMALS))
        .collect();
    let final_loss = loss_history.last().copied().unwrap_or(0.0);

    TrainingReport {
        trained_weights,
        loss_history,
        final_loss,
        epochs,
        elapsed: round_to(elapsed.as_secs_f64(), ELAPSED_DECIMALS),
        device: backend_name.to_string(),
    }
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
