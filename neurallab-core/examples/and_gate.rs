//! # Training an AND gate
//!
//! Builds the same request the browser client sends for its "AND Gate"
//! template, checks the tape gradients against finite differences, trains
//! for 1000 epochs at learning rate 2.0 and prints the JSON report.
//!
//! Run with:
//! `RUST_LOG=info cargo run --example and_gate`

use neurallab_core::autograd::check_gradients;
use neurallab_core::logging::init_logging;
use neurallab_core::nn::ParameterStore;
use neurallab_core::{train_request, TrainRequest, TrainingContext};
use std::error::Error;

const AND_GATE: &str = r#"{
    "nodes": {
        "x1": {"type": "input", "label": "x1"},
        "x2": {"type": "input", "label": "x2"},
        "w1": {"type": "weight", "value": 0.5},
        "w2": {"type": "weight", "value": 0.5},
        "b":  {"type": "bias", "value": 0.0},
        "n":  {"type": "neuron", "activation": "sigmoid"},
        "output": {"type": "output"}
    },
    "connections": [
        {"from": "x1", "to": "w1"},
        {"from": "x2", "to": "w2"},
        {"from": "w1", "to": "n"},
        {"from": "w2", "to": "n"},
        {"from": "b",  "to": "n"},
        {"from": "n",  "to": "output"}
    ],
    "trainingData": [
        {"inputs": [0, 0], "expected": 0},
        {"inputs": [0, 1], "expected": 0},
        {"inputs": [1, 0], "expected": 0},
        {"inputs": [1, 1], "expected": 1}
    ],
    "learningRate": 2.0,
    "epochs": 1000,
    "inputLabels": ["x1", "x2"],
    "topologicalOrder": ["x1", "x2", "w1", "w2", "b", "n", "output"]
}"#;

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();

    let request = TrainRequest::from_json(AND_GATE)?;

    let graph = request.build_graph()?;
    let params = ParameterStore::from_graph(&graph)?;
    check_gradients(
        &graph,
        &params,
        &request.training_data,
        &request.input_labels,
        1e-6,
        1e-4,
    )?;
    println!("Gradient check passed for {} parameters", params.len());

    let ctx = TrainingContext::cpu();
    let report = train_request(&request, &ctx)?;

    println!("Device: {}", report.device);
    for weight in &report.trained_weights {
        println!("  {:>3} = {:>10.6}", weight.id, weight.value);
    }
    println!(
        "Loss {:.6} -> {:.6} over {} epochs ({:.3}s)",
        report.loss_history.first().copied().unwrap_or(0.0),
        report.final_loss,
        report.epochs,
        report.elapsed
    );
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
