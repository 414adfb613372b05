use neurallab_core::{train_json, TrainingContext};
use serde_json::{json, Value};

// Each integration test binary compiles this module separately.
#[allow(dead_code)]
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Runs a JSON payload through the public entry point and parses the reply.
#[allow(dead_code)]
pub fn run(payload: &Value) -> Value {
    let out = train_json(&payload.to_string(), &TrainingContext::cpu());
    serde_json::from_str(&out).expect("train_json must always return JSON")
}

/// input -> weight -> output with a single input label `x`.
#[allow(dead_code)]
pub fn chain_payload(weight: f64, rows: Value, learning_rate: f64, epochs: usize) -> Value {
    json!({
        "nodes": {
            "in1": {"type": "input", "label": "x"},
            "w1": {"type": "weight", "value": weight},
            "output": {"type": "output"}
        },
        "connections": [
            {"from": "in1", "to": "w1"},
            {"from": "w1", "to": "output"}
        ],
        "trainingData": rows,
        "learningRate": learning_rate,
        "epochs": epochs,
        "inputLabels": ["x"],
        "topologicalOrder": ["in1", "w1", "output"]
    })
}

/// Two inputs, two weights and a bias into one sigmoid neuron.
#[allow(dead_code)]
pub fn and_gate_payload(learning_rate: f64, epochs: usize) -> Value {
    json!({
        "nodes": {
            "x1": {"type": "input", "label": "x1"},
            "x2": {"type": "input", "label": "x2"},
            "w1": {"type": "weight", "value": 0.5},
            "w2": {"type": "weight", "value": 0.5},
            "b": {"type": "bias", "value": 0.0},
            "n": {"type": "neuron", "activation": "sigmoid"},
            "output": {"type": "output"}
        },
        "connections": [
            {"from": "x1", "to": "w1"},
            {"from": "x2", "to": "w2"},
            {"from": "w1", "to": "n"},
            {"from": "w2", "to": "n"},
            {"from": "b", "to": "n"},
            {"from": "n", "to": "output"}
        ],
        "trainingData": [
            {"inputs": [0, 0], "expected": 0},
            {"inputs": [0, 1], "expected": 0},
            {"inputs": [1, 0], "expected": 0},
            {"inputs": [1, 1], "expected": 1}
        ],
        "learningRate": learning_rate,
        "epochs": epochs,
        "inputLabels": ["x1", "x2"],
        "topologicalOrder": ["x1", "x2", "w1", "w2", "b", "n", "output"]
    })
}
