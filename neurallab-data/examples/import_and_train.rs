//! # Training from an imported dataset
//!
//! Loads the AND-gate truth table from delimited text, materialises it with a
//! `SequentialSampler` and trains a single sigmoid neuron on it.
//!
//! Run with:
//! `cargo run -p neurallab-data --example import_and_train`

use neurallab_core::graph::{Connection, Graph, GraphOptions, NodeSpec};
use neurallab_core::logging::init_logging;
use neurallab_core::ops::Activation;
use neurallab_core::{report, NeuraLabError, TrainingConfig, TrainingContext, TrainingLoop};
use neurallab_data::{collect_rows, export_csv, load_dataset, ImportFormat, SequentialSampler};

const AND_GATE_CSV: &str = "x1;x2;expected\n0;0;0\n0;1;0\n1;0;0\n1;1;1\n";

fn main() -> Result<(), NeuraLabError> {
    init_logging();

    let labels = vec!["x1".to_string(), "x2".to_string()];
    let dataset = load_dataset(AND_GATE_CSV, ImportFormat::Delimited, &labels)?;
    let rows = collect_rows(&dataset, &SequentialSampler::new())?;

    let nodes = vec![
        NodeSpec::input("x1", "x1"),
        NodeSpec::input("x2", "x2"),
        NodeSpec::weight("w1", 0.5),
        NodeSpec::weight("w2", 0.5),
        NodeSpec::bias("b", 0.0),
        NodeSpec::neuron("n", Activation::Sigmoid),
        NodeSpec::output("output"),
    ];
    let conns = vec![
        Connection::new("x1", "w1"),
        Connection::new("x2", "w2"),
        Connection::new("w1", "n"),
        Connection::new("w2", "n"),
        Connection::new("b", "n"),
        Connection::new("n", "output"),
    ];
    let order: Vec<String> = ["x1", "x2", "w1", "w2", "b", "n", "output"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let graph = Graph::build(nodes, &conns, &order, &GraphOptions::default())?;

    let ctx = TrainingContext::cpu();
    let outcome =
        TrainingLoop::new(&graph, &rows, &labels, TrainingConfig::new(2.0, 1000)).run(&ctx)?;
    let summary = report(
        &graph,
        &outcome.parameters,
        &outcome.loss_history,
        outcome.epochs,
        outcome.elapsed,
        &ctx.backend().name(),
    );

    for weight in &summary.trained_weights {
        println!("{:>3} = {:>10.6}", weight.id, weight.value);
    }
    println!("final loss {:.8}", summary.final_loss);
    println!("\nDataset round-trip:\n{}", export_csv(&rows, &labels)?);
    Ok(())
}
