use super::*;
use crate::graph::{Connection, GraphOptions, NodeSpec};
use crate::ops::Activation;

fn strings(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Two hidden units with shared fan-out, a multi-input weight and a bare
/// weight feeding the output.
fn mixed_graph() -> Graph {
    let nodes = vec![
        NodeSpec::input("a", "a"),
        NodeSpec::input("b", "b"),
        NodeSpec::weight("w1", 0.7),
        NodeSpec::weight("w2", -0.4),
        NodeSpec::weight("w3", 0.2),
        NodeSpec::bias("b1", 0.1),
        NodeSpec::neuron("h1", Activation::Tanh),
        NodeSpec::neuron("h2", Activation::Sigmoid),
        NodeSpec::weight("w4", 0.9),
        NodeSpec::bias("b3", 1.0),
        NodeSpec::neuron("o", Activation::Relu),
        NodeSpec::weight("w5", 0.3),
        NodeSpec::output("output"),
    ];
    let conns: Vec<Connection> = [
        ("a", "w1"),
        ("b", "w2"),
        ("a", "w3"),
        ("w1", "h1"),
        ("w2", "h1"),
        ("b1", "h1"),
        ("w3", "h2"),
        ("w2", "h2"),
        ("h1", "w4"),
        ("h2", "w4"),
        ("w4", "o"),
        ("b3", "o"),
        ("o", "output"),
        ("w5", "output"),
    ]
    .iter()
    .map(|(f, t)| Connection::new(*f, *t))
    .collect();
    let order = strings(&[
        "a", "b", "w1", "w2", "w3", "b1", "h1", "h2", "w4", "b3", "o", "w5", "output",
    ]);
    Graph::build(nodes, &conns, &order, &GraphOptions::default()).expect("valid mixed graph")
}

#[test]
fn test_tape_gradients_match_finite_differences() -> Result<(), GradCheckError> {
    let graph = mixed_graph();
    let params = ParameterStore::from_graph(&graph)?;
    let rows = vec![
        DatasetRow::new(vec![0.5, -1.0], 1.0),
        DatasetRow::new(vec![1.0, 2.0], 0.0),
        DatasetRow::new(vec![-0.3, 0.8], 2.5),
    ];
    check_gradients(&graph, &params, &rows, &strings(&["a", "b"]), 1e-6, 1e-4)
}

#[test]
fn test_relu_kink_is_reported_as_mismatch() {
    let nodes = vec![
        NodeSpec::bias("b", 0.0),
        NodeSpec::neuron("r", Activation::Relu),
        NodeSpec::output("output"),
    ];
    let conns = vec![Connection::new("b", "r"), Connection::new("r", "output")];
    let graph = Graph::build(nodes, &conns, &strings(&["b", "r", "output"]), &GraphOptions::default())
        .unwrap();
    let params = ParameterStore::from_graph(&graph).unwrap();
    let rows = vec![DatasetRow::new(vec![], 1.0)];
    let result = check_gradients(&graph, &params, &rows, &[], 1e-3, 1e-4);
    match result {
        Err(GradCheckError::GradientMismatch {
            parameter,
            analytical,
            ..
        }) => {
            assert_eq!(parameter, "b");
            assert_eq!(analytical, 0.0);
        }
        other => panic!("Expected GradientMismatch, got {:?}", other),
    }
}

#[test]
fn test_epoch_loss_is_mean_squared_error() -> Result<(), NeuraLabError> {
    let graph = mixed_graph();
    let params = ParameterStore::from_graph(&graph).unwrap();
    let labels = strings(&["a", "b"]);
    let evaluator = ForwardEvaluator::new(&graph, &labels);
    let rows = vec![DatasetRow::new(vec![0.5, -1.0], 1.0), DatasetRow::new(vec![1.0, 2.0], 0.0)];
    let p0 = evaluator.evaluate(&params, &rows[0])?.prediction;
    let p1 = evaluator.evaluate(&params, &rows[1])?.prediction;
    let expected = ((p0 - 1.0).powi(2) + p1.powi(2)) / 2.0;
    approx::assert_relative_eq!(epoch_loss(&evaluator, &params, &rows)?, expected);
    assert_eq!(epoch_loss(&evaluator, &params, &[])?, 0.0);
    Ok(())
}
