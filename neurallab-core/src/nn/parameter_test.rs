use super::*;
use crate::graph::{Connection, GraphOptions, NodeSpec};

fn build(nodes: Vec<NodeSpec>, order: &[&str]) -> Graph {
    let order: Vec<String> = order.iter().map(|s| s.to_string()).collect();
    Graph::build(nodes, &[] as &[Connection], &order, &GraphOptions::default())
        .expect("test graph should be valid")
}

#[test]
fn test_store_seeds_initial_values() -> Result<(), NeuraLabError> {
    let graph = build(
        vec![
            NodeSpec::input("x", "x"),
            NodeSpec::weight("w", 0.25),
            NodeSpec::bias("b", -1.5),
            NodeSpec::output("output"),
        ],
        &["x", "w", "b", "output"],
    );
    let store = ParameterStore::from_graph(&graph)?;
    assert_eq!(store.len(), 2);
    assert_eq!(store.values(), vec![0.25, -1.5]);
    assert_eq!(store.param_for(graph.index_of("w").unwrap()), Some(0));
    assert_eq!(store.param_for(graph.index_of("b").unwrap()), Some(1));
    assert_eq!(store.param_for(graph.index_of("x").unwrap()), None);
    Ok(())
}

#[test]
fn test_store_without_trainables_fails() {
    let graph = build(
        vec![NodeSpec::input("x", "x"), NodeSpec::output("output")],
        &["x", "output"],
    );
    assert_eq!(
        ParameterStore::from_graph(&graph).unwrap_err(),
        NeuraLabError::NoTrainableParameters
    );
}

#[test]
fn test_grad_accumulates_and_clears() -> Result<(), NeuraLabError> {
    let graph = build(vec![NodeSpec::bias("b", 0.0)], &["b"]);
    let mut store = ParameterStore::from_graph(&graph)?;
    store.get_mut(0)?.acc_grad(1.5);
    store.get_mut(0)?.acc_grad(-0.5);
    assert_eq!(store.get(0)?.grad(), 1.0);
    store.zero_grad();
    assert_eq!(store.grads(), vec![0.0]);
    assert!(matches!(
        store.get(3),
        Err(NeuraLabError::IndexOutOfBounds { index: 3, len: 1 })
    ));
    Ok(())
}
