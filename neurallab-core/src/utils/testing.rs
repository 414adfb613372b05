use crate::graph::{Connection, Graph, GraphOptions, NodeSpec};

/// Panics if any pair of values differs by more than `tolerance`.
pub fn check_values_near(actual: &[f64], expected: &[f64], tolerance: f64) {
    assert_eq!(actual.len(), expected.len(), "Length mismatch");
    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        let diff = (a - e).abs();
        if diff > tolerance {
            panic!(
                "Value mismatch at index {}: actual={:?}, expected={:?}, diff={:?}, tolerance={:?}",
                i, a, e, diff, tolerance
            );
        }
    }
}

/// Builds a strict graph from string-slice shorthand. Panics if invalid.
pub fn build_graph(nodes: Vec<NodeSpec>, connections: &[(&str, &str)], order: &[&str]) -> Graph {
    let connections: Vec<Connection> = connections
        .iter()
        .map(|(from, to)| Connection::new(*from, *to))
        .collect();
    let order: Vec<String> = order.iter().map(|s| s.to_string()).collect();
    Graph::build(nodes, &connections, &order, &GraphOptions::default())
        .expect("Failed to build test graph")
}
