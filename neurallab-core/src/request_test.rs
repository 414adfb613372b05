use super::*;
use approx::assert_relative_eq;
use serde_json::json;

fn scenario_payload() -> serde_json::Value {
    json!({
        "nodes": {
            "in1": {"type": "input", "label": "x", "value": 0},
            "w1": {"type": "weight", "value": 0.0},
            "output": {"type": "output", "value": 0}
        },
        "connections": [
            {"from": "in1", "to": "w1"},
            {"from": "w1", "to": "output"}
        ],
        "trainingData": [{"inputs": [2], "expected": 4}],
        "learningRate": 0.1,
        "epochs": 1,
        "inputLabels": ["x"],
        "topologicalOrder": ["in1", "w1", "output"]
    })
}

#[test]
fn test_parse_client_payload() -> Result<(), NeuraLabError> {
    let request = TrainRequest::from_json(&scenario_payload().to_string())?;
    assert_eq!(request.nodes.len(), 3);
    assert_eq!(request.learning_rate, 0.1);
    assert_eq!(request.epochs, 1);
    assert_eq!(request.output_node, "output");
    assert!(!request.lenient);
    assert_eq!(request.training_data, vec![DatasetRow::new(vec![2.0], 4.0)]);
    Ok(())
}

#[test]
fn test_defaults_apply() -> Result<(), NeuraLabError> {
    let payload = json!({
        "nodes": {"b": {"type": "bias", "value": 1.0}},
        "topologicalOrder": ["b"]
    });
    let request = TrainRequest::from_json(&payload.to_string())?;
    assert_eq!(request.config(), TrainingConfig::default());
    assert!(request.training_data.is_empty());
    Ok(())
}

#[test]
fn test_nodes_keep_document_order() -> Result<(), NeuraLabError> {
    let raw = r#"{"nodes":{"zeta":{"type":"weight","value":1},"alpha":{"type":"bias","value":2}},"topologicalOrder":["zeta","alpha"]}"#;
    let request = TrainRequest::from_json(raw)?;
    let ids: Vec<&str> = request.nodes.iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(ids, vec!["zeta", "alpha"]);
    Ok(())
}

#[test]
fn test_integer_ids_accepted() -> Result<(), NeuraLabError> {
    let raw = r#"{
        "nodes": {"1": {"type": "bias", "value": 0.5}, "2": {"type": "output"}},
        "connections": [{"from": 1, "to": "2"}],
        "topologicalOrder": [1, 2],
        "outputNode": "2",
        "trainingData": [{"inputs": [], "expected": 1}],
        "epochs": 0
    }"#;
    let request = TrainRequest::from_json(raw)?;
    assert_eq!(request.connections()[0], Connection::new("1", "2"));
    assert_eq!(request.topological_order, vec!["1".to_string(), "2".to_string()]);
    let graph = request.build_graph()?;
    assert_eq!(graph.output(), graph.index_of("2"));
    Ok(())
}

#[test]
fn test_train_request_scenario() -> Result<(), NeuraLabError> {
    let request = TrainRequest::from_json(&scenario_payload().to_string())?;
    let ctx = TrainingContext::cpu();
    let report = train_request(&request, &ctx)?;
    assert_eq!(report.trained_weights.len(), 1);
    assert_eq!(report.trained_weights[0].id, "w1");
    assert_relative_eq!(report.trained_weights[0].value, 1.6);
    assert_eq!(report.loss_history, vec![16.0]);
    assert_eq!(report.final_loss, 16.0);
    assert_eq!(report.epochs, 1);
    assert_eq!(report.device, "cpu");
    Ok(())
}

#[test]
fn test_unknown_activation_strict_vs_lenient() -> Result<(), NeuraLabError> {
    let mut payload = json!({
        "nodes": {
            "b": {"type": "bias", "value": 1.0},
            "n": {"type": "neuron", "activation": "swish"},
            "output": {"type": "output"}
        },
        "connections": [{"from": "b", "to": "n"}, {"from": "n", "to": "output"}],
        "topologicalOrder": ["b", "n", "output"]
    });
    let strict = TrainRequest::from_json(&payload.to_string())?;
    assert_eq!(
        strict.node_specs().unwrap_err(),
        NeuraLabError::Validation(ValidationError::UnknownActivation("swish".to_string()))
    );

    payload["lenient"] = json!(true);
    let lenient = TrainRequest::from_json(&payload.to_string())?;
    let specs = lenient.node_specs()?;
    assert!(specs.iter().all(|s| s.activation == Activation::Linear));
    Ok(())
}

#[test]
fn test_unknown_node_type_rejected() -> Result<(), NeuraLabError> {
    let payload = json!({
        "nodes": {"c": {"type": "conv"}},
        "topologicalOrder": ["c"]
    });
    let request = TrainRequest::from_json(&payload.to_string())?;
    assert!(matches!(
        request.build_graph(),
        Err(NeuraLabError::Validation(ValidationError::UnknownNodeType(_)))
    ));
    Ok(())
}

#[test]
fn test_validation_error_before_training() -> Result<(), NeuraLabError> {
    let mut payload = scenario_payload();
    payload["topologicalOrder"] = json!(["in1", "output"]);
    let request = TrainRequest::from_json(&payload.to_string())?;
    let err = train_request(&request, &TrainingContext::cpu()).unwrap_err();
    assert!(matches!(err, NeuraLabError::Validation(_)));
    Ok(())
}

#[test]
fn test_train_json_renders_errors() {
    let mut payload = scenario_payload();
    payload["trainingData"] = json!([]);
    let out: serde_json::Value =
        serde_json::from_str(&train_json(&payload.to_string(), &TrainingContext::cpu())).unwrap();
    assert_eq!(out, json!({"error": "No training data provided"}));

    let garbage = train_json("{not json", &TrainingContext::cpu());
    assert!(garbage.contains("error"));
}

#[test]
fn test_train_json_renders_report() {
    let out: serde_json::Value = serde_json::from_str(&train_json(
        &scenario_payload().to_string(),
        &TrainingContext::cpu(),
    ))
    .unwrap();
    assert_eq!(out["trainedWeights"][0]["id"], json!("w1"));
    assert_eq!(out["lossHistory"], json!([16.0]));
    assert_eq!(out["epochs"], json!(1));
}

#[test]
fn test_error_json_escapes_message() {
    let rendered = error_json(r#"Unknown node type "conv\x""#);
    let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
    assert_eq!(parsed["error"], json!(r#"Unknown node type "conv\x""#));
}

#[test]
fn test_train_json_error_with_quoted_id_is_valid_json() {
    let raw = r#"{"nodes":{"a\"b":{"type":"bias"}},"topologicalOrder":["nope"]}"#;
    let out: serde_json::Value =
        serde_json::from_str(&train_json(raw, &TrainingContext::cpu())).unwrap();
    assert!(out["error"].as_str().unwrap().contains("nope"));
}
