// neurallab-data/src/import/json.rs

use super::lenient_number;
use log::debug;
use neurallab_core::{DatasetRow, NeuraLabError};
use serde_json::{Map, Value};

/// Keys searched, in order, for the target of an object row.
const TARGET_KEYS: [&str; 3] = ["expected", "y", "output"];

/// Parses a JSON array of rows.
///
/// Each row is either a numeric array whose last element is the expected value
/// (`[[0, 1, 1]]`), or an object keyed by input label with the target under
/// `expected`, `y` or `output` (`[{"x1": 0, "x2": 1, "expected": 1}]`).
/// Missing or non-numeric values read as 0.
pub fn parse_json(text: &str, input_labels: &[String]) -> Result<Vec<DatasetRow>, NeuraLabError> {
    let data: Value = serde_json::from_str(text)?;
    let items = match data {
        Value::Array(items) => items,
        _ => {
            return Err(NeuraLabError::DatasetImport {
                line: 0,
                message: "JSON must be an array of rows".to_string(),
            })
        }
    };

    let rows = items
        .iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Array(cells) => Ok(array_row(cells, input_labels.len())),
            Value::Object(fields) => Ok(object_row(fields, input_labels)),
            other => Err(NeuraLabError::DatasetImport {
                line: i + 1,
                message: format!("row must be an array or an object, got {}", other),
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;
    debug!("Imported {} rows from JSON", rows.len());
    Ok(rows)
}

fn number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => lenient_number(s),
        Value::Bool(b) => f64::from(u8::from(*b)),
        _ => 0.0,
    }
}

fn array_row(cells: &[Value], n_inputs: usize) -> DatasetRow {
    let (expected, inputs) = match cells.split_last() {
        Some((last, rest)) => (number(last), rest),
        None => (0.0, cells),
    };
    let inputs = inputs.iter().take(n_inputs).map(number).collect();
    DatasetRow::new(inputs, expected)
}

fn object_row(fields: &Map<String, Value>, input_labels: &[String]) -> DatasetRow {
    let inputs = input_labels
        .iter()
        .map(|label| fields.get(label).map(number).unwrap_or(0.0))
        .collect();
    let expected = TARGET_KEYS
        .iter()
        .find_map(|k| fields.get(*k).filter(|v| !v.is_null()))
        .map(number)
        .unwrap_or(0.0);
    DatasetRow::new(inputs, expected)
}

#[cfg(test)]
#[path = "json_test.rs"]
mod tests;
