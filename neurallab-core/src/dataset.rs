use serde::{Deserialize, Serialize};

/// One training example: ordered inputs plus the expected scalar output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetRow {
    pub inputs: Vec<f64>,
    pub expected: f64,
}

impl DatasetRow {
    pub fn new(inputs: Vec<f64>, expected: f64) -> Self {
        DatasetRow { inputs, expected }
    }
}
