use thiserror::Error;

/// Reasons a user-authored graph is rejected before any evaluation happens.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum ValidationError {
    #[error("Connection {from} -> {to} references unknown node '{missing}'")]
    DanglingConnection {
        from: String,
        to: String,
        missing: String,
    },

    #[error("Node id '{0}' is declared more than once")]
    DuplicateNodeId(String),

    #[error("Topological order contains unknown node '{0}'")]
    UnknownNodeInOrder(String),

    #[error("Topological order lists node '{0}' more than once")]
    DuplicateInOrder(String),

    #[error("Node '{0}' is missing from the topological order")]
    MissingFromOrder(String),

    #[error("Topological order places '{to}' before its producer '{from}'")]
    OrderViolation { from: String, to: String },

    #[error("Unknown activation function '{0}'")]
    UnknownActivation(String),

    #[error("Unknown node type '{0}'")]
    UnknownNodeType(String),
}

/// Which phase of an epoch produced a non-finite number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericalStage {
    Forward,
    Backward,
    Update,
}

impl std::fmt::Display for NumericalStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            NumericalStage::Forward => "forward",
            NumericalStage::Backward => "backward",
            NumericalStage::Update => "update",
        };
        f.write_str(name)
    }
}

/// Custom error type for the Neural Lab trainer.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum NeuraLabError {
    #[error("Invalid graph: {0}")]
    Validation(#[from] ValidationError),

    #[error("No training data provided")]
    EmptyDataset,

    #[error("No trainable parameters (weights/biases) found")]
    NoTrainableParameters,

    #[error("Non-finite value {value} during {stage} pass at epoch {epoch}{}", row_suffix(.row))]
    Numerical {
        epoch: usize,
        row: Option<usize>,
        stage: NumericalStage,
        value: f64,
    },

    #[error("Invalid training configuration: {0}")]
    InvalidConfig(String),

    #[error("Index out of bounds: index {index} for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Dataset import failed at line {line}: {message}")]
    DatasetImport { line: usize, message: String },

    #[error("Malformed payload: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

fn row_suffix(row: &Option<usize>) -> String {
    match row {
        Some(r) => format!(", row {}", r),
        None => String::new(),
    }
}

impl From<serde_json::Error> for NeuraLabError {
    fn from(err: serde_json::Error) -> Self {
        NeuraLabError::Serialization(err.to_string())
    }
}

impl NeuraLabError {
    /// True for failures caused by the caller's input rather than the run itself.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            NeuraLabError::Validation(_)
                | NeuraLabError::EmptyDataset
                | NeuraLabError::NoTrainableParameters
                | NeuraLabError::InvalidConfig(_)
                | NeuraLabError::Serialization(_)
                | NeuraLabError::DatasetImport { .. }
        )
    }
}
