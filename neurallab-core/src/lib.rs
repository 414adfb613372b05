//! Differentiable computation-graph trainer.
//!
//! A caller-authored graph of input, weight, bias, neuron and output nodes is
//! validated into a [`Graph`], evaluated row by row onto a scalar
//! reverse-mode [`Tape`](autograd::Tape), and trained with full-batch
//! gradient descent.

pub mod autograd;
pub mod dataset;
pub mod device;
pub mod error;
pub mod forward;
pub mod graph;
pub mod logging;
pub mod nn;
pub mod ops;
pub mod optim;
pub mod report;
pub mod request;
pub mod training;
pub mod utils;

pub use dataset::DatasetRow;
pub use device::{ComputeBackend, CpuBackend, StorageDevice, TrainingContext};
pub use error::{NeuraLabError, NumericalStage, ValidationError};
pub use forward::{evaluate, Evaluation, ForwardEvaluator};
pub use graph::{Connection, Graph, GraphOptions, NodeKind, NodeSpec, ValidationMode};
pub use report::{report, TrainingReport};
pub use request::{train_json, train_request, TrainRequest};
pub use training::{TrainingConfig, TrainingLoop, TrainingOutcome, TrainingState};
