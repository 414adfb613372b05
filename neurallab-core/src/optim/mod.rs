// neurallab-core/src/optim/mod.rs

//! Optimizers that turn accumulated gradients into parameter updates.

pub mod optimizer_trait;
pub mod sgd;

pub use optimizer_trait::Optimizer;
pub use sgd::SgdOptimizer;
