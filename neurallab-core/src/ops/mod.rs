// neurallab-core/src/ops/mod.rs
// Elementary scalar operations used by the graph interpreter.

pub mod activation;

pub use activation::Activation;
