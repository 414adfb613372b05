// src/nn/mod.rs
// Trainable parameters and the loss used to train them.

pub mod losses;
pub mod parameter;

pub use losses::MSELoss;
pub use parameter::{ParamId, Parameter, ParameterStore};
