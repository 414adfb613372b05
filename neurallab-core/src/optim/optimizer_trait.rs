use crate::error::NeuraLabError;
use crate::nn::parameter::ParameterStore;

/// Trait defining the common interface for all optimizers.
///
/// Optimizers hold no reference to the parameters they update; the store is
/// borrowed for the duration of each call.
pub trait Optimizer {
    /// Applies one update to every parameter using its accumulated gradient.
    fn step(&mut self, params: &mut ParameterStore) -> Result<(), NeuraLabError>;

    /// Clears the gradients of all parameters so the next epoch starts from zero.
    fn zero_grad(&mut self, params: &mut ParameterStore) {
        params.zero_grad();
    }

    fn learning_rate(&self) -> f64;
}
