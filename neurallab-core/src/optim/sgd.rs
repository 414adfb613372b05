use crate::error::NeuraLabError;
use crate::nn::parameter::ParameterStore;
use crate::optim::optimizer_trait::Optimizer;

/// Plain gradient descent: `value <- value - lr * grad`.
///
/// No momentum, weight decay or adaptive scaling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SgdOptimizer {
    lr: f64,
}

impl SgdOptimizer {
    pub fn new(lr: f64) -> Self {
        SgdOptimizer { lr }
    }
}

impl Optimizer for SgdOptimizer {
    fn step(&mut self, params: &mut ParameterStore) -> Result<(), NeuraLabError> {
        for param in params.iter_mut() {
            let updated = param.value() - self.lr * param.grad();
            param.set_value(updated);
        }
        Ok(())
    }

    fn learning_rate(&self) -> f64 {
        self.lr
    }
}
