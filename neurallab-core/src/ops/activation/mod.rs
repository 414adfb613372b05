//! Scalar activation functions applied by neuron/activation nodes.

use crate::error::ValidationError;
use std::str::FromStr;

/// Activation applied to the summed input of a neuron.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Activation {
    #[default]
    Linear,
    Sigmoid,
    Relu,
    Tanh,
}

impl Activation {
    /// Forward value `f(x)`.
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Activation::Linear => x,
            Activation::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            Activation::Relu => {
                if x > 0.0 {
                    x
                } else {
                    0.0
                }
            }
            Activation::Tanh => x.tanh(),
        }
    }

    /// Local derivative `f'(x)`, expressed through the already computed output
    /// `y = f(x)` where that is cheaper.
    pub fn derivative(self, x: f64, y: f64) -> f64 {
        match self {
            Activation::Linear => 1.0,
            Activation::Sigmoid => y * (1.0 - y),
            Activation::Relu => {
                if x > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            Activation::Tanh => 1.0 - y * y,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Activation::Linear => "linear",
            Activation::Sigmoid => "sigmoid",
            Activation::Relu => "relu",
            Activation::Tanh => "tanh",
        }
    }
}

impl FromStr for Activation {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "" | "linear" => Ok(Activation::Linear),
            "sigmoid" => Ok(Activation::Sigmoid),
            "relu" => Ok(Activation::Relu),
            "tanh" => Ok(Activation::Tanh),
            _ => Err(ValidationError::UnknownActivation(s.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "activation_test.rs"]
mod tests;
