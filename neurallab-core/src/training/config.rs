use crate::error::NeuraLabError;

pub const DEFAULT_LEARNING_RATE: f64 = 0.5;
pub const DEFAULT_EPOCHS: usize = 500;

/// Hyperparameters of one training run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingConfig {
    pub learning_rate: f64,
    pub epochs: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        TrainingConfig {
            learning_rate: DEFAULT_LEARNING_RATE,
            epochs: DEFAULT_EPOCHS,
        }
    }
}

impl TrainingConfig {
    pub fn new(learning_rate: f64, epochs: usize) -> Self {
        TrainingConfig {
            learning_rate,
            epochs,
        }
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    pub fn validate(&self) -> Result<(), NeuraLabError> {
        if !self.learning_rate.is_finite() || self.learning_rate < 0.0 {
            return Err(NeuraLabError::InvalidConfig(format!(
                "learning rate must be a finite, non-negative number, got {}",
                self.learning_rate
            )));
        }
        Ok(())
    }

    /// Loss is sampled every `max(1, epochs / 200)` epochs.
    pub fn report_interval(&self) -> usize {
        (self.epochs / 200).max(1)
    }
}
