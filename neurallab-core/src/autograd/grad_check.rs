use crate::dataset::DatasetRow;
use crate::error::NeuraLabError;
use crate::forward::ForwardEvaluator;
use crate::graph::Graph;
use crate::nn::parameter::ParameterStore;
use crate::training::accumulate_epoch_gradients;
use thiserror::Error;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for parameter '{parameter}': analytical grad {analytical} != numerical grad {numerical}. Difference: {difference}")]
    GradientMismatch {
        parameter: String,
        analytical: f64,
        numerical: f64,
        difference: f64,
    },

    #[error("Numerical gradient is NaN or infinite for parameter '{parameter}'. Loss+: {loss_plus}, Loss-: {loss_minus}")]
    NumericalGradNaNOrInfinite {
        parameter: String,
        loss_plus: f64,
        loss_minus: f64,
    },

    #[error("Training core error during gradient check: {0}")]
    Core(NeuraLabError),
}

impl From<NeuraLabError> for GradCheckError {
    fn from(err: NeuraLabError) -> Self {
        GradCheckError::Core(err)
    }
}

/// Mean squared error of the current parameters over `rows`, without a tape.
pub fn epoch_loss(
    evaluator: &ForwardEvaluator<'_>,
    params: &ParameterStore,
    rows: &[DatasetRow],
) -> Result<f64, NeuraLabError> {
    if rows.is_empty() {
        return Ok(0.0);
    }
    let mut total = 0.0;
    for row in rows {
        let diff = evaluator.evaluate(params, row)?.prediction - row.expected;
        total += diff * diff;
    }
    Ok(total / rows.len() as f64)
}

/// Compares tape gradients of the epoch loss against central finite
/// differences, perturbing each parameter by `max(epsilon, |value| * 1e-3)`.
///
/// A parameter passes when `|analytical - numerical| <= tolerance * max(1, |numerical|)`.
pub fn check_gradients(
    graph: &Graph,
    params: &ParameterStore,
    rows: &[DatasetRow],
    input_labels: &[String],
    epsilon: f64,
    tolerance: f64,
) -> Result<(), GradCheckError> {
    let evaluator = ForwardEvaluator::new(graph, input_labels);

    let mut analytical = params.clone();
    accumulate_epoch_gradients(&evaluator, &mut analytical, rows, 0)?;
    let analytical = analytical.grads();

    let mut perturbed = params.clone();
    for (id, &expected) in analytical.iter().enumerate() {
        let original = perturbed.get(id)?.value();
        let name = graph.node(perturbed.get(id)?.node()).id.clone();
        let step = epsilon.max(original.abs() * 1e-3);

        perturbed.get_mut(id)?.set_value(original + step);
        let loss_plus = epoch_loss(&evaluator, &perturbed, rows)?;
        perturbed.get_mut(id)?.set_value(original - step);
        let loss_minus = epoch_loss(&evaluator, &perturbed, rows)?;
        perturbed.get_mut(id)?.set_value(original);

        let numerical = (loss_plus - loss_minus) / (2.0 * step);
        if !numerical.is_finite() {
            return Err(GradCheckError::NumericalGradNaNOrInfinite {
                parameter: name,
                loss_plus,
                loss_minus,
            });
        }

        let difference = (expected - numerical).abs();
        if difference > tolerance * numerical.abs().max(1.0) {
            return Err(GradCheckError::GradientMismatch {
                parameter: name,
                analytical: expected,
                numerical,
                difference,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "grad_check_test.rs"]
mod tests;
