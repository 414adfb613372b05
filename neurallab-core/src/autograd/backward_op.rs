use super::tape::{Op, Tape, Var};

/// Local derivative rule of one recorded operation.
///
/// Given `grad_output = dL/dOutput`, an implementation hands
/// `dL/dInput_i = grad_output * dOutput/dInput_i` to `accumulate` once per
/// operand. Operands that appear more than once receive one call each, which
/// is how fan-out is summed under the multivariate chain rule.
pub trait BackwardOp {
    fn backward(
        &self,
        output: f64,
        grad_output: f64,
        tape: &Tape,
        accumulate: &mut dyn FnMut(Var, f64),
    );

    /// Operand handles in the order `backward` reports them.
    fn inputs(&self) -> Vec<Var>;
}

impl BackwardOp for Op {
    fn backward(
        &self,
        output: f64,
        grad_output: f64,
        tape: &Tape,
        accumulate: &mut dyn FnMut(Var, f64),
    ) {
        match self {
            Op::Constant | Op::Parameter(_) => {}
            Op::Sum(operands) => {
                for &operand in operands {
                    accumulate(operand, grad_output);
                }
            }
            Op::Mul(a, b) => {
                accumulate(*a, grad_output * tape.value(*b));
                accumulate(*b, grad_output * tape.value(*a));
            }
            Op::Activation(activation, x) => {
                let local = activation.derivative(tape.value(*x), output);
                accumulate(*x, grad_output * local);
            }
            Op::SquaredError {
                prediction,
                expected,
            } => {
                let local = 2.0 * (tape.value(*prediction) - expected);
                accumulate(*prediction, grad_output * local);
            }
            Op::Mean(operands) => {
                if operands.is_empty() {
                    return;
                }
                let share = grad_output / operands.len() as f64;
                for &operand in operands {
                    accumulate(operand, share);
                }
            }
        }
    }

    fn inputs(&self) -> Vec<Var> {
        match self {
            Op::Constant | Op::Parameter(_) => Vec::new(),
            Op::Sum(operands) | Op::Mean(operands) => operands.clone(),
            Op::Mul(a, b) => vec![*a, *b],
            Op::Activation(_, x) => vec![*x],
            Op::SquaredError { prediction, .. } => vec![*prediction],
        }
    }
}
