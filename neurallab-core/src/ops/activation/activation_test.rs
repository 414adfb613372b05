use super::Activation;
use crate::error::ValidationError;
use approx::assert_relative_eq;

#[test]
fn test_sigmoid_at_zero_is_half() {
    assert_eq!(Activation::Sigmoid.apply(0.0), 0.5);
}

#[test]
fn test_relu_clamps_negative_input() {
    assert_eq!(Activation::Relu.apply(-3.0), 0.0);
    assert_eq!(Activation::Relu.apply(2.5), 2.5);
}

#[test]
fn test_linear_is_identity() {
    assert_eq!(Activation::Linear.apply(-7.25), -7.25);
    assert_eq!(Activation::Linear.derivative(-7.25, -7.25), 1.0);
}

#[test]
fn test_derivatives_match_closed_forms() {
    let x = 0.3;
    let s = Activation::Sigmoid.apply(x);
    assert_relative_eq!(Activation::Sigmoid.derivative(x, s), s * (1.0 - s));

    let t = Activation::Tanh.apply(x);
    assert_relative_eq!(Activation::Tanh.derivative(x, t), 1.0 - x.tanh().powi(2));

    assert_eq!(Activation::Relu.derivative(-0.1, 0.0), 0.0);
    // Subgradient at the kink is taken as 0.
    assert_eq!(Activation::Relu.derivative(0.0, 0.0), 0.0);
    assert_eq!(Activation::Relu.derivative(4.0, 4.0), 1.0);
}

#[test]
fn test_parse_names() {
    assert_eq!("sigmoid".parse::<Activation>(), Ok(Activation::Sigmoid));
    assert_eq!("ReLU".parse::<Activation>(), Ok(Activation::Relu));
    assert_eq!("".parse::<Activation>(), Ok(Activation::Linear));
    assert_eq!(
        "softmax".parse::<Activation>(),
        Err(ValidationError::UnknownActivation("softmax".to_string()))
    );
}
