//! Reverse-mode differentiation over scalar operations.
//!
//! The forward evaluator records onto a [`Tape`]; [`Tape::backward`] walks it
//! in reverse and yields the adjoint of every entry.

pub mod backward_op;
pub mod grad_check;
pub mod tape;

pub use backward_op::BackwardOp;
pub use grad_check::{check_gradients, GradCheckError};
pub use tape::{Gradients, Op, Tape, TapeEntry, Var};
