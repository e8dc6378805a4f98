//! Scientific calculator core.
//!
//! # Responsibility
//! - Tokenize and parse the keypress buffer into an expression tree.
//! - Evaluate it under the current angle mode with typed errors.
//! - Hold per-window session state (`CalculatorSession`).
//!
//! # Invariants
//! - Evaluation never panics; every failure is a `CalcError`.
//! - Only one factorial per expression is accepted.

pub mod ast;
mod error;
mod eval;
mod parser;
pub mod session;
mod token;

pub use error::{CalcError, CalcResult};
pub use eval::{evaluate_expr, format_number, AngleMode};
pub use parser::parse;
pub use session::{CalculatorSession, CalculatorView, Key, BUTTON_LAYOUT};
pub use token::{tokenize, Token};

/// Parses and evaluates `input` in one step.
pub fn evaluate(input: &str, mode: AngleMode) -> CalcResult<f64> {
    let expr = parse(input)?;
    evaluate_expr(&expr, mode)
}
