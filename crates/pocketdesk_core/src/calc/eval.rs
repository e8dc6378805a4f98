//! Expression tree evaluation.
//!
//! # Invariants
//! - Every intermediate value is finite; anything else is `Overflow` or a
//!   domain error.
//! - Trigonometric arguments are degrees in `AngleMode::Deg`.

use super::ast::{BinaryOp, Expr, Function, UnaryOp};
use super::error::{CalcError, CalcResult};

/// Largest `n` whose factorial fits in an `f64`.
const MAX_FACTORIAL: f64 = 170.0;

/// Interpretation of trigonometric arguments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AngleMode {
    #[default]
    Deg,
    Rad,
}

impl AngleMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Deg => Self::Rad,
            Self::Rad => Self::Deg,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Deg => "DEG",
            Self::Rad => "RAD",
        }
    }

    /// Single-letter form shown in the status line.
    pub fn indicator(self) -> char {
        match self {
            Self::Deg => 'D',
            Self::Rad => 'R',
        }
    }
}

/// Evaluates a parsed expression.
pub fn evaluate_expr(expr: &Expr, mode: AngleMode) -> CalcResult<f64> {
    let value = match expr {
        Expr::Number(value) => *value,
        Expr::Constant(constant) => constant.value(),
        Expr::Unary { op, operand } => {
            let value = evaluate_expr(operand, mode)?;
            match op {
                UnaryOp::Plus => value,
                UnaryOp::Negate => -value,
            }
        }
        Expr::Binary { op, left, right } => {
            let left = evaluate_expr(left, mode)?;
            let right = evaluate_expr(right, mode)?;
            apply_binary(*op, left, right)?
        }
        Expr::Call { function, argument } => {
            let argument = evaluate_expr(argument, mode)?;
            apply_function(*function, argument, mode)?
        }
        Expr::Factorial(operand) => factorial(evaluate_expr(operand, mode)?)?,
    };

    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::Overflow)
    }
}

fn apply_binary(op: BinaryOp, left: f64, right: f64) -> CalcResult<f64> {
    match op {
        BinaryOp::Add => Ok(left + right),
        BinaryOp::Subtract => Ok(left - right),
        BinaryOp::Multiply => Ok(left * right),
        BinaryOp::Divide => {
            if right == 0.0 {
                Err(CalcError::DivisionByZero)
            } else {
                Ok(left / right)
            }
        }
        BinaryOp::Power => {
            if left == 0.0 && right < 0.0 {
                return Err(CalcError::DivisionByZero);
            }
            let value = left.powf(right);
            if value.is_nan() {
                Err(CalcError::Domain("fractional power of a negative number"))
            } else {
                Ok(value)
            }
        }
    }
}

fn apply_function(function: Function, argument: f64, mode: AngleMode) -> CalcResult<f64> {
    let argument = if function.is_trigonometric() && mode == AngleMode::Deg {
        argument.to_radians()
    } else {
        argument
    };

    match function {
        Function::Sqrt if argument < 0.0 => Err(CalcError::Domain("sqrt of a negative number")),
        Function::Sqrt => Ok(argument.sqrt()),
        Function::Log if argument <= 0.0 => Err(CalcError::Domain("log of a non-positive number")),
        Function::Log => Ok(argument.log10()),
        Function::Exp => Ok(argument.exp()),
        Function::Sin => Ok(argument.sin()),
        Function::Cos => Ok(argument.cos()),
        Function::Tan => Ok(argument.tan()),
    }
}

fn factorial(value: f64) -> CalcResult<f64> {
    if value < 0.0 || value.fract() != 0.0 {
        return Err(CalcError::Domain("factorial needs a non-negative integer"));
    }
    if value > MAX_FACTORIAL {
        return Err(CalcError::Overflow);
    }
    // value is an integer in 0..=170 here
    Ok((2..=value as u32).fold(1.0, |acc, n| acc * f64::from(n)))
}

/// Formats a result for display.
///
/// Integral values print without a fractional part, very large or very
/// small magnitudes use scientific notation.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if !(1e-9..1e15).contains(&magnitude) {
        return format!("{value:e}");
    }
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}
