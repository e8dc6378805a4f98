use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CalcResult<T> = Result<T, CalcError>;

/// Typed evaluation failure.
///
/// The session collapses every variant into one `Error` display value; the
/// variant is kept for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub enum CalcError {
    /// Expression buffer holds nothing to evaluate.
    Empty,
    UnexpectedChar { ch: char, position: usize },
    UnexpectedToken(String),
    UnexpectedEnd,
    InvalidNumber(String),
    UnknownFunction(String),
    DivisionByZero,
    /// Argument outside the function's domain.
    Domain(&'static str),
    /// More than one `!` in one expression.
    MultipleFactorials,
    /// Result is not a finite number.
    Overflow,
    /// Nesting or operator count exceeds the parser limits.
    TooComplex,
}

impl Display for CalcError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => f.write_str("empty expression"),
            Self::UnexpectedChar { ch, position } => {
                write!(f, "unexpected character `{ch}` at position {position}")
            }
            Self::UnexpectedToken(token) => write!(f, "unexpected token `{token}`"),
            Self::UnexpectedEnd => f.write_str("unexpected end of expression"),
            Self::InvalidNumber(literal) => write!(f, "invalid number literal `{literal}`"),
            Self::UnknownFunction(name) => write!(f, "unknown function `{name}`"),
            Self::DivisionByZero => f.write_str("division by zero"),
            Self::Domain(details) => write!(f, "math domain error: {details}"),
            Self::MultipleFactorials => {
                f.write_str("only one factorial per expression is supported")
            }
            Self::Overflow => f.write_str("result is out of range"),
            Self::TooComplex => f.write_str("expression is too deeply nested or too long"),
        }
    }
}

impl Error for CalcError {}
