//! Calculator session state and key handling.
//!
//! # Responsibility
//! - Own the expression buffer, last result, memory and angle mode.
//! - Map button labels and keyboard keysyms to session keys.
//!
//! # Invariants
//! - `C` clears expression and result only; memory and angle mode survive.
//! - Memory operations only use a successful last result.

use super::error::CalcError;
use super::eval::{format_number, AngleMode};
use log::debug;

/// Display value for any failed evaluation.
pub const ERROR_MARKER: &str = "Error";

/// Button grid as rendered by a front-end, row by row.
pub const BUTTON_LAYOUT: [[&str; 5]; 7] = [
    ["C", "MC", "MR", "M+", "M-"],
    ["π", "e", "cos", "tan", "exp"],
    ["(", ")", "^", "!", "DEG"],
    ["7", "8", "9", "/", "sqrt"],
    ["4", "5", "6", "*", "log"],
    ["1", "2", "3", "-", "sin"],
    ["0", ".", "=", "+", "⌫"],
];

/// One discrete calculator input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Clear,
    Backspace,
    Evaluate,
    ToggleAngle,
    MemoryAdd,
    MemorySubtract,
    MemoryRecall,
    MemoryClear,
    /// Text appended to the expression buffer.
    Insert(String),
}

impl Key {
    /// Maps a button label to a key. Unknown labels are inserted verbatim.
    pub fn from_label(label: &str) -> Self {
        match label {
            "C" => Self::Clear,
            "⌫" => Self::Backspace,
            "=" => Self::Evaluate,
            "DEG" | "RAD" => Self::ToggleAngle,
            "M+" => Self::MemoryAdd,
            "M-" => Self::MemorySubtract,
            "MR" => Self::MemoryRecall,
            "MC" => Self::MemoryClear,
            other => Self::Insert(other.to_string()),
        }
    }

    /// Maps a keyboard keysym to a key, `None` for unbound keys.
    pub fn from_keysym(keysym: &str) -> Option<Self> {
        let key = match keysym {
            "Return" | "KP_Enter" => Self::Evaluate,
            "BackSpace" => Self::Backspace,
            "Escape" => Self::Clear,
            "KP_Decimal" => Self::Insert(".".to_string()),
            "KP_Add" => Self::Insert("+".to_string()),
            "KP_Subtract" => Self::Insert("-".to_string()),
            "KP_Multiply" => Self::Insert("*".to_string()),
            "KP_Divide" => Self::Insert("/".to_string()),
            other => {
                let symbol = other.strip_prefix("KP_").unwrap_or(other);
                let mut chars = symbol.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) if is_typed_char(ch, other.starts_with("KP_")) => {
                        Self::Insert(ch.to_string())
                    }
                    _ => return None,
                }
            }
        };
        Some(key)
    }
}

/// Literal for `MR` that the lexer reads back as exactly `value`.
///
/// Plain decimal notation only (the lexer has no exponent syntax); negative
/// values are parenthesized so they stay one operand after implicit
/// multiplication.
fn memory_literal(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else if value < 0.0 {
        format!("({value})")
    } else {
        format!("{value}")
    }
}

fn is_typed_char(ch: char, keypad: bool) -> bool {
    if keypad {
        ch.is_ascii_digit()
    } else {
        ch.is_ascii_digit() || "+-*/().".contains(ch)
    }
}

/// Snapshot of what the calculator window shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculatorView {
    pub expression: String,
    pub result: String,
    pub status: String,
}

/// Per-window calculator state.
#[derive(Debug, Clone, Default)]
pub struct CalculatorSession {
    expression: String,
    result: Option<Result<f64, CalcError>>,
    memory: f64,
    angle_mode: AngleMode,
}

impl CalculatorSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Last evaluation outcome, `None` before the first `=` or after `C`.
    pub fn result(&self) -> Option<&Result<f64, CalcError>> {
        self.result.as_ref()
    }

    pub fn memory(&self) -> f64 {
        self.memory
    }

    pub fn angle_mode(&self) -> AngleMode {
        self.angle_mode
    }

    /// Convenience for front-ends that deliver button labels.
    pub fn press_label(&mut self, label: &str) {
        self.press(Key::from_label(label));
    }

    /// Applies one key to the session.
    pub fn press(&mut self, key: Key) {
        match key {
            Key::Clear => {
                self.expression.clear();
                self.result = None;
            }
            Key::Backspace => {
                self.expression.pop();
            }
            Key::Evaluate => self.evaluate(),
            Key::ToggleAngle => self.angle_mode = self.angle_mode.toggled(),
            Key::MemoryAdd => {
                if let Some(Ok(value)) = &self.result {
                    self.memory += *value;
                }
            }
            Key::MemorySubtract => {
                if let Some(Ok(value)) = &self.result {
                    self.memory -= *value;
                }
            }
            Key::MemoryRecall => self.expression.push_str(&memory_literal(self.memory)),
            Key::MemoryClear => self.memory = 0.0,
            Key::Insert(text) => self.expression.push_str(&text),
        }
    }

    fn evaluate(&mut self) {
        let outcome = super::evaluate(&self.expression, self.angle_mode);
        match &outcome {
            Ok(value) => debug!(
                "event=calc_eval module=calc status=ok mode={} value={}",
                self.angle_mode.label(),
                value
            ),
            Err(err) => debug!(
                "event=calc_eval module=calc status=error mode={} error={}",
                self.angle_mode.label(),
                err
            ),
        }
        self.result = Some(outcome);
    }

    /// Current window contents.
    pub fn view(&self) -> CalculatorView {
        let result = match &self.result {
            None => String::new(),
            Some(Ok(value)) => format_number(*value),
            Some(Err(_)) => ERROR_MARKER.to_string(),
        };
        CalculatorView {
            expression: self.expression.clone(),
            result,
            status: format!(
                " M = {:.2}   Mode: {}",
                self.memory,
                self.angle_mode.indicator()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{memory_literal, CalculatorSession, Key, BUTTON_LAYOUT};

    #[test]
    fn keysyms_map_to_keys() {
        assert_eq!(Key::from_keysym("Return"), Some(Key::Evaluate));
        assert_eq!(Key::from_keysym("KP_Enter"), Some(Key::Evaluate));
        assert_eq!(Key::from_keysym("Escape"), Some(Key::Clear));
        assert_eq!(Key::from_keysym("KP_7"), Some(Key::Insert("7".to_string())));
        assert_eq!(Key::from_keysym("KP_Divide"), Some(Key::Insert("/".to_string())));
        assert_eq!(Key::from_keysym("("), Some(Key::Insert("(".to_string())));
        assert_eq!(Key::from_keysym("x"), None);
        assert_eq!(Key::from_keysym("F1"), None);
    }

    #[test]
    fn layout_labels_map_to_keys() {
        let labels: Vec<&str> = BUTTON_LAYOUT.iter().flatten().copied().collect();
        assert_eq!(labels.len(), 35);
        assert_eq!(Key::from_label("C"), Key::Clear);
        assert_eq!(Key::from_label("⌫"), Key::Backspace);
        assert_eq!(Key::from_label("DEG"), Key::ToggleAngle);
        assert_eq!(Key::from_label("RAD"), Key::ToggleAngle);
        assert_eq!(Key::from_label("M-"), Key::MemorySubtract);
        assert_eq!(Key::from_label("sqrt"), Key::Insert("sqrt".to_string()));
    }

    #[test]
    fn backspace_removes_one_character() {
        let mut session = CalculatorSession::new();
        session.press_label("π");
        session.press_label("1");
        session.press(Key::Backspace);
        assert_eq!(session.expression(), "π");
        session.press(Key::Backspace);
        session.press(Key::Backspace);
        assert_eq!(session.expression(), "");
    }

    #[test]
    fn memory_literal_avoids_exponent_notation() {
        assert_eq!(memory_literal(0.0), "0");
        assert_eq!(memory_literal(-0.0), "0");
        assert_eq!(memory_literal(12.5), "12.5");
        assert_eq!(memory_literal(1e20), "100000000000000000000");
        assert_eq!(memory_literal(1e-10), "0.0000000001");
        assert_eq!(memory_literal(-3.0), "(-3)");
    }
}
