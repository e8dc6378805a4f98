//! Calculator tokenizer.
//!
//! # Responsibility
//! - Turn the raw keypress buffer into a stream of tokens.
//! - Split glued identifier runs (`esin`, `2pie`) into known names.
//!
//! # Invariants
//! - Number literals contain digits and at most one `.`.
//! - Identifier runs must be fully covered by known names, otherwise the
//!   whole run is reported as an unknown function.

use super::error::{CalcError, CalcResult};
use std::collections::VecDeque;
use std::fmt::{Display, Formatter};
use std::iter::Peekable;
use std::str::Chars;

/// Names recognized inside identifier runs. `exp` precedes `e` so greedy
/// matching never splits it.
const KNOWN_NAMES: [&str; 8] = ["sqrt", "log", "exp", "sin", "cos", "tan", "pi", "e"];

/// Tokens produced by [`Lexer`].
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    /// A known constant or function name.
    Ident(&'static str),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    Bang,
    LParen,
    RParen,
    Eof,
}

impl Token {
    /// Whether this token can begin an operand (used for implicit
    /// multiplication such as `2π` or `2(3)`).
    pub fn starts_operand(&self) -> bool {
        matches!(self, Self::Number(_) | Self::Ident(_) | Self::LParen)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Ident(name) => write!(f, "{name}"),
            Self::Plus => f.write_str("+"),
            Self::Minus => f.write_str("-"),
            Self::Star => f.write_str("*"),
            Self::Slash => f.write_str("/"),
            Self::Caret => f.write_str("^"),
            Self::Bang => f.write_str("!"),
            Self::LParen => f.write_str("("),
            Self::RParen => f.write_str(")"),
            Self::Eof => f.write_str("end of input"),
        }
    }
}

/// Streaming tokenizer over a calculator expression.
pub struct Lexer<'a> {
    input: Peekable<Chars<'a>>,
    position: usize,
    pending: VecDeque<Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input: input.chars().peekable(),
            position: 0,
            pending: VecDeque::new(),
        }
    }

    /// Returns the next token, or `Token::Eof` once input is exhausted.
    pub fn next_token(&mut self) -> CalcResult<Token> {
        if let Some(token) = self.pending.pop_front() {
            return Ok(token);
        }

        while self.input.peek().is_some_and(|ch| ch.is_whitespace()) {
            self.bump();
        }

        let start = self.position;
        let Some(ch) = self.bump() else {
            return Ok(Token::Eof);
        };

        match ch {
            '+' => Ok(Token::Plus),
            '-' | '−' => Ok(Token::Minus),
            '*' | '×' => {
                if self.input.peek() == Some(&'*') {
                    self.bump();
                    Ok(Token::Caret)
                } else {
                    Ok(Token::Star)
                }
            }
            '/' | '÷' => Ok(Token::Slash),
            '^' => Ok(Token::Caret),
            '!' => Ok(Token::Bang),
            '(' => Ok(Token::LParen),
            ')' => Ok(Token::RParen),
            'π' => Ok(Token::Ident("pi")),
            '0'..='9' | '.' => self.read_number(ch),
            c if c.is_ascii_alphabetic() => self.read_identifiers(c),
            other => Err(CalcError::UnexpectedChar {
                ch: other,
                position: start,
            }),
        }
    }

    fn bump(&mut self) -> Option<char> {
        let next = self.input.next();
        if next.is_some() {
            self.position += 1;
        }
        next
    }

    fn read_number(&mut self, first: char) -> CalcResult<Token> {
        let mut literal = String::from(first);
        while let Some(&ch) = self.input.peek() {
            if ch.is_ascii_digit() || ch == '.' {
                literal.push(ch);
                self.bump();
            } else {
                break;
            }
        }

        if literal.matches('.').count() > 1 || literal == "." {
            return Err(CalcError::InvalidNumber(literal));
        }
        literal
            .parse::<f64>()
            .map(Token::Number)
            .map_err(|_| CalcError::InvalidNumber(literal))
    }

    fn read_identifiers(&mut self, first: char) -> CalcResult<Token> {
        let mut run = String::from(first);
        while let Some(&ch) = self.input.peek() {
            if ch.is_ascii_alphabetic() {
                run.push(ch);
                self.bump();
            } else {
                break;
            }
        }

        let names = split_identifier_run(&run).ok_or(CalcError::UnknownFunction(run))?;
        self.pending.extend(names.into_iter().map(Token::Ident));
        self.pending.pop_front().ok_or(CalcError::UnexpectedEnd)
    }
}

/// Splits an alphabetic run into known names, greedily from the left.
fn split_identifier_run(run: &str) -> Option<Vec<&'static str>> {
    let mut rest = run;
    let mut names = Vec::new();
    while !rest.is_empty() {
        let name = KNOWN_NAMES.iter().find(|name| rest.starts_with(**name))?;
        names.push(*name);
        rest = &rest[name.len()..];
    }
    Some(names)
}

/// Collects every token of `input`, ending with `Token::Eof`.
pub fn tokenize(input: &str) -> CalcResult<Vec<Token>> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        let done = token == Token::Eof;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{tokenize, Token};
    use crate::calc::CalcError;

    #[test]
    fn tokenizes_operators_and_numbers() {
        let tokens = tokenize("1.5+2*(3-.5)").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Number(1.5),
                Token::Plus,
                Token::Number(2.0),
                Token::Star,
                Token::LParen,
                Token::Number(3.0),
                Token::Minus,
                Token::Number(0.5),
                Token::RParen,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn splits_glued_identifiers() {
        let tokens = tokenize("esqrtπ").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Ident("e"),
                Token::Ident("sqrt"),
                Token::Ident("pi"),
                Token::Eof
            ]
        );
    }

    #[test]
    fn exp_is_not_split_into_e() {
        assert_eq!(tokenize("exp").unwrap()[0], Token::Ident("exp"));
    }

    #[test]
    fn double_star_is_power() {
        assert_eq!(tokenize("2**3").unwrap()[1], Token::Caret);
    }

    #[test]
    fn rejects_unknown_identifier_and_bad_numbers() {
        assert!(matches!(
            tokenize("foo(1)"),
            Err(CalcError::UnknownFunction(name)) if name == "foo"
        ));
        assert!(matches!(
            tokenize("1.2.3"),
            Err(CalcError::InvalidNumber(_))
        ));
        assert!(matches!(
            tokenize("2 % 3"),
            Err(CalcError::UnexpectedChar { ch: '%', position: 2 })
        ));
    }
}
