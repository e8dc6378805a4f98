//! Recursive-descent parser for calculator expressions.
//!
//! Grammar:
//!
//! ```text
//! expression     --> additive
//! additive       --> multiplicative ( ("+" | "-") multiplicative )*
//! multiplicative --> unary ( ("*" | "/") unary | <implicit> power )*
//! unary          --> ("-" | "+") unary | power
//! power          --> postfix ( "^" unary )?
//! postfix        --> primary "!"*
//! primary        --> NUMBER | CONSTANT | FUNCTION primary | "(" expression ")"?
//! ```
//!
//! # Invariants
//! - At most one `!` per expression.
//! - A missing `)` is accepted only at the end of input.
//! - Recursion depth and operator count are bounded, so the tree handed to
//!   the evaluator is never deeper than `MAX_NESTING + MAX_OPERATORS`.

use super::ast::{BinaryOp, Constant, Expr, Function, UnaryOp};
use super::error::{CalcError, CalcResult};
use super::token::{Lexer, Token};

/// Nested parentheses, signs, powers and function calls.
const MAX_NESTING: usize = 128;
/// Binary operators, implicit multiplication included.
const MAX_OPERATORS: usize = 512;

/// Parses a full calculator expression.
pub fn parse(input: &str) -> CalcResult<Expr> {
    let mut parser = Parser::new(input)?;
    if parser.current == Token::Eof {
        return Err(CalcError::Empty);
    }

    let expr = parser.parse_expression()?;
    if parser.current != Token::Eof {
        return Err(CalcError::UnexpectedToken(parser.current.to_string()));
    }
    Ok(expr)
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    factorials: usize,
    nesting: usize,
    operators: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> CalcResult<Self> {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            factorials: 0,
            nesting: 0,
            operators: 0,
        })
    }

    fn advance(&mut self) -> CalcResult<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn enter(&mut self) -> CalcResult<()> {
        self.nesting += 1;
        if self.nesting > MAX_NESTING {
            return Err(CalcError::TooComplex);
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.nesting -= 1;
    }

    fn binary(&mut self, op: BinaryOp, left: Expr, right: Expr) -> CalcResult<Expr> {
        self.operators += 1;
        if self.operators > MAX_OPERATORS {
            return Err(CalcError::TooComplex);
        }
        Ok(Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    fn parse_expression(&mut self) -> CalcResult<Expr> {
        self.parse_additive()
    }

    fn parse_additive(&mut self) -> CalcResult<Expr> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let op = match self.current {
                Token::Plus => BinaryOp::Add,
                Token::Minus => BinaryOp::Subtract,
                _ => break,
            };
            self.advance()?;
            let right = self.parse_multiplicative()?;
            left = self.binary(op, left, right)?;
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> CalcResult<Expr> {
        let mut left = self.parse_unary()?;
        loop {
            let (op, right) = match self.current {
                Token::Star => {
                    self.advance()?;
                    (BinaryOp::Multiply, self.parse_unary()?)
                }
                Token::Slash => {
                    self.advance()?;
                    (BinaryOp::Divide, self.parse_unary()?)
                }
                _ if self.current.starts_operand() => (BinaryOp::Multiply, self.parse_power()?),
                _ => break,
            };
            left = self.binary(op, left, right)?;
        }
        Ok(left)
    }

    // Every recursive path (parentheses, signs, exponents) passes through here.
    fn parse_unary(&mut self) -> CalcResult<Expr> {
        self.enter()?;
        let expr = self.parse_signed()?;
        self.leave();
        Ok(expr)
    }

    fn parse_signed(&mut self) -> CalcResult<Expr> {
        let op = match self.current {
            Token::Minus => UnaryOp::Negate,
            Token::Plus => UnaryOp::Plus,
            _ => return self.parse_power(),
        };
        self.advance()?;
        let operand = self.parse_unary()?;
        Ok(Expr::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    fn parse_power(&mut self) -> CalcResult<Expr> {
        let base = self.parse_postfix()?;
        if self.current != Token::Caret {
            return Ok(base);
        }
        self.advance()?;
        let exponent = self.parse_unary()?;
        self.binary(BinaryOp::Power, base, exponent)
    }

    fn parse_postfix(&mut self) -> CalcResult<Expr> {
        let mut operand = self.parse_primary()?;
        while self.current == Token::Bang {
            self.factorials += 1;
            if self.factorials > 1 {
                return Err(CalcError::MultipleFactorials);
            }
            self.advance()?;
            operand = Expr::Factorial(Box::new(operand));
        }
        Ok(operand)
    }

    fn parse_primary(&mut self) -> CalcResult<Expr> {
        match self.current.clone() {
            Token::Number(value) => {
                self.advance()?;
                Ok(Expr::Number(value))
            }
            Token::Ident("pi") => {
                self.advance()?;
                Ok(Expr::Constant(Constant::Pi))
            }
            Token::Ident("e") => {
                self.advance()?;
                Ok(Expr::Constant(Constant::E))
            }
            Token::Ident(name) => {
                let function = Function::from_name(name)
                    .ok_or_else(|| CalcError::UnknownFunction(name.to_string()))?;
                self.advance()?;
                self.enter()?;
                let argument = self.parse_primary()?;
                self.leave();
                Ok(Expr::Call {
                    function,
                    argument: Box::new(argument),
                })
            }
            Token::LParen => {
                self.advance()?;
                let inner = self.parse_expression()?;
                match self.current {
                    Token::RParen => self.advance()?,
                    // Unclosed parentheses are closed at end of input.
                    Token::Eof => {}
                    ref other => return Err(CalcError::UnexpectedToken(other.to_string())),
                }
                Ok(inner)
            }
            Token::Eof => Err(CalcError::UnexpectedEnd),
            other => Err(CalcError::UnexpectedToken(other.to_string())),
        }
    }
}
