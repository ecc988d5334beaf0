// src/parser/parser.rs
//! Recursive-descent parser building the rule AST
//!
//! One parsing level per binding strength, loosest to tightest: Or, And,
//! postfix Not, comparison family (comparison, IN list, BETWEEN), additive,
//! multiplicative, primary. Same-level operator chains are left-folded, so
//! `10 - 2 - 3` nests as `(10 - 2) - 3`.

use super::ast::*;
use super::scanner::{Scanner, Token};
use crate::SyntaxError;

pub struct Parser {
    scanner: Scanner,
    current_token: Token,
}

impl Parser {
    pub fn new(input: &str) -> Result<Self, SyntaxError> {
        let mut scanner = Scanner::new(input);
        let current_token = scanner.next_token()?;

        Ok(Self {
            scanner,
            current_token,
        })
    }

    /// Parse a complete rule: filter keyword, filter expression,
    /// requirement keyword, requirement expression, end of input.
    pub fn parse_rule(&mut self) -> Result<Rule, SyntaxError> {
        self.expect(&Token::If, "filter keyword 'IF'")?;
        let filter = self.parse_expression()?;

        self.expect(&Token::Then, "requirement keyword 'THEN'")?;
        let requirement = self.parse_expression()?;

        // Grammar shape alone does not reject trailing text; a rule ends
        // only at end of input.
        if self.current_token != Token::Eof {
            return Err(self.error(&format!(
                "expected end of input after requirement, got {}",
                self.current_token
            )));
        }

        Ok(Rule { filter, requirement })
    }

    fn parse_expression(&mut self) -> Result<Expr, SyntaxError> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.parse_and()?;

        while self.current_token == Token::Or {
            self.advance()?;
            let right = self.parse_and()?;
            left = Expr::Binary {
                left: Box::new(left),
                op: BinaryOp::Or,
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.parse_not_term()?;

        while self.current_token == Token::And {
            self.advance()?;
            let right = self.parse_not_term()?;
            left = Expr::Binary {
                left: Box::new(left),
                op: BinaryOp::And,
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    /// Negation is a single optional trailing marker after a
    /// comparison-family expression.
    fn parse_not_term(&mut self) -> Result<Expr, SyntaxError> {
        let expr = self.parse_comparison()?;

        if self.current_token == Token::Not {
            self.advance()?;
            return Ok(Expr::Unary {
                op: UnaryOp::Not,
                operand: Box::new(expr),
            });
        }

        Ok(expr)
    }

    /// At most one comparison-family clause may follow an additive
    /// expression; first match wins, so chained comparisons are not
    /// representable.
    fn parse_comparison(&mut self) -> Result<Expr, SyntaxError> {
        let left = self.parse_additive()?;

        let op = match self.current_token {
            Token::Gt => Some(BinaryOp::Gt),
            Token::Lt => Some(BinaryOp::Lt),
            Token::Eq => Some(BinaryOp::Eq),
            Token::Ne => Some(BinaryOp::Ne),
            Token::Gte => Some(BinaryOp::Gte),
            Token::Lte => Some(BinaryOp::Lte),
            _ => None,
        };

        if let Some(op) = op {
            self.advance()?;
            let right = self.parse_additive()?;
            return Ok(Expr::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
            });
        }

        if self.current_token == Token::In {
            return self.parse_in_list(left);
        }

        if self.current_token == Token::Between {
            return self.parse_between(left);
        }

        Ok(left)
    }

    fn parse_in_list(&mut self, target: Expr) -> Result<Expr, SyntaxError> {
        self.advance()?; // IN
        self.expect(&Token::LeftParen, "'(' after IN")?;

        // The value list is non-empty: the grammar requires a first literal.
        let mut values = vec![self.parse_literal()?];
        while self.current_token == Token::Comma {
            self.advance()?;
            values.push(self.parse_literal()?);
        }

        self.expect(&Token::RightParen, "')' closing the IN list")?;

        Ok(Expr::InList {
            target: Box::new(target),
            values,
        })
    }

    fn parse_between(&mut self, target: Expr) -> Result<Expr, SyntaxError> {
        self.advance()?; // BETWEEN

        let lower = self.parse_literal()?;
        self.expect(&Token::And, "'AND' between the range bounds")?;
        let upper = self.parse_literal()?;

        Ok(Expr::Between {
            target: Box::new(target),
            lower: Box::new(lower),
            upper: Box::new(upper),
        })
    }

    fn parse_additive(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = match self.current_token {
                Token::Plus => BinaryOp::Add,
                Token::Minus => BinaryOp::Sub,
                _ => break,
            };

            self.advance()?;
            let right = self.parse_multiplicative()?;

            left = Expr::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.parse_primary()?;

        loop {
            let op = match self.current_token {
                Token::Star => BinaryOp::Mul,
                Token::Slash => BinaryOp::Div,
                Token::Percent => BinaryOp::Mod,
                _ => break,
            };

            self.advance()?;
            let right = self.parse_primary()?;

            left = Expr::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_primary(&mut self) -> Result<Expr, SyntaxError> {
        match &self.current_token {
            Token::LeftParen => {
                self.advance()?;
                let expr = self.parse_expression()?;
                self.expect(&Token::RightParen, "')'")?;
                Ok(expr)
            }
            Token::Identifier(name) => {
                let name = name.clone();
                self.advance()?;
                Ok(Expr::Identifier(name))
            }
            Token::Number(_) | Token::Str(_) | Token::Bool(_) => self.parse_literal(),
            _ => Err(self.error(&format!(
                "expected '(', identifier, or literal, got {}",
                self.current_token
            ))),
        }
    }

    fn parse_literal(&mut self) -> Result<Expr, SyntaxError> {
        let literal = match &self.current_token {
            Token::Number(n) => Literal::Number(*n),
            Token::Str(s) => Literal::String(s.clone()),
            Token::Bool(b) => Literal::Bool(*b),
            _ => {
                return Err(self.error(&format!(
                    "expected a literal value, got {}",
                    self.current_token
                )))
            }
        };

        self.advance()?;
        Ok(Expr::Literal(literal))
    }

    fn expect(&mut self, expected: &Token, what: &str) -> Result<(), SyntaxError> {
        if std::mem::discriminant(&self.current_token) == std::mem::discriminant(expected) {
            self.advance()?;
            Ok(())
        } else {
            Err(self.error(&format!("expected {}, got {}", what, self.current_token)))
        }
    }

    fn advance(&mut self) -> Result<(), SyntaxError> {
        self.current_token = self.scanner.next_token()?;
        Ok(())
    }

    fn error(&self, message: &str) -> SyntaxError {
        SyntaxError {
            message: message.to_string(),
            position: self.scanner.token_start(),
        }
    }
}
