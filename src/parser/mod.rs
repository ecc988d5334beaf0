// src/parser/mod.rs
//! Compiler front end for the rule language
//!
//! Converts rule text into an immutable Abstract Syntax Tree (AST)

pub mod ast;
pub mod parser;
pub mod scanner;

use crate::SyntaxError;
pub use ast::Rule;

/// Parse one rule into an AST.
pub fn parse(source: &str) -> Result<Rule, SyntaxError> {
    let mut parser = parser::Parser::new(source)?;
    parser.parse_rule()
}
