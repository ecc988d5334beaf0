// src/lib.rs
//! # Rule Compiler
//!
//! Compiles short, natural-language-flavored conditional rules
//! ("if P then Q must hold") into a canonical abstract syntax tree for
//! consumption by code-generation backends.
//!
//! The front end recognizes multi-word keyword phrases and synonyms with
//! longest-match disambiguation, discards filler words anywhere between
//! tokens, and builds the tree bottom-up through a precedence-climbing
//! recursive-descent grammar. Every AST node exposes a uniform structural
//! contract (arity, ordered children, reconstruction) so consumers can
//! traverse or rewrite the tree without per-variant logic.
//!
//! ## Example
//!
//! ```rust
//! use rule_compiler::{BinaryOp, Expr, Rule};
//!
//! let rule = Rule::parse(r#"IF [Age] > 18 THEN [Status] = "Adult""#).unwrap();
//!
//! match &rule.filter {
//!     Expr::Binary { op, .. } => assert_eq!(*op, BinaryOp::Gt),
//!     _ => unreachable!(),
//! }
//!
//! // The same rule, spelled out in words with filler in between:
//! let worded = Rule::parse(
//!     r#"WHEN THE VALUE OF [Age] IS GREATER THAN 18 THEN [Status] IS "Adult""#,
//! ).unwrap();
//! assert_eq!(rule, worded);
//! ```

pub mod codegen;
pub mod parser;
pub mod printer;
pub mod rewrite;

use thiserror::Error;

pub use parser::ast::{BinaryOp, Expr, Literal, Rule, UnaryOp};

/// The single parse-failure kind: the expected construct, and roughly where
/// the input stopped matching.
///
/// Failures propagate unchanged to the top-level caller; no partial tree is
/// ever produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("syntax error at position {position}: {message}")]
pub struct SyntaxError {
    pub message: String,
    /// Character offset of the token where matching failed.
    pub position: usize,
}

/// Errors in the compiled-rule snapshot format
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("encode error: {0}")]
    Encode(String),

    #[error("decode error: {0}")]
    Decode(String),
}

impl Rule {
    /// Compile one rule from source text.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rule_compiler::Rule;
    ///
    /// let rule = Rule::parse("IF [Amount] > 1000 THEN [Reviewed] = TRUE").unwrap();
    /// let rejected = Rule::parse("IF [Amount] > 1000");
    /// assert!(rejected.is_err());
    /// ```
    pub fn parse(source: &str) -> Result<Self, SyntaxError> {
        parser::parse(source)
    }

    /// Serialize the compiled rule for storage or hot reload.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::Encode(e.to_string()))
    }

    /// Load a compiled rule from its serialized form.
    pub fn from_bytes(data: &[u8]) -> Result<Self, SnapshotError> {
        bincode::deserialize(data).map_err(|e| SnapshotError::Decode(e.to_string()))
    }
}
