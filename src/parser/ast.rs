// src/parser/ast.rs
//! Abstract Syntax Tree for compiled rules
//!
//! Every node implements the structural contract used by generic rewriting:
//! a fixed arity, an ordered child sequence, and reconstruction from a
//! replacement sequence of the same length.

use serde::{Deserialize, Serialize};

/// A compiled rule: whenever `filter` holds, `requirement` must hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub filter: Expr,
    pub requirement: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// Binary operation: a + b, a > b, a AND b
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },

    /// Unary operation: postfix NOT
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },

    /// Set membership: target IN (v1, v2, ...)
    InList {
        target: Box<Expr>,
        values: Vec<Expr>,
    },

    /// Inclusive range: target BETWEEN lower AND upper
    Between {
        target: Box<Expr>,
        lower: Box<Expr>,
        upper: Box<Expr>,
    },

    /// Bracket-delimited field reference, text kept verbatim
    Identifier(String),

    /// Literal value
    Literal(Literal),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    // Logical
    Or,
    And,

    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Comparison
    Gt,
    Lt,
    Eq,
    Ne,
    Gte,
    Lte,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    Not,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Number(f64),
    String(String),
    Bool(bool),
}

impl Expr {
    /// Fixed child count of this node. Terminals report 0; `InList` reports
    /// one child per value plus the target.
    pub fn arity(&self) -> usize {
        match self {
            Expr::Binary { .. } => 2,
            Expr::Unary { .. } => 1,
            Expr::InList { values, .. } => 1 + values.len(),
            Expr::Between { .. } => 3,
            Expr::Identifier(_) | Expr::Literal(_) => 0,
        }
    }

    /// Children in their stable order: `Binary` is left then right,
    /// `Between` is target, lower, upper, and `InList` is target followed
    /// by the values in source order.
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Expr::Binary { left, right, .. } => vec![left.as_ref(), right.as_ref()],
            Expr::Unary { operand, .. } => vec![operand.as_ref()],
            Expr::InList { target, values } => {
                let mut children = Vec::with_capacity(1 + values.len());
                children.push(target.as_ref());
                children.extend(values.iter());
                children
            }
            Expr::Between { target, lower, upper } => {
                vec![target.as_ref(), lower.as_ref(), upper.as_ref()]
            }
            Expr::Identifier(_) | Expr::Literal(_) => Vec::new(),
        }
    }

    /// Rebuild this node with a replacement child sequence, keeping the
    /// operator and variant. The sequence length must equal `arity()`.
    /// Terminals ignore the input and reconstruct as themselves.
    pub fn with_children(&self, children: Vec<Expr>) -> Expr {
        assert_eq!(
            children.len(),
            self.arity(),
            "replacement child count must match node arity"
        );

        let mut children = children.into_iter();

        match self {
            Expr::Binary { op, .. } => Expr::Binary {
                left: Box::new(children.next().unwrap()),
                op: *op,
                right: Box::new(children.next().unwrap()),
            },
            Expr::Unary { op, .. } => Expr::Unary {
                op: *op,
                operand: Box::new(children.next().unwrap()),
            },
            Expr::InList { .. } => Expr::InList {
                target: Box::new(children.next().unwrap()),
                values: children.collect(),
            },
            Expr::Between { .. } => Expr::Between {
                target: Box::new(children.next().unwrap()),
                lower: Box::new(children.next().unwrap()),
                upper: Box::new(children.next().unwrap()),
            },
            Expr::Identifier(_) | Expr::Literal(_) => self.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_between() -> Expr {
        Expr::Between {
            target: Box::new(Expr::Identifier("Age".to_string())),
            lower: Box::new(Expr::Literal(Literal::Number(20.0))),
            upper: Box::new(Expr::Literal(Literal::Number(30.0))),
        }
    }

    #[test]
    fn test_arity_matches_children_len() {
        let exprs = vec![
            Expr::Identifier("A".to_string()),
            Expr::Literal(Literal::Bool(true)),
            Expr::Unary {
                op: UnaryOp::Not,
                operand: Box::new(Expr::Literal(Literal::Bool(false))),
            },
            Expr::Binary {
                left: Box::new(Expr::Literal(Literal::Number(1.0))),
                op: BinaryOp::Add,
                right: Box::new(Expr::Literal(Literal::Number(2.0))),
            },
            sample_between(),
            Expr::InList {
                target: Box::new(Expr::Identifier("Role".to_string())),
                values: vec![
                    Expr::Literal(Literal::String("Admin".to_string())),
                    Expr::Literal(Literal::String("User".to_string())),
                ],
            },
        ];

        for expr in &exprs {
            assert_eq!(expr.arity(), expr.children().len());
        }
    }

    #[test]
    fn test_between_child_order() {
        let binding = sample_between();
        let children = binding.children();

        assert_eq!(children[0], &Expr::Identifier("Age".to_string()));
        assert_eq!(children[1], &Expr::Literal(Literal::Number(20.0)));
        assert_eq!(children[2], &Expr::Literal(Literal::Number(30.0)));
    }

    #[test]
    fn test_in_list_children_follow_source_order() {
        let expr = Expr::InList {
            target: Box::new(Expr::Identifier("Role".to_string())),
            values: vec![
                Expr::Literal(Literal::String("Admin".to_string())),
                Expr::Literal(Literal::String("User".to_string())),
            ],
        };

        assert_eq!(expr.arity(), 3);
        assert_eq!(
            expr.children()[1],
            &Expr::Literal(Literal::String("Admin".to_string()))
        );
        assert_eq!(
            expr.children()[2],
            &Expr::Literal(Literal::String("User".to_string()))
        );
    }

    #[test]
    fn test_reconstruction_round_trip() {
        let expr = Expr::Binary {
            left: Box::new(sample_between()),
            op: BinaryOp::And,
            right: Box::new(Expr::Identifier("Active".to_string())),
        };

        let children: Vec<Expr> = expr.children().into_iter().cloned().collect();
        assert_eq!(expr.with_children(children), expr);
    }

    #[test]
    fn test_with_children_substitutes() {
        let expr = Expr::Unary {
            op: UnaryOp::Not,
            operand: Box::new(Expr::Literal(Literal::Bool(true))),
        };

        let rebuilt = expr.with_children(vec![Expr::Identifier("Flag".to_string())]);

        assert_eq!(
            rebuilt,
            Expr::Unary {
                op: UnaryOp::Not,
                operand: Box::new(Expr::Identifier("Flag".to_string())),
            }
        );
    }

    #[test]
    fn test_terminal_reconstruction_is_identity() {
        let expr = Expr::Identifier("Age".to_string());
        assert_eq!(expr.with_children(Vec::new()), expr);

        let lit = Expr::Literal(Literal::Number(5.0));
        assert_eq!(lit.with_children(Vec::new()), lit);
    }

    #[test]
    #[should_panic(expected = "child count")]
    fn test_wrong_child_count_panics() {
        let expr = sample_between();
        expr.with_children(vec![Expr::Identifier("X".to_string())]);
    }
}
