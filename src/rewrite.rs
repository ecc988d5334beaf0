// src/rewrite.rs
//! Generic tree rewriting built on the structural node contract
//!
//! Everything here walks the tree through `arity`/`children`/`with_children`
//! only, with no per-variant traversal logic. Variant-specific consumers can
//! still pattern-match directly when they need operator-specific behavior.

use crate::parser::ast::{BinaryOp, Expr, Literal, Rule};
use ahash::HashMap;

/// Rebuild an expression bottom-up, applying `f` to every node after its
/// children have been rewritten. The input tree is never mutated; unchanged
/// subtrees come back as fresh equal nodes.
pub fn transform(expr: &Expr, f: &mut impl FnMut(Expr) -> Expr) -> Expr {
    let rebuilt = if expr.arity() == 0 {
        expr.clone()
    } else {
        let children = expr
            .children()
            .into_iter()
            .map(|child| transform(child, f))
            .collect();
        expr.with_children(children)
    };

    f(rebuilt)
}

/// Rename identifiers in both clauses of a rule. Identifiers missing from
/// the mapping are left untouched.
pub fn rename_identifiers(rule: &Rule, mapping: &HashMap<String, String>) -> Rule {
    let mut rename = |expr: Expr| match expr {
        Expr::Identifier(name) => match mapping.get(&name) {
            Some(renamed) => Expr::Identifier(renamed.clone()),
            None => Expr::Identifier(name),
        },
        other => other,
    };

    Rule {
        filter: transform(&rule.filter, &mut rename),
        requirement: transform(&rule.requirement, &mut rename),
    }
}

/// Collapse arithmetic on two number literals into a single literal.
/// Division and modulo by zero are left unfolded.
pub fn fold_constants(expr: &Expr) -> Expr {
    transform(expr, &mut |node| {
        if let Expr::Binary { left, op, right } = &node {
            if let (Expr::Literal(Literal::Number(a)), Expr::Literal(Literal::Number(b))) =
                (left.as_ref(), right.as_ref())
            {
                let folded = match op {
                    BinaryOp::Add => Some(a + b),
                    BinaryOp::Sub => Some(a - b),
                    BinaryOp::Mul => Some(a * b),
                    BinaryOp::Div if *b != 0.0 => Some(a / b),
                    BinaryOp::Mod if *b != 0.0 => Some(a % b),
                    _ => None,
                };

                if let Some(value) = folded {
                    return Expr::Literal(Literal::Number(value));
                }
            }
        }
        node
    })
}
