// src/codegen/sql.rs
//! SQL predicate emitter
//!
//! Renders a compiled rule as a WHERE-style predicate string. A rule holds
//! for a row when the filter does not match or the requirement does, so the
//! emitted shape is `NOT (filter) OR (requirement)`.

use crate::parser::ast::{BinaryOp, Expr, Literal, Rule, UnaryOp};

/// Emit a complete rule as one SQL predicate.
pub fn predicate(rule: &Rule) -> String {
    format!(
        "NOT ({}) OR ({})",
        expr_to_sql(&rule.filter),
        expr_to_sql(&rule.requirement)
    )
}

/// Emit one expression in SQL syntax.
pub fn expr_to_sql(expr: &Expr) -> String {
    match expr {
        Expr::Binary { left, op, right } => {
            let strength = binding(*op);
            format!(
                "{} {} {}",
                left_operand(left, strength),
                sql_op(*op),
                right_operand(right, strength)
            )
        }
        Expr::Unary {
            op: UnaryOp::Not,
            operand,
        } => format!("NOT ({})", expr_to_sql(operand)),
        Expr::InList { target, values } => {
            let list: Vec<String> = values.iter().map(expr_to_sql).collect();
            format!("{} IN ({})", left_operand(target, COMPARISON), list.join(", "))
        }
        Expr::Between {
            target,
            lower,
            upper,
        } => format!(
            "{} BETWEEN {} AND {}",
            left_operand(target, COMPARISON),
            expr_to_sql(lower),
            expr_to_sql(upper)
        ),
        Expr::Identifier(name) => quote_identifier(name),
        Expr::Literal(literal) => literal_to_sql(literal),
    }
}

const COMPARISON: u8 = 3;

fn binding(op: BinaryOp) -> u8 {
    match op {
        BinaryOp::Or => 1,
        BinaryOp::And => 2,
        BinaryOp::Gt
        | BinaryOp::Lt
        | BinaryOp::Eq
        | BinaryOp::Ne
        | BinaryOp::Gte
        | BinaryOp::Lte => COMPARISON,
        BinaryOp::Add | BinaryOp::Sub => 4,
        BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => 5,
    }
}

fn sql_op(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Or => "OR",
        BinaryOp::And => "AND",
        BinaryOp::Add => "+",
        BinaryOp::Sub => "-",
        BinaryOp::Mul => "*",
        BinaryOp::Div => "/",
        BinaryOp::Mod => "%",
        BinaryOp::Gt => ">",
        BinaryOp::Lt => "<",
        BinaryOp::Eq => "=",
        BinaryOp::Ne => "<>",
        BinaryOp::Gte => ">=",
        BinaryOp::Lte => "<=",
    }
}

/// A left operand needs parentheses only when it binds looser than its
/// parent; same-strength chains were left-folded by the parser.
fn left_operand(expr: &Expr, parent: u8) -> String {
    match expr {
        Expr::Binary { op, .. } if binding(*op) < parent => format!("({})", expr_to_sql(expr)),
        _ => expr_to_sql(expr),
    }
}

/// A right operand at the same strength must keep its parentheses, or
/// `1 - (2 - 3)` would re-read as `(1 - 2) - 3`.
fn right_operand(expr: &Expr, parent: u8) -> String {
    match expr {
        Expr::Binary { op, .. } if binding(*op) <= parent => format!("({})", expr_to_sql(expr)),
        _ => expr_to_sql(expr),
    }
}

fn quote_identifier(name: &str) -> String {
    // Qualifying dots are opaque to the parser; the emitter splits them
    // into quoted path segments.
    name.split('.')
        .map(|segment| format!("\"{}\"", segment.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(".")
}

fn literal_to_sql(literal: &Literal) -> String {
    match literal {
        Literal::Number(n) => {
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{}", *n as i64)
            } else {
                format!("{}", n)
            }
        }
        Literal::String(s) => format!("'{}'", s.replace('\'', "''")),
        Literal::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
    }
}
