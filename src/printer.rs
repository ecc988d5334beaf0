// src/printer.rs
//! Diagnostic tree rendering
//!
//! Renders a compiled rule as an indented text tree for inspection. The
//! traversal goes through the generic child contract, so new node shapes
//! render without changes here beyond their label.

use crate::parser::ast::{Expr, Literal, Rule};

/// Render a compiled rule, one node per line, two spaces per depth level.
pub fn render(rule: &Rule) -> String {
    let mut out = String::new();

    out.push_str("Rule\n");
    out.push_str("  Filter\n");
    render_expr(&rule.filter, 2, &mut out);
    out.push_str("  Requirement\n");
    render_expr(&rule.requirement, 2, &mut out);

    out
}

fn render_expr(expr: &Expr, depth: usize, out: &mut String) {
    out.push_str(&"  ".repeat(depth));
    out.push_str(&label(expr));
    out.push('\n');

    for child in expr.children() {
        render_expr(child, depth + 1, out);
    }
}

fn label(expr: &Expr) -> String {
    match expr {
        Expr::Binary { op, .. } => format!("Binary({:?})", op),
        Expr::Unary { op, .. } => format!("Unary({:?})", op),
        Expr::InList { values, .. } => format!("InList({} values)", values.len()),
        Expr::Between { .. } => "Between".to_string(),
        Expr::Identifier(name) => format!("Identifier(\"{}\")", name),
        Expr::Literal(Literal::Number(n)) => format!("Number({})", n),
        Expr::Literal(Literal::String(s)) => format!("String(\"{}\")", s),
        Expr::Literal(Literal::Bool(b)) => format!("Bool({})", b),
    }
}
