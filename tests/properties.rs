// tests/properties.rs
//! Property tests for the parser and the rewrite contract

use proptest::prelude::*;
use rule_compiler::{rewrite, BinaryOp, Expr, Literal, Rule, UnaryOp};

fn literal() -> impl Strategy<Value = Expr> {
    prop_oneof![
        (-1000i64..1000).prop_map(|n| Expr::Literal(Literal::Number(n as f64))),
        "[A-Za-z]{1,8}".prop_map(|s| Expr::Literal(Literal::String(s))),
        any::<bool>().prop_map(|b| Expr::Literal(Literal::Bool(b))),
    ]
}

fn binary_op() -> impl Strategy<Value = BinaryOp> {
    prop::sample::select(vec![
        BinaryOp::Or,
        BinaryOp::And,
        BinaryOp::Add,
        BinaryOp::Sub,
        BinaryOp::Mul,
        BinaryOp::Div,
        BinaryOp::Mod,
        BinaryOp::Gt,
        BinaryOp::Lt,
        BinaryOp::Eq,
        BinaryOp::Ne,
        BinaryOp::Gte,
        BinaryOp::Lte,
    ])
}

fn expr() -> impl Strategy<Value = Expr> {
    let leaf = prop_oneof![literal(), "[A-Za-z]{1,8}".prop_map(Expr::Identifier)];

    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            (inner.clone(), binary_op(), inner.clone()).prop_map(|(left, op, right)| {
                Expr::Binary {
                    left: Box::new(left),
                    op,
                    right: Box::new(right),
                }
            }),
            inner.clone().prop_map(|operand| Expr::Unary {
                op: UnaryOp::Not,
                operand: Box::new(operand),
            }),
            (inner.clone(), prop::collection::vec(literal(), 1..4)).prop_map(
                |(target, values)| Expr::InList {
                    target: Box::new(target),
                    values,
                }
            ),
            (inner, literal(), literal()).prop_map(|(target, lower, upper)| Expr::Between {
                target: Box::new(target),
                lower: Box::new(lower),
                upper: Box::new(upper),
            }),
        ]
    })
}

proptest! {
    /// Extracting the children and reconstructing with the identical
    /// sequence yields an equal node, for every shape.
    #[test]
    fn reconstruction_round_trip(e in expr()) {
        let children: Vec<Expr> = e.children().into_iter().cloned().collect();
        prop_assert_eq!(e.with_children(children), e);
    }

    #[test]
    fn arity_always_matches_children(e in expr()) {
        prop_assert_eq!(e.arity(), e.children().len());
    }

    #[test]
    fn identity_transform_preserves_the_tree(e in expr()) {
        prop_assert_eq!(rewrite::transform(&e, &mut |node| node), e);
    }

    /// A chain of k same-level operators nests strictly left-to-right.
    #[test]
    fn subtraction_chain_nests_left(values in prop::collection::vec(0u32..100, 2..10)) {
        let source = values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(" - ");
        let rule = Rule::parse(&format!("IF {} = 0 THEN [Ok] = 1", source)).unwrap();

        let mut expected = Expr::Literal(Literal::Number(values[0] as f64));
        for v in &values[1..] {
            expected = Expr::Binary {
                left: Box::new(expected),
                op: BinaryOp::Sub,
                right: Box::new(Expr::Literal(Literal::Number(*v as f64))),
            };
        }
        let expected = Expr::Binary {
            left: Box::new(expected),
            op: BinaryOp::Eq,
            right: Box::new(Expr::Literal(Literal::Number(0.0))),
        };

        prop_assert_eq!(rule.filter, expected);
    }

    /// Inserting noise words in front of arbitrary tokens never changes
    /// the resulting tree.
    #[test]
    fn noise_insertion_never_changes_the_tree(seed in prop::collection::vec(0usize..5, 9)) {
        let tokens = ["IF", "[A]", "=", "5", "THEN", "[B]", "=", "10"];
        let noise = ["THE", "A", "AN", "OF", "VALUE"];

        let baseline = Rule::parse(&tokens.join(" ")).unwrap();

        let mut noisy = String::new();
        for (i, token) in tokens.iter().enumerate() {
            noisy.push_str(noise[seed[i] % noise.len()]);
            noisy.push(' ');
            noisy.push_str(token);
            noisy.push(' ');
        }
        noisy.push_str(noise[seed[8] % noise.len()]);

        prop_assert_eq!(Rule::parse(&noisy).unwrap(), baseline);
    }

    /// The parse is referentially transparent: identical input, identical
    /// tree.
    #[test]
    fn parsing_is_deterministic(values in prop::collection::vec(0u32..100, 1..5)) {
        let list = values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let source = format!("IF [X] IN ({}) THEN [Y] = 1", list);

        prop_assert_eq!(Rule::parse(&source).unwrap(), Rule::parse(&source).unwrap());
    }
}
