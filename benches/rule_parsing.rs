// benches/rule_parsing.rs
//! Performance benchmarks for the compiler front end
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rule_compiler::Rule;

fn benchmark_simple_rule(c: &mut Criterion) {
    let source = r#"IF [Age] > 18 THEN [Status] = "Adult""#;

    c.bench_function("parse_simple_rule", |b| {
        b.iter(|| Rule::parse(black_box(source)).unwrap())
    });
}

fn benchmark_worded_rule(c: &mut Criterion) {
    let source = r#"WHEN THE VALUE OF [Age] IS GREATER OR EQUAL 18 AND [Role] IN ("Admin", "User") THEN THE [Score] IS LESS OR EQUAL 100"#;

    c.bench_function("parse_worded_rule", |b| {
        b.iter(|| Rule::parse(black_box(source)).unwrap())
    });
}

fn benchmark_long_operator_chain(c: &mut Criterion) {
    let mut source = String::from("IF 1");
    for i in 0..100 {
        source.push_str(&format!(" + {}", i));
    }
    source.push_str(" > 0 THEN [Ok] = TRUE");

    c.bench_function("parse_100_term_chain", |b| {
        b.iter(|| Rule::parse(black_box(&source)).unwrap())
    });
}

criterion_group!(
    benches,
    benchmark_simple_rule,
    benchmark_worded_rule,
    benchmark_long_operator_chain
);
criterion_main!(benches);
