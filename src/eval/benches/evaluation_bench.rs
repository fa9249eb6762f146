/// Benchmarks for expression evaluation
///
/// Measures performance of:
/// - Cold evaluation (fresh expression, parse or compile included)
/// - Warm evaluation (cached artifact reused)
/// - Formula evaluation (never cached)
/// - Concurrent evaluation of one shared expression

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dmn_eval::{EngineConfiguration, Expression, VariableContext};
use std::sync::Arc;
use std::thread;

fn context() -> VariableContext {
    VariableContext::new()
        .with_variable("a", 2)
        .with_variable("b", 3)
        .with_variable("limit", 4)
}

fn bench_cold_vs_warm(c: &mut Criterion) {
    let mut group = c.benchmark_group("cold_vs_warm");
    let handler = EngineConfiguration::default().build_handler();
    let ctx = context();

    for language in ["juel", "cel"] {
        group.bench_with_input(BenchmarkId::new("cold", language), &language, |b, &language| {
            b.iter(|| {
                let expression = Expression::new("a + b > limit");
                handler
                    .evaluate_expression(black_box(language), &expression, &ctx)
                    .unwrap()
            });
        });

        let expression = Expression::new("a + b > limit");
        handler.evaluate_expression(language, &expression, &ctx).unwrap();

        group.bench_with_input(BenchmarkId::new("warm", language), &language, |b, &language| {
            b.iter(|| {
                handler
                    .evaluate_expression(black_box(language), &expression, &ctx)
                    .unwrap()
            });
        });
    }

    group.finish();
}

fn bench_formula(c: &mut Criterion) {
    let handler = EngineConfiguration::default().build_handler();
    let expression = Expression::new("a + b > limit");
    let ctx = context();

    c.bench_function("formula_evaluation", |b| {
        b.iter(|| handler.evaluate_expression(black_box("feel"), &expression, &ctx).unwrap());
    });
}

fn bench_concurrent_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_evaluation");

    for threads in [2, 4, 8] {
        group.bench_with_input(BenchmarkId::from_parameter(threads), &threads, |b, &threads| {
            let handler = Arc::new(EngineConfiguration::default().build_handler());
            let expression = Arc::new(Expression::new("a * b"));

            b.iter(|| {
                let handles: Vec<_> = (0..threads)
                    .map(|_| {
                        let handler = handler.clone();
                        let expression = expression.clone();
                        thread::spawn(move || {
                            let ctx = context();
                            for _ in 0..100 {
                                black_box(handler.evaluate_expression("juel", &expression, &ctx).unwrap());
                            }
                        })
                    })
                    .collect();

                for handle in handles {
                    handle.join().unwrap();
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_cold_vs_warm, bench_formula, bench_concurrent_evaluation);
criterion_main!(benches);
