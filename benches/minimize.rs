use automata_minimize::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn minimize_random(c: &mut Criterion) {
    fastrand::seed(1);
    let mut group = c.benchmark_group("minimize");
    for size in [100, 1_000, 10_000] {
        let dfa = generate_random_dfa(4, size, 0.9);
        group.bench_with_input(BenchmarkId::from_parameter(size), &dfa, |b, dfa| {
            b.iter(|| black_box(dfa.minimize().unwrap()))
        });
    }
    group.finish();
}

criterion_group!(benches, minimize_random);
criterion_main!(benches);
