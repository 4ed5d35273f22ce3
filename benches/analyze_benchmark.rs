use criterion::{black_box, criterion_group, criterion_main, Criterion};

use passvet::generator::GeneratorOptions;

fn bench_analyze(c: &mut Criterion) {
    let analyzer = passvet::default_analyzer();
    c.bench_function("analyze_common", |b| {
        b.iter(|| analyzer.analyze(black_box("Password1!")))
    });
    c.bench_function("analyze_random", |b| {
        b.iter(|| analyzer.analyze(black_box("Kj8#mP2!xQ9vL4nR")))
    });

    // scanning is capped, so very long input stays bounded
    let long = "aB3$qwerty1990".repeat(10_000);
    c.bench_function("analyze_long_input", |b| {
        b.iter(|| analyzer.analyze(black_box(&long)))
    });
}

fn bench_generate(c: &mut Criterion) {
    let options = GeneratorOptions::with_length(24);
    c.bench_function("generate_24", |b| {
        b.iter(|| passvet::generate(black_box(&options)))
    });
}

criterion_group!(benches, bench_analyze, bench_generate);
criterion_main!(benches);
