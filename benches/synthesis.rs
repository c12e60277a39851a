//! Performance measurement for full synthesis runs

// Criterion macros generate undocumented functions
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use texweave::{Parameters, Pixmap, Synthesizer};

/// Deterministic multi-tone corpus so runs are comparable across machines
fn gradient_corpus(edge: usize) -> Pixmap {
    let mut bytes = Vec::with_capacity(edge * edge * 3);
    for y in 0..edge {
        for x in 0..edge {
            bytes.extend_from_slice(&[(x * 8) as u8, (y * 8) as u8, ((x + y) * 4) as u8]);
        }
    }
    Pixmap::from_raw(edge, edge, 3, bytes).expect("valid corpus")
}

/// Measures a full run as the corpus and output grow together
fn bench_full_synthesis(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_synthesis");
    group.sample_size(10);

    for &edge in &[16usize, 32] {
        let corpus = gradient_corpus(edge);

        group.bench_with_input(BenchmarkId::from_parameter(edge), &edge, |b, _| {
            b.iter(|| {
                let Ok(mut synthesizer) = Synthesizer::new(corpus.clone(), edge, edge) else {
                    return;
                };
                let mut params = Parameters::new();
                params.set_random_seed(12345);
                if synthesizer.run(black_box(&params)).is_err() {
                    return;
                }
                black_box(synthesizer.pixels());
            });
        });
    }

    group.finish();
}

/// Measures how the neighborhood cap drives candidate scoring cost
fn bench_neighborhood_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("neighborhood_sweep");
    group.sample_size(10);

    let corpus = gradient_corpus(24);
    for &neighbors in &[8usize, 29, 64] {
        group.bench_with_input(
            BenchmarkId::from_parameter(neighbors),
            &neighbors,
            |b, &neighbors| {
                b.iter(|| {
                    let Ok(mut synthesizer) = Synthesizer::new(corpus.clone(), 24, 24) else {
                        return;
                    };
                    let mut params = Parameters::new();
                    params
                        .set_random_seed(12345)
                        .set_neighbors(neighbors)
                        .set_magic(0);
                    if synthesizer.run(black_box(&params)).is_err() {
                        return;
                    }
                    black_box(synthesizer.pixels());
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_full_synthesis, bench_neighborhood_sweep);
criterion_main!(benches);
