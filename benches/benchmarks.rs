/*
MIT License

Copyright (c) 2025 multislice contributors
*/

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use multislice::potential::AkimaSpline;
use multislice::structure::AliasSampler;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn sampler_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Alias sampling");

    let weights: Vec<f64> = {
        let raw: Vec<f64> = (1..=64).map(|i| 1.0 / i as f64).collect();
        let sum: f64 = raw.iter().sum();
        raw.iter().map(|w| w / sum).collect()
    };

    group.bench_function("build_64", |b| {
        b.iter(|| AliasSampler::new(black_box(&weights)).unwrap())
    });

    let sampler = AliasSampler::new(&weights).unwrap();
    group.bench_function("draw", |b| {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        b.iter(|| black_box(sampler.draw(&mut rng)))
    });

    group.finish();
}

fn spline_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Akima spline");

    let x: Vec<f64> = (0..30).map(|i| 0.2 * i as f64).collect();
    let y: Vec<f64> = x.iter().map(|xi| 5.0 * (-xi * xi / 3.0).exp()).collect();

    group.bench_function("fit_30", |b| {
        b.iter(|| AkimaSpline::new(black_box(x.clone()), black_box(y.clone())).unwrap())
    });

    let spline = AkimaSpline::new(x, y).unwrap();
    group.bench_function("eval", |b| {
        b.iter(|| {
            for i in 0..100 {
                black_box(spline.eval(black_box(i as f64 * 0.05)));
            }
        })
    });

    group.finish();
}

criterion_group!(benches, sampler_benchmark, spline_benchmark);
criterion_main!(benches);
