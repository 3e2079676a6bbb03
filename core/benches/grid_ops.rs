use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use lights_out_core::{GameConfig, GridGenerator, RandomGridGenerator, solve};

const SIZES: [u8; 4] = [5, 10, 20, 40];

fn bench_flip(c: &mut Criterion) {
    let mut group = c.benchmark_group("flip");
    for size in SIZES {
        let config = GameConfig::new_unchecked((size, size), 0.5);
        let grid = RandomGridGenerator::new(1).generate(config).unwrap();
        let center = (size / 2, size / 2);
        group.bench_with_input(BenchmarkId::from_parameter(size), &grid, |b, grid| {
            b.iter(|| black_box(grid).flip(center).unwrap())
        });
    }
    group.finish();
}

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");
    for size in SIZES {
        let config = GameConfig::new_unchecked((size, size), 0.5);
        let grid = RandomGridGenerator::new(1).generate(config).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &grid, |b, grid| {
            b.iter(|| solve(black_box(grid)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_flip, bench_solve);
criterion_main!(benches);
