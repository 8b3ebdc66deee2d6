//! Benchmark for heightmap generation.
//!
//! Run with: cargo bench --package terravox_procedural --bench heightmap_benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use terravox_procedural::{GridDimensions, HeightmapGenerator, SeedOffset};

fn benchmark_grid_sizes(c: &mut Criterion) {
    let generator = HeightmapGenerator::default();

    let mut group = c.benchmark_group("heightmap");
    for side in [64usize, 128, 256] {
        let dims = GridDimensions::new(side, side).expect("positive dimensions");
        group.throughput(Throughput::Elements((side * side) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(side), &dims, |b, &dims| {
            b.iter(|| black_box(generator.generate_grid(dims, SeedOffset::new(42.0))));
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_grid_sizes);
criterion_main!(benches);
