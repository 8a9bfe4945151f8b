//! Criterion benchmarks for paf_voxel grid mutation and surface extraction.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use paf_voxel::{ExtractorConfig, Point3, SurfaceExtractor, VoxelGrid};

/// Create an n^3 grid holding a smooth sphere
fn make_sphere_grid(n: u32) -> VoxelGrid {
    let mut grid = VoxelGrid::new(n as f32, n as f32, n as f32, 1);
    let center = Point3::splat((n as f32 - 1.0) * 0.5);
    let radius = n as f32 * 0.35;

    let values: Vec<f32> = grid
        .iter()
        .map(|(coord, _)| {
            let d = (Point3::from(coord) - center).length();
            (0.5 + (radius - d) * 0.1).clamp(0.0, 1.0)
        })
        .collect();
    grid.cells_mut().copy_from_slice(&values);
    grid
}

/// Create an n^3 binary noise grid (worst case: many surface cubes)
fn make_noise_grid(n: u32) -> VoxelGrid {
    let mut grid = VoxelGrid::new(n as f32, n as f32, n as f32, 1);
    grid.randomize(42).high_pass(0.5);
    grid
}

fn bench_mutators(c: &mut Criterion) {
    let mut group = c.benchmark_group("mutators");
    let mut grid = VoxelGrid::new(64.0, 64.0, 64.0, 1);
    group.throughput(Throughput::Elements(grid.len() as u64));

    group.bench_function("fill_64", |b| b.iter(|| black_box(grid.fill(black_box(0.3)).len())));
    group.bench_function("randomize_64", |b| {
        b.iter(|| black_box(grid.randomize(black_box(7)).len()))
    });
    group.bench_function("high_pass_64", |b| {
        b.iter(|| black_box(grid.high_pass(black_box(0.5)).len()))
    });

    group.finish();
}

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract");

    for n in [16u32, 32, 64] {
        let sphere = make_sphere_grid(n);
        let cubes = sphere.dimensions().cube_volume() as u64;
        group.throughput(Throughput::Elements(cubes));

        let sequential = SurfaceExtractor::new(ExtractorConfig::default().with_parallel(false));
        let parallel = SurfaceExtractor::new(
            ExtractorConfig::default()
                .with_parallel(true)
                .with_min_parallel_cubes(0),
        );
        let unwelded = SurfaceExtractor::new(
            ExtractorConfig::default()
                .with_parallel(false)
                .with_weld_vertices(false),
        );

        group.bench_with_input(BenchmarkId::new("sphere_sequential", n), &sphere, |b, g| {
            b.iter(|| black_box(sequential.extract(black_box(g))))
        });
        group.bench_with_input(BenchmarkId::new("sphere_parallel", n), &sphere, |b, g| {
            b.iter(|| black_box(parallel.extract(black_box(g))))
        });
        group.bench_with_input(BenchmarkId::new("sphere_unwelded", n), &sphere, |b, g| {
            b.iter(|| black_box(unwelded.extract(black_box(g))))
        });

        let noise = make_noise_grid(n);
        group.bench_with_input(BenchmarkId::new("noise_parallel", n), &noise, |b, g| {
            b.iter(|| black_box(parallel.extract(black_box(g))))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_mutators, bench_extract);
criterion_main!(benches);
