//! Benchmarks for distance and radius selection.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tourmap_geo::{distance_km, within_radius, Coordinate, ReferencePoint};

fn grid_around_manila(count: usize) -> Vec<Coordinate> {
    (0..count)
        .map(|i| {
            let lat = 14.0 + (i as f64 * 0.01) % 2.0;
            let lng = 120.0 + (i as f64 * 0.013) % 2.0;
            Coordinate::new(lat, lng)
        })
        .collect()
}

fn bench_single_distance(c: &mut Criterion) {
    let manila = Coordinate::new(14.5995, 120.9842);
    let cebu = Coordinate::new(10.3157, 123.8854);

    c.bench_function("haversine_single", |b| {
        b.iter(|| distance_km(black_box(&manila), black_box(&cebu)))
    });
}

fn bench_within_radius(c: &mut Criterion) {
    let mut group = c.benchmark_group("within_radius");
    let reference = ReferencePoint::new(14.5995, 120.9842, 10.0);

    for size in [10, 100, 1000, 10000].iter() {
        let points = grid_around_manila(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| within_radius(Some(black_box(&reference)), black_box(&points), 50.0))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_distance, bench_within_radius);
criterion_main!(benches);
