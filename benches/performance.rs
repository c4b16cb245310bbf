// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use minbox::solver::{classify, octant_planes, FINE_DIVISIONS, STANDARD_DIVISIONS};
use minbox::{combined_min_bb, Geometry, SolveOptions};
use nalgebra::{Point3, UnitQuaternion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn cloud(count: usize) -> Vec<Point3<f64>> {
    let mut rng = StdRng::seed_from_u64(42);
    let rotation = UnitQuaternion::from_euler_angles(0.3, 0.9, -0.4);
    (0..count)
        .map(|_| {
            rotation
                * Point3::new(
                    rng.gen_range(-4.0..4.0),
                    rng.gen_range(-2.0..2.0),
                    rng.gen_range(-1.0..1.0),
                )
        })
        .collect()
}

fn planar_cloud(count: usize) -> Vec<Point3<f64>> {
    let mut rng = StdRng::seed_from_u64(42);
    let rotation = UnitQuaternion::from_euler_angles(0.3, 0.9, -0.4);
    (0..count)
        .map(|_| rotation * Point3::new(rng.gen_range(-4.0..4.0), rng.gen_range(-2.0..2.0), 0.0))
        .collect()
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");

    for count in [100, 1_000, 10_000] {
        let geometries = vec![Geometry::point_cloud(cloud(count))];
        group.bench_with_input(BenchmarkId::new("cloud", count), &geometries, |b, g| {
            b.iter(|| classify(black_box(g), 0.001));
        });
    }

    group.finish();
}

fn bench_octant_planes(c: &mut Criterion) {
    let mut group = c.benchmark_group("octant_planes");

    for divisions in [STANDARD_DIVISIONS, FINE_DIVISIONS] {
        group.bench_with_input(
            BenchmarkId::new("divisions", divisions),
            &divisions,
            |b, &d| {
                b.iter(|| octant_planes(black_box(d)));
            },
        );
    }

    group.finish();
}

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");
    group.sample_size(10);

    let options = SolveOptions {
        fine_sampling: false,
        relative_stop: true,
        report_intermediate: false,
    };

    for count in [100, 1_000] {
        let planar = vec![Geometry::point_cloud(planar_cloud(count))];
        group.bench_with_input(BenchmarkId::new("planar", count), &planar, |b, g| {
            b.iter(|| combined_min_bb(black_box(g), options));
        });

        let spatial = vec![Geometry::point_cloud(cloud(count))];
        group.bench_with_input(BenchmarkId::new("spatial", count), &spatial, |b, g| {
            b.iter(|| combined_min_bb(black_box(g), options));
        });
    }

    let fine = SolveOptions {
        fine_sampling: true,
        ..options
    };
    let spatial = vec![Geometry::point_cloud(cloud(1_000))];
    group.bench_with_input(BenchmarkId::new("spatial_fine", 1_000), &spatial, |b, g| {
        b.iter(|| combined_min_bb(black_box(g), fine));
    });

    group.finish();
}

criterion_group!(benches, bench_classify, bench_octant_planes, bench_solve);
criterion_main!(benches);
