use criterion::{criterion_group, criterion_main, Criterion};
use nalgebra::Vector3;
use rowland_torus::interfaces::{DegenerateNormal, Frame};
use rowland_torus::placement::ElementArray;
use rowland_torus::rowland::{design_tilted_torus, RowlandTorus};
use std::hint::black_box;

/// Benchmarks for the torus kernel and the placement engine.
/// Compare serial and parallel pose computation with:
/// - cargo bench
/// - cargo bench --features parallel
fn bench_torus_kernel(c: &mut Criterion) {
    let mut group = c.benchmark_group("torus_kernel");

    let torus = design_tilted_torus(5900.0, 0.02, 0.04)
        .and_then(|d| d.into_torus())
        .unwrap();
    let point = torus.xyz_from_radiusangle(400.0, 0.3, [5000.0, 6000.0]).unwrap();

    group.bench_function("quartic", |b| {
        b.iter(|| torus.quartic(black_box(&point), black_box(Frame::Global)))
    });

    group.bench_function("normal", |b| {
        b.iter(|| torus.normal(black_box(&point), DegenerateNormal::Fail))
    });

    group.bench_function("xyz_from_radiusangle", |b| {
        b.iter(|| torus.xyz_from_radiusangle(black_box(400.0), black_box(0.3), [5000.0, 6000.0]))
    });

    group.bench_function("solve_quartic_local", |b| {
        let flat = RowlandTorus::at_origin(2950.0, 2950.0).unwrap();
        b.iter(|| {
            flat.solve_quartic(None, Some(black_box(300.0)), Some(0.0), [4000.0, 6000.0], Frame::Local)
        })
    });

    group.finish();
}

fn bench_placement(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement");
    group.sample_size(20);

    let torus = design_tilted_torus(5900.0, 0.0, 0.0)
        .and_then(|d| d.into_torus())
        .unwrap();

    let gas = ElementArray::grating_array_structure(
        torus.clone(),
        27.0,
        [5000.0, 6000.0],
        [300.0, 800.0],
        Some([-0.3, 0.3]),
    )
    .unwrap();
    group.bench_function("grating_array_structure", |b| b.iter(|| gas.compute_poses()));

    let full_ring = ElementArray::grating_array_structure(
        torus.clone(),
        27.0,
        [5000.0, 6000.0],
        [300.0, 800.0],
        None,
    )
    .unwrap();
    group.bench_function("grating_array_full_ring", |b| b.iter(|| full_ring.compute_poses()));

    // Detector row close to the focal point, away from the self-intersection
    let ccds = ElementArray::linear_ccd_array(torus, 50.0, [0.01, 100.0], [-300.0, 300.0], 0.0)
        .unwrap();
    group.bench_function("linear_ccd_array", |b| b.iter(|| ccds.compute_poses()));

    let centre = Vector3::new(0.0, 0.0, 0.0);
    group.bench_function("focal_point_normal", |b| {
        b.iter(|| ccds.rowland().normal(black_box(&centre), DegenerateNormal::default()))
    });

    group.finish();
}

criterion_group!(benches, bench_torus_kernel, bench_placement);
criterion_main!(benches);
