//! Benchmarks for curve evaluation, arc length and path meshing.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use meshmerize::curves::BezierCurve;
use meshmerize::io::tokenize;
use meshmerize::path::Path;
use meshmerize::Point2;

fn cubic() -> BezierCurve<f64> {
    BezierCurve::new(vec![
        Point2::new(0.0, 0.0),
        Point2::new(3.0, 10.0),
        Point2::new(7.0, 10.0),
        Point2::new(10.0, 0.0),
    ])
    .unwrap()
}

fn bench_eval(c: &mut Criterion) {
    let mut group = c.benchmark_group("bezier_eval");
    let curve = cubic();

    group.bench_function("de_casteljau", |b| b.iter(|| curve.eval(black_box(0.5))));
    group.bench_function("bernstein", |b| {
        b.iter(|| curve.eval_bernstein(black_box(0.5)))
    });

    for degree in [1usize, 3, 6] {
        let points = (0..=degree)
            .map(|i| Point2::new(i as f64, if i % 2 == 0 { 0.0 } else { 5.0 }))
            .collect();
        let curve = BezierCurve::new(points).unwrap();
        group.bench_with_input(BenchmarkId::new("degree", degree), &curve, |b, curve| {
            b.iter(|| curve.eval(black_box(0.37)))
        });
    }

    group.finish();
}

fn bench_arc_length(c: &mut Criterion) {
    let curve = cubic();
    c.bench_function("bezier_arc_length", |b| {
        b.iter(|| black_box(&curve).arc_length())
    });
}

fn bench_curve_mesh(c: &mut Criterion) {
    let mut group = c.benchmark_group("bezier_mesh");
    let curve = cubic();

    for spacing in [1.0, 0.1, 0.01] {
        let count = curve.mesh(spacing, true).unwrap().len();
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("spacing", spacing), &spacing, |b, &s| {
            b.iter(|| curve.mesh(black_box(s), true).unwrap().count())
        });
    }

    group.finish();
}

fn bench_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("path");

    let data: String = std::iter::once("M0 0".to_string())
        .chain((0..200).map(|i| format!(" c1 {} 2 -{} 3 0", i % 7, i % 5)))
        .chain(std::iter::once(" z".to_string()))
        .collect();

    group.bench_function("tokenize", |b| {
        b.iter(|| tokenize::<f64>(black_box(&data)).unwrap())
    });

    let tokens = tokenize::<f64>(&data).unwrap().tokens;
    group.bench_function("assemble", |b| {
        b.iter(|| Path::from_tokens(black_box(&tokens)).unwrap())
    });

    let path = Path::from_tokens(&tokens).unwrap();
    group.bench_function("mesh", |b| b.iter(|| path.mesh(black_box(0.05)).unwrap()));

    group.finish();
}

criterion_group!(
    benches,
    bench_eval,
    bench_arc_length,
    bench_curve_mesh,
    bench_path
);
criterion_main!(benches);
