//! Criterion benchmarks for PAF integration and mediation aggregation.
//!
//! Benchmarks cover:
//! - PAF over 1K, 10K and 100K draws, histogram included
//! - Derivative and shifted PAF over a prebuilt histogram
//! - Joint PAF, single-risk view and joint-PAF derivative on the full registry

use burden_core::math::integration::linspace;
use burden_core::types::{DiseaseId, Registry, RiskId};
use burden_paf::mediation::{MediationAggregator, MediationConfig};
use burden_paf::{Direction, PafIntegrator, RelativeRisk};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_paf(c: &mut Criterion) {
    let mut group = c.benchmark_group("paf");
    let rr = RelativeRisk::new(50.0, 1.2, 10.0, Direction::High);
    let integrator = PafIntegrator::default();

    for n in [1_000usize, 10_000, 100_000] {
        let sample = linspace(0.0, 200.0, n);
        group.bench_with_input(BenchmarkId::new("level", n), &sample, |b, s| {
            b.iter(|| integrator.paf(black_box(s), black_box(&rr)))
        });
    }

    let sample = linspace(0.0, 200.0, 1_000);
    let hist = integrator.histogram(&sample).unwrap();
    group.bench_function("derivative_prebuilt", |b| {
        b.iter(|| integrator.paf_derivative_from_histogram(black_box(&hist), black_box(&rr)))
    });
    group.bench_function("shifted_prebuilt", |b| {
        b.iter(|| integrator.paf_shifted_from_histogram(black_box(&hist), black_box(&rr), -5.0))
    });
    group.finish();
}

fn bench_mediation(c: &mut Criterion) {
    let registry = Registry::gbd_diet();
    let aggregator =
        MediationAggregator::from_config(&registry, &MediationConfig::default()).unwrap();
    let pafs: Vec<f64> = (0..15).map(|i| 0.01 * i as f64).collect();
    let ders: Vec<f64> = (0..15).map(|i| -0.5 * i as f64).collect();
    let ihd = DiseaseId(4);

    c.bench_function("mediation/joint_paf", |b| {
        b.iter(|| aggregator.joint_paf(black_box(&pafs), ihd))
    });
    c.bench_function("mediation/joint_view", |b| {
        b.iter(|| aggregator.tensor().joint_view(black_box(RiskId(3))))
    });
    c.bench_function("mediation/joint_derivative", |b| {
        b.iter(|| {
            aggregator.joint_derivative(black_box(&pafs), black_box(&ders), RiskId(3), ihd)
        })
    });
}

criterion_group!(benches, bench_paf, bench_mediation);
criterion_main!(benches);
