use criterion::{black_box, criterion_group, criterion_main, Criterion};

use test_fixtures::{experiment_roles, ExperimentSpec};
use uplift_causal::CausalPipeline;

fn bench_estimate(c: &mut Criterion) {
    let data = ExperimentSpec::new(1_000, 7).generate();
    let pipeline = CausalPipeline::new(experiment_roles()).unwrap();

    c.bench_function("psm_estimate_1k", |b| {
        b.iter(|| pipeline.estimate(black_box(&data)).unwrap())
    });
}

fn bench_stratify(c: &mut Criterion) {
    let data = ExperimentSpec::new(1_000, 7).generate();
    let pipeline = CausalPipeline::new(experiment_roles()).unwrap();

    c.bench_function("stratify_1k", |b| {
        b.iter(|| pipeline.stratify(black_box(&data)).unwrap())
    });
}

fn bench_refute(c: &mut Criterion) {
    let data = ExperimentSpec::new(1_000, 7).generate();
    let pipeline = CausalPipeline::new(experiment_roles()).unwrap();
    let estimate = pipeline.estimate(&data).unwrap();

    c.bench_function("refute_all_1k", |b| {
        b.iter(|| pipeline.refute(black_box(&data), &estimate).unwrap())
    });
}

criterion_group!(benches, bench_estimate, bench_stratify, bench_refute);
criterion_main!(benches);
