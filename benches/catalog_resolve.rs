//! Benchmarks for phone resolution and the deterministic pipeline
//!
//! The fuzzy tier scores every catalog key, so it dominates request latency.
//! Run with: `cargo bench --bench catalog_resolve`

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use astro_guide::core::{CameraCapability, CharRatio, PhoneCatalog, PhoneRecord, SimilarityMetric};
use astro_guide::GuideEngine;

// =============================================================================
// Benchmark Data
// =============================================================================

const EXACT_QUERY: &str = "Galaxy S24 Ultra";
const SUBSTRING_QUERY: &str = "s24 ultra";
const FUZZY_QUERY: &str = "Glaxy S24 Ultr";
const MISS_QUERY: &str = "qqqqqqqqqqqqqqqq";

/// Synthetic catalog of `size` phones, for scaling the fuzzy tier
fn synthetic_catalog(size: usize) -> PhoneCatalog {
    PhoneCatalog::new((0..size).map(|i| {
        PhoneRecord::new(format!("Vendor{} Model {} Pro", i % 17, i))
            .with_main(CameraCapability::new().with_manual_focus(i % 2 == 0))
    }))
}

// =============================================================================
// Resolution tiers
// =============================================================================

fn bench_resolve_tiers(c: &mut Criterion) {
    let catalog = PhoneCatalog::bundled();
    let mut group = c.benchmark_group("resolve_bundled");

    for (name, query) in [
        ("exact", EXACT_QUERY),
        ("substring", SUBSTRING_QUERY),
        ("fuzzy", FUZZY_QUERY),
        ("miss", MISS_QUERY),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(name), query, |b, q| {
            b.iter(|| catalog.resolve(black_box(q)))
        });
    }

    group.finish();
}

fn bench_fuzzy_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_fuzzy_scaling");

    for size in [10, 100, 1000] {
        let catalog = synthetic_catalog(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &catalog, |b, catalog| {
            b.iter(|| catalog.resolve(black_box("vendr3 modl 42 pro")))
        });
    }

    group.finish();
}

fn bench_similarity(c: &mut Criterion) {
    let metric = CharRatio;
    c.bench_function("char_ratio", |b| {
        b.iter(|| metric.similarity(black_box("glaxy s24 ultr"), black_box("galaxy s24 ultra")))
    });
}

// =============================================================================
// Full pipeline
// =============================================================================

fn bench_plan(c: &mut Criterion) {
    let engine = GuideEngine::new(Arc::new(PhoneCatalog::bundled()));
    c.bench_function("plan_fuzzy_moon", |b| {
        b.iter(|| engine.plan(black_box(FUZZY_QUERY), black_box("Moon")))
    });
}

criterion_group!(
    benches,
    bench_resolve_tiers,
    bench_fuzzy_scaling,
    bench_similarity,
    bench_plan
);
criterion_main!(benches);
