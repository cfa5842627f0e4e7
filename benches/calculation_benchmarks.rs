//! Performance benchmarks for the Benefits Entitlement Engine.
//!
//! Targets:
//! - Single in-process assessment: < 20μs mean
//! - Single assessment over HTTP: < 100μs mean
//! - Batch of 1000 households: < 20ms mean
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use entitlement_engine::api::{AppState, create_router};
use entitlement_engine::calculation::{assess, calculate_benefits};
use entitlement_engine::config::{ConfigLoader, PolicyConfig};
use entitlement_engine::models::{HouseholdProfile, Tenure};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

/// Builds a varied household so a batch walks every tier's branches.
fn create_household(seed: u32) -> HouseholdProfile {
    let tenure = match seed % 4 {
        0 => Tenure::RentPrivate,
        1 => Tenure::RentSocial,
        2 => Tenure::Owner,
        _ => Tenure::Mortgage,
    };
    HouseholdProfile {
        postcode: "PO5 3AA".to_string(),
        tenure,
        rent_amount: Decimal::from(400 + (seed % 9) * 75),
        adults: 1 + seed % 2,
        children: seed % 4,
        child_ages: vec![],
        is_disabled: seed % 5 == 0,
        net_monthly_income: Decimal::new(i64::from(seed % 40) * 5_000 + 1_999, 2),
        has_uc: seed % 3 == 0,
        has_child_benefit: false,
        is_southern_water: seed % 2 == 0,
        is_energy_debt: false,
        is_pregnant: false,
    }
}

/// Benchmark: one household, no HTTP.
fn bench_single_assessment(c: &mut Criterion) {
    let policy = PolicyConfig::default();
    let profile = create_household(0);

    c.bench_function("single_assessment", |b| {
        b.iter(|| black_box(calculate_benefits(black_box(&profile), &policy)))
    });

    c.bench_function("single_assessment_with_trace", |b| {
        b.iter(|| black_box(assess(black_box(&profile), &policy)))
    });
}

/// Benchmark: one household through the router.
fn bench_single_request(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(AppState::new(ConfigLoader::compiled_default()));
    let body = serde_json::to_string(&create_household(0)).unwrap();

    c.bench_function("single_request", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/assess")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

/// Benchmark: batches of households against one policy.
fn bench_batch(c: &mut Criterion) {
    let policy = PolicyConfig::default();
    let mut group = c.benchmark_group("batch");

    for size in [10u32, 100, 1000].iter() {
        let households: Vec<HouseholdProfile> = (0..*size).map(create_household).collect();

        group.throughput(Throughput::Elements(u64::from(*size)));
        group.bench_with_input(BenchmarkId::new("households", size), size, |b, _| {
            b.iter(|| {
                for profile in &households {
                    black_box(calculate_benefits(profile, &policy));
                }
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_single_assessment,
    bench_single_request,
    bench_batch,
);
criterion_main!(benches);
