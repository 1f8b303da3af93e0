//! # RP-01 Curve Engine Benchmarks
//!
//! Every ledger mutation prices through the engine at least once, so the
//! square root and the curve-coordinate conversions sit on the hot path.
//!
//! Conditions:
//! - Reserves from dust to near the `u128` ceiling
//! - Supply off the curve (accrued yield)

use criterion::{black_box, BenchmarkId, Criterion};
use rp_01_curve_engine::{isqrt, BondingCurve, CurveConfig, CurveEngine};
use shared_types::{U256, SCALE};

pub fn bench_isqrt(c: &mut Criterion) {
    let mut group = c.benchmark_group("rp-01-isqrt");
    for bits in [64u32, 128, 192, 255] {
        let n = (U256::one() << bits) - U256::one();
        group.bench_with_input(BenchmarkId::from_parameter(bits), &n, |b, n| {
            b.iter(|| isqrt(black_box(*n)))
        });
    }
    group.finish();
}

pub fn bench_pricing(c: &mut Criterion) {
    let mut group = c.benchmark_group("rp-01-pricing");
    let engine = CurveEngine::new(CurveConfig::default().build().expect("default curve"));

    for reserve in [SCALE, 1_000_000 * SCALE, u128::MAX / 4] {
        let supply = engine.curve().supply_at(reserve).expect("supply on curve");
        // Yield has pushed the raw reserve 10% above the curve.
        let drifted = reserve / 10 * 11;

        group.bench_with_input(BenchmarkId::new("enter", reserve), &reserve, |b, _| {
            b.iter(|| engine.enter(black_box(drifted), black_box(supply), black_box(SCALE)))
        });
        group.bench_with_input(BenchmarkId::new("exit", reserve), &reserve, |b, _| {
            b.iter(|| engine.exit(black_box(drifted), black_box(supply), black_box(supply / 3)))
        });
        group.bench_with_input(
            BenchmarkId::new("shares_for_exit", reserve),
            &reserve,
            |b, _| {
                b.iter(|| {
                    engine.shares_for_exit(
                        black_box(drifted),
                        black_box(supply),
                        black_box(drifted / 7),
                    )
                })
            },
        );
    }
    group.finish();
}
