//! Benchmarks for the per-cycle safety path.

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use vcu_safety::prelude::*;

fn sensors(tps: f32, bps: f32) -> SensorSnapshot {
    SensorSnapshot {
        tps: TorqueEncoderReading::new(
            PedalChannel::new(1200, 200, 4800).with_travel(tps),
            PedalChannel::new(3600, 200, 4800).with_travel(tps),
            tps,
        ),
        bps: BrakePressureReading::new(PedalChannel::new(900, 500, 4500).with_travel(bps), bps),
        lv_battery_mv: 13_600,
        hvil_term_sense: true,
    }
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("update");

    group.bench_function("nominal", |b| {
        let mut checker = SafetyChecker::new(NullSink);
        let readings = sensors(0.4, 0.0);
        let bms = BmsSnapshot { power_w: 30_000, dcl: 255, ccl: 255 };
        let mcm = McmSnapshot { power_w: 28_000, ground_speed_kph: 60.0, torque: 90.0 };
        b.iter(|| checker.update(black_box(&readings), black_box(&bms), black_box(&mcm)));
    });

    group.bench_function("implausible", |b| {
        let mut checker = SafetyChecker::new(NullSink);
        let readings = sensors(0.6, 0.4);
        let bms = BmsSnapshot { power_w: 30_000, dcl: 255, ccl: 255 };
        let mcm = McmSnapshot { power_w: 28_000, ground_speed_kph: 60.0, torque: 90.0 };
        b.iter(|| checker.update(black_box(&readings), black_box(&bms), black_box(&mcm)));
    });

    group.finish();
}

fn bench_torque_limit(c: &mut Criterion) {
    let mut group = c.benchmark_group("torque_limit");
    let limiter = TorqueLimiter::default();

    group.bench_function("unlimited", |b| {
        let bms = BmsSnapshot { power_w: 30_000, dcl: 255, ccl: 255 };
        let mcm = McmSnapshot { power_w: 28_000, ground_speed_kph: 60.0, torque: 90.0 };
        b.iter(|| {
            limiter.limit(
                black_box(FaultFlags::empty()),
                black_box(NoticeFlags::empty()),
                black_box(&bms),
                black_box(&mcm),
            )
        });
    });

    group.bench_function("power_and_current_ramp", |b| {
        let bms = BmsSnapshot { power_w: 77_000, dcl: 180, ccl: 255 };
        let mcm = McmSnapshot { power_w: 76_000, ground_speed_kph: 90.0, torque: 140.0 };
        b.iter(|| {
            limiter.limit(
                black_box(FaultFlags::empty()),
                black_box(NoticeFlags::BMS_OVER_POWER),
                black_box(&bms),
                black_box(&mcm),
            )
        });
    });

    group.finish();
}

fn bench_full_cycle(c: &mut Criterion) {
    c.bench_function("full_cycle", |b| {
        let mut checker = SafetyChecker::new(NullSink);
        let readings = sensors(0.7, 0.0);
        let bms = BmsSnapshot { power_w: 76_500, dcl: 220, ccl: 255 };
        b.iter(|| {
            let mut mcm = McmSnapshot { power_w: 74_000, ground_speed_kph: 80.0, torque: 130.0 };
            checker.update(black_box(&readings), black_box(&bms), &mcm);
            black_box(checker.reduce_torque(&bms, &mut mcm))
        });
    });
}

criterion_group!(benches, bench_update, bench_torque_limit, bench_full_cycle);
criterion_main!(benches);
