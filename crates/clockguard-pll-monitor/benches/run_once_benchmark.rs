//! Poll-path benchmarks for the PLL monitor.

use std::hint::black_box;
use std::sync::Arc;

use clockguard_pll_monitor::prelude::*;
use criterion::{Criterion, criterion_group, criterion_main};

/// Halt that returns, so the fatal path can be measured.
struct ReturningHalt;

impl SystemHalt for ReturningHalt {
    fn halt(&mut self, request: &HaltRequest) {
        black_box(request);
    }
}

/// Sink that drops records after touching them.
struct NullSink;

impl DiagnosticSink for NullSink {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        black_box(diagnostic);
    }
}

type BenchMonitor = PllMonitor<Arc<SoftwarePllRegister>, NullSink, ReturningHalt>;

fn monitor(register: &Arc<SoftwarePllRegister>) -> Option<BenchMonitor> {
    PllMonitor::new(
        MonitorConfig::default(),
        Arc::clone(register),
        NullSink,
        ReturningHalt,
    )
    .ok()
}

fn bench_run_once(c: &mut Criterion) {
    let mut group = c.benchmark_group("run_once");

    let register = SoftwarePllRegister::shared(0x1);
    if let Some(mut monitor) = monitor(&register) {
        group.bench_function("steady_locked", |b| {
            b.iter(|| black_box(monitor.run_once()));
        });
    }

    let register = SoftwarePllRegister::shared(0x0);
    if let Some(mut monitor) = monitor(&register) {
        group.bench_function("still_unlocked", |b| {
            b.iter(|| black_box(monitor.run_once()));
        });
    }

    let register = SoftwarePllRegister::shared(0x2);
    if let Some(mut monitor) = monitor(&register) {
        group.bench_function("lock_loss_edge", |b| {
            b.iter(|| {
                black_box(monitor.reinitialize(Baseline::Locked).is_ok());
                black_box(monitor.run_once())
            });
        });
    }

    let register = SoftwarePllRegister::shared(0x3);
    if let Some(mut monitor) = monitor(&register) {
        group.bench_function("reference_lost_edge", |b| {
            b.iter(|| {
                black_box(monitor.reinitialize(Baseline::Locked).is_ok());
                black_box(monitor.run_once())
            });
        });
    }

    group.finish();
}

fn bench_detector(c: &mut Criterion) {
    let mut group = c.benchmark_group("detector");
    let encoding = StatusEncoding::default();

    group.bench_function("decode", |b| {
        b.iter(|| black_box(encoding.decode(black_box(0x3))));
    });

    group.bench_function("detect_lock_loss", |b| {
        b.iter(|| {
            black_box(detect_lock_loss(
                black_box(PllStatus::Locked),
                black_box(PllStatus::ReferenceLost),
            ))
        });
    });

    group.finish();
}

criterion_group!(benches, bench_run_once, bench_detector);
criterion_main!(benches);
