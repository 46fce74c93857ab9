//! Benchmarks for oscillator waveform generation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use crushbox::dsp::oscillator::{CycleShape, Oscillator, Waveform};

use crate::BLOCK_SIZES;

fn fill(osc: &mut Oscillator, buffer: &mut [f32]) {
    for slot in buffer {
        *slot = osc.next_sample();
    }
}

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Sine - uses sin() transcendental function
        let mut osc = Oscillator::new(Waveform::Sine, 48_000.0);
        osc.set_frequency(440.0);
        group.bench_with_input(BenchmarkId::new("sine", size), &size, |b, _| {
            b.iter(|| {
                fill(black_box(&mut osc), black_box(&mut buffer));
            })
        });

        // Triangle - absolute value
        let mut osc = Oscillator::new(Waveform::Triangle, 48_000.0);
        osc.set_frequency(440.0);
        group.bench_with_input(BenchmarkId::new("triangle", size), &size, |b, _| {
            b.iter(|| {
                fill(black_box(&mut osc), black_box(&mut buffer));
            })
        });

        // Pulse - branch per sample
        let mut osc = Oscillator::new(Waveform::pulse(0.25), 48_000.0);
        osc.set_frequency(440.0);
        group.bench_with_input(BenchmarkId::new("pulse", size), &size, |b, _| {
            b.iter(|| {
                fill(black_box(&mut osc), black_box(&mut buffer));
            })
        });

        // Envelope-cycle - piecewise linear with three breakpoints
        let mut osc = Oscillator::new(Waveform::AdsrCycle(CycleShape::chord()), 48_000.0);
        osc.set_frequency(440.0);
        group.bench_with_input(BenchmarkId::new("adsr_cycle", size), &size, |b, _| {
            b.iter(|| {
                fill(black_box(&mut osc), black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
