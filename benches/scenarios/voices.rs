//! Benchmarks for the complete voice signal path.
//!
//! Each case runs one voice through its full chain (envelope, oscillators,
//! crush, decimation) for a block, which is the unit of work the engine
//! repeats per active voice.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use crushbox::synth::{ParamSnapshot, PulseWidth, TimbreMode, Voice};

use crate::BLOCK_SIZES;

const SAMPLE_RATE: f32 = 48_000.0;

pub fn bench_voices(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voices");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // === TRIANGLE BASS ===
        // Single oscillator, the cheapest tonal path.
        let mut params = ParamSnapshot {
            mode: TimbreMode::TonalLow,
            bit_depth: 8.0,
            ..ParamSnapshot::default()
        };
        let mut voice = Voice::new(SAMPLE_RATE);
        voice.start_note(45, 100, &params, 0);

        group.bench_with_input(BenchmarkId::new("triangle_bass", size), &size, |b, _| {
            b.iter(|| {
                buffer.fill(0.0);
                voice.render(black_box(&mut buffer), 0, black_box(&params));
            })
        });

        // === PULSE PAIR ===
        // Two oscillators advanced per sample plus the attack switch.
        params.mode = TimbreMode::TonalPulse;
        params.pulse_width_1 = PulseWidth::Eighth;
        params.pulse_width_2 = PulseWidth::Half;
        let mut voice = Voice::new(SAMPLE_RATE);
        voice.start_note(60, 100, &params, 0);

        group.bench_with_input(BenchmarkId::new("pulse_pair", size), &size, |b, _| {
            b.iter(|| {
                buffer.fill(0.0);
                voice.render(black_box(&mut buffer), 0, black_box(&params));
            })
        });

        // === MODULATED CRUSH ===
        // Pulse pair with the LFO sweeping the bit depth every sample.
        params.lfo_amount = 6.0;
        params.lfo_rate = 4.0;
        let mut voice = Voice::new(SAMPLE_RATE);
        voice.start_note(60, 100, &params, 0);

        group.bench_with_input(BenchmarkId::new("modulated_crush", size), &size, |b, _| {
            b.iter(|| {
                buffer.fill(0.0);
                voice.render(black_box(&mut buffer), 0, black_box(&params));
            })
        });

        // === FILTERED NOISE HAT ===
        // Noise generator plus the highpass filter.
        params.mode = TimbreMode::PercussiveNoise;
        params.lfo_amount = 0.0;
        let mut voice = Voice::new(SAMPLE_RATE);
        voice.start_note(60, 100, &params, 0);

        group.bench_with_input(BenchmarkId::new("noise_hat", size), &size, |b, _| {
            b.iter(|| {
                buffer.fill(0.0);
                voice.render(black_box(&mut buffer), 0, black_box(&params));
            })
        });
    }

    group.finish();
}
