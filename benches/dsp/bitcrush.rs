//! Benchmarks for bit-depth quantization and sample-rate decimation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use crushbox::dsp::bitcrush::{Bitcrusher, Decimator};
use crushbox::dsp::oscillator::{Oscillator, Waveform};

use crate::BLOCK_SIZES;

pub fn bench_bitcrush(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/bitcrush");

    for &size in BLOCK_SIZES {
        let mut input = vec![0.0f32; size];
        let mut osc = Oscillator::new(Waveform::Sine, 48_000.0);
        osc.set_frequency(220.0);
        for slot in input.iter_mut() {
            *slot = osc.next_sample();
        }
        let mut buffer = vec![0.0f32; size];

        // Static depth: exp2 + round per sample
        let crusher = Bitcrusher::new(8.0);
        group.bench_with_input(BenchmarkId::new("crush_static", size), &size, |b, _| {
            b.iter(|| {
                for (out, &s) in buffer.iter_mut().zip(input.iter()) {
                    *out = crusher.crush(s, 0.0);
                }
                black_box(&mut buffer);
            })
        });

        // Modulated depth: same path with a varying bias, as the voice
        // runs it when an LFO sweeps the depth.
        let mut crusher = Bitcrusher::new(8.0);
        crusher.set_lfo_amount(4.0);
        group.bench_with_input(BenchmarkId::new("crush_modulated", size), &size, |b, _| {
            b.iter(|| {
                for (i, (out, &s)) in buffer.iter_mut().zip(input.iter()).enumerate() {
                    let lfo = (i as f32 / size as f32) * 2.0 - 1.0;
                    *out = crusher.crush(s, lfo);
                }
                black_box(&mut buffer);
            })
        });

        // Zero-order hold
        let mut decimator = Decimator::new(8);
        group.bench_with_input(BenchmarkId::new("decimate", size), &size, |b, _| {
            b.iter(|| {
                for (i, (out, &s)) in buffer.iter_mut().zip(input.iter()).enumerate() {
                    *out = decimator.process(i, s);
                }
                black_box(&mut buffer);
            })
        });
    }

    group.finish();
}
