//! Benchmarks for the state-variable filter.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use crushbox::dsp::filter::StateVariableFilter;
use crushbox::dsp::noise::WhiteNoise;

use crate::BLOCK_SIZES;

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    for &size in BLOCK_SIZES {
        let mut noise = WhiteNoise::new();
        let input: Vec<f32> = (0..size).map(|_| noise.next_sample()).collect();
        let mut buffer = vec![0.0f32; size];

        let mut highpass = StateVariableFilter::highpass(7_000.0, 48_000.0);
        group.bench_with_input(BenchmarkId::new("highpass", size), &size, |b, _| {
            b.iter(|| {
                for (out, &s) in buffer.iter_mut().zip(input.iter()) {
                    *out = highpass.process(s);
                }
                black_box(&mut buffer);
            })
        });

        let mut bandpass = StateVariableFilter::bandpass(2_000.0, 48_000.0);
        group.bench_with_input(BenchmarkId::new("bandpass", size), &size, |b, _| {
            b.iter(|| {
                for (out, &s) in buffer.iter_mut().zip(input.iter()) {
                    *out = bandpass.process(s);
                }
                black_box(&mut buffer);
            })
        });
    }

    group.finish();
}
