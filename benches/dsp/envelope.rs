//! Benchmarks for the ADSR envelope state machine.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use crushbox::dsp::envelope::Envelope;

use crate::BLOCK_SIZES;

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Sustain-heavy settings so the loop stays in one stage; the cost
        // of interest is the per-sample advance, not stage transitions.
        let mut env = Envelope::new(48_000.0);
        env.set_adsr(0.005, 0.05, 0.7, 0.1);
        env.note_on();

        group.bench_with_input(BenchmarkId::new("adsr", size), &size, |b, _| {
            b.iter(|| {
                for slot in buffer.iter_mut() {
                    *slot = env.next_sample();
                }
                black_box(&mut buffer);
            })
        });
    }

    group.finish();
}
