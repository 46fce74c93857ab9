//! Benchmarks for whole-engine blocks: the exact work done per audio
//! callback, including parameter snapshotting, event dispatch and the
//! additive mix across the voice pool.

use std::hint::black_box;
use std::sync::Arc;

use criterion::{BenchmarkId, Criterion};
use crushbox::io::NoteEvent;
use crushbox::sequencing::{ArpRate, Transport};
use crushbox::synth::{Engine, ParamStore, TimbreMode};

use crate::BLOCK_SIZES;

const SAMPLE_RATE: f32 = 48_000.0;

pub fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/engine");

    for &size in BLOCK_SIZES {
        let mut left = vec![0.0f32; size];
        let mut right = vec![0.0f32; size];

        // === FOUR-VOICE CHORD ===
        let params = Arc::new(ParamStore::new());
        params.set_mode(TimbreMode::TonalPulse);
        params.set_bit_depth(8.0);
        let mut engine = Engine::new(SAMPLE_RATE, 8, Arc::clone(&params));
        let chord = [
            NoteEvent::note_on(0, 57, 100),
            NoteEvent::note_on(0, 60, 100),
            NoteEvent::note_on(0, 64, 100),
            NoteEvent::note_on(0, 69, 100),
        ];
        {
            let mut out = [left.as_mut_slice(), right.as_mut_slice()];
            engine.process_block(&Transport::unknown(), &chord, &mut out);
        }

        group.bench_with_input(BenchmarkId::new("chord_4_voices", size), &size, |b, _| {
            b.iter(|| {
                left.fill(0.0);
                right.fill(0.0);
                let mut out = [left.as_mut_slice(), right.as_mut_slice()];
                engine.process_block(&Transport::unknown(), &[], black_box(&mut out));
            })
        });

        // === ARPEGGIATED CHORD ===
        // One sounding voice, plus the arpeggiation clock every block.
        let params = Arc::new(ParamStore::new());
        params.set_arp_enabled(true);
        params.set_arp_rate(ArpRate::Sixteenth);
        let mut engine = Engine::new(SAMPLE_RATE, 8, Arc::clone(&params));
        engine.set_fallback_bpm(120.0);
        {
            let mut out = [left.as_mut_slice(), right.as_mut_slice()];
            engine.process_block(&Transport::unknown(), &chord, &mut out);
        }

        group.bench_with_input(BenchmarkId::new("arp_chord", size), &size, |b, _| {
            b.iter(|| {
                left.fill(0.0);
                right.fill(0.0);
                let mut out = [left.as_mut_slice(), right.as_mut_slice()];
                engine.process_block(&Transport::unknown(), &[], black_box(&mut out));
            })
        });
    }

    group.finish();
}
