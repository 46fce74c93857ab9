//! Crushbox - application builder and audio runner

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crushbox::sequencing::{ArpRate, Transport};
use crushbox::synth::{Engine, ParamStore, PulseWidth, SynthMessage, TimbreMode};
use crushbox::MAX_BLOCK_SIZE;

const VOICES: usize = 8;

/// Main application builder
pub struct Crushbox {
    bpm: f64,
    timbre: TimbreMode,
    widths: (PulseWidth, PulseWidth),
    adsr: (f32, f32, f32, f32),
    arp_rate: Option<ArpRate>,
    chord: Vec<u8>,
}

impl Crushbox {
    pub fn new() -> Self {
        Self {
            bpm: 120.0,
            timbre: TimbreMode::TonalLow,
            widths: (PulseWidth::Half, PulseWidth::Half),
            adsr: (0.01, 0.1, 0.7, 0.3),
            arp_rate: None,
            chord: Vec::new(),
        }
    }

    /// Tempo the arpeggiator free-runs at.
    pub fn bpm(mut self, bpm: f64) -> Self {
        self.bpm = bpm;
        self
    }

    pub fn timbre(mut self, timbre: TimbreMode) -> Self {
        self.timbre = timbre;
        self
    }

    pub fn pulse_widths(mut self, first: PulseWidth, second: PulseWidth) -> Self {
        self.widths = (first, second);
        self
    }

    pub fn adsr(mut self, attack: f32, decay: f32, sustain: f32, release: f32) -> Self {
        self.adsr = (attack, decay, sustain, release);
        self
    }

    /// Enable arpeggiation at the given rate.
    pub fn arp(mut self, rate: ArpRate) -> Self {
        self.arp_rate = Some(rate);
        self
    }

    /// Notes to hold once the stream is running.
    pub fn chord(mut self, notes: &[u8]) -> Self {
        self.chord = notes.to_vec();
        self
    }

    /// Run the application (takes over, plays audio)
    pub fn run(self) -> EyreResult<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;

        println!("=== crushbox ===");
        println!("BPM: {}", self.bpm);
        println!("Sample rate: {} Hz", sample_rate);
        println!("Channels: {}", channels);
        println!("Chord: {:?}", self.chord);
        println!();
        println!("Playing... Press Ctrl+C to stop");

        let params = Arc::new(ParamStore::new());
        params.set_mode(self.timbre);
        params.set_pulse_widths(self.widths.0, self.widths.1);
        params.set_adsr(self.adsr.0, self.adsr.1, self.adsr.2, self.adsr.3);
        if let Some(rate) = self.arp_rate {
            params.set_arp_enabled(true);
            params.set_arp_rate(rate);
        }

        let (mut tx, rx) = rtrb::RingBuffer::new(256);
        let mut engine = Engine::new(sample_rate, VOICES, Arc::clone(&params));
        engine.set_receiver(rx);
        engine.set_fallback_bpm(self.bpm);
        let engine = Arc::new(Mutex::new(engine));

        let engine_clone = Arc::clone(&engine);
        let mut mono = vec![0.0f32; MAX_BLOCK_SIZE];

        let stream = device.build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| {
                let mut engine = engine_clone.lock().unwrap();
                let total_frames = data.len() / channels;
                let mut frames_written = 0;

                while frames_written < total_frames {
                    let frames = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                    let block = &mut mono[..frames];
                    block.fill(0.0);
                    {
                        let mut out = [&mut *block];
                        engine.process_block(&Transport::unknown(), &[], &mut out);
                    }

                    // Interleave the mono mix into every output channel.
                    let out_off = frames_written * channels;
                    for (i, &s) in block.iter().enumerate() {
                        for ch in 0..channels {
                            data[out_off + i * channels + ch] = s;
                        }
                    }

                    frames_written += frames;
                }
            },
            |err| eprintln!("Audio error: {}", err),
            None,
        )?;

        stream.play()?;

        for &note in &self.chord {
            tx.push(SynthMessage::NoteOn {
                note,
                velocity: 110,
            })
            .map_err(|_| eyre!("message queue full"))?;
        }

        // Sweep the bit depth down to 4 bits and back, forever.
        let sweep = [
            24.0, 16.0, 12.0, 10.0, 8.0, 7.0, 6.0, 5.0, 4.0, 5.0, 6.0, 8.0, 12.0,
        ];
        loop {
            for &bits in &sweep {
                params.set_bit_depth(bits);
                std::thread::sleep(Duration::from_millis(700));
            }
        }
    }
}

impl Default for Crushbox {
    fn default() -> Self {
        Self::new()
    }
}
