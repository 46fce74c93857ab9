use crate::dsp::bitcrush::{Bitcrusher, Decimator};
use crate::dsp::envelope::Envelope;
use crate::dsp::filter::StateVariableFilter;
use crate::dsp::lfo::Lfo;
use crate::dsp::noise::WhiteNoise;
use crate::dsp::oscillator::{Oscillator, Waveform};
use crate::io::midi_note_to_freq;
use crate::synth::params::{ParamSnapshot, TimbreMode};

/*
Voice
=====

One polyphonic voice: the per-sample signal path for a single sounding
note. The chain per sample is

    envelope -> LFO -> timbre branch -> bitcrush -> decimate -> sum

Timbre branches:

  TonalLow         triangle oscillator x main envelope.

  TonalPulse       two pulse oscillators. Equal duty widths: only the
                   first runs. Unequal: the first sounds while the
                   envelope is still rising (attack), the second takes
                   over once it plateaus or falls - an audible timbral
                   shift at the attack/sustain boundary. Rising-ness is
                   detected by comparing consecutive envelope samples,
                   not by envelope stage, so it tracks what the ear hears.

  PercussiveNoise  fixed keys only. 60 = hat (noise x fast envelope,
                   high-passed), 62 = snare (noise x snappy envelope,
                   band-passed), 64 = plain noise x main envelope. Any
                   other key contributes silence but still runs the main
                   envelope so the voice frees itself normally.

Percussive noise skips the bitcrusher unless `crush_noise` is set (the
noise path is meant to be degraded by a shared post-effect instead);
decimation applies to every branch. The decimator is indexed by the
block-relative sample position, so render segments split around note
events keep a coherent hold grid.
*/

/// Fixed percussion key assignments in noise mode.
pub const HAT_KEY: u8 = 60;
pub const SNARE_KEY: u8 = 62;
pub const NOISE_KEY: u8 = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    Idle,
    Playing,
}

pub struct Voice {
    state: VoiceState,
    note: u8,
    gain: f32,
    age: u64,
    mode: TimbreMode,
    crush_noise: bool,

    bass: Oscillator,
    pulse_1: Oscillator,
    pulse_2: Oscillator,
    pulse_widths_equal: bool,

    env: Envelope,
    env_hat: Envelope,
    env_snare: Envelope,
    last_env_sample: f32,

    noise: WhiteNoise,
    hat_filter: StateVariableFilter,
    snare_filter: StateVariableFilter,

    lfo: Lfo,
    crusher: Bitcrusher,
    decimator: Decimator,
}

impl Voice {
    pub fn new(sample_rate: f32) -> Self {
        let mut env_hat = Envelope::new(sample_rate);
        env_hat.set_adsr(0.01, 0.08, 0.0, 0.01);
        let mut env_snare = Envelope::new(sample_rate);
        env_snare.set_adsr(0.01, 0.15, 0.0, 0.01);

        Self {
            state: VoiceState::Idle,
            note: 0,
            gain: 0.0,
            age: 0,
            mode: TimbreMode::TonalLow,
            crush_noise: false,

            bass: Oscillator::new(Waveform::Triangle, sample_rate),
            pulse_1: Oscillator::new(Waveform::pulse(0.5), sample_rate),
            pulse_2: Oscillator::new(Waveform::pulse(0.5), sample_rate),
            pulse_widths_equal: true,

            env: Envelope::new(sample_rate),
            env_hat,
            env_snare,
            last_env_sample: 0.0,

            noise: WhiteNoise::new(),
            hat_filter: StateVariableFilter::highpass(7_000.0, sample_rate),
            snare_filter: StateVariableFilter::bandpass(2_000.0, sample_rate),

            lfo: Lfo::new(sample_rate),
            crusher: Bitcrusher::new(24.0),
            decimator: Decimator::new(1),
        }
    }

    /// Begin a note. Captures the timbre mode and oscillator tuning from the
    /// snapshot; calling this while already playing is an immediate
    /// retrigger (envelopes restart, no crossfade).
    pub fn start_note(&mut self, note: u8, velocity: u8, params: &ParamSnapshot, age: u64) {
        self.state = VoiceState::Playing;
        self.note = note;
        self.gain = f32::from(velocity) / 127.0;
        self.age = age;
        self.mode = params.mode;
        self.crush_noise = params.crush_noise;

        let freq = midi_note_to_freq(note) * 2.0_f32.powf(params.pitch_offset / 12.0);
        match self.mode {
            TimbreMode::TonalLow => {
                self.bass.set_frequency(freq);
            }
            TimbreMode::TonalPulse => {
                self.pulse_1.set_frequency(freq);
                self.pulse_2.set_frequency(freq);
                self.pulse_1
                    .set_waveform(Waveform::pulse(params.pulse_width_1.width()));
                self.pulse_2
                    .set_waveform(Waveform::pulse(params.pulse_width_2.width()));
                self.pulse_widths_equal = params.pulse_width_1 == params.pulse_width_2;
            }
            TimbreMode::PercussiveNoise => {
                self.hat_filter.reset();
                self.snare_filter.reset();
            }
        }

        self.env
            .set_adsr(params.attack, params.decay, params.sustain, params.release);
        self.env.note_on();
        self.env_hat.note_on();
        self.env_snare.note_on();
        self.last_env_sample = 0.0;
    }

    /// Stop the note: either let the release stage ring out, or cut hard to
    /// silence with no further output.
    pub fn stop_note(&mut self, allow_tail_off: bool) {
        if allow_tail_off {
            self.env.note_off();
            self.env_hat.note_off();
            self.env_snare.note_off();
        } else {
            self.env.reset();
            self.env_hat.reset();
            self.env_snare.reset();
            self.free();
        }
    }

    /// Render this voice's contribution additively into `out`.
    ///
    /// `block_offset` is the index of `out[0]` within the host block; the
    /// decimation grid is anchored to the block, not to this segment.
    pub fn render(&mut self, out: &mut [f32], block_offset: usize, params: &ParamSnapshot) {
        if self.state != VoiceState::Playing {
            return;
        }

        // Re-read modulation parameters each call; they may change between
        // blocks and the effect should follow without a note restart.
        self.lfo.set_waveform(params.lfo_waveform);
        self.lfo.set_rate(params.lfo_rate);
        self.crusher.set_bit_depth(params.bit_depth);
        self.crusher.set_lfo_amount(params.lfo_amount);
        self.decimator.set_divisor(params.rate_divide);

        for (i, slot) in out.iter_mut().enumerate() {
            let env_sample = self.env.next_sample();
            let in_attack_phase = env_sample > self.last_env_sample;
            self.last_env_sample = env_sample;

            let lfo_value = self.lfo.next_sample();

            let raw = match self.mode {
                TimbreMode::PercussiveNoise => match self.note {
                    HAT_KEY => {
                        let burst = self.noise.next_sample() * self.env_hat.next_sample();
                        Some(self.hat_filter.process(burst))
                    }
                    SNARE_KEY => {
                        let burst = self.noise.next_sample() * self.env_snare.next_sample();
                        Some(self.snare_filter.process(burst))
                    }
                    NOISE_KEY => Some(self.noise.next_sample() * env_sample),
                    _ => None, // unsupported key: contributes nothing
                },
                TimbreMode::TonalLow => Some(self.bass.next_sample() * env_sample),
                TimbreMode::TonalPulse => {
                    let osc = if self.pulse_widths_equal || in_attack_phase {
                        &mut self.pulse_1
                    } else {
                        &mut self.pulse_2
                    };
                    Some(osc.next_sample() * env_sample)
                }
            };

            if let Some(mut sample) = raw {
                if self.mode != TimbreMode::PercussiveNoise || self.crush_noise {
                    sample = self.crusher.crush(sample, lfo_value);
                }
                sample = self.decimator.process(block_offset + i, sample);
                *slot += sample * self.gain;
            }

            if !self.env.is_active() {
                self.free();
                break;
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.state == VoiceState::Playing
    }

    /// Playing, but the main envelope is already in its release ramp.
    /// These voices are first in line for stealing.
    pub fn is_releasing(&self) -> bool {
        self.is_active() && self.env.stage() == crate::dsp::EnvelopeStage::Release
    }

    pub fn note(&self) -> u8 {
        self.note
    }

    pub fn age(&self) -> u64 {
        self.age
    }

    pub fn state(&self) -> VoiceState {
        self.state
    }

    pub fn envelope_level(&self) -> f32 {
        self.env.level()
    }

    fn free(&mut self) {
        self.state = VoiceState::Idle;
        self.note = 0;
        self.gain = 0.0;
    }
}
