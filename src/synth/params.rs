use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU8, Ordering};

use crate::dsp::lfo::LfoWaveform;
use crate::sequencing::arp::ArpRate;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which signal path a voice follows.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimbreMode {
    /// Single triangle oscillator, envelope-shaped.
    TonalLow,
    /// Pulse-oscillator pair with attack-phase timbre switching.
    TonalPulse,
    /// Filtered noise percussion on fixed keys.
    PercussiveNoise,
}

impl TimbreMode {
    pub fn from_index(index: u8) -> Self {
        match index {
            0 => TimbreMode::TonalLow,
            1 => TimbreMode::TonalPulse,
            _ => TimbreMode::PercussiveNoise,
        }
    }

    pub fn as_index(self) -> u8 {
        match self {
            TimbreMode::TonalLow => 0,
            TimbreMode::TonalPulse => 1,
            TimbreMode::PercussiveNoise => 2,
        }
    }
}

/// The three-way pulse duty-width selector.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PulseWidth {
    Eighth,  // 12.5%
    Quarter, // 25%
    Half,    // 50%
}

impl PulseWidth {
    pub fn width(self) -> f32 {
        match self {
            PulseWidth::Eighth => 0.125,
            PulseWidth::Quarter => 0.25,
            PulseWidth::Half => 0.5,
        }
    }

    pub fn from_index(index: u8) -> Self {
        match index {
            0 => PulseWidth::Eighth,
            1 => PulseWidth::Quarter,
            _ => PulseWidth::Half,
        }
    }

    pub fn as_index(self) -> u8 {
        match self {
            PulseWidth::Eighth => 0,
            PulseWidth::Quarter => 1,
            PulseWidth::Half => 2,
        }
    }
}

impl LfoWaveform {
    pub fn from_index(index: u8) -> Self {
        match index {
            0 => LfoWaveform::Sine,
            1 => LfoWaveform::Triangle,
            _ => LfoWaveform::Pulse,
        }
    }

    pub fn as_index(self) -> u8 {
        match self {
            LfoWaveform::Sine => 0,
            LfoWaveform::Triangle => 1,
            LfoWaveform::Pulse => 2,
        }
    }
}

/// Read-only parameter snapshot taken at the start of each block.
///
/// Render code only ever sees this plain struct, never the shared store, so
/// there is no aliasing into concurrently-written state on the audio path.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSnapshot {
    pub mode: TimbreMode,

    /// ADSR times in seconds; sustain is a level in [0, 1].
    pub attack: f32,
    pub decay: f32,
    pub sustain: f32,
    pub release: f32,

    pub pulse_width_1: PulseWidth,
    pub pulse_width_2: PulseWidth,

    /// Semitone offset applied to every note, -12..=+12.
    pub pitch_offset: f32,

    /// Base bit depth, 1..=32.
    pub bit_depth: f32,
    /// Bits of depth swing per unit of LFO output.
    pub lfo_amount: f32,
    /// LFO rate in Hz.
    pub lfo_rate: f32,
    pub lfo_waveform: LfoWaveform,

    /// Sample-rate decimation divisor, >= 1.
    pub rate_divide: u32,
    /// Whether percussive noise also passes through the bitcrusher.
    pub crush_noise: bool,

    pub arp_enabled: bool,
    pub arp_rate: ArpRate,
}

impl Default for ParamSnapshot {
    fn default() -> Self {
        Self {
            mode: TimbreMode::TonalLow,
            attack: 0.01,
            decay: 0.1,
            sustain: 0.7,
            release: 0.3,
            pulse_width_1: PulseWidth::Half,
            pulse_width_2: PulseWidth::Half,
            pitch_offset: 0.0,
            bit_depth: 24.0,
            lfo_amount: 0.0,
            lfo_rate: 1.0,
            lfo_waveform: LfoWaveform::Sine,
            rate_divide: 1,
            crush_noise: false,
            arp_enabled: false,
            arp_rate: ArpRate::Quarter,
        }
    }
}

/// Lock-free shared parameter store.
///
/// The control thread writes individual values; the audio thread reads them
/// all into a [`ParamSnapshot`] once per block. Every field is a single
/// atomic word with relaxed ordering - the contract is eventual visibility,
/// not cross-field consistency, and a torn "snapshot" across two fields is
/// inaudible for one block.
pub struct ParamStore {
    mode: AtomicU8,
    attack: AtomicU32,
    decay: AtomicU32,
    sustain: AtomicU32,
    release: AtomicU32,
    pulse_width_1: AtomicU8,
    pulse_width_2: AtomicU8,
    pitch_offset: AtomicU32,
    bit_depth: AtomicU32,
    lfo_amount: AtomicU32,
    lfo_rate: AtomicU32,
    lfo_waveform: AtomicU8,
    rate_divide: AtomicU32,
    crush_noise: AtomicBool,
    arp_enabled: AtomicBool,
    arp_rate: AtomicU8,
}

#[inline]
fn store_f32(slot: &AtomicU32, value: f32) {
    slot.store(value.to_bits(), Ordering::Relaxed);
}

#[inline]
fn load_f32(slot: &AtomicU32) -> f32 {
    f32::from_bits(slot.load(Ordering::Relaxed))
}

impl ParamStore {
    pub fn new() -> Self {
        Self::from_snapshot(&ParamSnapshot::default())
    }

    pub fn from_snapshot(snapshot: &ParamSnapshot) -> Self {
        Self {
            mode: AtomicU8::new(snapshot.mode.as_index()),
            attack: AtomicU32::new(snapshot.attack.to_bits()),
            decay: AtomicU32::new(snapshot.decay.to_bits()),
            sustain: AtomicU32::new(snapshot.sustain.to_bits()),
            release: AtomicU32::new(snapshot.release.to_bits()),
            pulse_width_1: AtomicU8::new(snapshot.pulse_width_1.as_index()),
            pulse_width_2: AtomicU8::new(snapshot.pulse_width_2.as_index()),
            pitch_offset: AtomicU32::new(snapshot.pitch_offset.to_bits()),
            bit_depth: AtomicU32::new(snapshot.bit_depth.to_bits()),
            lfo_amount: AtomicU32::new(snapshot.lfo_amount.to_bits()),
            lfo_rate: AtomicU32::new(snapshot.lfo_rate.to_bits()),
            lfo_waveform: AtomicU8::new(snapshot.lfo_waveform.as_index()),
            rate_divide: AtomicU32::new(snapshot.rate_divide.max(1)),
            crush_noise: AtomicBool::new(snapshot.crush_noise),
            arp_enabled: AtomicBool::new(snapshot.arp_enabled),
            arp_rate: AtomicU8::new(snapshot.arp_rate.as_index()),
        }
    }

    /// Read every parameter into a plain struct. Called once per block on
    /// the audio thread.
    pub fn snapshot(&self) -> ParamSnapshot {
        ParamSnapshot {
            mode: TimbreMode::from_index(self.mode.load(Ordering::Relaxed)),
            attack: load_f32(&self.attack),
            decay: load_f32(&self.decay),
            sustain: load_f32(&self.sustain),
            release: load_f32(&self.release),
            pulse_width_1: PulseWidth::from_index(self.pulse_width_1.load(Ordering::Relaxed)),
            pulse_width_2: PulseWidth::from_index(self.pulse_width_2.load(Ordering::Relaxed)),
            pitch_offset: load_f32(&self.pitch_offset),
            bit_depth: load_f32(&self.bit_depth),
            lfo_amount: load_f32(&self.lfo_amount),
            lfo_rate: load_f32(&self.lfo_rate),
            lfo_waveform: LfoWaveform::from_index(self.lfo_waveform.load(Ordering::Relaxed)),
            rate_divide: self.rate_divide.load(Ordering::Relaxed).max(1),
            crush_noise: self.crush_noise.load(Ordering::Relaxed),
            arp_enabled: self.arp_enabled.load(Ordering::Relaxed),
            arp_rate: ArpRate::from_index(self.arp_rate.load(Ordering::Relaxed)),
        }
    }

    pub fn set_mode(&self, mode: TimbreMode) {
        self.mode.store(mode.as_index(), Ordering::Relaxed);
    }

    /// ADSR times in seconds (clamped positive), sustain level in [0, 1].
    pub fn set_adsr(&self, attack: f32, decay: f32, sustain: f32, release: f32) {
        store_f32(&self.attack, attack.max(0.0));
        store_f32(&self.decay, decay.max(0.0));
        store_f32(&self.sustain, sustain.clamp(0.0, 1.0));
        store_f32(&self.release, release.max(0.0));
    }

    pub fn set_pulse_widths(&self, first: PulseWidth, second: PulseWidth) {
        self.pulse_width_1.store(first.as_index(), Ordering::Relaxed);
        self.pulse_width_2.store(second.as_index(), Ordering::Relaxed);
    }

    pub fn set_pitch_offset(&self, semitones: f32) {
        store_f32(&self.pitch_offset, semitones.clamp(-12.0, 12.0));
    }

    pub fn set_bit_depth(&self, bits: f32) {
        store_f32(&self.bit_depth, bits.clamp(1.0, 32.0));
    }

    pub fn set_lfo(&self, waveform: LfoWaveform, rate_hz: f32, amount: f32) {
        self.lfo_waveform.store(waveform.as_index(), Ordering::Relaxed);
        store_f32(&self.lfo_rate, rate_hz.max(0.0));
        store_f32(&self.lfo_amount, amount);
    }

    pub fn set_rate_divide(&self, divisor: u32) {
        self.rate_divide.store(divisor.max(1), Ordering::Relaxed);
    }

    pub fn set_crush_noise(&self, enabled: bool) {
        self.crush_noise.store(enabled, Ordering::Relaxed);
    }

    pub fn set_arp_enabled(&self, enabled: bool) {
        self.arp_enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn set_arp_rate(&self, rate: ArpRate) {
        self.arp_rate.store(rate.as_index(), Ordering::Relaxed);
    }
}

impl Default for ParamStore {
    fn default() -> Self {
        Self::new()
    }
}
