use std::f32::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Phase-Accumulator Oscillator
============================

Every periodic generator in this crate is built on the same core: a phase
value in [0, 1) that advances by `frequency / sample_rate` each sample and
wraps at 1.0. The waveform is a pure function of that phase, so swapping
timbres never disturbs the running phase.

The waveform set is closed and known at design time, so it is a plain enum
rather than a trait object. One match per sample beats a virtual call per
sample on the hot path, and the compiler can inline each arm.

  Triangle   |phase - 0.5| - 0.25        range [-0.25, +0.25]
  Sine       sin(2π · phase)             range [-1, +1]
  Pulse      +0.5 while phase <= width   range {-0.5, +0.5}
  AdsrCycle  one-shot envelope shape     range [0, 1]

AdsrCycle is the odd one out: it traces an attack/decay/sustain/release
contour over a single cycle. Run it at a low frequency and one "cycle" is a
complete struck-note swell, which gives a fixed-length gated event an
envelope shape without a separate gate signal.
*/

/// An ADSR contour traced over one phase cycle.
///
/// Segment lengths are fractions of the cycle; `sustain` doubles as the hold
/// level and the hold duration, and the release segment spans whatever
/// remains of the cycle, ramping back to zero.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleShape {
    attack: f32,
    decay: f32,
    sustain: f32,
}

impl CycleShape {
    /// Create a shape from segment fractions. Values are clamped so the
    /// attack, decay and sustain segments never exceed one cycle.
    pub fn new(attack: f32, decay: f32, sustain: f32) -> Self {
        let attack = attack.clamp(1e-4, 1.0);
        let decay = decay.clamp(1e-4, 1.0 - attack);
        let sustain = sustain.clamp(0.0, 1.0 - attack - decay);
        Self {
            attack,
            decay,
            sustain,
        }
    }

    /// Preset for a struck chord swell.
    pub fn chord() -> Self {
        Self::new(0.004, 0.02, 0.04)
    }

    /// Preset for a short plucked note.
    pub fn note() -> Self {
        Self::new(0.0025, 0.01, 0.02)
    }

    fn value_at(&self, phase: f32) -> f32 {
        let decay_end = self.attack + self.decay;
        let sustain_end = decay_end + self.sustain;

        if phase < self.attack {
            phase / self.attack
        } else if phase < decay_end {
            1.0 + (self.sustain - 1.0) * ((phase - self.attack) / self.decay)
        } else if phase < sustain_end {
            self.sustain
        } else {
            // Release spans the rest of the cycle, ramping back to zero.
            let release_len = 1.0 - sustain_end;
            if release_len <= 0.0 {
                0.0
            } else {
                self.sustain * (1.0 - (phase - sustain_end) / release_len)
            }
        }
    }
}

/// The closed set of waveform shapes: a pure function of phase.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Waveform {
    Triangle,
    Sine,
    Pulse { width: f32 },
    AdsrCycle(CycleShape),
}

impl Waveform {
    /// Pulse wave with the given duty width (fraction of the cycle spent
    /// high). Clamped to [0, 1].
    pub fn pulse(width: f32) -> Self {
        Waveform::Pulse {
            width: width.clamp(0.0, 1.0),
        }
    }

    /// Evaluate the waveform at a phase in [0, 1).
    #[inline]
    pub fn shape(&self, phase: f32) -> f32 {
        match *self {
            Waveform::Triangle => (phase - 0.5).abs() - 0.25,
            Waveform::Sine => (TAU * phase).sin(),
            Waveform::Pulse { width } => {
                if phase <= width {
                    0.5
                } else {
                    -0.5
                }
            }
            Waveform::AdsrCycle(cycle) => cycle.value_at(phase),
        }
    }
}

/// Phase-accumulator oscillator.
///
/// Frequency and sample-rate changes take effect on the next sample and never
/// reset the phase, so pitch changes are click-free. A frequency of zero is
/// degenerate but defined: the phase stops advancing and the output holds
/// constant. The sample rate is clamped to a small positive floor so output
/// stays finite.
pub struct Oscillator {
    waveform: Waveform,
    frequency: f32,
    sample_rate: f32,
    phase: f32,
    phase_increment: f32,
}

const MIN_SAMPLE_RATE: f32 = 1.0;

impl Oscillator {
    pub fn new(waveform: Waveform, sample_rate: f32) -> Self {
        Self {
            waveform,
            frequency: 0.0,
            sample_rate: sample_rate.max(MIN_SAMPLE_RATE),
            phase: 0.0,
            phase_increment: 0.0,
        }
    }

    /// Change pitch without touching the running phase.
    pub fn set_frequency(&mut self, frequency: f32) {
        self.frequency = frequency;
        self.phase_increment = frequency / self.sample_rate;
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate.max(MIN_SAMPLE_RATE);
        self.phase_increment = self.frequency / self.sample_rate;
    }

    /// Force an absolute phase. Used only at note start.
    pub fn set_phase(&mut self, phase: f32) {
        self.phase = phase.rem_euclid(1.0);
    }

    /// Swap the waveform in place. The phase keeps running, so an LFO can
    /// change shape mid-cycle without a discontinuity in timing.
    pub fn set_waveform(&mut self, waveform: Waveform) {
        self.waveform = waveform;
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    /// Advance one sample and return the shaped output. Called exactly once
    /// per output sample.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        self.phase += self.phase_increment;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
        self.waveform.shape(self.phase)
    }
}
