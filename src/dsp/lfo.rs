use crate::dsp::oscillator::{Oscillator, Waveform};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Waveform choices exposed for the bit-depth LFO.
///
/// Same math as the audio-rate oscillator, just run at control rates
/// (fractions of a hertz up to ~20 Hz). The pulse variant is fixed at 50%
/// duty: for on/off style modulation the width adds nothing.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LfoWaveform {
    Sine,
    Triangle,
    Pulse,
}

impl LfoWaveform {
    fn as_waveform(self) -> Waveform {
        match self {
            LfoWaveform::Sine => Waveform::Sine,
            LfoWaveform::Triangle => Waveform::Triangle,
            LfoWaveform::Pulse => Waveform::pulse(0.5),
        }
    }
}

/// Low-frequency oscillator for parameter modulation.
///
/// A thin wrapper over [`Oscillator`] that keeps one running phase across
/// waveform and rate changes, so switching the LFO shape mid-note never
/// causes a timing jump.
pub struct Lfo {
    osc: Oscillator,
    waveform: LfoWaveform,
}

impl Lfo {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            osc: Oscillator::new(Waveform::Sine, sample_rate),
            waveform: LfoWaveform::Sine,
        }
    }

    pub fn set_rate(&mut self, rate_hz: f32) {
        self.osc.set_frequency(rate_hz.max(0.0));
    }

    pub fn set_waveform(&mut self, waveform: LfoWaveform) {
        if waveform != self.waveform {
            self.waveform = waveform;
            self.osc.set_waveform(waveform.as_waveform());
        }
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.osc.set_sample_rate(sample_rate);
    }

    pub fn waveform(&self) -> LfoWaveform {
        self.waveform
    }

    /// Advance one sample and return the modulation value.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        self.osc.next_sample()
    }
}
