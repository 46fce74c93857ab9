use std::f32::consts::PI;

/*
State-variable filter (Chamberlin/Zavalishin topology). One structure, four
responses computed from the same two integrator states:

| mode      | passes          | rejects      |
| --------- | --------------- | ------------ |
| low-pass  | below cutoff    | above cutoff |
| high-pass | above cutoff    | below cutoff |
| band-pass | around cutoff   | elsewhere    |
| notch     | elsewhere       | around cutoff|

The percussive voices use the high-pass (hat sizzle, ~7 kHz) and band-pass
(snare rattle, ~2 kHz) responses.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    LowPass,
    HighPass,
    BandPass,
    Notch,
}

pub struct StateVariableFilter {
    mode: FilterMode,
    cutoff_hz: f32,
    resonance: f32,
    sample_rate: f32,

    g: f32, // prewarped cutoff coefficient, cached
    ic1eq: f32,
    ic2eq: f32,
}

impl StateVariableFilter {
    pub fn new(mode: FilterMode, cutoff_hz: f32, sample_rate: f32) -> Self {
        let mut filter = Self {
            mode,
            cutoff_hz,
            resonance: 0.0,
            sample_rate: sample_rate.max(1.0),
            g: 0.0,
            ic1eq: 0.0,
            ic2eq: 0.0,
        };
        filter.update_coefficient();
        filter
    }

    pub fn lowpass(cutoff_hz: f32, sample_rate: f32) -> Self {
        Self::new(FilterMode::LowPass, cutoff_hz, sample_rate)
    }

    pub fn highpass(cutoff_hz: f32, sample_rate: f32) -> Self {
        Self::new(FilterMode::HighPass, cutoff_hz, sample_rate)
    }

    pub fn bandpass(cutoff_hz: f32, sample_rate: f32) -> Self {
        Self::new(FilterMode::BandPass, cutoff_hz, sample_rate)
    }

    pub fn notch(cutoff_hz: f32, sample_rate: f32) -> Self {
        Self::new(FilterMode::Notch, cutoff_hz, sample_rate)
    }

    fn update_coefficient(&mut self) {
        // Clamp below Nyquist; tan() blows up at sr/2.
        let cutoff = self.cutoff_hz.clamp(1.0, self.sample_rate * 0.49);
        self.g = (PI * cutoff / self.sample_rate).tan();
    }

    pub fn set_cutoff(&mut self, cutoff_hz: f32) {
        self.cutoff_hz = cutoff_hz;
        self.update_coefficient();
    }

    /// Resonance in [0, 1). Higher values emphasize the cutoff frequency.
    pub fn set_resonance(&mut self, resonance: f32) {
        self.resonance = resonance.clamp(0.0, 0.99);
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate.max(1.0);
        self.update_coefficient();
    }

    /// Filter one sample through the selected response.
    #[inline]
    pub fn process(&mut self, sample: f32) -> f32 {
        let g = self.g;
        let k = 2.0 - 2.0 * self.resonance;

        let h = 1.0 / (1.0 + g * (g + k));
        let v3 = sample - self.ic2eq;
        let v1 = h * (self.ic1eq + g * v3);
        let v2 = self.ic2eq + g * v1;

        self.ic1eq = 2.0 * v1 - self.ic1eq;
        self.ic2eq = 2.0 * v2 - self.ic2eq;

        match self.mode {
            FilterMode::LowPass => v2,
            FilterMode::BandPass => v1,
            FilterMode::HighPass => sample - k * v1 - v2,
            FilterMode::Notch => sample - k * v1,
        }
    }

    /// Clear the integrator memory (e.g. between notes).
    pub fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
    }
}
