/*
Bitcrusher and Decimator
========================

Two halves of the lo-fi degradation effect:

  Bitcrusher  Amplitude quantization. The sample is snapped to a grid of
              `2^depth - 1` steps, where the effective depth is the base
              bit depth plus an LFO contribution. Rounding is to-nearest
              rather than truncating, which keeps the quantization error
              centered around zero instead of adding a DC bias.

  Decimator   Sample-rate reduction by zero-order hold. Only every Nth
              sample is computed fresh; the ones in between repeat the
              last held value. The hold applies to the CRUSHED output,
              not the raw input - holding pre-crush samples would smear
              the stair-step artifact the effect exists to produce.

Effective depth is clamped to [1, 24]. Above 24 bits the quantization step
is finer than f32 resolution near full scale, so the crusher is already
transparent; below 1 bit there is no signal left to quantize.
*/

/// Amplitude quantizer with LFO-modulated bit depth.
pub struct Bitcrusher {
    bit_depth: f32,
    lfo_amount: f32,
}

impl Bitcrusher {
    pub fn new(bit_depth: f32) -> Self {
        Self {
            bit_depth: bit_depth.clamp(1.0, 32.0),
            lfo_amount: 0.0,
        }
    }

    /// Base bit depth. Accepts 1..=32; values outside are clamped rather
    /// than rejected so stale control data can never stall the audio path.
    pub fn set_bit_depth(&mut self, bit_depth: f32) {
        self.bit_depth = bit_depth.clamp(1.0, 32.0);
    }

    /// How many bits of depth one unit of LFO swing adds or removes.
    pub fn set_lfo_amount(&mut self, amount: f32) {
        self.lfo_amount = amount;
    }

    /// Quantize one sample at the current modulated depth.
    #[inline]
    pub fn crush(&self, sample: f32, lfo_value: f32) -> f32 {
        let depth = (self.bit_depth + lfo_value * self.lfo_amount).clamp(1.0, 24.0);
        let steps = 2.0f32.powf(depth) - 1.0;
        (sample * steps).round() / steps
    }
}

/// Sample-rate reducer: passes every `divisor`th sample and holds it across
/// the slots in between.
pub struct Decimator {
    divisor: u32,
    held: f32,
}

impl Decimator {
    pub fn new(divisor: u32) -> Self {
        Self {
            divisor: divisor.max(1),
            held: 0.0,
        }
    }

    /// Divisor of 1 means no decimation. Zero is invalid input and clamps
    /// to 1.
    pub fn set_divisor(&mut self, divisor: u32) {
        self.divisor = divisor.max(1);
    }

    pub fn divisor(&self) -> u32 {
        self.divisor
    }

    /// `index` is the buffer-relative sample index. On multiples of the
    /// divisor the input becomes the new held value; elsewhere the input is
    /// discarded and the held value repeats.
    #[inline]
    pub fn process(&mut self, index: usize, sample: f32) -> f32 {
        if index as u32 % self.divisor == 0 {
            self.held = sample;
        }
        self.held
    }

    pub fn reset(&mut self) {
        self.held = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_depth_is_transparent() {
        let crusher = Bitcrusher::new(32.0);
        for i in 0..=200 {
            let s = (i as f32 / 100.0) - 1.0;
            let out = crusher.crush(s, 0.0);
            assert!(
                (out - s).abs() < 1e-6,
                "expected identity at full depth, {s} became {out}"
            );
        }
    }

    #[test]
    fn one_bit_snaps_to_three_levels() {
        let crusher = Bitcrusher::new(1.0);
        // steps = 2^1 - 1 = 1, so outputs land on -1, 0 or +1
        for &(input, expected) in &[(0.6f32, 1.0f32), (0.4, 0.0), (-0.6, -1.0), (0.0, 0.0)] {
            let out = crusher.crush(input, 0.0);
            assert!(
                (out - expected).abs() < 1e-6,
                "1-bit crush of {input}: expected {expected}, got {out}"
            );
        }
    }

    #[test]
    fn rounds_to_nearest_not_down() {
        let crusher = Bitcrusher::new(2.0);
        // steps = 3; 0.4 * 3 = 1.2 -> 1 -> 0.333, 0.55 * 3 = 1.65 -> 2 -> 0.667
        assert!((crusher.crush(0.4, 0.0) - 1.0 / 3.0).abs() < 1e-6);
        assert!((crusher.crush(0.55, 0.0) - 2.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn lfo_modulation_is_clamped() {
        let mut crusher = Bitcrusher::new(4.0);
        crusher.set_lfo_amount(100.0);

        // Driven far below 1 bit: still quantizes as 1 bit, output finite.
        let low = crusher.crush(0.7, -1.0);
        assert!(low.is_finite());
        assert!((low - 1.0).abs() < 1e-6, "expected 1-bit snap, got {low}");

        // Driven far above 24 bits: transparent.
        let high = crusher.crush(0.7, 1.0);
        assert!((high - 0.7).abs() < 1e-6);
    }

    #[test]
    fn decimation_limits_distinct_values() {
        let divisor = 4u32;
        let mut decim = Decimator::new(divisor);
        let block: Vec<f32> = (0..64).map(|i| (i as f32 * 0.7).sin()).collect();

        let out: Vec<f32> = block
            .iter()
            .enumerate()
            .map(|(i, &s)| decim.process(i, s))
            .collect();

        // Each run of `divisor` samples holds a single value.
        for chunk in out.chunks(divisor as usize) {
            assert!(
                chunk.iter().all(|&v| v == chunk[0]),
                "hold region not constant: {chunk:?}"
            );
        }
    }

    #[test]
    fn zero_divisor_clamps_to_passthrough() {
        let mut decim = Decimator::new(0);
        assert_eq!(decim.divisor(), 1);
        for i in 0..16 {
            let s = i as f32 * 0.1;
            assert_eq!(decim.process(i, s), s);
        }
    }
}
