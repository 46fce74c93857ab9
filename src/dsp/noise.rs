/// White-noise source backed by a xorshift PRNG.
///
/// Audio noise does not need cryptographic quality, it needs speed and a
/// flat spectrum; xorshift32 delivers both in a handful of integer ops with
/// no allocation and no external dependency on the realtime path.
pub struct WhiteNoise {
    state: u32,
}

impl WhiteNoise {
    pub fn new() -> Self {
        Self::with_seed(0x2545_F491)
    }

    /// Seed must be nonzero; xorshift has a fixed point at zero.
    pub fn with_seed(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    /// Next sample, uniformly distributed in [-1, 1].
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        (x as f32 / u32::MAX as f32) * 2.0 - 1.0
    }
}

impl Default for WhiteNoise {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_stays_in_range() {
        let mut noise = WhiteNoise::new();
        for _ in 0..100_000 {
            let s = noise.next_sample();
            assert!((-1.0..=1.0).contains(&s), "noise out of range: {s}");
        }
    }

    #[test]
    fn mean_is_near_zero() {
        let mut noise = WhiteNoise::new();
        let n = 100_000;
        let sum: f64 = (0..n).map(|_| noise.next_sample() as f64).sum();
        let mean = sum / n as f64;
        assert!(mean.abs() < 0.01, "white noise should be unbiased: {mean}");
    }

    #[test]
    fn sequence_is_deterministic_per_seed() {
        let mut a = WhiteNoise::with_seed(42);
        let mut b = WhiteNoise::with_seed(42);
        for _ in 0..64 {
            assert_eq!(a.next_sample(), b.next_sample());
        }
    }
}
