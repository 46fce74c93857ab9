//! Low-level DSP primitives used by the voice and sequencing layers.
//!
//! These components are allocation-free and realtime-safe, making them safe to
//! embed directly inside voice structs. They intentionally stay focused on the
//! signal-processing math so the synth layer can handle orchestration and
//! parameter plumbing.

/// Bit-depth quantization and sample-rate decimation.
pub mod bitcrush;
/// Attack/decay/sustain/release envelope generator.
pub mod envelope;
/// State-variable filter with multiple responses.
pub mod filter;
/// Low-frequency oscillator for parameter modulation.
pub mod lfo;
/// White-noise source for percussive voices.
pub mod noise;
/// Phase-accumulator oscillator and waveform shapes.
pub mod oscillator;

pub use envelope::EnvelopeStage;
pub use oscillator::Waveform;
