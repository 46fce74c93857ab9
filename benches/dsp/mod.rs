//! Benchmarks for low-level DSP primitives.

mod bitcrush;
mod envelope;
mod filter;
mod oscillator;

pub use bitcrush::bench_bitcrush;
pub use envelope::bench_envelope;
pub use filter::bench_filter;
pub use oscillator::bench_oscillator;
