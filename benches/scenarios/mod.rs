//! Benchmarks for complete voice chains and whole-engine blocks.

mod engine;
mod voices;

pub use engine::bench_engine;
pub use voices::bench_voices;
