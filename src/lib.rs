pub mod dsp; // Allocation-free signal primitives
pub mod io;
pub mod sequencing; // Transport and arpeggiation
pub mod synth; // Voices, parameters and the block engine

pub const MAX_BLOCK_SIZE: usize = 2048;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;
