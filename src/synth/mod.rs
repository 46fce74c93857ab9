//! Voice management, parameters and the block-at-a-time engine.

pub mod engine;
pub mod message;
pub mod params;
pub mod voice;

pub use engine::Engine;
pub use message::{MessageReceiver, SynthMessage};
pub use params::{ParamSnapshot, ParamStore, PulseWidth, TimbreMode};
pub use voice::{Voice, VoiceState};
