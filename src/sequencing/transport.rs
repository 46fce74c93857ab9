/// Per-block snapshot of the host's transport state.
///
/// Every field is optional: a standalone host may know nothing about musical
/// time, in which case the engine falls back to its own accumulated position,
/// its configured fallback tempo, and an always-playing flag.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Transport {
    /// Position in quarter notes since playback start.
    pub position_in_quarter_notes: Option<f64>,
    /// Tempo in beats per minute.
    pub bpm: Option<f64>,
    /// Whether the transport is rolling.
    pub is_playing: Option<bool>,
}

impl Transport {
    /// A transport that provides no information; the engine supplies all
    /// fallbacks.
    pub fn unknown() -> Self {
        Self::default()
    }

    /// A rolling transport with full information.
    pub fn playing(position_in_quarter_notes: f64, bpm: f64) -> Self {
        Self {
            position_in_quarter_notes: Some(position_in_quarter_notes),
            bpm: Some(bpm),
            is_playing: Some(true),
        }
    }

    /// A stopped transport with full information.
    pub fn stopped(position_in_quarter_notes: f64, bpm: f64) -> Self {
        Self {
            position_in_quarter_notes: Some(position_in_quarter_notes),
            bpm: Some(bpm),
            is_playing: Some(false),
        }
    }
}
