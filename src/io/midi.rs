/// Convert MIDI note number to frequency in Hz.
/// A4 = 440 Hz = MIDI note 69 (equal temperament).
#[inline]
pub fn midi_note_to_freq(note: u8) -> f32 {
    440.0 * 2.0_f32.powf((note as f32 - 69.0) / 12.0)
}

/// The subset of MIDI this engine consumes and produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiMessage {
    NoteOn { key: u8, velocity: u8 },
    NoteOff { key: u8 },
}

/// A timestamped note event within one audio block.
///
/// `offset` is the sample index relative to the start of the block at which
/// the event takes effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteEvent {
    pub offset: usize,
    pub message: MidiMessage,
}

impl NoteEvent {
    pub fn note_on(offset: usize, key: u8, velocity: u8) -> Self {
        Self {
            offset,
            message: MidiMessage::NoteOn { key, velocity },
        }
    }

    pub fn note_off(offset: usize, key: u8) -> Self {
        Self {
            offset,
            message: MidiMessage::NoteOff { key },
        }
    }
}
