pub mod midi;

pub use midi::{midi_note_to_freq, MidiMessage, NoteEvent};
