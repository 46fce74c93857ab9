use crate::io::{MidiMessage, NoteEvent};
use crate::sequencing::transport::Transport;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Arpeggiation Clock
==================

Converts the set of currently held keys into a tempo-locked sequence of
single notes. Each quarter note is divided into eight candidate trigger
positions (0, 1/8, 2/8, ... 7/8, 1); the rate selects every Nth of them:

    rate 1  quarter notes       positions 0, 1
    rate 2  eighth notes        positions 0, 1/2, 1
    rate 4  sixteenth notes     positions 0, 1/4, 1/2, 3/4, 1
    rate 8  thirty-second notes all eight

Per block the clock finds the next selected position at or after the
current fractional quarter-note phase, converts the distance into samples,
and - if it lands inside the block - emits a note-off for the previous
trigger followed by a note-on for the next held note in ascending
round-robin order, both at that exact sample offset.

The rotation cursor is re-wrapped modulo the LIVE set length on every
access. If keys are released between two triggers the cursor can land on a
different note than a listener might expect; that is accepted behavior,
not corrected.
*/

/// Arpeggiation rate as subdivisions of a quarter note.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArpRate {
    Quarter,
    Eighth,
    Sixteenth,
    ThirtySecond,
}

impl ArpRate {
    /// Triggers per quarter note: 1, 2, 4 or 8.
    pub fn subdivisions(self) -> u32 {
        match self {
            ArpRate::Quarter => 1,
            ArpRate::Eighth => 2,
            ArpRate::Sixteenth => 4,
            ArpRate::ThirtySecond => 8,
        }
    }

    pub fn from_index(index: u8) -> Self {
        match index {
            0 => ArpRate::Quarter,
            1 => ArpRate::Eighth,
            2 => ArpRate::Sixteenth,
            _ => ArpRate::ThirtySecond,
        }
    }

    pub fn as_index(self) -> u8 {
        match self {
            ArpRate::Quarter => 0,
            ArpRate::Eighth => 1,
            ArpRate::Sixteenth => 2,
            ArpRate::ThirtySecond => 3,
        }
    }
}

/// The set of currently held MIDI keys, kept in ascending order, unique by
/// value. Mutations are idempotent: re-adding a held key or removing an
/// absent one is a no-op.
pub struct HeldNotes {
    notes: Vec<u8>,
}

impl HeldNotes {
    pub fn new() -> Self {
        Self {
            // Full MIDI range up front; no growth on the audio path.
            notes: Vec::with_capacity(128),
        }
    }

    pub fn insert(&mut self, key: u8) {
        if let Err(pos) = self.notes.binary_search(&key) {
            self.notes.insert(pos, key);
        }
    }

    pub fn remove(&mut self, key: u8) {
        if let Ok(pos) = self.notes.binary_search(&key) {
            self.notes.remove(pos);
        }
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<u8> {
        self.notes.get(index).copied()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.notes
    }

    pub fn clear(&mut self) {
        self.notes.clear();
    }
}

impl Default for HeldNotes {
    fn default() -> Self {
        Self::new()
    }
}

const TRIGGER_POSITIONS: [f64; 9] = [0.0, 0.125, 0.25, 0.375, 0.5, 0.625, 0.75, 0.875, 1.0];

pub struct Arpeggiator {
    sample_rate: f64,
    fallback_bpm: f64,
    position_in_quarter_notes: f64,
    rate: ArpRate,
    note_index: usize,
    last_note: Option<u8>,
    is_playing: bool,
    held: HeldNotes,
}

impl Arpeggiator {
    pub fn new(sample_rate: f64) -> Self {
        Self {
            sample_rate: sample_rate.max(1.0),
            fallback_bpm: 80.0,
            position_in_quarter_notes: 0.0,
            rate: ArpRate::Quarter,
            note_index: 0,
            last_note: None,
            is_playing: false,
            held: HeldNotes::new(),
        }
    }

    /// Reset note tracking for a new playback session.
    pub fn prepare(&mut self, sample_rate: f64) {
        self.sample_rate = sample_rate.max(1.0);
        self.position_in_quarter_notes = 0.0;
        self.note_index = 0;
        self.last_note = None;
        self.held.clear();
    }

    /// Tempo used when the host provides none.
    pub fn set_fallback_bpm(&mut self, bpm: f64) {
        self.fallback_bpm = bpm.max(1.0);
    }

    pub fn set_rate(&mut self, rate: ArpRate) {
        self.rate = rate;
    }

    pub fn held_notes(&self) -> &HeldNotes {
        &self.held
    }

    /// Run the clock for one block.
    ///
    /// Consumes the raw incoming events (updating the held-note set) and
    /// writes the rewritten stream into `events_out`: at most one note-off
    /// plus one note-on per block, both at the trigger's exact sample
    /// offset. The raw events themselves are swallowed; when arpeggiation
    /// is active the rewritten stream replaces them.
    pub fn process_block(
        &mut self,
        transport: &Transport,
        events_in: &[NoteEvent],
        num_samples: usize,
        events_out: &mut Vec<NoteEvent>,
    ) {
        events_out.clear();

        let position = transport
            .position_in_quarter_notes
            .unwrap_or(self.position_in_quarter_notes);
        self.position_in_quarter_notes = position;
        let bpm = transport.bpm.unwrap_or(self.fallback_bpm).max(1.0);

        let was_playing = self.is_playing;
        self.is_playing = transport.is_playing.unwrap_or(true);
        // Stop -> start transition restarts the rotation from the bottom.
        if !was_playing && self.is_playing {
            self.note_index = 0;
        }

        for event in events_in {
            match event.message {
                MidiMessage::NoteOn { key, .. } => self.held.insert(key),
                MidiMessage::NoteOff { key } => self.held.remove(key),
            }
        }

        // Stopped: release the pending note and hold position; no triggers
        // fire against a frozen clock.
        if !self.is_playing {
            if let Some(last) = self.last_note.take() {
                events_out.push(NoteEvent::note_off(0, last));
            }
            return;
        }

        let quarter_note_samples = self.sample_rate * 60.0 / bpm;
        let frac = position - position.floor();
        let skip = ((TRIGGER_POSITIONS.len() - 1) as u32 / self.rate.subdivisions()).max(1);

        // Distance in samples to the next selected trigger position at or
        // after the current phase.
        let mut samples_to_next = num_samples as f64;
        for i in (0..TRIGGER_POSITIONS.len()).step_by(skip as usize) {
            samples_to_next = (TRIGGER_POSITIONS[i] - frac) * quarter_note_samples;
            if samples_to_next >= 0.0 {
                break;
            }
        }

        if samples_to_next < num_samples as f64 {
            let offset = samples_to_next.max(0.0) as usize;

            if let Some(last) = self.last_note.take() {
                events_out.push(NoteEvent::note_off(offset, last));
            }

            if !self.held.is_empty() {
                // Modulo the live length: the set may have shrunk since the
                // cursor was last advanced.
                self.note_index %= self.held.len();
                if let Some(note) = self.held.get(self.note_index) {
                    self.note_index = (self.note_index + 1) % self.held.len();
                    self.last_note = Some(note);
                    events_out.push(NoteEvent::note_on(offset, note, 127));
                }
            }
        }

        self.position_in_quarter_notes += num_samples as f64 / quarter_note_samples;
    }
}
