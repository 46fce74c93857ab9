use std::sync::Arc;

use crate::io::{MidiMessage, NoteEvent};
use crate::sequencing::{Arpeggiator, Transport};
use crate::synth::params::ParamStore;
use crate::synth::voice::Voice;
use crate::MAX_BLOCK_SIZE;

#[cfg(feature = "rtrb")]
use crate::synth::message::{MessageReceiver, SynthMessage};

/*
Block engine
============

Owns the voice pool and the arpeggiation clock and runs the whole signal
path for one block at a time:

  1. Snapshot the shared parameter store (one atomic read per field).
  2. Gather this block's note events: the host's timestamped stream plus
     anything queued from the control thread (offset 0).
  3. If arpeggiation is enabled, hand the events to the clock and use its
     rewritten stream instead.
  4. Walk the events in offset order, rendering every active voice up to
     each event before applying it, so note-ons and note-offs land on
     their exact sample.
  5. Add the mono mix into every output channel. The caller pre-clears
     the buffer; the engine only ever accumulates.

Voice allocation prefers a free voice, then steals the oldest releasing
one; if every voice is still in attack/decay/sustain the note-on is
dropped rather than clicking an audible voice off.
*/

pub struct Engine {
    voices: Vec<Voice>,
    params: Arc<ParamStore>,
    arp: Arpeggiator,

    scratch: Vec<f32>,
    events: Vec<NoteEvent>,
    arp_events: Vec<NoteEvent>,
    frame_counter: u64,

    #[cfg(feature = "rtrb")]
    rx: Option<rtrb::Consumer<SynthMessage>>,
}

impl Engine {
    pub fn new(sample_rate: f32, max_voices: usize, params: Arc<ParamStore>) -> Self {
        let voices = (0..max_voices.max(1))
            .map(|_| Voice::new(sample_rate))
            .collect();

        Self {
            voices,
            params,
            arp: Arpeggiator::new(f64::from(sample_rate)),
            scratch: vec![0.0; MAX_BLOCK_SIZE],
            events: Vec::with_capacity(64),
            arp_events: Vec::with_capacity(8),
            frame_counter: 0,
            #[cfg(feature = "rtrb")]
            rx: None,
        }
    }

    /// Attach a lock-free queue for note messages from a control thread.
    #[cfg(feature = "rtrb")]
    pub fn set_receiver(&mut self, rx: rtrb::Consumer<SynthMessage>) {
        self.rx = Some(rx);
    }

    /// Tempo used whenever the host transport provides none.
    pub fn set_fallback_bpm(&mut self, bpm: f64) {
        self.arp.set_fallback_bpm(bpm);
    }

    pub fn active_voice_count(&self) -> usize {
        self.voices.iter().filter(|v| v.is_active()).count()
    }

    /// Process one block.
    ///
    /// `events_in` must be ordered by offset (hosts deliver them that way).
    /// Audio is summed into every channel of `out`, which the caller has
    /// already cleared. Returns the rewritten event stream when
    /// arpeggiation is active, or an empty slice when the raw events were
    /// used as-is.
    pub fn process_block(
        &mut self,
        transport: &Transport,
        events_in: &[NoteEvent],
        out: &mut [&mut [f32]],
    ) -> &[NoteEvent] {
        let Some(block_len) = out.first().map(|channel| channel.len()) else {
            return &[];
        };
        debug_assert!(out.iter().all(|channel| channel.len() == block_len));
        let block_len = block_len.min(MAX_BLOCK_SIZE);

        let params = self.params.snapshot();

        self.events.clear();
        #[cfg(feature = "rtrb")]
        self.drain_control_queue();
        self.events.extend_from_slice(events_in);

        let arp_active = params.arp_enabled;
        if arp_active {
            self.arp.set_rate(params.arp_rate);
            let mut rewritten = std::mem::take(&mut self.arp_events);
            self.arp
                .process_block(transport, &self.events, block_len, &mut rewritten);
            self.arp_events = rewritten;
        } else {
            self.arp_events.clear();
            self.arp_events.extend_from_slice(&self.events);
        }

        let scratch = &mut self.scratch[..block_len];
        scratch.fill(0.0);

        let mut cursor = 0usize;
        for i in 0..self.arp_events.len() {
            let event = self.arp_events[i];
            let offset = event.offset.min(block_len);
            if offset > cursor {
                for voice in &mut self.voices {
                    voice.render(&mut scratch[cursor..offset], cursor, &params);
                }
                cursor = offset;
            }

            match event.message {
                MidiMessage::NoteOn { key, velocity } => {
                    let age = self.frame_counter + cursor as u64;
                    if let Some(voice) = allocate_voice(&mut self.voices) {
                        voice.start_note(key, velocity, &params, age);
                    }
                }
                MidiMessage::NoteOff { key } => {
                    if let Some(voice) = self
                        .voices
                        .iter_mut()
                        .find(|v| v.note() == key && v.is_active() && !v.is_releasing())
                    {
                        voice.stop_note(true);
                    }
                }
            }
        }
        for voice in &mut self.voices {
            voice.render(&mut scratch[cursor..block_len], cursor, &params);
        }

        for channel in out.iter_mut() {
            for (slot, sample) in channel[..block_len].iter_mut().zip(scratch.iter()) {
                *slot += *sample;
            }
        }

        self.frame_counter += block_len as u64;

        if arp_active {
            &self.arp_events
        } else {
            &[]
        }
    }

    #[cfg(feature = "rtrb")]
    fn drain_control_queue(&mut self) {
        let Some(rx) = self.rx.as_mut() else {
            return;
        };
        while let Some(message) = MessageReceiver::pop(rx) {
            match message {
                SynthMessage::NoteOn { note, velocity } => {
                    self.events.push(NoteEvent::note_on(0, note, velocity));
                }
                SynthMessage::NoteOff { note } => {
                    self.events.push(NoteEvent::note_off(0, note));
                }
                SynthMessage::AllNotesOff => {
                    for voice in &mut self.voices {
                        if voice.is_active() {
                            voice.stop_note(true);
                        }
                    }
                }
            }
        }
    }
}

fn allocate_voice(voices: &mut [Voice]) -> Option<&mut Voice> {
    // First pass: any idle voice.
    if let Some(idx) = voices.iter().position(|v| !v.is_active()) {
        return Some(&mut voices[idx]);
    }

    // Second pass: steal the oldest voice already in its release tail.
    let oldest = voices
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_releasing())
        .min_by_key(|(_, v)| v.age())
        .map(|(idx, _)| idx);
    oldest.map(move |idx| &mut voices[idx])
}
