use crate::MIN_TIME;

/*
ADSR Envelope Generator
=======================

Linear four-stage amplitude envelope:

    Idle --note_on--> Attack --peak--> Decay --sustain hit--> Sustain
                                                                 |
    Idle <--level reaches 0-- Release <--------note_off----------+

Two rules keep the output click-free:

  1. `note_off` starts the release from the CURRENT level, from any active
     stage. There is no snap to the sustain level first.
  2. `note_on` restarts the attack from the CURRENT level, so a retrigger
     while the previous note is still sounding ramps up from wherever it
     was instead of jumping to zero.

Level is therefore continuous across every transition; the only way it
moves is by one stage's per-sample slope. The release decrement is frozen
at `note_off` time so the ramp lands exactly on zero and the stage flips
to Idle on its own.
*/

/// Current stage of the envelope state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeStage {
    Idle,
    Attack,
    Decay,
    Sustain,
    Release,
}

pub struct Envelope {
    attack_time: f32,   // seconds, level -> 1.0
    decay_time: f32,    // seconds, 1.0 -> sustain
    sustain_level: f32, // held level in [0, 1]
    release_time: f32,  // seconds, level -> 0.0

    sample_rate: f32,
    stage: EnvelopeStage,
    level: f32,

    // Frozen at stage entry so each ramp lands exactly on its target.
    decay_start_level: f32,
    release_decrement: f32,
}

impl Envelope {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            attack_time: 0.01,
            decay_time: 0.1,
            sustain_level: 0.7,
            release_time: 0.3,
            sample_rate: sample_rate.max(1.0),
            stage: EnvelopeStage::Idle,
            level: 0.0,
            decay_start_level: 0.0,
            release_decrement: 0.0,
        }
    }

    /// Set all four ADSR parameters at once. Times are clamped to a small
    /// positive floor; out-of-range sustain is clamped to [0, 1]. Takes
    /// effect immediately, typically called right before `note_on`.
    pub fn set_adsr(&mut self, attack: f32, decay: f32, sustain: f32, release: f32) {
        self.attack_time = attack.max(MIN_TIME);
        self.decay_time = decay.max(MIN_TIME);
        self.sustain_level = sustain.clamp(0.0, 1.0);
        self.release_time = release.max(MIN_TIME);
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate.max(1.0);
    }

    /// Gate high: force the attack stage, ramping up from the current level.
    /// A retrigger is immediate, never queued.
    pub fn note_on(&mut self) {
        self.stage = EnvelopeStage::Attack;
    }

    /// Gate low: force the release stage from any active stage, starting at
    /// the current level.
    pub fn note_off(&mut self) {
        if self.stage == EnvelopeStage::Idle {
            return;
        }
        let release_samples = (self.release_time * self.sample_rate).max(1.0);
        self.release_decrement = self.level / release_samples;
        self.stage = EnvelopeStage::Release;
    }

    /// Advance one sample and return the new level. Called once per sample.
    pub fn next_sample(&mut self) -> f32 {
        match self.stage {
            EnvelopeStage::Idle => {
                self.level = 0.0;
            }

            EnvelopeStage::Attack => {
                self.level += 1.0 / (self.attack_time * self.sample_rate);
                if self.level >= 1.0 {
                    self.level = 1.0;
                    self.decay_start_level = 1.0;
                    self.stage = EnvelopeStage::Decay;
                }
            }

            EnvelopeStage::Decay => {
                let drop = self.decay_start_level - self.sustain_level;
                self.level -= drop / (self.decay_time * self.sample_rate);
                if self.level <= self.sustain_level {
                    self.level = self.sustain_level;
                    self.stage = EnvelopeStage::Sustain;
                }
            }

            EnvelopeStage::Sustain => {
                self.level = self.sustain_level;
            }

            EnvelopeStage::Release => {
                self.level -= self.release_decrement;
                if self.level <= 0.0 {
                    self.level = 0.0;
                    self.stage = EnvelopeStage::Idle;
                }
            }
        }

        debug_assert!((0.0..=1.0).contains(&self.level));
        self.level
    }

    /// True in every stage except Idle.
    pub fn is_active(&self) -> bool {
        self.stage != EnvelopeStage::Idle
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn stage(&self) -> EnvelopeStage {
        self.stage
    }

    /// Hard cut back to silence, skipping the release ramp.
    pub fn reset(&mut self) {
        self.stage = EnvelopeStage::Idle;
        self.level = 0.0;
    }
}
