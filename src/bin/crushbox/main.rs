//! crushbox - bitcrushed arpeggio demo
//!
//! Run with: cargo run

mod app;

use app::Crushbox;
use crushbox::sequencing::ArpRate;
use crushbox::synth::{PulseWidth, TimbreMode};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    // A minor chord, arpeggiated in sixteenths and slowly crushed down
    // from clean to 4 bits and back.
    Crushbox::new()
        .bpm(100.0)
        .timbre(TimbreMode::TonalPulse)
        .pulse_widths(PulseWidth::Eighth, PulseWidth::Half)
        .adsr(0.003, 0.08, 0.5, 0.15)
        .arp(ArpRate::Sixteenth)
        .chord(&[57, 60, 64, 69])
        .run()
}
