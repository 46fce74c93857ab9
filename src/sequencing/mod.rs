//! Musical timing: transport snapshots and the arpeggiation clock.

pub mod arp;
pub mod transport;

pub use arp::{ArpRate, Arpeggiator, HeldNotes};
pub use transport::Transport;
