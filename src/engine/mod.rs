//! Audio Engine Module
//!
//! Signal types and WAV file I/O.

pub mod io;
pub mod signal;

pub use io::{read_wav, write_wav, OUTPUT_BIT_DEPTH};
pub use signal::{AudioSignal, MultiChannelAudio};
