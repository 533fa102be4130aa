//! Noisemix - Noise Augmentation for Audio Datasets
//!
//! Mixes one recorded noise signal into clean recordings to build training data
//! for audio classifiers. Works on single files or on class-labeled directory
//! trees of WAV files.
//!
//! # Architecture
//!
//! - `dsp`: signal conditioner (mono reduction, peak normalization,
//!   FFT resampling, fixed-ratio noise blending). Pure, no I/O.
//! - `engine`: signal types and WAV I/O.
//! - `batch`: configuration and the single-file/folder orchestrator.
//! - `cli`: command-line front end.

pub mod batch;
pub mod cli;
pub mod dsp;
pub mod engine;
pub mod error;

pub use error::{MixError, Result};
