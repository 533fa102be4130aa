//! Batch Orchestrator
//!
//! Run configuration and the file/folder drivers that feed the signal
//! conditioner.

pub mod config;
pub mod orchestrator;

pub use config::{FolderConfig, MixConfig, RunConfig, SingleConfig};
pub use orchestrator::{
    load_mono, process_folder, process_single, BatchReport, FailedFile, NoiseBank,
    AUDIO_EXTENSION,
};
