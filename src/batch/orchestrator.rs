//! Batch Orchestrator
//!
//! Loads a noise recording once and mixes it into one file or into every WAV
//! of a class-labeled tree (`input/<class>/<file>.wav`), mirroring the tree
//! under the output root with the same file names.
//!
//! Files are processed one at a time in file-name order. Outputs written before
//! a failure are left in place.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::Serialize;
use walkdir::{DirEntry, WalkDir};

use crate::batch::config::{FolderConfig, MixConfig};
use crate::dsp::{mix_with_noise, resample, to_mono};
use crate::engine::{read_wav, write_wav, AudioSignal};
use crate::error::{MixError, Result};

/// File extension treated as audio inside class directories
pub const AUDIO_EXTENSION: &str = "wav";

// ============================================================================
// Noise Bank
// ============================================================================

/// The shared noise signal plus the copies derived from it per sample rate
///
/// The loaded noise is never modified; each target rate gets its own
/// resampled copy, computed the first time a file at that rate needs it.
#[derive(Debug)]
pub struct NoiseBank {
    source: AudioSignal,
    by_rate: HashMap<u32, AudioSignal>,
}

impl NoiseBank {
    pub fn new(source: AudioSignal) -> Self {
        Self {
            source,
            by_rate: HashMap::new(),
        }
    }

    /// The noise as loaded from disk
    pub fn source(&self) -> &AudioSignal {
        &self.source
    }

    /// Noise at `rate`, resampling on first use
    ///
    /// `file_name` only labels the log line.
    pub fn at_rate(&mut self, rate: u32, file_name: &str) -> Result<&AudioSignal> {
        if rate == self.source.sample_rate {
            return Ok(&self.source);
        }

        if !self.by_rate.contains_key(&rate) {
            info!(
                "Resampling noise from {} Hz to {} Hz for file {}",
                self.source.sample_rate, rate, file_name
            );
            let resampled = resample(&self.source, rate)?;
            self.by_rate.insert(rate, resampled);
        } else {
            debug!("Reusing noise resampled to {} Hz for file {}", rate, file_name);
        }

        Ok(&self.by_rate[&rate])
    }
}

// ============================================================================
// Batch Report
// ============================================================================

/// A file that failed while `continue_on_error` was set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedFile {
    pub path: PathBuf,
    pub error_code: String,
    pub message: String,
}

/// Outcome of a folder run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchReport {
    /// Class directories mirrored into the output root
    pub classes: Vec<String>,
    /// Output files written
    pub written: Vec<PathBuf>,
    /// Input entries ignored (stray top-level files, non-audio files)
    pub skipped: Vec<PathBuf>,
    pub failures: Vec<FailedFile>,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

// ============================================================================
// Single File
// ============================================================================

/// Load a WAV file and reduce it to mono
pub fn load_mono(path: &Path) -> Result<AudioSignal> {
    Ok(to_mono(&read_wav(path)?))
}

/// Mix `noise_path` into `original_path` and write the result to `output_path`
///
/// The noise is resampled to the original's rate when they differ. The output
/// is mono 16-bit PCM at the original's rate, overwriting any existing file.
///
/// # Returns
/// Number of samples written: the shorter of the original and the
/// (resampled) noise.
pub fn process_single(
    original_path: &Path,
    noise_path: &Path,
    output_path: &Path,
    mix: &MixConfig,
) -> Result<usize> {
    mix.validate()?;
    let mut noise = NoiseBank::new(load_mono(noise_path)?);
    mix_file(original_path, &mut noise, output_path, mix)
}

/// Shared per-file step of both modes
fn mix_file(
    original_path: &Path,
    noise: &mut NoiseBank,
    output_path: &Path,
    mix: &MixConfig,
) -> Result<usize> {
    let original = load_mono(original_path)?;

    let file_name = original_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| original_path.display().to_string());
    let noise = noise.at_rate(original.sample_rate, &file_name)?;

    let mixed = mix_with_noise(&original, noise, mix.noise_factor)?;
    write_wav(output_path, &mixed)?;

    info!("Noisy file saved at: {}", output_path.display());
    Ok(mixed.len())
}

// ============================================================================
// Folder
// ============================================================================

/// Mix the shared noise into every WAV file of a class-labeled tree
///
/// Each immediate subdirectory of the input root is a class; it is recreated
/// under the output root even when it holds no audio. Top-level files and
/// non-WAV files are skipped.
///
/// # Errors
/// Without `continue_on_error`, the first per-file failure aborts the run as
/// `FileProcessing`. With it, recoverable per-file failures are logged and
/// collected in the report. Failures loading the noise or listing the input
/// root always abort.
pub fn process_folder(config: &FolderConfig) -> Result<BatchReport> {
    config.mix.validate()?;

    let noise = load_mono(&config.noise_path)?;
    let mut noise = NoiseBank::new(noise);

    create_dir(&config.output_folder)?;
    let output_root = fs::canonicalize(&config.output_folder).ok();

    let mut report = BatchReport::default();

    for entry in list_dir(&config.input_folder)? {
        let class_path = entry.path();

        if !class_path.is_dir() {
            debug!("Skipping non-directory entry {}", class_path.display());
            report.skipped.push(class_path.to_path_buf());
            continue;
        }
        if output_root.is_some() && fs::canonicalize(class_path).ok() == output_root {
            debug!("Skipping output folder {} inside input root", class_path.display());
            continue;
        }

        let class_name = entry.file_name().to_string_lossy().into_owned();
        let output_class = config.output_folder.join(entry.file_name());
        create_dir(&output_class)?;
        report.classes.push(class_name);

        for file in list_dir(class_path)? {
            let file_path = file.path();

            if !is_audio_file(file_path) {
                debug!("Skipping non-audio file {}", file_path.display());
                report.skipped.push(file_path.to_path_buf());
                continue;
            }

            let output_path = output_class.join(file.file_name());
            match mix_file(file_path, &mut noise, &output_path, &config.mix) {
                Ok(_) => report.written.push(output_path),
                Err(source) => {
                    let err = MixError::FileProcessing {
                        path: file_path.display().to_string(),
                        source: Box::new(source),
                    };
                    if !(config.continue_on_error && err.is_recoverable()) {
                        return Err(err);
                    }
                    warn!("{}: {}", err, failure_reason(&err));
                    report.failures.push(FailedFile {
                        path: file_path.to_path_buf(),
                        error_code: failure_code(&err).to_string(),
                        message: failure_reason(&err),
                    });
                }
            }
        }
    }

    info!(
        "Processed {} classes: {} written, {} skipped, {} failed",
        report.classes.len(),
        report.written.len(),
        report.skipped.len(),
        report.failures.len()
    );

    Ok(report)
}

// ============================================================================
// Internal helper functions
// ============================================================================

/// Immediate children of `dir`, sorted by file name
fn list_dir(dir: &Path) -> Result<Vec<DirEntry>> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| MixError::file_access(dir, e))
}

/// Create a directory and its parents; an existing directory is fine
fn create_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| MixError::file_access(dir, e))
}

fn is_audio_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case(AUDIO_EXTENSION))
            .unwrap_or(false)
}

fn failure_code(err: &MixError) -> &'static str {
    match err {
        MixError::FileProcessing { source, .. } => source.error_code(),
        other => other.error_code(),
    }
}

fn failure_reason(err: &MixError) -> String {
    match err {
        MixError::FileProcessing { source, .. } => source.to_string(),
        other => other.to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================
