//! Audio file I/O for Noisemix
//!
//! Reads uncompressed PCM WAV files of any integer width (and 32-bit float)
//! into memory, and writes mono 16-bit signed PCM.
//!
//! Integer samples keep their raw magnitude on import; the mixer peak-normalizes
//! anyway, so no width-dependent scaling is applied.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use crate::engine::signal::{AudioSignal, MultiChannelAudio};
use crate::error::{MixError, Result};

/// Bit depth of every file this crate writes
pub const OUTPUT_BIT_DEPTH: u16 = 16;

/// Read a WAV file fully into memory
///
/// # Errors
/// * `FileAccess` - If the file does not exist or cannot be read
/// * `UnsupportedFormat` - If the file is not PCM WAV or has an unsupported layout
pub fn read_wav(path: &Path) -> Result<MultiChannelAudio> {
    if !path.exists() {
        return Err(MixError::FileAccess {
            path: path.display().to_string(),
            source: None,
        });
    }

    let reader = WavReader::open(path).map_err(|e| map_hound_error(path, e))?;

    let spec = reader.spec();
    let channels = spec.channels as usize;
    let sample_rate = spec.sample_rate;

    let interleaved = read_samples_as_f64(reader, path)?;

    MultiChannelAudio::from_interleaved(&interleaved, channels, sample_rate)
}

/// Write a mono signal as 16-bit signed PCM
///
/// Samples are expected in the `[-32767, 32767]` range already; quantization
/// truncates toward zero and saturates at the `i16` bounds. An existing file at
/// `path` is overwritten.
///
/// # Errors
/// * `InvalidSignal` - If any sample is NaN or infinite
/// * `FileAccess` - If the file cannot be created or written
pub fn write_wav(path: &Path, signal: &AudioSignal) -> Result<()> {
    if !signal.is_finite() {
        return Err(MixError::InvalidSignal {
            reason: format!("refusing to write non-finite samples to {}", path.display()),
        });
    }

    let spec = WavSpec {
        channels: 1,
        sample_rate: signal.sample_rate,
        bits_per_sample: OUTPUT_BIT_DEPTH,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec).map_err(|e| map_hound_error(path, e))?;

    for &sample in &signal.samples {
        writer
            .write_sample(sample as i16)
            .map_err(|e| map_hound_error(path, e))?;
    }

    writer.finalize().map_err(|e| map_hound_error(path, e))?;

    Ok(())
}

// ============================================================================
// Internal helper functions
// ============================================================================

/// Read all samples from a WAV reader as f64
fn read_samples_as_f64(mut reader: WavReader<BufReader<File>>, path: &Path) -> Result<Vec<f64>> {
    let spec = reader.spec();
    match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Float, 32) => reader
            .samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<std::result::Result<Vec<f64>, _>>()
            .map_err(|e| map_hound_error(path, e)),
        (SampleFormat::Int, 8 | 16 | 24 | 32) => reader
            .samples::<i32>()
            .map(|s| s.map(f64::from))
            .collect::<std::result::Result<Vec<f64>, _>>()
            .map_err(|e| map_hound_error(path, e)),
        (format, bits) => Err(MixError::UnsupportedFormat {
            format: format!("{}-bit {:?} samples in {}", bits, format, path.display()),
        }),
    }
}

/// Sort hound failures into access problems and format problems
fn map_hound_error(path: &Path, err: hound::Error) -> MixError {
    match err {
        hound::Error::IoError(io) => MixError::file_access(path, io),
        hound::Error::FormatError(reason) => MixError::UnsupportedFormat {
            format: format!("{} ({})", reason, path.display()),
        },
        other => MixError::UnsupportedFormat {
            format: format!("{} ({})", other, path.display()),
        },
    }
}

// ============================================================================
// Tests
// ============================================================================
