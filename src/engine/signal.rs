//! Signal Types
//!
//! In-memory audio as the mixing pipeline sees it. `MultiChannelAudio` is what
//! comes out of a file; `AudioSignal` is the mono form every DSP stage works on.

use crate::error::{MixError, Result};

// ============================================================================
// Mono Signal
// ============================================================================

/// A mono sequence of real-valued samples at a fixed sample rate
///
/// Pipeline stages never mutate a signal in place; each one returns a new
/// `AudioSignal`.
///
/// # Example
/// ```
/// use noisemix::engine::AudioSignal;
///
/// let signal = AudioSignal::new(vec![0.0; 16000], 16000).unwrap();
/// assert_eq!(signal.len(), 16000);
/// assert!((signal.duration_secs() - 1.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AudioSignal {
    /// Sample values, unscaled (integer PCM keeps its integer magnitude)
    pub samples: Vec<f64>,
    /// Sample rate in Hz, always > 0
    pub sample_rate: u32,
}

impl AudioSignal {
    /// Create a signal, rejecting a zero sample rate
    pub fn new(samples: Vec<f64>, sample_rate: u32) -> Result<Self> {
        if sample_rate == 0 {
            return Err(MixError::InvalidParameter {
                name: "sample_rate",
                reason: "must be greater than 0".to_string(),
            });
        }
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Number of samples
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Get the duration in seconds
    #[inline]
    pub fn duration_secs(&self) -> f64 {
        self.len() as f64 / self.sample_rate as f64
    }

    /// Largest absolute sample value, 0.0 for an empty signal
    pub fn peak(&self) -> f64 {
        peak_abs(&self.samples)
    }

    /// Check if all samples are finite (not NaN or Infinity)
    pub fn is_finite(&self) -> bool {
        self.samples.iter().all(|s| s.is_finite())
    }
}

/// Largest absolute value in a slice, 0.0 when empty
pub fn peak_abs(samples: &[f64]) -> f64 {
    samples.iter().map(|s| s.abs()).fold(0.0_f64, f64::max)
}

// ============================================================================
// Multi-Channel Audio
// ============================================================================

/// Audio as decoded from a file, before mono reduction
///
/// Stored non-interleaved: outer Vec is channels, inner Vec is samples.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiChannelAudio {
    pub channels: Vec<Vec<f64>>,
    pub sample_rate: u32,
}

impl MultiChannelAudio {
    /// Create from interleaved data (L, R, L, R, ... for stereo)
    ///
    /// A trailing partial frame is dropped.
    pub fn from_interleaved(
        interleaved: &[f64],
        num_channels: usize,
        sample_rate: u32,
    ) -> Result<Self> {
        if num_channels == 0 {
            return Err(MixError::UnsupportedFormat {
                format: "audio with 0 channels".to_string(),
            });
        }
        if sample_rate == 0 {
            return Err(MixError::UnsupportedFormat {
                format: "audio with a 0 Hz sample rate".to_string(),
            });
        }

        let frames = interleaved.len() / num_channels;
        let mut channels = vec![Vec::with_capacity(frames); num_channels];

        for frame in interleaved.chunks_exact(num_channels) {
            for (ch, &sample) in frame.iter().enumerate() {
                channels[ch].push(sample);
            }
        }

        Ok(Self {
            channels,
            sample_rate,
        })
    }

    /// Number of channels
    #[inline]
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Number of frames (samples per channel)
    #[inline]
    pub fn len(&self) -> usize {
        self.channels.first().map(|ch| ch.len()).unwrap_or(0)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
