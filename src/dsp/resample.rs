//! Frequency-domain resampling
//!
//! The whole signal is transformed with one FFT, the spectrum is truncated or
//! zero-padded to the target length, and one inverse FFT produces the output.
//! This treats the input as periodic, so content near the edges can ring
//! slightly, but the target sample count is hit exactly for any rate pair.

use rustfft::{num_complex::Complex, FftPlanner};

use crate::engine::signal::AudioSignal;
use crate::error::{MixError, Result};

/// Number of samples `len` becomes when moved from `from_rate` to `to_rate`
///
/// Rounds to the nearest sample.
pub fn resampled_len(len: usize, from_rate: u32, to_rate: u32) -> usize {
    (len as f64 * to_rate as f64 / from_rate as f64).round() as usize
}

/// Resample a signal to `target_rate`
///
/// Works for both up- and down-sampling. When the rates already match the
/// samples are copied unchanged.
///
/// # Errors
/// * `InvalidParameter` - If `target_rate` is 0
/// * `InvalidSignal` - If the signal has no samples
pub fn resample(signal: &AudioSignal, target_rate: u32) -> Result<AudioSignal> {
    if target_rate == 0 {
        return Err(MixError::InvalidParameter {
            name: "target_rate",
            reason: "must be greater than 0".to_string(),
        });
    }
    if signal.is_empty() {
        return Err(MixError::InvalidSignal {
            reason: "cannot resample an empty signal".to_string(),
        });
    }

    let samples = if target_rate == signal.sample_rate {
        signal.samples.clone()
    } else {
        let target_len = resampled_len(signal.len(), signal.sample_rate, target_rate);
        resample_fft(&signal.samples, target_len)
    };

    Ok(AudioSignal {
        samples,
        sample_rate: target_rate,
    })
}

/// Resize the spectrum of `samples` to `target_len` bins and transform back
fn resample_fft(samples: &[f64], target_len: usize) -> Vec<f64> {
    let source_len = samples.len();
    if target_len == 0 || source_len == 0 {
        return Vec::new();
    }
    if target_len == source_len {
        return samples.to_vec();
    }

    let mut planner = FftPlanner::<f64>::new();

    let mut spectrum: Vec<Complex<f64>> = samples.iter().map(|&s| Complex::new(s, 0.0)).collect();
    planner.plan_fft_forward(source_len).process(&mut spectrum);

    let mut resized = vec![Complex::new(0.0, 0.0); target_len];
    let shared = source_len.min(target_len);

    // DC and positive frequencies, including the Nyquist bin when `shared` is even
    let positive = shared / 2 + 1;
    resized[..positive].copy_from_slice(&spectrum[..positive]);

    // Negative frequencies
    let negative = shared - positive;
    if negative > 0 {
        resized[target_len - negative..].copy_from_slice(&spectrum[source_len - negative..]);
    }

    // An even `shared` length has a Nyquist bin that is its own mirror
    if shared % 2 == 0 {
        let nyquist = shared / 2;
        if target_len < source_len {
            resized[nyquist] += spectrum[source_len - nyquist];
        } else {
            resized[nyquist] *= 0.5;
            resized[target_len - nyquist] = resized[nyquist];
        }
    }

    planner.plan_fft_inverse(target_len).process(&mut resized);

    // rustfft leaves both directions unnormalized
    let scale = 1.0 / source_len as f64;
    resized.iter().map(|c| c.re * scale).collect()
}
