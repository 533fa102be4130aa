//! Signal Conditioner
//!
//! Pure transformations used to blend a noise recording into a clean one:
//! mono reduction, peak normalization and fixed-ratio mixing with a
//! clip-safe rescale into the 16-bit range. Nothing here touches the disk.

use crate::engine::signal::{peak_abs, AudioSignal, MultiChannelAudio};
use crate::error::{MixError, Result};

// ============================================================================
// Constants
// ============================================================================

/// Peak amplitude of the mixed output (16-bit signed, symmetric)
pub const PCM16_PEAK: f64 = 32767.0;

/// Noise blend factor used when none is given
pub const DEFAULT_NOISE_FACTOR: f64 = 0.5;

// ============================================================================
// Mono Reduction
// ============================================================================

/// Collapse any number of channels to one by averaging each frame
///
/// Mono input is returned unchanged. Output length equals the input frame count.
pub fn to_mono(audio: &MultiChannelAudio) -> AudioSignal {
    let samples = match audio.channels.as_slice() {
        [] => Vec::new(),
        [mono] => mono.clone(),
        channels => {
            let count = channels.len() as f64;
            let frames = channels.iter().map(Vec::len).min().unwrap_or(0);
            (0..frames)
                .map(|i| channels.iter().map(|ch| ch[i]).sum::<f64>() / count)
                .collect()
        }
    };

    AudioSignal {
        samples,
        sample_rate: audio.sample_rate,
    }
}

// ============================================================================
// Peak Normalization
// ============================================================================

/// Scale a signal so its largest absolute sample is exactly 1.0
///
/// An empty signal is returned as-is.
///
/// # Errors
/// * `InvalidSignal` - If every sample is zero or any sample is non-finite
pub fn normalize_to_unit(signal: &AudioSignal) -> Result<AudioSignal> {
    Ok(AudioSignal {
        samples: scale_to_peak(&signal.samples, 1.0, "signal")?,
        sample_rate: signal.sample_rate,
    })
}

/// Rescale `samples` so the peak magnitude equals `target`
fn scale_to_peak(samples: &[f64], target: f64, what: &str) -> Result<Vec<f64>> {
    if samples.is_empty() {
        return Ok(Vec::new());
    }

    let peak = peak_abs(samples);
    if !peak.is_finite() || samples.iter().any(|s| s.is_nan()) {
        return Err(MixError::InvalidSignal {
            reason: format!("{} contains non-finite samples", what),
        });
    }
    if peak == 0.0 {
        return Err(MixError::InvalidSignal {
            reason: format!("{} is silent (all {} samples are zero)", what, samples.len()),
        });
    }

    // divide first so the peak sample lands exactly on `target`
    Ok(samples.iter().map(|&s| s / peak * target).collect())
}

// ============================================================================
// Noise Mixing
// ============================================================================

/// Blend `noise` into `original` at a fixed ratio
///
/// Both inputs are cut to the shorter length (never padded or looped), each
/// is peak-normalized, then `original + noise_factor * noise` is rescaled to
/// a peak of [`PCM16_PEAK`] and clipped to `[-PCM16_PEAK, PCM16_PEAK]`.
/// The result keeps the original's sample rate and is still floating point.
///
/// # Errors
/// * `InvalidParameter` - If `noise_factor` is negative or non-finite, or the
///   two signals have different sample rates
/// * `InvalidSignal` - If either truncated input is silent, or the blend
///   cancels out to silence
pub fn mix_with_noise(
    original: &AudioSignal,
    noise: &AudioSignal,
    noise_factor: f64,
) -> Result<AudioSignal> {
    validate_noise_factor(noise_factor)?;

    if original.sample_rate != noise.sample_rate {
        return Err(MixError::InvalidParameter {
            name: "noise",
            reason: format!(
                "sample rate {} Hz does not match original {} Hz; resample first",
                noise.sample_rate, original.sample_rate
            ),
        });
    }

    let overlap = original.len().min(noise.len());
    if overlap == 0 {
        return Ok(AudioSignal {
            samples: Vec::new(),
            sample_rate: original.sample_rate,
        });
    }

    let clean = scale_to_peak(&original.samples[..overlap], 1.0, "original")?;
    let noise = scale_to_peak(&noise.samples[..overlap], 1.0, "noise")?;

    let blended: Vec<f64> = clean
        .iter()
        .zip(&noise)
        .map(|(&c, &n)| c + noise_factor * n)
        .collect();

    let samples = scale_to_peak(&blended, PCM16_PEAK, "mixed signal")?
        .into_iter()
        .map(|s| s.clamp(-PCM16_PEAK, PCM16_PEAK))
        .collect();

    Ok(AudioSignal {
        samples,
        sample_rate: original.sample_rate,
    })
}

/// Check that a blend factor is usable
pub fn validate_noise_factor(noise_factor: f64) -> Result<()> {
    if !noise_factor.is_finite() || noise_factor < 0.0 {
        return Err(MixError::InvalidParameter {
            name: "noise_factor",
            reason: format!("must be a finite number >= 0, got {}", noise_factor),
        });
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use test_case::test_case;

    fn signal(samples: Vec<f64>, rate: u32) -> AudioSignal {
        AudioSignal::new(samples, rate).unwrap()
    }

    /// Deterministic pseudo-noise in [-1, 1)
    fn lcg_noise(len: usize, seed: u64) -> Vec<f64> {
        let mut state = seed;
        (0..len)
            .map(|_| {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                ((state >> 11) as f64 / (1u64 << 53) as f64) * 2.0 - 1.0
            })
            .collect()
    }

    // ------------------------------------------------------------------------
    // to_mono
    // ------------------------------------------------------------------------

    #[test]
    fn test_to_mono_averages_channels() {
        let stereo =
            MultiChannelAudio::from_interleaved(&[1.0, 3.0, -2.0, 2.0, 10.0, 0.0], 2, 8000).unwrap();
        let mono = to_mono(&stereo);

        assert_eq!(mono.samples, vec![2.0, 0.0, 5.0]);
        assert_eq!(mono.sample_rate, 8000);
    }

    #[test]
    fn test_to_mono_identity_for_mono() {
        let audio = MultiChannelAudio::from_interleaved(&[0.5, -0.5, 0.25], 1, 8000).unwrap();
        assert_eq!(to_mono(&audio).samples, vec![0.5, -0.5, 0.25]);
    }

    #[test_case(1; "mono")]
    #[test_case(2; "stereo")]
    #[test_case(6; "surround")]
    fn test_to_mono_preserves_length(channels: usize) {
        let interleaved: Vec<f64> = (0..channels * 37).map(|i| i as f64).collect();
        let audio = MultiChannelAudio::from_interleaved(&interleaved, channels, 8000).unwrap();
        assert_eq!(to_mono(&audio).len(), 37);
    }

    // ------------------------------------------------------------------------
    // normalize_to_unit
    // ------------------------------------------------------------------------

    #[test]
    fn test_normalize_peak_is_one() {
        let normalized = normalize_to_unit(&signal(lcg_noise(500, 7), 8000)).unwrap();
        assert_relative_eq!(normalized.peak(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_normalize_negative_peak() {
        let normalized = normalize_to_unit(&signal(vec![100.0, -400.0, 200.0], 8000)).unwrap();
        assert_eq!(normalized.samples, vec![0.25, -1.0, 0.5]);
    }

    #[test]
    fn test_normalize_silent_is_error() {
        let result = normalize_to_unit(&signal(vec![0.0; 64], 8000));
        assert!(matches!(result, Err(MixError::InvalidSignal { .. })));
    }

    #[test]
    fn test_normalize_non_finite_is_error() {
        let result = normalize_to_unit(&signal(vec![1.0, f64::INFINITY], 8000));
        assert!(matches!(result, Err(MixError::InvalidSignal { .. })));

        let result = normalize_to_unit(&signal(vec![1.0, f64::NAN], 8000));
        assert!(matches!(result, Err(MixError::InvalidSignal { .. })));
    }

    #[test]
    fn test_normalize_empty_passes_through() {
        assert!(normalize_to_unit(&signal(Vec::new(), 8000)).unwrap().is_empty());
    }

    // ------------------------------------------------------------------------
    // mix_with_noise
    // ------------------------------------------------------------------------

    #[test]
    fn test_mix_constant_signals_hit_full_scale() {
        let original = signal(vec![1000.0; 32000], 16000);
        let noise = signal(vec![500.0; 32000], 16000);

        let mixed = mix_with_noise(&original, &noise, 0.5).unwrap();

        assert_eq!(mixed.len(), 32000);
        assert_eq!(mixed.sample_rate, 16000);
        assert!(mixed.samples.iter().all(|&s| s == PCM16_PEAK));
    }

    #[test_case(100, 40; "noise shorter")]
    #[test_case(40, 100; "original shorter")]
    #[test_case(0, 100; "empty original")]
    #[test_case(100, 0; "empty noise")]
    #[test_case(0, 0; "both empty")]
    fn test_mix_length_is_overlap(original_len: usize, noise_len: usize) {
        let original = signal(lcg_noise(original_len, 1), 8000);
        let noise = signal(lcg_noise(noise_len, 2), 8000);

        let mixed = mix_with_noise(&original, &noise, 0.5).unwrap();
        assert_eq!(mixed.len(), original_len.min(noise_len));
    }

    #[test_case(0.0)]
    #[test_case(0.5)]
    #[test_case(1.0)]
    #[test_case(25.0)]
    fn test_mix_stays_in_pcm16_range(factor: f64) {
        let original = signal(lcg_noise(2048, 11), 8000);
        let noise = signal(lcg_noise(2048, 12), 8000);

        let mixed = mix_with_noise(&original, &noise, factor).unwrap();

        assert!(mixed
            .samples
            .iter()
            .all(|&s| (-PCM16_PEAK..=PCM16_PEAK).contains(&s)));
        assert_relative_eq!(mixed.peak(), PCM16_PEAK, epsilon = 1e-6);
    }

    #[test]
    fn test_mix_zero_factor_is_rescaled_original() {
        let original = signal(vec![0.0, 2.0, -4.0], 8000);
        let noise = signal(vec![9.0, 9.0, 9.0], 8000);

        let mixed = mix_with_noise(&original, &noise, 0.0).unwrap();
        assert_eq!(mixed.samples, vec![0.0, PCM16_PEAK / 2.0, -PCM16_PEAK]);
    }

    #[test]
    fn test_mix_does_not_mutate_inputs() {
        let original = signal(vec![3.0, -1.0, 2.0], 8000);
        let noise = signal(vec![1.0, 1.0], 8000);
        let (before_o, before_n) = (original.clone(), noise.clone());

        mix_with_noise(&original, &noise, 0.5).unwrap();

        assert_eq!(original, before_o);
        assert_eq!(noise, before_n);
    }

    #[test]
    fn test_mix_silent_noise_is_error() {
        let original = signal(lcg_noise(64, 3), 8000);
        let noise = signal(vec![0.0; 64], 8000);

        let result = mix_with_noise(&original, &noise, 0.5);
        match result {
            Err(MixError::InvalidSignal { reason }) => assert!(reason.starts_with("noise")),
            other => panic!("Expected InvalidSignal, got {:?}", other),
        }
    }

    #[test]
    fn test_mix_cancelling_blend_is_error() {
        let original = signal(vec![1.0, -1.0, 1.0], 8000);
        let noise = signal(vec![-1.0, 1.0, -1.0], 8000);

        let result = mix_with_noise(&original, &noise, 1.0);
        assert!(matches!(result, Err(MixError::InvalidSignal { .. })));
    }

    #[test]
    fn test_mix_rejects_rate_mismatch() {
        let original = signal(vec![1.0; 8], 44100);
        let noise = signal(vec![1.0; 8], 16000);

        let result = mix_with_noise(&original, &noise, 0.5);
        assert!(matches!(result, Err(MixError::InvalidParameter { .. })));
    }

    #[test_case(-0.1)]
    #[test_case(f64::NAN)]
    #[test_case(f64::INFINITY)]
    fn test_mix_rejects_bad_factor(factor: f64) {
        let original = signal(vec![1.0; 8], 8000);
        let noise = signal(vec![1.0; 8], 8000);

        let result = mix_with_noise(&original, &noise, factor);
        assert!(matches!(
            result,
            Err(MixError::InvalidParameter { name: "noise_factor", .. })
        ));
    }
}
