//! Signal Conditioner
//!
//! Pure, in-memory signal transformations. No I/O happens in this module.

pub mod conditioner;
pub mod resample;

pub use conditioner::{
    mix_with_noise, normalize_to_unit, to_mono, validate_noise_factor, DEFAULT_NOISE_FACTOR,
    PCM16_PEAK,
};
pub use resample::{resample, resampled_len};
