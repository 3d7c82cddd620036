//! Level conversion and sample hygiene helpers.
//!
//! All functions are allocation-free and suitable for `no_std`.
//!
//! # Level Conversions
//!
//! - [`db_to_linear`] / [`linear_to_db`] - Gain knobs are in dB, the signal path is linear
//!
//! # Numeric Safety
//!
//! - [`sanitize`] - Replace NaN/Inf with the nearest finite bound
//!
//! # Measurement
//!
//! - [`rms`] - Root-mean-square of a slice

use libm::{expf, logf, sqrtf};

/// Largest magnitude [`sanitize`] lets through.
///
/// Infinite samples are replaced with `±SAFE_LIMIT`.
pub const SAFE_LIMIT: f32 = 1.0e6;

/// Amplitude factor for a gain in dB: `10^(db / 20)`.
///
/// 0 dB maps to exactly `1.0`.
///
/// ```rust
/// use waveshaper_core::db_to_linear;
///
/// assert_eq!(db_to_linear(0.0), 1.0);
/// assert!((db_to_linear(20.0) - 10.0).abs() < 1e-3);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    const NEPERS_PER_DB: f32 = core::f32::consts::LN_10 / 20.0;
    expf(db * NEPERS_PER_DB)
}

/// Gain in dB for an amplitude factor: `20 * log10(linear)`.
///
/// Anything at or below `1e-10` (silence, zero, negative) reads as -200 dB
/// rather than `-inf`.
///
/// ```rust
/// use waveshaper_core::linear_to_db;
///
/// assert!(linear_to_db(1.0).abs() < 1e-6);
/// assert!((linear_to_db(0.1) + 20.0).abs() < 1e-3);
/// assert!((linear_to_db(0.0) + 200.0).abs() < 0.01);
/// ```
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    const DB_PER_NEPER: f32 = 20.0 / core::f32::consts::LN_10;
    let floored = if linear > 1e-10 { linear } else { 1e-10 };
    logf(floored) * DB_PER_NEPER
}

/// Replace a non-finite sample with a safe finite value.
///
/// NaN becomes `0.0`, `±inf` becomes `±SAFE_LIMIT`, finite values pass
/// through unchanged. This is the last line of defence before a sample is
/// written back into a host buffer.
///
/// # Example
/// ```rust
/// use waveshaper_core::{sanitize, SAFE_LIMIT};
///
/// assert_eq!(sanitize(0.25), 0.25);
/// assert_eq!(sanitize(f32::NAN), 0.0);
/// assert_eq!(sanitize(f32::NEG_INFINITY), -SAFE_LIMIT);
/// ```
#[inline]
pub fn sanitize(x: f32) -> f32 {
    if x.is_finite() {
        x
    } else if x.is_nan() {
        0.0
    } else if x > 0.0 {
        SAFE_LIMIT
    } else {
        -SAFE_LIMIT
    }
}

/// Root-mean-square level of a block (linear).
///
/// Returns `0.0` for an empty slice.
#[inline]
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let energy = samples.iter().fold(0.0f32, |acc, s| acc + s * s);
    sqrtf(energy / samples.len() as f32)
}
