//! Waveshaper Core - DSP primitives for the waveshaper effect
//!
//! This crate provides the building blocks the waveshaper engine is assembled
//! from, designed for real-time audio processing with zero allocation in the
//! audio path.
//!
//! # Core Abstractions
//!
//! ## Gain Staging
//!
//! - [`GainStage`] - dB-controlled gain with a click-free linear ramp
//! - [`LinearRamp`] - Fixed-length linear ramps
//!
//! ## Buffers & Metering
//!
//! - [`AudioBuffer`] - Planar, borrowed view over host-owned sample memory
//! - [`LevelMeter`] / [`MeterReader`] - Per-channel RMS published through atomics
//!
//! ## Parameter Metadata
//!
//! - [`ParamDescriptor`] - Range, default, step and display unit of a parameter
//!
//! ## Utilities
//!
//! - Math functions: [`db_to_linear`], [`linear_to_db`], [`sanitize`], etc.
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! waveshaper-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use waveshaper_core::{AudioBuffer, GainStage};
//!
//! let mut left = [0.5f32; 64];
//! let mut right = [0.25f32; 64];
//! let mut channels: [&mut [f32]; 2] = [&mut left, &mut right];
//! let mut buffer = AudioBuffer::new(&mut channels);
//!
//! let mut trim = GainStage::new();
//! trim.prepare(48000.0);
//! trim.set_gain_db(0.0);
//! trim.process(&mut buffer, 0..64);
//!
//! assert_eq!(left[0], 0.5);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod buffer;
pub mod gain;
pub mod math;
pub mod meter;
pub mod param;
pub mod param_info;

// Re-export main types at crate root
pub use buffer::AudioBuffer;
pub use gain::{GAIN_MAX_DB, GAIN_MIN_DB, GAIN_RAMP_MS, GainStage};
pub use math::{SAFE_LIMIT, db_to_linear, linear_to_db, rms, sanitize};
pub use meter::{LevelMeter, MAX_METER_CHANNELS, METER_FLOOR_DB, MeterReader};
pub use param::LinearRamp;
pub use param_info::{ParamDescriptor, ParamFlags, ParamId, ParamUnit};
