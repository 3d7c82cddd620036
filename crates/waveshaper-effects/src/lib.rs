//! Waveshaper Effects - the waveshaping distortion engine
//!
//! This crate assembles the waveshaper from the `waveshaper-core` primitives:
//!
//! - [`Curve`] / [`CurveCoeffs`] - The four transfer functions and their
//!   dispatch table
//! - [`ParamStore`] - Lock-free parameter values shared with a control thread
//! - [`Waveshaper`] - Input trim, curve, output trim, bypass and metering
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use waveshaper_effects::{Curve, ParamKey, ParamStore, Waveshaper};
//!
//! let params = Arc::new(ParamStore::new());
//! params.set_curve(Curve::GloubiBoulga);
//! params.set(ParamKey::GbAmount, 4.0);
//! params.set(ParamKey::OutGain, -6.0);
//!
//! let mut shaper = Waveshaper::new(params);
//! shaper.prepare(44100.0, 256, 2).unwrap();
//!
//! let mut frames = [0.25f32; 512];
//! shaper.process_interleaved(&mut frames, 2, false);
//! assert!(frames.iter().all(|s| s.is_finite()));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod curve;
pub mod engine;
pub mod params;

// Re-export main types at crate root
pub use curve::{
    BOUNDED_AMOUNT, CURVE_TABLE, Curve, CurveCoeffs, GB_DRIVE_LIMIT, TransferFn, WIDE_AMOUNT,
    factor, gloubi_boulga, quadratic, sinusoidal,
};
pub use engine::{
    MAX_BLOCK_SIZE, MAX_CHANNELS, MAX_SAMPLE_RATE, MIN_SAMPLE_RATE, PrepareError, ProcessConfig,
    ProcessStatus, Waveshaper,
};
pub use params::{ParamKey, ParamSnapshot, ParamStore};
