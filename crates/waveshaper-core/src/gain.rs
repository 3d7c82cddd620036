//! Gain staging: dB-controlled trim with click-free ramping.
//!
//! The waveshaper applies a [`GainStage`] twice per block, once before the
//! curve (input trim, drives the curve harder) and once after it (output
//! trim / makeup). Both stages operate in linear gain internally but are
//! controlled in dB, clamped to [`GAIN_MIN_DB`]..=[`GAIN_MAX_DB`].
//!
//! # Usage
//!
//! ```rust
//! use waveshaper_core::{AudioBuffer, GainStage};
//!
//! let mut samples = [1.0f32; 4800];
//! let mut channels: [&mut [f32]; 1] = [&mut samples];
//! let mut buffer = AudioBuffer::new(&mut channels);
//!
//! let mut stage = GainStage::new();
//! stage.prepare(48000.0);
//! stage.set_gain_db(-6.0);
//! stage.process(&mut buffer, 0..4800);
//!
//! // Ramp finished well inside 100 ms
//! assert!((samples[4799] - 0.501).abs() < 0.01);
//! ```
//!
//! # Ramping
//!
//! A gain change starts a [`GAIN_RAMP_MS`] linear ramp. Every channel of a
//! block sees the same ramp: the stage snapshots the ramp at the start of the
//! block, replays it per channel, and commits the end state once.

use core::ops::Range;

use crate::{AudioBuffer, LinearRamp, db_to_linear, linear_to_db};

/// Minimum gain in dB.
pub const GAIN_MIN_DB: f32 = -20.0;

/// Maximum gain in dB.
pub const GAIN_MAX_DB: f32 = 20.0;

/// Length of the gain ramp in milliseconds.
pub const GAIN_RAMP_MS: f32 = 20.0;

/// Smoothed gain processor operating on planar buffers.
#[derive(Debug, Clone)]
pub struct GainStage {
    gain: LinearRamp,
}

impl GainStage {
    /// Create a unity-gain stage.
    ///
    /// Call [`prepare`](Self::prepare) before processing.
    pub fn new() -> Self {
        Self {
            gain: LinearRamp::with_length(1.0, LinearRamp::length_for(44100.0, GAIN_RAMP_MS)),
        }
    }

    /// Reset ramp state for a new sample rate.
    ///
    /// The stage keeps its current target and jumps straight to it, so the
    /// first block after a reconfigure never replays an old ramp.
    pub fn prepare(&mut self, sample_rate: f32) {
        self.gain
            .set_length(LinearRamp::length_for(sample_rate, GAIN_RAMP_MS));
        #[cfg(feature = "tracing")]
        tracing::debug!(
            sample_rate,
            ramp_samples = self.gain.length(),
            "gain stage prepared"
        );
    }

    /// Set the target gain in dB, clamped to the supported range.
    ///
    /// Cheap to call every block; the ramp only restarts when the value
    /// actually changes.
    #[inline]
    pub fn set_gain_db(&mut self, db: f32) {
        self.gain
            .set_target(db_to_linear(db.clamp(GAIN_MIN_DB, GAIN_MAX_DB)));
    }

    /// Target gain in dB.
    #[inline]
    pub fn gain_db(&self) -> f32 {
        linear_to_db(self.gain.target())
    }

    /// Current (possibly mid-ramp) linear gain.
    #[inline]
    pub fn current_linear(&self) -> f32 {
        self.gain.value()
    }

    /// Jump to the target gain without ramping.
    pub fn snap_to_target(&mut self) {
        self.gain.finish();
    }

    /// Returns `true` while a gain change is still ramping.
    #[inline]
    pub fn is_ramping(&self) -> bool {
        !self.gain.is_settled()
    }

    /// Apply the gain to `range` of every channel of `buffer`.
    pub fn process(&mut self, buffer: &mut AudioBuffer<'_, '_>, range: Range<usize>) {
        let channels = buffer.num_channels();
        if channels == 0 || range.is_empty() {
            return;
        }

        if self.gain.is_settled() {
            let g = self.gain.value();
            if g == 1.0 {
                return;
            }
            for ch in 0..channels {
                for sample in buffer.channel_range_mut(ch, range.clone()) {
                    *sample *= g;
                }
            }
            return;
        }

        let start = self.gain;
        let mut end = start;
        for ch in 0..channels {
            let mut ramp = start;
            for sample in buffer.channel_range_mut(ch, range.clone()) {
                *sample *= ramp.tick();
            }
            end = ramp;
        }
        self.gain = end;
    }

    /// Apply the gain to a single mono slice.
    pub fn process_mono(&mut self, samples: &mut [f32]) {
        if self.gain.is_settled() && self.gain.value() == 1.0 {
            return;
        }
        for sample in samples.iter_mut() {
            *sample *= self.gain.tick();
        }
    }

    /// Apply the gain to interleaved frames, advancing the ramp once per frame.
    ///
    /// Produces the same per-channel gain sequence as [`process`](Self::process)
    /// does on the equivalent planar buffer. A trailing partial frame is left
    /// untouched.
    pub fn process_interleaved(&mut self, samples: &mut [f32], channels: usize) {
        if channels == 0 || (self.gain.is_settled() && self.gain.value() == 1.0) {
            return;
        }
        for frame in samples.chunks_exact_mut(channels) {
            let g = self.gain.tick();
            for sample in frame {
                *sample *= g;
            }
        }
    }
}

impl Default for GainStage {
    fn default() -> Self {
        Self::new()
    }
}
