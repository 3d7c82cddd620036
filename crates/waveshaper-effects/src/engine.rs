//! The waveshaper processor: input trim, curve, output trim.
//!
//! ```text
//!             ┌─────────┐   ┌──────────────┐   ┌──────────┐
//! buffer ───► │ in gain │──►│ curve (1..4) │──►│ out gain │───► buffer
//!             └─────────┘   └──────────────┘   └──────────┘
//!                  ▲               ▲                 ▲
//!                  └──── ParamStore, read once per block ───┘
//! ```
//!
//! The engine owns no sample memory. [`Waveshaper::process`] works in place
//! on a borrowed [`AudioBuffer`]; nothing is retained after it returns.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use waveshaper_core::AudioBuffer;
//! use waveshaper_effects::{Curve, ParamStore, ProcessStatus, Waveshaper};
//!
//! let params = Arc::new(ParamStore::new());
//! params.set_curve(Curve::Factor);
//!
//! let mut shaper = Waveshaper::new(Arc::clone(&params));
//! shaper.prepare(48000.0, 512, 2).unwrap();
//!
//! let mut left = [0.5f32; 512];
//! let mut right = [-0.5f32; 512];
//! let mut channels: [&mut [f32]; 2] = [&mut left, &mut right];
//! let status = shaper.process(&mut AudioBuffer::new(&mut channels), false);
//!
//! assert_eq!(status, ProcessStatus::Processed);
//! assert!((left[0] - 0.75).abs() < 1e-6);
//! assert!((right[0] + 0.75).abs() < 1e-6);
//! ```

#[cfg(not(feature = "std"))]
use alloc::sync::Arc;
#[cfg(feature = "std")]
use std::sync::Arc;

use waveshaper_core::{AudioBuffer, GainStage, LevelMeter, MAX_METER_CHANNELS, MeterReader, rms};

use crate::curve::{Curve, CurveCoeffs};
use crate::params::ParamStore;

/// Lowest accepted sample rate in Hz.
pub const MIN_SAMPLE_RATE: f32 = 8000.0;

/// Highest accepted sample rate in Hz.
pub const MAX_SAMPLE_RATE: f32 = 768_000.0;

/// Largest accepted `max_block_size`.
pub const MAX_BLOCK_SIZE: usize = 65_536;

/// Largest accepted channel count. Every accepted channel is metered.
pub const MAX_CHANNELS: usize = MAX_METER_CHANNELS;

/// Invalid processing configuration passed to [`Waveshaper::prepare`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrepareError {
    /// Sample rate not finite or outside
    /// [`MIN_SAMPLE_RATE`]..=[`MAX_SAMPLE_RATE`].
    InvalidSampleRate(f32),
    /// Block size of zero or above [`MAX_BLOCK_SIZE`].
    InvalidBlockSize(usize),
    /// Channel count of zero or above [`MAX_CHANNELS`].
    InvalidChannelCount(usize),
}

impl core::fmt::Display for PrepareError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PrepareError::InvalidSampleRate(sr) => write!(
                f,
                "invalid sample rate {sr} Hz (expected {MIN_SAMPLE_RATE}..={MAX_SAMPLE_RATE})"
            ),
            PrepareError::InvalidBlockSize(n) => {
                write!(f, "invalid block size {n} (expected 1..={MAX_BLOCK_SIZE})")
            }
            PrepareError::InvalidChannelCount(n) => {
                write!(f, "invalid channel count {n} (expected 1..={MAX_CHANNELS})")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PrepareError {}

/// What [`Waveshaper::process`] did with the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessStatus {
    /// The buffer was shaped in place.
    Processed,
    /// Bypass was active; the buffer is untouched.
    Bypassed,
    /// [`Waveshaper::prepare`] has not succeeded yet; the buffer is untouched.
    Unprepared,
    /// The buffer has more channels than were prepared; the buffer is
    /// untouched.
    ChannelMismatch,
}

/// Configuration accepted by the last successful [`Waveshaper::prepare`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessConfig {
    /// Sample rate in Hz.
    pub sample_rate: f32,
    /// Longest run of samples processed in one pass.
    pub max_block_size: usize,
    /// Channel count the host announced.
    pub num_channels: usize,
}

/// Waveshaping distortion with input/output gain staging and bypass.
pub struct Waveshaper {
    params: Arc<ParamStore>,
    input_gain: GainStage,
    output_gain: GainStage,
    meter: LevelMeter,
    config: Option<ProcessConfig>,
    snap_gains: bool,
    active_curve: Curve,
}

impl Waveshaper {
    /// Create an unprepared engine reading from `params`.
    ///
    /// Allocates the meter; call outside the audio thread.
    pub fn new(params: Arc<ParamStore>) -> Self {
        Self {
            params,
            input_gain: GainStage::new(),
            output_gain: GainStage::new(),
            meter: LevelMeter::new(),
            config: None,
            snap_gains: true,
            active_curve: Curve::default(),
        }
    }

    /// Shared parameter store.
    pub fn params(&self) -> &Arc<ParamStore> {
        &self.params
    }

    /// Validate and adopt a processing configuration.
    ///
    /// On error the previous configuration stays in effect (or the engine
    /// stays unprepared).
    pub fn prepare(
        &mut self,
        sample_rate: f32,
        max_block_size: usize,
        num_channels: usize,
    ) -> Result<(), PrepareError> {
        if !sample_rate.is_finite() || !(MIN_SAMPLE_RATE..=MAX_SAMPLE_RATE).contains(&sample_rate)
        {
            return Err(PrepareError::InvalidSampleRate(sample_rate));
        }
        if max_block_size == 0 || max_block_size > MAX_BLOCK_SIZE {
            return Err(PrepareError::InvalidBlockSize(max_block_size));
        }
        if num_channels == 0 || num_channels > MAX_CHANNELS {
            return Err(PrepareError::InvalidChannelCount(num_channels));
        }

        self.input_gain.prepare(sample_rate);
        self.output_gain.prepare(sample_rate);
        self.meter.clear();
        self.snap_gains = true;
        self.config = Some(ProcessConfig {
            sample_rate,
            max_block_size,
            num_channels,
        });

        #[cfg(feature = "tracing")]
        tracing::debug!(
            sample_rate,
            max_block_size,
            num_channels,
            curve = self.params.curve().name(),
            "waveshaper prepared"
        );
        Ok(())
    }

    /// Configuration from the last successful [`prepare`](Self::prepare).
    pub fn config(&self) -> Option<ProcessConfig> {
        self.config
    }

    /// Returns `true` once [`prepare`](Self::prepare) has succeeded.
    pub fn is_prepared(&self) -> bool {
        self.config.is_some()
    }

    /// Curve used for the most recent processed block.
    pub fn active_curve(&self) -> Curve {
        self.active_curve
    }

    /// Process a planar buffer in place.
    ///
    /// `bypass` is OR-ed with the store's bypass switch. The curve selection
    /// and amounts are read once here and hold for the whole call; buffers
    /// longer than the prepared `max_block_size` are walked in sub-blocks.
    pub fn process(&mut self, buffer: &mut AudioBuffer<'_, '_>, bypass: bool) -> ProcessStatus {
        let Some(config) = self.config else {
            return ProcessStatus::Unprepared;
        };
        let channels = buffer.num_channels();
        if channels > config.num_channels {
            return ProcessStatus::ChannelMismatch;
        }

        if bypass || self.params.bypassed() {
            self.snap_gains = true;
            for ch in 0..channels {
                let level = rms(buffer.channel(ch));
                self.meter.publish_input(ch, level);
                self.meter.publish_output(ch, level);
            }
            return ProcessStatus::Bypassed;
        }

        let coeffs = self.begin_block();
        for ch in 0..channels {
            self.meter.publish_input(ch, rms(buffer.channel(ch)));
        }

        let len = buffer.num_samples();
        let mut start = 0;
        while start < len {
            let end = (start + config.max_block_size).min(len);
            self.input_gain.process(buffer, start..end);
            for ch in 0..channels {
                coeffs.process(buffer.channel_range_mut(ch, start..end));
            }
            self.output_gain.process(buffer, start..end);
            start = end;
        }

        for ch in 0..channels {
            self.meter.publish_output(ch, rms(buffer.channel(ch)));
        }
        ProcessStatus::Processed
    }

    /// Process interleaved frames in place.
    ///
    /// Produces the same output as [`process`](Self::process) on the
    /// equivalent planar buffer, walking runs of at most `max_block_size`
    /// frames. A trailing partial frame is left untouched.
    pub fn process_interleaved(
        &mut self,
        samples: &mut [f32],
        channels: usize,
        bypass: bool,
    ) -> ProcessStatus {
        let Some(config) = self.config else {
            return ProcessStatus::Unprepared;
        };
        if channels > config.num_channels {
            return ProcessStatus::ChannelMismatch;
        }
        if channels == 0 {
            return ProcessStatus::Processed;
        }
        let frames_len = samples.len() - samples.len() % channels;
        let samples = &mut samples[..frames_len];

        if bypass || self.params.bypassed() {
            self.snap_gains = true;
            for ch in 0..channels {
                let level = strided_rms(samples, ch, channels);
                self.meter.publish_input(ch, level);
                self.meter.publish_output(ch, level);
            }
            return ProcessStatus::Bypassed;
        }

        let coeffs = self.begin_block();
        for ch in 0..channels {
            self.meter.publish_input(ch, strided_rms(samples, ch, channels));
        }

        for run in samples.chunks_mut(config.max_block_size * channels) {
            self.input_gain.process_interleaved(run, channels);
            coeffs.process(run);
            self.output_gain.process_interleaved(run, channels);
        }

        for ch in 0..channels {
            self.meter.publish_output(ch, strided_rms(samples, ch, channels));
        }
        ProcessStatus::Processed
    }

    /// Read the block-level parameters and update the gain targets.
    fn begin_block(&mut self) -> CurveCoeffs {
        let params = &self.params;
        let curve = params.curve();
        let coeffs = curve.prepare(params.amount(curve));

        self.input_gain.set_gain_db(params.in_gain_db());
        self.output_gain.set_gain_db(params.out_gain_db());
        if self.snap_gains {
            self.input_gain.snap_to_target();
            self.output_gain.snap_to_target();
            self.snap_gains = false;
        }
        self.active_curve = curve;
        coeffs
    }

    /// Handle for reading levels from another thread.
    pub fn meter(&self) -> MeterReader {
        self.meter.reader()
    }

    /// Input level of the last block in dB (pre-gain).
    pub fn input_level_db(&self, channel: usize) -> f32 {
        self.meter.reader().input_db(channel)
    }

    /// Output level of the last block in dB (post-gain).
    pub fn output_level_db(&self, channel: usize) -> f32 {
        self.meter.reader().output_db(channel)
    }
}

fn strided_rms(samples: &[f32], offset: usize, stride: usize) -> f32 {
    let mut sum = 0.0f32;
    let mut count = 0usize;
    for &s in samples.iter().skip(offset).step_by(stride) {
        sum += s * s;
        count += 1;
    }
    if count == 0 {
        0.0
    } else {
        libm::sqrtf(sum / count as f32)
    }
}
