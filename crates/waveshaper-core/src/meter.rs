//! Lock-free level metering.
//!
//! The audio thread computes one RMS value per channel per block and stores
//! it as `f32` bits in an atomic. A UI thread holding a [`MeterReader`] reads
//! the latest value whenever it repaints. No locks, no allocation after
//! construction, no queue that can back up.
//!
//! ```text
//! Audio thread                      UI thread
//! ┌──────────────────┐             ┌──────────────────┐
//! │ process(block)   │   atomics   │ output_db(ch)    │
//! │ rms per channel ─┼────────────►│ draw meter       │
//! └──────────────────┘             └──────────────────┘
//! ```
//!
//! Storage is fixed at [`MAX_METER_CHANNELS`] so the shared state never has to
//! be reallocated when the channel count changes; readers obtained before a
//! reconfigure remain valid.

#[cfg(not(feature = "std"))]
use alloc::sync::Arc;
#[cfg(feature = "std")]
use std::sync::Arc;

use core::sync::atomic::{AtomicU32, Ordering};

use crate::linear_to_db;

/// Number of channels the meter can track.
pub const MAX_METER_CHANNELS: usize = 64;

/// Reading reported for silence and for channels that are not metered.
pub const METER_FLOOR_DB: f32 = -100.0;

struct MeterShared {
    input: [AtomicU32; MAX_METER_CHANNELS],
    output: [AtomicU32; MAX_METER_CHANNELS],
}

impl MeterShared {
    fn new() -> Self {
        Self {
            input: core::array::from_fn(|_| AtomicU32::new(0)),
            output: core::array::from_fn(|_| AtomicU32::new(0)),
        }
    }
}

#[inline]
fn load(slot: Option<&AtomicU32>) -> f32 {
    slot.map_or(0.0, |a| f32::from_bits(a.load(Ordering::Acquire)))
}

#[inline]
fn to_db(rms: f32) -> f32 {
    if rms <= 0.0 {
        METER_FLOOR_DB
    } else {
        linear_to_db(rms).max(METER_FLOOR_DB)
    }
}

/// Writer side of the meter, owned by the processor.
pub struct LevelMeter {
    shared: Arc<MeterShared>,
}

impl LevelMeter {
    /// Create a meter with every channel at silence.
    ///
    /// Allocates once; call outside the audio thread.
    pub fn new() -> Self {
        Self {
            shared: Arc::new(MeterShared::new()),
        }
    }

    /// Hand out a reader for another thread.
    pub fn reader(&self) -> MeterReader {
        MeterReader {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Publish the pre-processing RMS (linear) of one channel.
    ///
    /// Channels beyond [`MAX_METER_CHANNELS`] are ignored.
    #[inline]
    pub fn publish_input(&self, channel: usize, rms: f32) {
        if let Some(slot) = self.shared.input.get(channel) {
            slot.store(rms.to_bits(), Ordering::Release);
        }
    }

    /// Publish the post-processing RMS (linear) of one channel.
    #[inline]
    pub fn publish_output(&self, channel: usize, rms: f32) {
        if let Some(slot) = self.shared.output.get(channel) {
            slot.store(rms.to_bits(), Ordering::Release);
        }
    }

    /// Reset every channel to silence.
    pub fn clear(&self) {
        for slot in self.shared.input.iter().chain(self.shared.output.iter()) {
            slot.store(0, Ordering::Release);
        }
    }
}

impl Default for LevelMeter {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only, cloneable handle on a [`LevelMeter`].
#[derive(Clone)]
pub struct MeterReader {
    shared: Arc<MeterShared>,
}

impl MeterReader {
    /// Linear RMS of the last processed input block.
    pub fn input_rms(&self, channel: usize) -> f32 {
        load(self.shared.input.get(channel))
    }

    /// Linear RMS of the last processed output block.
    pub fn output_rms(&self, channel: usize) -> f32 {
        load(self.shared.output.get(channel))
    }

    /// Input level in dB, floored at [`METER_FLOOR_DB`].
    pub fn input_db(&self, channel: usize) -> f32 {
        to_db(self.input_rms(channel))
    }

    /// Output level in dB, floored at [`METER_FLOOR_DB`].
    pub fn output_db(&self, channel: usize) -> f32 {
        to_db(self.output_rms(channel))
    }
}
