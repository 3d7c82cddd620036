//! Planar audio buffer view over host-owned memory.
//!
//! The host owns the sample memory; the processor only ever sees an
//! [`AudioBuffer`] borrowed for the duration of one call. Nothing is copied
//! and nothing is retained once the call returns.

use core::ops::Range;

/// Mutable, planar view of `C` channels of `N` samples each.
///
/// Channels may in principle have different lengths; the usable block length
/// is the shortest channel ([`num_samples`](Self::num_samples)).
///
/// # Example
///
/// ```rust
/// use waveshaper_core::AudioBuffer;
///
/// let mut left = [0.1f32; 4];
/// let mut right = [0.2f32; 4];
/// let mut channels: [&mut [f32]; 2] = [&mut left, &mut right];
/// let mut buffer = AudioBuffer::new(&mut channels);
///
/// assert_eq!(buffer.num_channels(), 2);
/// assert_eq!(buffer.num_samples(), 4);
/// buffer.channel_mut(1)[0] = 0.0;
/// assert_eq!(right[0], 0.0);
/// ```
pub struct AudioBuffer<'a, 'b> {
    channels: &'a mut [&'b mut [f32]],
    num_samples: usize,
}

impl<'a, 'b> AudioBuffer<'a, 'b> {
    /// Wrap a slice of per-channel sample slices.
    pub fn new(channels: &'a mut [&'b mut [f32]]) -> Self {
        let num_samples = channels.iter().map(|c| c.len()).min().unwrap_or(0);
        Self {
            channels,
            num_samples,
        }
    }

    /// Number of channels.
    #[inline]
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Number of samples per channel (shortest channel wins).
    #[inline]
    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    /// Returns `true` when there is nothing to process.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_samples == 0 || self.channels.is_empty()
    }

    /// Read-only access to one channel.
    ///
    /// # Panics
    /// Panics if `channel >= num_channels()`.
    #[inline]
    pub fn channel(&self, channel: usize) -> &[f32] {
        &self.channels[channel][..self.num_samples]
    }

    /// Mutable access to one channel.
    ///
    /// # Panics
    /// Panics if `channel >= num_channels()`.
    #[inline]
    pub fn channel_mut(&mut self, channel: usize) -> &mut [f32] {
        &mut self.channels[channel][..self.num_samples]
    }

    /// Mutable access to a sample range of one channel.
    ///
    /// # Panics
    /// Panics if `channel` or `range` is out of bounds.
    #[inline]
    pub fn channel_range_mut(&mut self, channel: usize, range: Range<usize>) -> &mut [f32] {
        debug_assert!(range.end <= self.num_samples);
        &mut self.channels[channel][range]
    }

    /// Iterate over all channels mutably.
    pub fn channels_mut(&mut self) -> impl Iterator<Item = &mut [f32]> + use<'_, 'b> {
        let n = self.num_samples;
        self.channels.iter_mut().map(move |c| &mut c[..n])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortest_channel_sets_length() {
        let mut a = [0.0f32; 8];
        let mut b = [0.0f32; 6];
        let mut channels: [&mut [f32]; 2] = [&mut a, &mut b];
        let buffer = AudioBuffer::new(&mut channels);
        assert_eq!(buffer.num_samples(), 6);
        assert_eq!(buffer.channel(0).len(), 6);
    }

    #[test]
    fn empty_buffer() {
        let mut channels: [&mut [f32]; 0] = [];
        let buffer = AudioBuffer::new(&mut channels);
        assert!(buffer.is_empty());
        assert_eq!(buffer.num_samples(), 0);
    }

    #[test]
    fn writes_land_in_host_memory() {
        let mut a = [1.0f32; 4];
        {
            let mut channels: [&mut [f32]; 1] = [&mut a];
            let mut buffer = AudioBuffer::new(&mut channels);
            for s in buffer.channel_range_mut(0, 1..3) {
                *s = 0.0;
            }
        }
        assert_eq!(a, [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn channels_mut_visits_all() {
        let mut a = [1.0f32; 4];
        let mut b = [2.0f32; 4];
        {
            let mut channels: [&mut [f32]; 2] = [&mut a, &mut b];
            let mut buffer = AudioBuffer::new(&mut channels);
            for ch in buffer.channels_mut() {
                ch.fill(0.5);
            }
        }
        assert_eq!(a, [0.5; 4]);
        assert_eq!(b, [0.5; 4]);
    }
}
