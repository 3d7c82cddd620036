//! Fixed-length linear ramps.
//!
//! A gain change applied in one step is audible as a click. [`LinearRamp`]
//! moves from its current value to a new target over a fixed number of
//! samples, so every change takes the same time no matter how large it is.
//!
//! ```rust
//! use waveshaper_core::LinearRamp;
//!
//! let mut ramp = LinearRamp::with_length(1.0, LinearRamp::length_for(48000.0, 10.0));
//! ramp.set_target(0.5);
//!
//! for _ in 0..480 {
//!     ramp.tick();
//! }
//! assert!(ramp.is_settled());
//! assert_eq!(ramp.value(), 0.5);
//! ```

use libm::fabsf;

/// Value that walks linearly toward its target over `length` samples.
///
/// `Copy` on purpose: a block processor replays the same ramp for each
/// channel from a saved start state and keeps the end state once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRamp {
    value: f32,
    target: f32,
    step: f32,
    remaining: u32,
    length: u32,
}

impl LinearRamp {
    /// Ramp resting at `initial` whose changes apply instantly.
    pub fn new(initial: f32) -> Self {
        Self::with_length(initial, 0)
    }

    /// Ramp resting at `initial` whose changes take `length` samples.
    pub fn with_length(initial: f32, length: u32) -> Self {
        Self {
            value: initial,
            target: initial,
            step: 0.0,
            remaining: 0,
            length,
        }
    }

    /// Samples covered by `ms` milliseconds at `sample_rate`.
    pub fn length_for(sample_rate: f32, ms: f32) -> u32 {
        (ms.max(0.0) * sample_rate / 1000.0) as u32
    }

    /// Change the ramp length. A ramp in flight lands on its target.
    pub fn set_length(&mut self, length: u32) {
        self.length = length;
        self.finish();
    }

    /// Ramp length in samples.
    #[inline]
    pub fn length(&self) -> u32 {
        self.length
    }

    /// Start moving toward `target`.
    ///
    /// Pushing the target already being approached leaves the ramp alone,
    /// so callers can write the same value every block.
    pub fn set_target(&mut self, target: f32) {
        if fabsf(target - self.target) < 1e-9 {
            return;
        }
        self.target = target;
        if self.length == 0 {
            self.finish();
        } else {
            self.step = (target - self.value) / self.length as f32;
            self.remaining = self.length;
        }
    }

    /// Move to `value` with no ramp.
    pub fn jump(&mut self, value: f32) {
        self.target = value;
        self.finish();
    }

    /// Land on the target now.
    pub fn finish(&mut self) {
        self.value = self.target;
        self.step = 0.0;
        self.remaining = 0;
    }

    /// Advance one sample and return the new value.
    #[inline]
    pub fn tick(&mut self) -> f32 {
        match self.remaining {
            0 => {}
            1 => self.finish(),
            _ => {
                self.value += self.step;
                self.remaining -= 1;
            }
        }
        self.value
    }

    /// Current value.
    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Value being approached.
    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// `true` once the value sits on the target.
    #[inline]
    pub fn is_settled(&self) -> bool {
        self.remaining == 0
    }
}

impl Default for LinearRamp {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reaches_target_after_length() {
        let mut ramp = LinearRamp::with_length(0.0, 480);
        ramp.set_target(1.0);
        for _ in 0..479 {
            ramp.tick();
        }
        assert!(!ramp.is_settled());
        assert_eq!(ramp.tick(), 1.0);
        assert!(ramp.is_settled());
    }

    #[test]
    fn moves_at_constant_rate() {
        let mut ramp = LinearRamp::with_length(0.0, 480);
        ramp.set_target(1.0);
        for _ in 0..240 {
            ramp.tick();
        }
        assert!((ramp.value() - 0.5).abs() < 0.01, "got {}", ramp.value());
    }

    #[test]
    fn length_from_time() {
        assert_eq!(LinearRamp::length_for(48000.0, 20.0), 960);
        assert_eq!(LinearRamp::length_for(44100.0, 10.0), 441);
        assert_eq!(LinearRamp::length_for(48000.0, -5.0), 0);
    }

    #[test]
    fn zero_length_is_instant() {
        let mut ramp = LinearRamp::new(0.0);
        ramp.set_target(0.7);
        assert_eq!(ramp.value(), 0.7);
        assert!(ramp.is_settled());
    }

    #[test]
    fn same_target_keeps_ramp_going() {
        let mut ramp = LinearRamp::with_length(0.0, 480);
        ramp.set_target(1.0);
        for _ in 0..100 {
            ramp.tick();
        }
        let mid = ramp.value();
        ramp.set_target(1.0);
        assert_eq!(ramp.value(), mid);
        assert!(ramp.tick() > mid);
        assert!(!ramp.is_settled());
    }

    #[test]
    fn new_length_lands_on_target() {
        let mut ramp = LinearRamp::with_length(0.0, 480);
        ramp.set_target(1.0);
        ramp.tick();
        ramp.set_length(960);
        assert!(ramp.is_settled());
        assert_eq!(ramp.value(), 1.0);
        assert_eq!(ramp.length(), 960);
    }

    #[test]
    fn copies_replay_identically() {
        let mut ramp = LinearRamp::with_length(0.0, 480);
        ramp.set_target(1.0);
        let saved = ramp;
        for _ in 0..10 {
            ramp.tick();
        }
        let mut replay = saved;
        for _ in 0..10 {
            replay.tick();
        }
        assert_eq!(ramp, replay);
    }

    #[test]
    fn jump_skips_ramp() {
        let mut ramp = LinearRamp::with_length(1.0, 480);
        ramp.jump(0.25);
        assert!(ramp.is_settled());
        assert_eq!(ramp.tick(), 0.25);
    }
}
