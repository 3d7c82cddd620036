//! Parameter metadata for external UIs and persistence layers.
//!
//! The processing core never renders controls itself. It publishes a
//! [`ParamDescriptor`] per parameter (range, default, step, display unit,
//! stable IDs) so that an editor, a host wrapper, or a preset serializer can
//! do so without knowing anything about the DSP.
//!
//! # Example
//!
//! ```rust
//! use waveshaper_core::{ParamDescriptor, ParamId};
//!
//! let drive = ParamDescriptor::amount("Drive", "Drive", 0.01, 10.0, 1.0)
//!     .with_id(ParamId(3), "drive");
//!
//! assert_eq!(drive.clamp(50.0), 10.0);
//! assert!((drive.quantize(1.234) - 1.23).abs() < 1e-6);
//! ```

use libm::{fabsf, roundf};

/// Numeric parameter handle.
///
/// Equal to the parameter's position in the store; stored state keys on the
/// string ID instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParamId(pub u32);

/// What a host may do with a parameter. Combine with [`union`](Self::union).
///
/// ```rust
/// use waveshaper_core::ParamFlags;
///
/// let flags = ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED);
/// assert!(flags.contains(ParamFlags::STEPPED));
/// assert!(!flags.contains(ParamFlags::BYPASS));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamFlags(u8);

impl ParamFlags {
    /// No flags set.
    pub const NONE: Self = Self(0);
    /// Safe to change while audio is running.
    pub const AUTOMATABLE: Self = Self(1 << 0);
    /// Only whole-number values are meaningful.
    pub const STEPPED: Self = Self(1 << 1);
    /// The effect's bypass switch.
    pub const BYPASS: Self = Self(1 << 2);

    /// `true` when every flag of `other` is also set here.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Flags set in either operand.
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl Default for ParamFlags {
    fn default() -> Self {
        Self::AUTOMATABLE
    }
}

/// How a parameter's value is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Gain in dB.
    Decibels,
    /// One-based index into a list of choices.
    Index,
    /// On/off switch stored as 0.0 / 1.0.
    Toggle,
    /// Plain number, such as a curve amount.
    None,
}

impl ParamUnit {
    /// Text appended after a formatted value.
    ///
    /// ```rust
    /// use waveshaper_core::ParamUnit;
    ///
    /// assert_eq!(ParamUnit::Decibels.suffix(), " dB");
    /// assert_eq!(ParamUnit::None.suffix(), "");
    /// ```
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Decibels => " dB",
            ParamUnit::Index | ParamUnit::Toggle | ParamUnit::None => "",
        }
    }

    /// Short machine-friendly label (`"dB"`, `"index"`, `"toggle"`, `""`).
    pub const fn label(&self) -> &'static str {
        match self {
            ParamUnit::Decibels => "dB",
            ParamUnit::Index => "index",
            ParamUnit::Toggle => "toggle",
            ParamUnit::None => "",
        }
    }
}

/// Range, default, step and naming of one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full parameter name for display (e.g., "Gain In").
    pub name: &'static str,

    /// Short name for narrow displays, max 8 characters.
    pub short_name: &'static str,

    /// Display unit.
    pub unit: ParamUnit,

    /// Lowest accepted value.
    pub min: f32,

    /// Highest accepted value.
    pub max: f32,

    /// Value at construction and after a reset.
    pub default: f32,

    /// Quantization step. Values written to the store snap to
    /// `min + n * step`. `0.0` means continuous.
    pub step: f32,

    /// Stable numeric ID.
    pub id: ParamId,

    /// Stable string ID, used as the key in stored presets.
    pub string_id: &'static str,

    /// Capability flags.
    pub flags: ParamFlags,
}

impl ParamDescriptor {
    /// Gain parameter in decibels with a 0.1 dB step.
    pub fn gain_db(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Decibels,
            min,
            max,
            default,
            step: 0.1,
            id: ParamId(0),
            string_id: "",
            flags: ParamFlags::AUTOMATABLE,
        }
    }

    /// Dimensionless amount with a 0.01 step.
    pub fn amount(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::None,
            min,
            max,
            default,
            step: 0.01,
            id: ParamId(0),
            string_id: "",
            flags: ParamFlags::AUTOMATABLE,
        }
    }

    /// Integer choice in `min..=max` (one-based by convention).
    pub fn choice(
        name: &'static str,
        short_name: &'static str,
        min: u32,
        max: u32,
        default: u32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Index,
            min: min as f32,
            max: max as f32,
            default: default as f32,
            step: 1.0,
            id: ParamId(0),
            string_id: "",
            flags: ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED),
        }
    }

    /// Boolean switch stored as 0.0 (off) / 1.0 (on).
    pub fn toggle(name: &'static str, short_name: &'static str, default: bool) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Toggle,
            min: 0.0,
            max: 1.0,
            default: if default { 1.0 } else { 0.0 },
            step: 1.0,
            id: ParamId(0),
            string_id: "",
            flags: ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED),
        }
    }

    /// Attach the numeric handle and the persisted string key.
    pub const fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// Replace the flag set.
    pub const fn with_flags(mut self, flags: ParamFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Pin `value` into `min..=max`.
    ///
    /// NaN maps to the minimum.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() || value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Clamps and snaps a value to the step grid anchored at `min`.
    ///
    /// The result is always inside `[min, max]`, even when the range is not
    /// a whole number of steps.
    #[inline]
    pub fn quantize(&self, value: f32) -> f32 {
        let clamped = self.clamp(value);
        if self.step <= 0.0 || clamped == self.min || clamped == self.max {
            return clamped;
        }
        let steps = roundf((clamped - self.min) / self.step);
        let snapped = self.min + steps * self.step;
        // Values already on the grid are kept bit-exact.
        if fabsf(snapped - clamped) <= self.step * 1e-3 {
            return clamped;
        }
        self.clamp(snapped)
    }

    /// Returns `true` if `value` lies inside the declared range.
    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Map `value` onto `0.0..=1.0` across the range.
    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        let range = self.max - self.min;
        if range == 0.0 {
            return 0.0;
        }
        (self.clamp(value) - self.min) / range
    }

    /// Converts a normalized value (0.0 to 1.0) to the parameter range.
    #[inline]
    pub fn denormalize(&self, normalized: f32) -> f32 {
        self.min + normalized.clamp(0.0, 1.0) * (self.max - self.min)
    }

    /// Returns `true` for stepped (integer or boolean) parameters.
    #[inline]
    pub fn is_stepped(&self) -> bool {
        self.flags.contains(ParamFlags::STEPPED)
    }
}
