//! Lock-free parameter store shared between the control and audio threads.
//!
//! Each parameter lives in an `AtomicU32` holding the bit pattern of an
//! `f32`. The control thread writes with [`ParamStore::set`], which clamps and
//! quantizes before the store; the audio thread reads the latest value once
//! per block. No locks, no allocation, no torn reads.
//!
//! ```rust
//! use waveshaper_effects::{Curve, ParamKey, ParamStore};
//!
//! let store = ParamStore::new();
//! store.set(ParamKey::TypeSelect, 3.0);
//! store.set(ParamKey::FactorAmount, 5.0); // clamped to 0.99
//!
//! assert_eq!(store.curve(), Curve::Factor);
//! assert_eq!(store.amount(Curve::Factor), 0.99);
//! ```

use core::sync::atomic::{AtomicU32, Ordering};

use waveshaper_core::{GAIN_MAX_DB, GAIN_MIN_DB, ParamDescriptor, ParamFlags, ParamId};

use crate::curve::{BOUNDED_AMOUNT, Curve, WIDE_AMOUNT};

/// Every parameter the waveshaper exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParamKey {
    /// Input trim in dB.
    InGain,
    /// One-based curve selector.
    TypeSelect,
    /// Sinusoidal amount.
    SinAmount,
    /// Quadratic `k`.
    QuadAmount,
    /// Factor amount.
    FactorAmount,
    /// Gloubi-Boulga drive.
    GbAmount,
    /// Output trim in dB.
    OutGain,
    /// Bypass switch.
    Bypass,
}

impl ParamKey {
    /// Number of parameters.
    pub const COUNT: usize = 8;

    /// All parameters in schema order.
    pub const ALL: [ParamKey; Self::COUNT] = [
        ParamKey::InGain,
        ParamKey::TypeSelect,
        ParamKey::SinAmount,
        ParamKey::QuadAmount,
        ParamKey::FactorAmount,
        ParamKey::GbAmount,
        ParamKey::OutGain,
        ParamKey::Bypass,
    ];

    /// Position in [`ALL`](Self::ALL) and in the store.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Stable string ID, used as the preset key.
    pub const fn string_id(self) -> &'static str {
        match self {
            ParamKey::InGain => "in_gain",
            ParamKey::TypeSelect => "type_select",
            ParamKey::SinAmount => "sin_amount",
            ParamKey::QuadAmount => "quad_amount",
            ParamKey::FactorAmount => "factor_amount",
            ParamKey::GbAmount => "gb_amount",
            ParamKey::OutGain => "out_gain",
            ParamKey::Bypass => "bypass",
        }
    }

    /// Reverse of [`string_id`](Self::string_id).
    pub fn from_string_id(id: &str) -> Option<ParamKey> {
        Self::ALL.into_iter().find(|key| key.string_id() == id)
    }

    /// The amount parameter that drives `curve`.
    pub const fn amount_for(curve: Curve) -> ParamKey {
        match curve {
            Curve::Sinusoidal => ParamKey::SinAmount,
            Curve::Quadratic => ParamKey::QuadAmount,
            Curve::Factor => ParamKey::FactorAmount,
            Curve::GloubiBoulga => ParamKey::GbAmount,
        }
    }

    /// Range, default, step and display metadata.
    pub fn descriptor(self) -> ParamDescriptor {
        let id = ParamId(self as u32);
        let (bounded_min, bounded_max) = BOUNDED_AMOUNT;
        let (wide_min, wide_max) = WIDE_AMOUNT;
        let desc = match self {
            ParamKey::InGain => {
                ParamDescriptor::gain_db("Gain In", "In", GAIN_MIN_DB, GAIN_MAX_DB, 0.0)
            }
            ParamKey::TypeSelect => ParamDescriptor::choice("Distortion Type", "Type", 1, 4, 1),
            ParamKey::SinAmount => ParamDescriptor::amount(
                "Sine Distortion Factor",
                "Sin",
                bounded_min,
                bounded_max,
                0.5,
            ),
            ParamKey::QuadAmount => ParamDescriptor::amount(
                "Quadratic Distortion Factor",
                "Quad",
                wide_min,
                wide_max,
                1.0,
            ),
            ParamKey::FactorAmount => ParamDescriptor::amount(
                "Factor Distortion Factor",
                "Factor",
                bounded_min,
                bounded_max,
                0.5,
            ),
            ParamKey::GbAmount => ParamDescriptor::amount(
                "Gloubi Boulga Distortion Factor",
                "GB",
                wide_min,
                wide_max,
                1.0,
            ),
            ParamKey::OutGain => {
                ParamDescriptor::gain_db("Gain Out", "Out", GAIN_MIN_DB, GAIN_MAX_DB, 0.0)
            }
            ParamKey::Bypass => ParamDescriptor::toggle("Bypassed", "Byp", false).with_flags(
                ParamFlags::AUTOMATABLE
                    .union(ParamFlags::STEPPED)
                    .union(ParamFlags::BYPASS),
            ),
        };
        desc.with_id(id, self.string_id())
    }
}

/// Atomic `f32` cell.
struct AtomicParam(AtomicU32);

impl AtomicParam {
    fn new(value: f32) -> Self {
        Self(AtomicU32::new(value.to_bits()))
    }

    #[inline]
    fn load(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Acquire))
    }

    #[inline]
    fn store(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Release);
    }
}

/// Thread-safe parameter values.
///
/// Share it as `Arc<ParamStore>` between the engine and whatever edits the
/// parameters. Every value read from the store is inside its descriptor's
/// range.
pub struct ParamStore {
    values: [AtomicParam; ParamKey::COUNT],
}

impl ParamStore {
    /// Store with every parameter at its default.
    pub fn new() -> Self {
        Self {
            values: ParamKey::ALL.map(|key| AtomicParam::new(key.descriptor().default)),
        }
    }

    /// Current value.
    #[inline]
    pub fn get(&self, key: ParamKey) -> f32 {
        self.values[key.index()].load()
    }

    /// Clamp, quantize and store a value.
    ///
    /// Non-finite values are ignored and the previous value is kept.
    /// Returns the value actually stored.
    pub fn set(&self, key: ParamKey, value: f32) -> f32 {
        if !value.is_finite() {
            return self.get(key);
        }
        let value = key.descriptor().quantize(value);
        self.values[key.index()].store(value);
        value
    }

    /// [`get`](Self::get) by string ID.
    pub fn get_by_name(&self, id: &str) -> Option<f32> {
        ParamKey::from_string_id(id).map(|key| self.get(key))
    }

    /// [`set`](Self::set) by string ID. Returns `false` for an unknown ID.
    pub fn set_by_name(&self, id: &str, value: f32) -> bool {
        match ParamKey::from_string_id(id) {
            Some(key) => {
                self.set(key, value);
                true
            }
            None => false,
        }
    }

    /// Input trim in dB.
    #[inline]
    pub fn in_gain_db(&self) -> f32 {
        self.get(ParamKey::InGain)
    }

    /// Output trim in dB.
    #[inline]
    pub fn out_gain_db(&self) -> f32 {
        self.get(ParamKey::OutGain)
    }

    /// Currently selected curve.
    #[inline]
    pub fn curve(&self) -> Curve {
        Curve::from_selector(self.get(ParamKey::TypeSelect))
    }

    /// Select a curve.
    pub fn set_curve(&self, curve: Curve) {
        self.set(ParamKey::TypeSelect, curve.index() as f32);
    }

    /// Amount parameter of `curve`.
    #[inline]
    pub fn amount(&self, curve: Curve) -> f32 {
        self.get(ParamKey::amount_for(curve))
    }

    /// Returns `true` when the bypass switch is on.
    #[inline]
    pub fn bypassed(&self) -> bool {
        self.get(ParamKey::Bypass) >= 0.5
    }

    /// Turn the bypass switch on or off.
    pub fn set_bypassed(&self, bypassed: bool) {
        self.set(ParamKey::Bypass, if bypassed { 1.0 } else { 0.0 });
    }

    /// Descriptor of one parameter.
    pub fn descriptor(&self, key: ParamKey) -> ParamDescriptor {
        key.descriptor()
    }

    /// Descriptors of every parameter in schema order.
    pub fn schema() -> [ParamDescriptor; ParamKey::COUNT] {
        ParamKey::ALL.map(ParamKey::descriptor)
    }

    /// Put every parameter back to its default.
    pub fn reset_to_defaults(&self) {
        for key in ParamKey::ALL {
            self.values[key.index()].store(key.descriptor().default);
        }
        #[cfg(feature = "tracing")]
        tracing::debug!("parameters reset to defaults");
    }

    /// Copy of every current value.
    pub fn snapshot(&self) -> ParamSnapshot {
        ParamSnapshot {
            values: ParamKey::ALL.map(|key| self.get(key)),
        }
    }

    /// Write every value of `snapshot` through [`set`](Self::set).
    pub fn apply_snapshot(&self, snapshot: &ParamSnapshot) {
        for key in ParamKey::ALL {
            self.set(key, snapshot.get(key));
        }
    }
}

impl Default for ParamStore {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for ParamStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut map = f.debug_map();
        for key in ParamKey::ALL {
            map.entry(&key.string_id(), &self.get(key));
        }
        map.finish()
    }
}

/// Plain copy of the parameter set, for presets and undo.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSnapshot {
    values: [f32; ParamKey::COUNT],
}

impl ParamSnapshot {
    /// Snapshot holding every default value.
    pub fn defaults() -> Self {
        Self {
            values: ParamKey::ALL.map(|key| key.descriptor().default),
        }
    }

    /// Value of one parameter.
    #[inline]
    pub fn get(&self, key: ParamKey) -> f32 {
        self.values[key.index()]
    }

    /// Overwrite one value. No clamping happens until the snapshot is applied.
    #[inline]
    pub fn set(&mut self, key: ParamKey, value: f32) {
        self.values[key.index()] = value;
    }

    /// `(key, value)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (ParamKey, f32)> + '_ {
        ParamKey::ALL.into_iter().map(|key| (key, self.get(key)))
    }
}

impl Default for ParamSnapshot {
    fn default() -> Self {
        Self::defaults()
    }
}
