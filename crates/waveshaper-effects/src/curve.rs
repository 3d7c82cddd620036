//! The four waveshaping transfer functions and their dispatch table.
//!
//! Every curve is a memoryless map `sample -> sample` controlled by a single
//! amount parameter. Work that depends only on the amount (`sin(π·a)`,
//! `2a/(1-a)`, ...) is done once per block in [`Curve::prepare`], which
//! returns a [`CurveCoeffs`]; the per-sample part is the only thing left in
//! the hot loop.
//!
//! | Curve | Amount range | Character |
//! |-------|--------------|-----------|
//! | [`Curve::Sinusoidal`] | 0.01..0.99 | Sine fold, hard limit past `1/a` |
//! | [`Curve::Quadratic`] | 0.01..10 | Rational soft clipper |
//! | [`Curve::Factor`] | 0.01..0.99 | Hyperbolic-style soft clipper |
//! | [`Curve::GloubiBoulga`] | 0.01..10 | Asymmetric two-exponential warmth |
//!
//! # Example
//!
//! ```rust
//! use waveshaper_effects::Curve;
//!
//! let coeffs = Curve::Factor.prepare(0.5);
//! assert!((coeffs.apply(0.5) - 0.75).abs() < 1e-6);
//!
//! let mut block = [0.1f32, -0.1, 0.5];
//! Curve::Sinusoidal.prepare(0.5).process(&mut block);
//! assert!((block[0] - 0.1564).abs() < 1e-4);
//! ```

use core::f32::consts::PI;
use libm::{expf, fabsf, sinf, sqrtf};
use waveshaper_core::sanitize;

/// Amount range for curves that need the amount strictly inside (0, 1).
pub const BOUNDED_AMOUNT: (f32, f32) = (0.01, 0.99);

/// Amount range for curves that tolerate larger drive.
pub const WIDE_AMOUNT: (f32, f32) = (0.01, 10.0);

/// Largest `|x·k|` fed to the Gloubi-Boulga exponentials.
///
/// The stable evaluation below cannot overflow for any finite drive, but
/// `inf · 0` would still produce NaN for an infinite one.
pub const GB_DRIVE_LIMIT: f32 = 1.0e4;

/// Waveshaping algorithm selection.
///
/// Discriminants match the one-based value of the type selector parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Curve {
    /// `sin(π·a·x) / sin(π·a)`, hard limited to 1 beyond `x = 1/a`.
    #[default]
    Sinusoidal = 1,
    /// `x(|x|+k) / (x² + (k-1)|x| + 1)`.
    Quadratic = 2,
    /// `(1+f)x / (1+f|x|)` with `f = 2a/(1-a)`.
    Factor = 3,
    /// `(e^d - e^(-d·c)) / (e^d + e^(-d))` with `d = k·x`.
    GloubiBoulga = 4,
}

impl Curve {
    /// All curves in selector order.
    pub const ALL: [Curve; 4] = [
        Curve::Sinusoidal,
        Curve::Quadratic,
        Curve::Factor,
        Curve::GloubiBoulga,
    ];

    /// One-based selector index.
    #[inline]
    pub const fn index(self) -> u32 {
        self as u32
    }

    /// Look up a curve by its one-based selector index.
    pub const fn from_index(index: u32) -> Option<Curve> {
        match index {
            1 => Some(Curve::Sinusoidal),
            2 => Some(Curve::Quadratic),
            3 => Some(Curve::Factor),
            4 => Some(Curve::GloubiBoulga),
            _ => None,
        }
    }

    /// Map a raw selector value to a curve, rounding and clamping to 1..=4.
    #[inline]
    pub fn from_selector(value: f32) -> Curve {
        let rounded = libm::roundf(value).clamp(1.0, 4.0) as u32;
        Curve::from_index(rounded).unwrap_or_default()
    }

    /// Stable lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Curve::Sinusoidal => "sinusoidal",
            Curve::Quadratic => "quadratic",
            Curve::Factor => "factor",
            Curve::GloubiBoulga => "gloubi-boulga",
        }
    }

    /// Parse a curve name, accepting common abbreviations and the index.
    ///
    /// ```rust
    /// use waveshaper_effects::Curve;
    ///
    /// assert_eq!(Curve::from_name("sine"), Some(Curve::Sinusoidal));
    /// assert_eq!(Curve::from_name("GB"), Some(Curve::GloubiBoulga));
    /// assert_eq!(Curve::from_name("3"), Some(Curve::Factor));
    /// assert_eq!(Curve::from_name("fuzz"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Curve> {
        let name = name.trim();
        let matches = |candidates: &[&str]| candidates.iter().any(|c| c.eq_ignore_ascii_case(name));
        if matches(&["sinusoidal", "sine", "sin", "1"]) {
            Some(Curve::Sinusoidal)
        } else if matches(&["quadratic", "quad", "2"]) {
            Some(Curve::Quadratic)
        } else if matches(&["factor", "3"]) {
            Some(Curve::Factor)
        } else if matches(&["gloubi-boulga", "gloubiboulga", "gloubi", "gb", "4"]) {
            Some(Curve::GloubiBoulga)
        } else {
            None
        }
    }

    /// Valid amount range for this curve.
    pub const fn amount_range(self) -> (f32, f32) {
        match self {
            Curve::Sinusoidal | Curve::Factor => BOUNDED_AMOUNT,
            Curve::Quadratic | Curve::GloubiBoulga => WIDE_AMOUNT,
        }
    }

    /// Hoist the block-level constants for `amount`.
    ///
    /// `amount` must lie inside [`amount_range`](Self::amount_range); the
    /// parameter store guarantees this, so no check is made here.
    #[inline]
    pub fn prepare(self, amount: f32) -> CurveCoeffs {
        match self {
            Curve::Sinusoidal => {
                let z = PI * amount;
                CurveCoeffs {
                    curve: self,
                    c0: z,
                    c1: 1.0 / sinf(z),
                    c2: 1.0 / amount,
                }
            }
            Curve::Quadratic => CurveCoeffs {
                curve: self,
                c0: amount,
                c1: amount - 1.0,
                c2: 0.0,
            },
            Curve::Factor => {
                let f = 2.0 * amount / (1.0 - amount);
                CurveCoeffs {
                    curve: self,
                    c0: f,
                    c1: 1.0 + f,
                    c2: 0.0,
                }
            }
            Curve::GloubiBoulga => CurveCoeffs {
                curve: self,
                c0: amount,
                c1: 0.0,
                c2: 0.0,
            },
        }
    }

    /// Shape one sample, preparing the coefficients on the fly.
    ///
    /// Convenient for tests and plots; block processing should call
    /// [`prepare`](Self::prepare) once and reuse the result.
    #[inline]
    pub fn apply(self, x: f32, amount: f32) -> f32 {
        self.prepare(amount).apply(x)
    }
}

/// Transfer function signature stored in [`CURVE_TABLE`].
pub type TransferFn = fn(f32, &CurveCoeffs) -> f32;

/// Dispatch table indexed by `curve.index() - 1`.
pub static CURVE_TABLE: [TransferFn; 4] = [
    shape_sinusoidal,
    shape_quadratic,
    shape_factor,
    shape_gloubi_boulga,
];

/// Block-level constants for one curve at one amount.
///
/// Field meaning depends on the curve:
///
/// | Curve | `c0` | `c1` | `c2` |
/// |-------|------|------|------|
/// | Sinusoidal | `z = π·a` | `1/sin(z)` | `1/a` |
/// | Quadratic | `k` | `k - 1` | - |
/// | Factor | `f` | `1 + f` | - |
/// | GloubiBoulga | `k` | - | - |
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveCoeffs {
    curve: Curve,
    c0: f32,
    c1: f32,
    c2: f32,
}

impl CurveCoeffs {
    /// The curve these coefficients belong to.
    #[inline]
    pub fn curve(&self) -> Curve {
        self.curve
    }

    /// The transfer function for this curve, looked up in [`CURVE_TABLE`].
    #[inline]
    pub fn transfer(&self) -> TransferFn {
        CURVE_TABLE[self.curve as usize - 1]
    }

    /// Shape a single sample.
    #[inline]
    pub fn apply(&self, x: f32) -> f32 {
        (self.transfer())(x, self)
    }

    /// Shape a block in place.
    ///
    /// Non-finite results are replaced by [`sanitize`] so a bad sample can
    /// never poison the host buffer.
    #[inline]
    pub fn process(&self, samples: &mut [f32]) {
        let shape = self.transfer();
        for sample in samples.iter_mut() {
            *sample = sanitize(shape(*sample, self));
        }
    }
}

fn shape_sinusoidal(x: f32, k: &CurveCoeffs) -> f32 {
    let (z, gain, limit) = (k.c0, k.c1, k.c2);
    if x > limit {
        1.0
    } else if x < -limit {
        // Mirror of the `x > limit` clip. The one-sided form keeps folding
        // `sin(z·x)·g` below `-limit`; clipping here keeps the curve odd.
        -1.0
    } else {
        sinf(z * x) * gain
    }
}

fn shape_quadratic(x: f32, k: &CurveCoeffs) -> f32 {
    let ax = fabsf(x);
    x * (ax + k.c0) / (x * x + k.c1 * ax + 1.0)
}

fn shape_factor(x: f32, k: &CurveCoeffs) -> f32 {
    (k.c1 * x) / (1.0 + k.c0 * fabsf(x))
}

fn shape_gloubi_boulga(x: f32, k: &CurveCoeffs) -> f32 {
    let d = (x * k.c0).clamp(-GB_DRIVE_LIMIT, GB_DRIVE_LIMIT);
    if d.is_nan() {
        return 0.0;
    }
    let m = fabsf(d);
    let c = 1.0 + expf(-0.75 * sqrtf(m));

    // Both branches divide numerator and denominator by e^|d|, leaving only
    // non-positive exponents plus m·(c-1) <= ~0.96.
    if d >= 0.0 {
        // (e^d - e^(-d·c)) / (e^d + e^(-d))
        (1.0 - expf(-m * (c + 1.0))) / (1.0 + expf(-2.0 * m))
    } else {
        // (e^-m - e^(m·c)) / (e^-m + e^m)
        let e2 = expf(-2.0 * m);
        (e2 - expf(m * (c - 1.0))) / (e2 + 1.0)
    }
}

/// Sinusoidal curve at `amount` (0.01..0.99).
#[inline]
pub fn sinusoidal(x: f32, amount: f32) -> f32 {
    Curve::Sinusoidal.apply(x, amount)
}

/// Quadratic curve with `k` (0.01..10).
#[inline]
pub fn quadratic(x: f32, k: f32) -> f32 {
    Curve::Quadratic.apply(x, k)
}

/// Factor curve at `amount` (0.01..0.99).
#[inline]
pub fn factor(x: f32, amount: f32) -> f32 {
    Curve::Factor.apply(x, amount)
}

/// Gloubi-Boulga curve with drive `k` (0.01..10).
#[inline]
pub fn gloubi_boulga(x: f32, k: f32) -> f32 {
    Curve::GloubiBoulga.apply(x, k)
}
