//! Preset and parameter validation.
//!
//! Loading a preset only rejects parameter IDs the waveshaper does not know.
//! Range problems are found here so a caller can decide whether to refuse the
//! preset or let the store clamp it.
//!
//! # Example
//!
//! ```rust
//! use waveshaper_config::{Preset, ValidationError, validate_param};
//! use waveshaper_effects::ParamKey;
//!
//! assert!(validate_param("sin_amount", 0.5).is_ok());
//! assert!(matches!(
//!     validate_param("sin_amount", 1.5),
//!     Err(ValidationError::OutOfRange { .. })
//! ));
//!
//! let preset = Preset::new("Hot").with_param(ParamKey::InGain, 40.0);
//! assert!(preset.validate().is_err());
//! ```

use thiserror::Error;
use waveshaper_effects::ParamKey;

use crate::Preset;

/// Why a preset value was refused.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Unknown parameter ID.
    #[error("unknown parameter '{0}'")]
    UnknownParameter(String),

    /// Value outside the parameter's range; the store would clamp it.
    #[error("{param} = {value} is outside {min}..={max}")]
    OutOfRange {
        /// String ID of the parameter.
        param: String,
        /// Value as stored in the preset.
        value: f32,
        /// Lower bound.
        min: f32,
        /// Upper bound.
        max: f32,
    },

    /// NaN or infinite value.
    #[error("parameter '{0}' is not a finite number")]
    NotFinite(String),

    /// Several problems, in parameter order.
    #[error("{} problems: {}", .0.len(), .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// `Result` alias for the checks in this module.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Check one `(id, value)` pair and return the parameter it names.
pub fn validate_param(id: &str, value: f32) -> ValidationResult<ParamKey> {
    let key =
        ParamKey::from_string_id(id).ok_or_else(|| ValidationError::UnknownParameter(id.to_string()))?;
    if !value.is_finite() {
        return Err(ValidationError::NotFinite(id.to_string()));
    }
    let desc = key.descriptor();
    if !desc.contains(value) {
        return Err(ValidationError::OutOfRange {
            param: id.to_string(),
            value,
            min: desc.min,
            max: desc.max,
        });
    }
    Ok(key)
}

/// Check every stored value of a preset.
///
/// A single problem is returned as-is; several are wrapped in
/// [`ValidationError::Multiple`].
pub fn validate_preset(preset: &Preset) -> ValidationResult<()> {
    let mut errors: Vec<ValidationError> = preset
        .params
        .iter()
        .filter_map(|(id, value)| validate_param(id, *value).err())
        .collect();

    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}
