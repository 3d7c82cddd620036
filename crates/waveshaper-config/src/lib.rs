//! Preset storage and validation for the waveshaper effect.
//!
//! # Features
//!
//! - **Presets**: Load and save the flat parameter set as TOML
//! - **Validation**: Check parameter IDs and ranges
//! - **Paths**: Platform-specific user preset directory
//! - **Factory Presets**: Built-in presets, one per curve
//!
//! # Example
//!
//! ```rust,no_run
//! use waveshaper_config::{Preset, user_presets_dir};
//! use waveshaper_effects::{ParamKey, ParamStore};
//!
//! let store = ParamStore::new();
//! let preset = Preset::load("my_preset.toml").unwrap();
//! preset.apply_to(&store);
//!
//! store.set(ParamKey::OutGain, -3.0);
//! let path = user_presets_dir().join("my_preset.toml");
//! Preset::from_store("My Preset", &store).save(&path).unwrap();
//! ```

mod error;
mod preset;

/// Platform-specific paths for presets.
pub mod paths;

/// Preset and parameter validation.
pub mod validation;

/// Factory presets bundled with the library.
pub mod factory_presets;

pub use error::{ConfigError, IoOp};
pub use factory_presets::{
    FACTORY_PRESET_NAMES, factory_preset_names, factory_presets, get_factory_preset,
    is_factory_preset,
};
pub use paths::{
    PRESET_DIR_ENV, ensure_user_presets_dir, find_preset, list_user_presets,
    preset_name_from_path, user_presets_dir,
};
pub use preset::Preset;
pub use validation::{ValidationError, ValidationResult, validate_param, validate_preset};

/// Resolve a preset by file path, user preset name, or factory preset name,
/// in that order.
pub fn load_preset(name: &str) -> Result<Preset, ConfigError> {
    resolve_preset(name, &user_presets_dir())
}

/// [`load_preset`] against an explicit user preset directory.
pub fn resolve_preset(name: &str, user_dir: &std::path::Path) -> Result<Preset, ConfigError> {
    if let Some(path) = paths::find_preset_in(name, user_dir) {
        return Preset::load(path);
    }
    get_factory_preset(name).ok_or_else(|| ConfigError::PresetNotFound(name.to_string()))
}
