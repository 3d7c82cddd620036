//! Preset file format and operations.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::path::Path;

use waveshaper_effects::{Curve, ParamKey, ParamSnapshot, ParamStore};

use crate::error::ConfigError;
use crate::validation::{self, ValidationResult};

/// A named set of waveshaper parameter values.
///
/// Parameters are keyed by their stable string ID. Missing parameters take
/// their default value when the preset is applied; unknown IDs are rejected
/// when the preset is loaded.
///
/// # TOML Format
///
/// ```toml
/// name = "Warm Sine"
/// description = "Gentle sine fold with a little input drive"
///
/// [params]
/// type_select = 1
/// sin_amount = 0.35
/// in_gain = 3.0
/// out_gain = -1.5
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Preset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Parameter values by string ID.
    #[serde(default, serialize_with = "serialize_params")]
    pub params: BTreeMap<String, f32>,
}

/// Write `f32` values through their shortest decimal form so `0.7` is not
/// saved as `0.699999988079071`.
fn serialize_params<S: Serializer>(
    params: &BTreeMap<String, f32>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(params.len()))?;
    for (id, value) in params {
        let tidy: f64 = value.to_string().parse().unwrap_or(f64::from(*value));
        map.serialize_entry(id, &tidy)?;
    }
    map.end()
}

impl Preset {
    /// Create a preset with no stored parameters (all defaults).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            params: BTreeMap::new(),
        }
    }

    /// Create a preset with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Store one parameter value.
    pub fn with_param(mut self, key: ParamKey, value: f32) -> Self {
        self.set(key, value);
        self
    }

    /// Store one parameter value.
    pub fn set(&mut self, key: ParamKey, value: f32) {
        self.params.insert(key.string_id().to_string(), value);
    }

    /// Stored value of `key`, or its default when absent.
    pub fn get(&self, key: ParamKey) -> f32 {
        self.params
            .get(key.string_id())
            .copied()
            .unwrap_or_else(|| key.descriptor().default)
    }

    /// Curve this preset selects.
    pub fn curve(&self) -> Curve {
        Curve::from_selector(self.get(ParamKey::TypeSelect))
    }

    /// Capture every current value of `store`.
    pub fn from_store(name: impl Into<String>, store: &ParamStore) -> Self {
        Self::from_snapshot(name, &store.snapshot())
    }

    /// Build a preset holding every value of `snapshot`.
    pub fn from_snapshot(name: impl Into<String>, snapshot: &ParamSnapshot) -> Self {
        let mut preset = Self::new(name);
        for (key, value) in snapshot.iter() {
            preset.set(key, value);
        }
        preset
    }

    /// Full parameter set, with defaults filled in and values left unclamped.
    pub fn to_snapshot(&self) -> ParamSnapshot {
        let mut snapshot = ParamSnapshot::defaults();
        for key in ParamKey::ALL {
            snapshot.set(key, self.get(key));
        }
        snapshot
    }

    /// Write the preset into `store`.
    ///
    /// Every parameter is written: missing ones are reset to their default
    /// and out-of-range values are clamped by the store.
    pub fn apply_to(&self, store: &ParamStore) {
        store.apply_snapshot(&self.to_snapshot());
        #[cfg(feature = "tracing")]
        tracing::debug!(preset = %self.name, curve = self.curve().name(), "preset applied");
    }

    /// Check every stored value against its parameter's range.
    pub fn validate(&self) -> ValidationResult<()> {
        validation::validate_preset(self)
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let preset = Self::from_toml(&content)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(path = %path.display(), preset = %preset.name, "preset loaded");
        Ok(preset)
    }

    /// Load a preset from a TOML string.
    ///
    /// Fails on unknown parameter IDs; out-of-range values are accepted here
    /// and reported by [`validate`](Self::validate).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let preset: Preset = toml::from_str(toml_str)?;
        if let Some(unknown) = preset
            .params
            .keys()
            .find(|id| ParamKey::from_string_id(id).is_none())
        {
            return Err(ConfigError::UnknownParameter(unknown.clone()));
        }
        Ok(preset)
    }

    /// Save the preset to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        #[cfg(feature = "tracing")]
        tracing::info!(path = %path.display(), preset = %self.name, "preset saved");
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_preset_reads_defaults() {
        let preset = Preset::new("Empty");
        assert!(preset.params.is_empty());
        assert_eq!(preset.get(ParamKey::QuadAmount), 1.0);
        assert_eq!(preset.curve(), Curve::Sinusoidal);
    }

    #[test]
    fn builder_sets_values() {
        let preset = Preset::new("Fold")
            .with_description("test")
            .with_param(ParamKey::TypeSelect, 4.0)
            .with_param(ParamKey::GbAmount, 6.0);
        assert_eq!(preset.curve(), Curve::GloubiBoulga);
        assert_eq!(preset.get(ParamKey::GbAmount), 6.0);
        assert_eq!(preset.description.as_deref(), Some("test"));
    }

    #[test]
    fn parses_integer_and_float_values() {
        let preset = Preset::from_toml(
            r#"
name = "Mixed"
[params]
type_select = 3
factor_amount = 0.8
"#,
        )
        .unwrap();
        assert_eq!(preset.curve(), Curve::Factor);
        assert!((preset.get(ParamKey::FactorAmount) - 0.8).abs() < 1e-6);
        assert_eq!(preset.get(ParamKey::InGain), 0.0);
    }

    #[test]
    fn rejects_unknown_parameter() {
        let err = Preset::from_toml("name = \"x\"\n[params]\ndrive = 1.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownParameter(ref id) if id == "drive"));
    }

    #[test]
    fn rejects_unknown_top_level_key() {
        let err = Preset::from_toml("name = \"x\"\nsample_rate = 48000\n").unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }

    #[test]
    fn toml_keeps_short_decimals() {
        let preset = Preset::new("Short").with_param(ParamKey::SinAmount, 0.7);
        let text = preset.to_toml().unwrap();
        assert!(text.contains("sin_amount = 0.7\n"), "got:\n{text}");
        let back = Preset::from_toml(&text).unwrap();
        assert_eq!(back, preset);
    }

    #[test]
    fn apply_resets_missing_and_clamps() {
        let store = ParamStore::new();
        store.set(ParamKey::InGain, 12.0);

        let preset = Preset::new("Loud").with_param(ParamKey::OutGain, 50.0);
        preset.apply_to(&store);

        assert_eq!(store.in_gain_db(), 0.0);
        assert_eq!(store.out_gain_db(), 20.0);
    }

    #[test]
    fn store_roundtrip() {
        let store = ParamStore::new();
        store.set_curve(Curve::Quadratic);
        store.set(ParamKey::QuadAmount, 2.5);

        let preset = Preset::from_store("Captured", &store);
        assert_eq!(preset.params.len(), ParamKey::COUNT);

        let other = ParamStore::new();
        preset.apply_to(&other);
        assert_eq!(other.snapshot(), store.snapshot());
    }
}
