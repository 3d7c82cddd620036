//! Factory presets bundled with the waveshaper.
//!
//! These are embedded at compile time and always available, one per curve
//! plus a near-transparent starting point.

use crate::Preset;

/// Lookup keys of the factory presets, in display order.
pub static FACTORY_PRESET_NAMES: &[&str] = &[
    "clean",
    "warm_sine",
    "soft_knee",
    "hard_factor",
    "gloubi_crunch",
];

static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("clean", CLEAN_PRESET),
    ("warm_sine", WARM_SINE_PRESET),
    ("soft_knee", SOFT_KNEE_PRESET),
    ("hard_factor", HARD_FACTOR_PRESET),
    ("gloubi_crunch", GLOUBI_CRUNCH_PRESET),
];

/// Clean - barely-there factor curve at unity gain.
const CLEAN_PRESET: &str = r#"
name = "Clean"
description = "Almost linear factor curve at unity gain - a starting point"

[params]
type_select = 3
factor_amount = 0.01
in_gain = 0.0
out_gain = 0.0
"#;

/// Warm Sine - gentle sine fold.
const WARM_SINE_PRESET: &str = r#"
name = "Warm Sine"
description = "Gentle sine fold with a little input drive"

[params]
type_select = 1
sin_amount = 0.35
in_gain = 3.0
out_gain = -1.5
"#;

/// Soft Knee - rational soft clipper.
const SOFT_KNEE_PRESET: &str = r#"
name = "Soft Knee"
description = "Rounded quadratic saturation that keeps transients"

[params]
type_select = 2
quad_amount = 2.5
in_gain = 0.0
out_gain = -1.0
"#;

/// Hard Factor - heavy clipping.
const HARD_FACTOR_PRESET: &str = r#"
name = "Hard Factor"
description = "Steep factor curve pushed hard, with output trimmed back"

[params]
type_select = 3
factor_amount = 0.9
in_gain = 6.0
out_gain = -8.0
"#;

/// Gloubi Crunch - asymmetric drive.
const GLOUBI_CRUNCH_PRESET: &str = r#"
name = "Gloubi Crunch"
description = "Asymmetric two-exponential crunch with even harmonics"

[params]
type_select = 4
gb_amount = 6.0
in_gain = 4.0
out_gain = -6.0
"#;

/// Every factory preset, in display order.
pub fn factory_presets() -> Vec<Preset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| Preset::from_toml(toml).ok())
        .collect()
}

/// Find a factory preset by lookup key or display name, ignoring case.
pub fn get_factory_preset(name: &str) -> Option<Preset> {
    let name_lower = name.to_lowercase();

    if let Some((_, toml)) = FACTORY_PRESETS_TOML
        .iter()
        .find(|(key, _)| key.to_lowercase() == name_lower)
    {
        return Preset::from_toml(toml).ok();
    }

    factory_presets()
        .into_iter()
        .find(|preset| preset.name.to_lowercase() == name_lower)
}

/// Lookup keys of the factory presets.
pub fn factory_preset_names() -> Vec<&'static str> {
    FACTORY_PRESET_NAMES.to_vec()
}

/// Returns `true` if `name` matches a factory preset key or display name.
pub fn is_factory_preset(name: &str) -> bool {
    get_factory_preset(name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use waveshaper_effects::Curve;

    #[test]
    fn all_factory_presets_parse() {
        assert_eq!(factory_presets().len(), FACTORY_PRESETS_TOML.len());
        assert_eq!(FACTORY_PRESET_NAMES.len(), FACTORY_PRESETS_TOML.len());
    }

    #[test]
    fn all_factory_presets_validate() {
        for preset in factory_presets() {
            assert!(preset.validate().is_ok(), "{} failed validation", preset.name);
        }
    }

    #[test]
    fn lookup_by_key_and_name() {
        let by_key = get_factory_preset("warm_sine").unwrap();
        let by_name = get_factory_preset("Warm Sine").unwrap();
        assert_eq!(by_key, by_name);
        assert_eq!(by_key.curve(), Curve::Sinusoidal);
        assert!(get_factory_preset("WARM_SINE").is_some());
        assert!(!is_factory_preset("nonexistent"));
    }

    #[test]
    fn every_curve_has_a_preset() {
        let presets = factory_presets();
        for curve in Curve::ALL {
            assert!(
                presets.iter().any(|p| p.curve() == curve),
                "no preset for {curve:?}"
            );
        }
    }
}
