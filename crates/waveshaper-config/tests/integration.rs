//! Preset files driving a live parameter store and engine.

use std::sync::Arc;

use tempfile::TempDir;
use waveshaper_config::{
    ConfigError, Preset, ValidationError, factory_presets, get_factory_preset, resolve_preset,
};
use waveshaper_core::AudioBuffer;
use waveshaper_effects::{Curve, ParamKey, ParamStore, Waveshaper};

#[test]
fn save_then_load_restores_store() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("fold.toml");

    let store = ParamStore::new();
    store.set_curve(Curve::GloubiBoulga);
    store.set(ParamKey::GbAmount, 5.5);
    store.set(ParamKey::InGain, 4.5);
    Preset::from_store("Fold", &store).save(&path).unwrap();

    let loaded = Preset::load(&path).unwrap();
    assert_eq!(loaded.name, "Fold");

    let restored = ParamStore::new();
    loaded.apply_to(&restored);
    assert_eq!(restored.snapshot(), store.snapshot());
}

#[test]
fn user_file_shadows_factory_preset() {
    let dir = TempDir::new().unwrap();
    Preset::new("Mine")
        .with_param(ParamKey::TypeSelect, 2.0)
        .save(dir.path().join("clean.toml"))
        .unwrap();

    let resolved = resolve_preset("clean", dir.path()).unwrap();
    assert_eq!(resolved.name, "Mine");

    let factory = resolve_preset("Hard Factor", dir.path()).unwrap();
    assert_eq!(factory.curve(), Curve::Factor);

    let err = resolve_preset("no_such_preset", dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::PresetNotFound(_)));
}

#[test]
fn unknown_key_in_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "name = \"Bad\"\n[params]\ntone = 0.5\n").unwrap();

    let err = Preset::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownParameter(ref id) if id == "tone"));
}

#[test]
fn out_of_range_file_is_reported_then_clamped() {
    let preset =
        Preset::from_toml("name = \"Hot\"\n[params]\nin_gain = 35.0\nsin_amount = 0.5\n").unwrap();
    assert!(matches!(
        preset.validate(),
        Err(ValidationError::OutOfRange { ref param, .. }) if param == "in_gain"
    ));

    let store = ParamStore::new();
    preset.apply_to(&store);
    assert_eq!(store.in_gain_db(), 20.0);
}

#[test]
fn missing_file_reports_path() {
    let err = Preset::load("/nonexistent/dir/preset.toml").unwrap_err();
    assert!(err.to_string().contains("/nonexistent/dir/preset.toml"));
}

#[test]
fn factory_presets_drive_the_engine() {
    for preset in factory_presets() {
        let params = Arc::new(ParamStore::new());
        preset.apply_to(&params);

        let mut shaper = Waveshaper::new(Arc::clone(&params));
        shaper.prepare(44100.0, 128, 1).unwrap();

        let mut data: Vec<f32> = (0..128).map(|i| 0.8 * (i as f32 * 0.1).sin()).collect();
        let mut channels: [&mut [f32]; 1] = [&mut data];
        shaper.process(&mut AudioBuffer::new(&mut channels), false);

        assert_eq!(shaper.active_curve(), preset.curve(), "{}", preset.name);
        assert!(data.iter().all(|s| s.is_finite()), "{}", preset.name);
    }
}

#[test]
fn clean_preset_is_nearly_transparent() {
    let preset = get_factory_preset("clean").unwrap();
    let params = Arc::new(ParamStore::new());
    preset.apply_to(&params);

    let mut shaper = Waveshaper::new(params);
    shaper.prepare(48000.0, 64, 1).unwrap();
    let input: Vec<f32> = (0..64).map(|i| 0.25 * (i as f32 * 0.2).sin()).collect();
    let mut data = input.clone();
    let mut channels: [&mut [f32]; 1] = [&mut data];
    shaper.process(&mut AudioBuffer::new(&mut channels), false);

    for (x, y) in input.iter().zip(&data) {
        assert!((x - y).abs() < 0.01, "{x} -> {y}");
    }
}
