//! Parameter flags shared by `process` and `presets save`.

use anyhow::{Result, anyhow, bail};
use clap::Args;
use waveshaper_config::validate_param;
use waveshaper_effects::{Curve, ParamKey, ParamStore};

/// Parameter overrides applied on top of defaults or a preset.
#[derive(Args, Debug, Default)]
pub struct ParamArgs {
    /// Curve: sine, quad, factor or gb (or 1-4)
    #[arg(long)]
    pub curve: Option<String>,

    /// Amount for the selected curve
    #[arg(long)]
    pub amount: Option<f32>,

    /// Input gain in dB (-20 to 20)
    #[arg(long, allow_hyphen_values = true)]
    pub in_gain: Option<f32>,

    /// Output gain in dB (-20 to 20)
    #[arg(long, allow_hyphen_values = true)]
    pub out_gain: Option<f32>,

    /// Raw parameter by string ID (e.g., "gb_amount=4.5")
    #[arg(long, value_parser = parse_key_val, number_of_values = 1)]
    pub param: Vec<(String, f32)>,
}

/// Parse `key=value` with a numeric value.
pub fn parse_key_val(s: &str) -> Result<(String, f32), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid parameter format: '{s}' (expected key=value)"))?;
    let value: f32 = value
        .trim()
        .parse()
        .map_err(|_| format!("invalid number in '{s}'"))?;
    Ok((key.trim().to_string(), value))
}

/// Parse a curve name or index.
pub fn parse_curve(name: &str) -> Result<Curve> {
    Curve::from_name(name).ok_or_else(|| {
        anyhow!("unknown curve '{name}' (expected sinusoidal, quadratic, factor or gloubi-boulga)")
    })
}

impl ParamArgs {
    /// Write the overrides into `store`.
    ///
    /// Unknown parameter IDs are an error. Out-of-range values are clamped
    /// with a warning.
    pub fn apply(&self, store: &ParamStore) -> Result<()> {
        for (id, value) in &self.param {
            let Some(key) = ParamKey::from_string_id(id) else {
                bail!("unknown parameter '{id}' (see `waveshaper params`)");
            };
            set_checked(store, key, *value);
        }

        if let Some(name) = &self.curve {
            store.set_curve(parse_curve(name)?);
        }
        if let Some(amount) = self.amount {
            set_checked(store, ParamKey::amount_for(store.curve()), amount);
        }
        if let Some(db) = self.in_gain {
            set_checked(store, ParamKey::InGain, db);
        }
        if let Some(db) = self.out_gain {
            set_checked(store, ParamKey::OutGain, db);
        }
        Ok(())
    }
}

fn set_checked(store: &ParamStore, key: ParamKey, value: f32) {
    if let Err(err) = validate_param(key.string_id(), value) {
        tracing::warn!("{err}; clamping");
    }
    store.set(key, value);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_val_parsing() {
        assert_eq!(parse_key_val("gb_amount=4.5"), Ok(("gb_amount".to_string(), 4.5)));
        assert_eq!(parse_key_val("in_gain = -3"), Ok(("in_gain".to_string(), -3.0)));
        assert!(parse_key_val("gb_amount").is_err());
        assert!(parse_key_val("gb_amount=loud").is_err());
    }

    #[test]
    fn amount_follows_selected_curve() {
        let store = ParamStore::new();
        let args = ParamArgs {
            curve: Some("quad".to_string()),
            amount: Some(3.0),
            ..Default::default()
        };
        args.apply(&store).unwrap();
        assert_eq!(store.curve(), Curve::Quadratic);
        assert_eq!(store.amount(Curve::Quadratic), 3.0);
        assert_eq!(store.amount(Curve::Sinusoidal), 0.5);
    }

    #[test]
    fn out_of_range_is_clamped() {
        let store = ParamStore::new();
        let args = ParamArgs {
            in_gain: Some(99.0),
            ..Default::default()
        };
        args.apply(&store).unwrap();
        assert_eq!(store.in_gain_db(), 20.0);
    }

    #[test]
    fn unknown_names_are_errors() {
        let store = ParamStore::new();
        let args = ParamArgs {
            param: vec![("drive".to_string(), 1.0)],
            ..Default::default()
        };
        assert!(args.apply(&store).is_err());

        let args = ParamArgs {
            curve: Some("fuzz".to_string()),
            ..Default::default()
        };
        assert!(args.apply(&store).is_err());
    }
}
