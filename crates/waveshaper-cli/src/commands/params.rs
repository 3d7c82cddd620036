//! Parameter schema listing.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use waveshaper_core::ParamDescriptor;
use waveshaper_effects::ParamStore;

#[derive(Args)]
pub struct ParamsArgs {
    /// Print the schema as JSON
    #[arg(long)]
    json: bool,
}

/// Serializable view of a [`ParamDescriptor`].
#[derive(Debug, Serialize)]
pub struct ParamInfo {
    id: u32,
    string_id: &'static str,
    name: &'static str,
    short_name: &'static str,
    unit: &'static str,
    min: f32,
    max: f32,
    default: f32,
    step: f32,
    stepped: bool,
}

impl From<&ParamDescriptor> for ParamInfo {
    fn from(desc: &ParamDescriptor) -> Self {
        Self {
            id: desc.id.0,
            string_id: desc.string_id,
            name: desc.name,
            short_name: desc.short_name,
            unit: desc.unit.label(),
            min: desc.min,
            max: desc.max,
            default: desc.default,
            step: desc.step,
            stepped: desc.is_stepped(),
        }
    }
}

pub fn run(args: ParamsArgs) -> Result<()> {
    let schema = ParamStore::schema();

    if args.json {
        let infos: Vec<ParamInfo> = schema.iter().map(ParamInfo::from).collect();
        println!("{}", serde_json::to_string_pretty(&infos)?);
        return Ok(());
    }

    println!("Waveshaper Parameters\n");
    println!(
        "  {:<14} {:<32} {:>8} {:>8} {:>8}  {}",
        "ID", "NAME", "MIN", "MAX", "DEFAULT", "UNIT"
    );
    for desc in &schema {
        println!(
            "  {:<14} {:<32} {:>8} {:>8} {:>8}  {}",
            desc.string_id,
            desc.name,
            desc.min,
            desc.max,
            desc.default,
            desc.unit.label()
        );
    }
    println!("\ntype_select: 1 = sinusoidal, 2 = quadratic, 3 = factor, 4 = gloubi-boulga");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_serializes_every_param() {
        let infos: Vec<ParamInfo> = ParamStore::schema().iter().map(ParamInfo::from).collect();
        let json = serde_json::to_value(&infos).unwrap();
        let array = json.as_array().unwrap();
        assert_eq!(array.len(), 8);
        assert_eq!(array[0]["string_id"], "in_gain");
        assert_eq!(array[0]["unit"], "dB");
        assert_eq!(array[1]["stepped"], true);
    }
}
