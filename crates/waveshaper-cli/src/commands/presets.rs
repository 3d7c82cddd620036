//! Preset management commands.

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};
use waveshaper_config::{
    Preset, ensure_user_presets_dir, factory_presets, list_user_presets, load_preset,
    paths::preset_file_stem, user_presets_dir,
};
use waveshaper_effects::{ParamKey, ParamStore};

use super::common::ParamArgs;

#[derive(Args)]
pub struct PresetsArgs {
    #[command(subcommand)]
    command: PresetsCommand,
}

#[derive(Subcommand)]
enum PresetsCommand {
    /// List available presets (factory and user)
    List,

    /// Show the parameters of a preset
    Show {
        /// Preset name or path
        name: String,
    },

    /// Save a parameter set as a user preset
    Save {
        /// Name for the new preset
        name: String,

        /// Start from this preset instead of the defaults
        #[arg(long)]
        from: Option<String>,

        #[command(flatten)]
        params: ParamArgs,

        /// Description of the preset
        #[arg(short, long)]
        description: Option<String>,

        /// Overwrite if the preset already exists
        #[arg(long)]
        force: bool,
    },
}

pub fn run(args: PresetsArgs) -> Result<()> {
    match args.command {
        PresetsCommand::List => list(),
        PresetsCommand::Show { name } => show(&name),
        PresetsCommand::Save {
            name,
            from,
            params,
            description,
            force,
        } => save(&name, from.as_deref(), &params, description, force),
    }
}

fn list() -> Result<()> {
    println!("Factory presets:");
    for preset in factory_presets() {
        println!(
            "  {:<16} {:<14} {}",
            preset.name,
            preset.curve().name(),
            preset.description.as_deref().unwrap_or("")
        );
    }

    println!("\nUser presets ({}):", user_presets_dir().display());
    let user = list_user_presets();
    if user.is_empty() {
        println!("  (none)");
    }
    for path in user {
        match Preset::load(&path) {
            Ok(preset) => println!("  {:<16} {}", preset.name, path.display()),
            Err(err) => println!("  {:<16} (unreadable: {err})", path.display()),
        }
    }
    Ok(())
}

fn show(name: &str) -> Result<()> {
    let preset = load_preset(name)?;
    println!("{}", preset.name);
    if let Some(desc) = &preset.description {
        println!("  {desc}");
    }
    println!();
    for key in ParamKey::ALL {
        let desc = key.descriptor();
        let marker = if preset.params.contains_key(key.string_id()) {
            ""
        } else {
            "  (default)"
        };
        println!(
            "  {:<14} {:>8}{}{}",
            key.string_id(),
            preset.get(key),
            desc.unit.suffix(),
            marker
        );
    }
    if let Err(err) = preset.validate() {
        println!("\nwarning: {err}");
    }
    Ok(())
}

fn save(
    name: &str,
    from: Option<&str>,
    params: &ParamArgs,
    description: Option<String>,
    force: bool,
) -> Result<()> {
    let store = ParamStore::new();
    if let Some(base) = from {
        load_preset(base)?.apply_to(&store);
    }
    params.apply(&store)?;

    let mut preset = Preset::from_store(name, &store);
    preset.description = description;

    let dir = ensure_user_presets_dir()?;
    let path = dir.join(format!("{}.toml", preset_file_stem(name)));
    if path.exists() && !force {
        bail!(
            "preset '{}' already exists at {} (use --force to overwrite)",
            name,
            path.display()
        );
    }

    preset
        .save(&path)
        .with_context(|| format!("saving preset '{name}'"))?;
    println!("Saved {}", path.display());
    Ok(())
}
