//! Waveshaper CLI - offline rendering and preset management.

mod commands;
mod wav;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "waveshaper")]
#[command(author, version, about = "Waveshaper distortion CLI", long_about = None)]
struct Cli {
    /// Log at debug level (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a WAV file through the waveshaper
    Process(commands::process::ProcessArgs),

    /// List the parameters and their ranges
    Params(commands::params::ParamsArgs),

    /// Print a transfer curve as CSV
    Curve(commands::curve::CurveArgs),

    /// List, show and save presets
    Presets(commands::presets::PresetsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Process(args) => commands::process::run(args),
        Commands::Params(args) => commands::params::run(args),
        Commands::Curve(args) => commands::curve::run(args),
        Commands::Presets(args) => commands::presets::run(args),
    }
}
