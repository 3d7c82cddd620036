//! File-based rendering command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use waveshaper_config::load_preset;
use waveshaper_core::{linear_to_db, rms};
use waveshaper_effects::{ParamStore, Waveshaper};

use super::common::ParamArgs;
use crate::wav::{SampleDepth, read_wav, write_wav};

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Preset name or TOML file, applied before the flags below
    #[arg(short, long)]
    preset: Option<String>,

    #[command(flatten)]
    params: ParamArgs,

    /// Pass the audio through untouched
    #[arg(long)]
    bypass: bool,

    /// Processing block size in frames
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Output bit depth
    #[arg(long, value_enum, default_value = "32")]
    bit_depth: SampleDepth,
}

pub fn run(args: ProcessArgs) -> Result<()> {
    println!("Reading {}...", args.input.display());
    let mut audio = read_wav(&args.input)?;
    let channels = usize::from(audio.channels);
    let frames = audio.frames();
    println!(
        "  {} frames, {} channel(s), {} Hz, {}-bit, {:.2}s",
        frames,
        channels,
        audio.sample_rate,
        audio.source_bits,
        audio.duration_secs()
    );

    let params = Arc::new(ParamStore::new());
    if let Some(name) = &args.preset {
        let preset = load_preset(name).with_context(|| format!("loading preset '{name}'"))?;
        if let Err(err) = preset.validate() {
            tracing::warn!("preset '{}': {err}; values will be clamped", preset.name);
        }
        println!("Loading preset: {}", preset.name);
        preset.apply_to(&params);
    }
    args.params.apply(&params)?;

    let mut shaper = Waveshaper::new(Arc::clone(&params));
    shaper
        .prepare(audio.sample_rate as f32, args.block_size, channels)
        .context("invalid processing configuration")?;

    let curve = params.curve();
    if args.bypass || params.bypassed() {
        println!("Bypassed: copying audio unchanged");
    } else {
        println!(
            "Processing: {} (amount {}), in {:+.1} dB, out {:+.1} dB",
            curve.name(),
            params.amount(curve),
            params.in_gain_db(),
            params.out_gain_db()
        );
    }

    let input_rms = rms(&audio.samples);
    let input_peak = peak(&audio.samples);

    let pb = ProgressBar::new(frames as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );

    let block_len = args.block_size * channels;
    for (i, block) in audio.samples.chunks_mut(block_len).enumerate() {
        shaper.process_interleaved(block, channels, args.bypass);
        pb.set_position(((i + 1) * args.block_size).min(frames) as u64);
    }
    pb.finish_with_message("done");

    let meter = shaper.meter();
    for ch in 0..channels.min(waveshaper_core::MAX_METER_CHANNELS) {
        tracing::debug!(
            channel = ch,
            input_db = meter.input_db(ch),
            output_db = meter.output_db(ch),
            "last block levels"
        );
    }

    println!("\nStats:");
    println!(
        "  Input:  RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(input_rms),
        linear_to_db(input_peak)
    );
    println!(
        "  Output: RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(rms(&audio.samples)),
        linear_to_db(peak(&audio.samples))
    );

    println!(
        "\nWriting {} ({}-bit)...",
        args.output.display(),
        args.bit_depth.bits()
    );
    write_wav(&args.output, &audio, args.bit_depth)?;
    println!("Done!");

    Ok(())
}

fn peak(samples: &[f32]) -> f32 {
    samples.iter().map(|s| s.abs()).fold(0.0, f32::max)
}
