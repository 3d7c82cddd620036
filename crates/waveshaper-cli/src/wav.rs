//! WAV input and output through hound.
//!
//! Audio stays interleaved end to end: hound yields frames in that layout and
//! the engine has an interleaved entry point.

use anyhow::{Context, Result};
use clap::ValueEnum;
use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;

/// Output sample encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SampleDepth {
    /// 16-bit PCM
    #[value(name = "16")]
    Pcm16,
    /// 24-bit PCM
    #[value(name = "24")]
    Pcm24,
    /// 32-bit IEEE float
    #[value(name = "32")]
    Float32,
}

impl SampleDepth {
    /// Bits per stored sample.
    pub fn bits(self) -> u16 {
        match self {
            SampleDepth::Pcm16 => 16,
            SampleDepth::Pcm24 => 24,
            SampleDepth::Float32 => 32,
        }
    }

    fn hound_spec(self, channels: u16, sample_rate: u32) -> hound::WavSpec {
        hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: self.bits(),
            sample_format: match self {
                SampleDepth::Float32 => SampleFormat::Float,
                SampleDepth::Pcm16 | SampleDepth::Pcm24 => SampleFormat::Int,
            },
        }
    }
}

/// Decoded interleaved audio.
#[derive(Debug, Clone, PartialEq)]
pub struct WavAudio {
    /// Interleaved samples, nominally in `[-1, 1]`.
    pub samples: Vec<f32>,
    /// Channels per frame.
    pub channels: u16,
    /// Frames per second.
    pub sample_rate: u32,
    /// Bit depth of the source file.
    pub source_bits: u16,
}

impl WavAudio {
    /// Number of complete frames.
    pub fn frames(&self) -> usize {
        self.samples.len() / usize::from(self.channels.max(1))
    }

    /// Length in seconds.
    pub fn duration_secs(&self) -> f32 {
        self.frames() as f32 / self.sample_rate.max(1) as f32
    }
}

/// Decode `path`, scaling integer PCM to `[-1, 1]`.
pub fn read_wav(path: &Path) -> Result<WavAudio> {
    let reader =
        WavReader::open(path).with_context(|| format!("failed to open '{}'", path.display()))?;
    let spec = reader.spec();

    let samples = match spec.sample_format {
        SampleFormat::Float => reader.into_samples::<f32>().collect::<Result<Vec<_>, _>>(),
        SampleFormat::Int => {
            let scale = 1.0 / (1u32 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 * scale))
                .collect::<Result<Vec<_>, _>>()
        }
    }
    .with_context(|| format!("failed to decode '{}'", path.display()))?;

    let audio = WavAudio {
        samples,
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        source_bits: spec.bits_per_sample,
    };
    tracing::debug!(
        path = %path.display(),
        channels = audio.channels,
        sample_rate = audio.sample_rate,
        bits = audio.source_bits,
        frames = audio.frames(),
        "decoded wav"
    );
    Ok(audio)
}

/// Encode `audio` to `path` at `depth`. PCM output is clipped to full scale.
pub fn write_wav(path: &Path, audio: &WavAudio, depth: SampleDepth) -> Result<()> {
    let mut writer = WavWriter::create(path, depth.hound_spec(audio.channels, audio.sample_rate))
        .with_context(|| format!("failed to create '{}'", path.display()))?;

    match depth {
        SampleDepth::Float32 => {
            for &s in &audio.samples {
                writer.write_sample(s)?;
            }
        }
        SampleDepth::Pcm16 | SampleDepth::Pcm24 => {
            let full_scale = (1u32 << (depth.bits() - 1)) as f32;
            for &s in &audio.samples {
                let q = (s * full_scale).round().clamp(-full_scale, full_scale - 1.0);
                writer.write_sample(q as i32)?;
            }
        }
    }

    writer
        .finalize()
        .with_context(|| format!("failed to finish '{}'", path.display()))?;
    tracing::debug!(path = %path.display(), bits = depth.bits(), "encoded wav");
    Ok(())
}
