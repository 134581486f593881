//! Test tone generation command.

use super::parse_bit_depth;
use clap::Args;
use mani_io::{WavSpec, write_wav};
use std::f32::consts::TAU;
use std::path::PathBuf;

#[derive(Args)]
pub struct GenerateArgs {
    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Frequency in Hz
    #[arg(long, default_value = "440.0")]
    freq: f32,

    /// Duration in seconds
    #[arg(long, default_value = "1.0")]
    duration: f32,

    /// Sample rate
    #[arg(long, default_value = "48000")]
    sample_rate: u32,

    /// Number of channels
    #[arg(long, default_value = "2")]
    channels: u16,

    /// Amplitude (0-1)
    #[arg(long, default_value = "0.8")]
    amplitude: f32,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32", value_parser = parse_bit_depth)]
    bit_depth: u16,
}

pub fn run(args: GenerateArgs) -> anyhow::Result<()> {
    if args.channels == 0 {
        anyhow::bail!("Channel count must be at least 1");
    }
    if args.sample_rate == 0 {
        anyhow::bail!("Sample rate must be positive");
    }
    if !(args.duration.is_finite() && args.duration >= 0.0) {
        anyhow::bail!("Invalid duration: {}", args.duration);
    }

    let frames = (args.duration * args.sample_rate as f32) as usize;
    let tone = sine_tone(args.freq, args.amplitude, args.sample_rate, frames);
    let channels = vec![tone; usize::from(args.channels)];

    let spec = WavSpec {
        channels: args.channels,
        sample_rate: args.sample_rate,
        bits_per_sample: args.bit_depth,
    };
    write_wav(&args.output, &channels, spec)?;

    println!(
        "Generated {:.1} Hz tone ({:.2}s, {} channel(s)) -> {}",
        args.freq,
        args.duration,
        args.channels,
        args.output.display()
    );
    Ok(())
}

fn sine_tone(freq: f32, amplitude: f32, sample_rate: u32, frames: usize) -> Vec<f32> {
    let increment = freq * TAU / sample_rate as f32;
    let mut phase = 0.0f32;
    (0..frames)
        .map(|_| {
            let sample = amplitude * phase.sin();
            phase = (phase + increment) % TAU;
            sample
        })
        .collect()
}
