//! File-based chorus processing command.

use super::{parse_bit_depth, parse_level};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use mani_chorus::{ChorusEngine, ChorusParam};
use mani_io::{OfflineHost, WavSpec, read_wav, write_wav};
use std::path::PathBuf;

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Dry/wet mix (0-1)
    #[arg(long, default_value = "0.5", value_parser = parse_level)]
    mix: f32,

    /// LFO rate (0-1, maps to 0.05-20 Hz)
    #[arg(long, default_value = "0.3", value_parser = parse_level)]
    rate: f32,

    /// Modulation depth (0-1, maps to 0-5 ms)
    #[arg(long, default_value = "0.5", value_parser = parse_level)]
    depth: f32,

    /// Feed the delayed signal back into the delay line
    #[arg(long)]
    feedback: bool,

    /// Add 10 ms predelay
    #[arg(long)]
    predelay: bool,

    /// Processing block size
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32", value_parser = parse_bit_depth)]
    bit_depth: u16,
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    println!("Reading {}...", args.input.display());
    let (channels, spec) = read_wav(&args.input)?;
    let frames = channels.first().map_or(0, Vec::len);
    let sample_rate = spec.sample_rate as f32;

    println!(
        "  {} channel(s), {} frames, {} Hz, {:.2}s",
        channels.len(),
        frames,
        spec.sample_rate,
        frames as f32 / sample_rate
    );
    if channels.is_empty() {
        anyhow::bail!("Input file has no channels");
    }

    let mut engine = ChorusEngine::new(channels.len(), sample_rate)?;
    // Start at the requested settings instead of ramping up from zero
    engine.start_ramp(ChorusParam::Mix.id(), args.mix, 0);
    engine.start_ramp(ChorusParam::Rate.id(), args.rate, 0);
    engine.start_ramp(ChorusParam::Depth.id(), args.depth, 0);
    engine.set_param(ChorusParam::Feedback, if args.feedback { 1.0 } else { 0.0 });
    engine.set_param(ChorusParam::Delay, if args.predelay { 1.0 } else { 0.0 });

    tracing::info!(
        mix = args.mix,
        rate = args.rate,
        depth = args.depth,
        feedback = args.feedback,
        predelay = args.predelay,
        "chorus settings"
    );

    let mut host = OfflineHost::new(engine, args.block_size)?;

    let pb = ProgressBar::new(frames as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );
    let output = host.process_with_progress(&channels, |done| pb.set_position(done as u64));
    pb.finish_with_message("done");

    let input_stats = SignalStats::measure(&channels);
    let output_stats = SignalStats::measure(&output);

    println!("\nStats:");
    println!(
        "  Input:  RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(input_stats.rms),
        linear_to_db(input_stats.peak)
    );
    println!(
        "  Output: RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(output_stats.rms),
        linear_to_db(output_stats.peak)
    );

    let out_spec = WavSpec {
        bits_per_sample: args.bit_depth,
        ..spec
    };

    println!("\nWriting {}...", args.output.display());
    write_wav(&args.output, &output, out_spec)?;
    println!("Done!");

    Ok(())
}

/// RMS and peak level across every channel.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SignalStats {
    rms: f32,
    peak: f32,
}

impl SignalStats {
    fn measure(channels: &[Vec<f32>]) -> Self {
        let count: usize = channels.iter().map(Vec::len).sum();
        if count == 0 {
            return Self { rms: 0.0, peak: 0.0 };
        }
        let sum: f64 = channels
            .iter()
            .flatten()
            .map(|&s| f64::from(s) * f64::from(s))
            .sum();
        let peak = channels.iter().flatten().map(|s| s.abs()).fold(0.0, f32::max);

        Self {
            rms: (sum / count as f64).sqrt() as f32,
            peak,
        }
    }
}

fn linear_to_db(linear: f32) -> f32 {
    if linear <= 0.0 {
        -120.0
    } else {
        20.0 * linear.log10()
    }
}
