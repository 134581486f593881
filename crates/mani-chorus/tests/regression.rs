//! Behavioral regression tests for the chorus engine.
//!
//! Each test pins down an observable property of the rendered signal: exact
//! sample values where the math is closed-form (zero depth, predelay,
//! feedback echoes) and tolerances elsewhere.

use mani_chorus::{ChorusEngine, ChorusParam, SOFT_CLIP_GAIN};
use mani_core::InitError;
use std::f32::consts::TAU;

const SAMPLE_RATE: f32 = 44100.0;
/// Predelay in host frames at 44.1 kHz: floor(0.01 · 4 · 44100).
const PREDELAY_FRAMES: usize = 1764;

/// Render `inputs` through `engine` in blocks of `block_size`, advancing the
/// buffer offset the way a host slicing one large buffer would.
fn render(engine: &mut ChorusEngine, inputs: &[Vec<f32>], block_size: usize) -> Vec<Vec<f32>> {
    let frames = inputs[0].len();
    let mut outputs: Vec<Vec<f32>> = inputs.iter().map(|c| vec![0.0; c.len()]).collect();
    let in_refs: Vec<&[f32]> = inputs.iter().map(Vec::as_slice).collect();

    let mut offset = 0;
    while offset < frames {
        let count = block_size.min(frames - offset);
        let mut out_refs: Vec<&mut [f32]> = outputs.iter_mut().map(Vec::as_mut_slice).collect();
        engine.process(count, offset, &in_refs, &mut out_refs);
        offset += count;
    }
    outputs
}

fn sine(freq: f32, amplitude: f32, frames: usize) -> Vec<f32> {
    (0..frames)
        .map(|i| amplitude * (TAU * freq * i as f32 / SAMPLE_RATE).sin())
        .collect()
}

fn impulse(value: f32, frames: usize) -> Vec<f32> {
    let mut signal = vec![0.0; frames];
    signal[0] = value;
    signal
}

/// Engine with Mix already at 1 and every other parameter at its default.
fn fully_wet(channels: usize) -> ChorusEngine {
    let mut engine = ChorusEngine::new(channels, SAMPLE_RATE).unwrap();
    engine.start_ramp(ChorusParam::Mix.id(), 1.0, 0);
    engine
}

#[test]
fn stereo_sine_end_to_end() {
    let mut engine = ChorusEngine::new(2, SAMPLE_RATE).unwrap();
    engine.set_param(ChorusParam::Mix, 0.5);
    engine.set_param(ChorusParam::Rate, 0.5);
    engine.set_param(ChorusParam::Depth, 0.5);

    let input = sine(1000.0, 0.5, 44100);
    let outputs = render(&mut engine, &[input.clone(), input.clone()], 512);

    for (channel, output) in outputs.iter().enumerate() {
        for (i, &s) in output.iter().enumerate() {
            assert!(s.is_finite(), "channel {channel} sample {i} is {s}");
            assert!(s.abs() <= SOFT_CLIP_GAIN + 1e-5, "channel {channel} sample {i} is {s}");
        }
    }

    // Once the ramps have settled the chorus is audible
    let tail = 20_000..input.len();
    let diff: f32 = tail
        .clone()
        .map(|i| (outputs[0][i] - input[i]).abs())
        .sum::<f32>()
        / tail.len() as f32;
    assert!(diff > 0.01, "wet signal indistinguishable from dry: {diff}");

    // Identical inputs and identical per-channel state give identical channels
    assert_eq!(outputs[0], outputs[1]);
}

#[test]
fn stereo_sine_settles_to_saturated_dry() {
    let mut engine = ChorusEngine::new(2, SAMPLE_RATE).unwrap();
    engine.set_parameter(ChorusParam::Depth.id(), 0.0);
    engine.set_parameter(ChorusParam::Rate.id(), 0.0);
    engine.set_parameter(ChorusParam::Mix.id(), 1.0);

    let input = sine(1000.0, 0.5, 8192);
    let outputs = render(&mut engine, &[input.clone(), input.clone()], 512);

    // Mix reaches 1 after its 20 ms internal ramp: floor(0.02 · 4 · 44100) frames
    for (channel, output) in outputs.iter().enumerate() {
        for i in 3528..input.len() {
            let expected = (2.0 * input[i]).tanh() * SOFT_CLIP_GAIN;
            let y = output[i];
            assert!((y - expected).abs() < 1e-5, "channel {channel} sample {i}: {y} vs {expected}");
        }
    }
}

#[test]
fn zero_depth_reads_current_sample() {
    let mut engine = fully_wet(1);
    let input = sine(220.0, 0.8, 2048);
    let output = render(&mut engine, &[input.clone()], 256).remove(0);

    for (i, (&x, &y)) in input.iter().zip(&output).enumerate() {
        let expected = (2.0 * x).tanh() * SOFT_CLIP_GAIN;
        assert!((y - expected).abs() < 1e-5, "sample {i}: {y} vs {expected}");
    }
}

#[test]
fn predelay_shifts_by_ten_internal_milliseconds() {
    let mut engine = fully_wet(1);
    engine.set_param(ChorusParam::Delay, 1.0);

    let output = render(&mut engine, &[impulse(0.5, 4000)], 128).remove(0);
    let echo = 0.5f32.tanh() * SOFT_CLIP_GAIN;

    assert!((output[0] - echo).abs() < 1e-5);
    assert!((output[PREDELAY_FRAMES] - echo).abs() < 1e-5);
    for (i, &s) in output.iter().enumerate() {
        if i != 0 && i != PREDELAY_FRAMES {
            assert!(s.abs() < 1e-7, "unexpected energy at {i}: {s}");
        }
    }
}

#[test]
fn feedback_produces_decaying_echoes() {
    let mut engine = fully_wet(1);
    engine.set_param(ChorusParam::Delay, 1.0);
    engine.set_param(ChorusParam::Feedback, 1.0);

    let output = render(&mut engine, &[impulse(0.5, 4 * PREDELAY_FRAMES)], 300).remove(0);

    let first = 0.5f32.tanh();
    let second = (0.8 * first).tanh();
    assert!((output[PREDELAY_FRAMES] - first.tanh() * SOFT_CLIP_GAIN).abs() < 1e-5);
    assert!((output[2 * PREDELAY_FRAMES] - second.tanh() * SOFT_CLIP_GAIN).abs() < 1e-5);

    let peaks: Vec<f32> = (1..4).map(|k| output[k * PREDELAY_FRAMES]).collect();
    assert!(peaks.windows(2).all(|w| w[1] < w[0] && w[1] > 0.0), "{peaks:?}");
}

#[test]
fn mix_extremes() {
    let input = sine(440.0, 0.7, 8192);

    let mut dry = ChorusEngine::new(1, SAMPLE_RATE).unwrap();
    dry.set_param(ChorusParam::Depth, 1.0);
    dry.set_param(ChorusParam::Feedback, 1.0);
    let dry_out = render(&mut dry, &[input.clone()], 512).remove(0);
    assert_eq!(dry_out, input);

    let mut wet = fully_wet(1);
    let wet_out = render(&mut wet, &[input.clone()], 512).remove(0);
    assert!(
        wet_out
            .iter()
            .zip(&input)
            .any(|(w, x)| (w - x).abs() > 0.05)
    );
}

#[test]
fn mix_change_is_click_free() {
    let mut engine = ChorusEngine::new(1, SAMPLE_RATE).unwrap();
    let input = vec![0.5f32; 8192];

    render(&mut engine, &[input.clone()], 256);
    engine.set_param(ChorusParam::Mix, 1.0);
    let output = render(&mut engine, &[input], 256).remove(0);

    // Wet and dry differ by tanh(1)·1.03 − 0.5 ≈ 0.284, spread over 3528 frames
    let max_step = output
        .windows(2)
        .map(|w| (w[1] - w[0]).abs())
        .fold(0.0f32, f32::max);
    assert!(max_step < 1e-3, "largest step {max_step}");
    assert!((output[8191] - 1.0f32.tanh() * SOFT_CLIP_GAIN).abs() < 1e-5);
}

#[test]
fn mix_ramp_lasts_twenty_internal_milliseconds() {
    let mut engine = ChorusEngine::new(1, SAMPLE_RATE).unwrap();
    engine.set_param(ChorusParam::Mix, 1.0);

    let silence = vec![0.0f32; 3527];
    render(&mut engine, &[silence], 3527);
    assert!(engine.ramped_values().0 < 1.0);

    render(&mut engine, &[vec![0.0f32; 1]], 1);
    assert_eq!(engine.ramped_values().0, 1.0);
}

#[test]
fn rate_and_depth_ramps_are_five_times_longer() {
    let mut engine = ChorusEngine::new(1, SAMPLE_RATE).unwrap();
    engine.set_param(ChorusParam::Depth, 1.0);
    engine.set_param(ChorusParam::Rate, 1.0);

    render(&mut engine, &[vec![0.0f32; 17_639]], 1024);
    let (_, rate, depth) = engine.ramped_values();
    assert!(rate < 1.0 && depth < 1.0);

    render(&mut engine, &[vec![0.0f32; 1]], 1);
    let (_, rate, depth) = engine.ramped_values();
    assert_eq!((rate, depth), (1.0, 1.0));
}

#[test]
fn reset_silences_tail() {
    let mut engine = fully_wet(2);
    engine.set_param(ChorusParam::Feedback, 1.0);
    engine.set_param(ChorusParam::Delay, 1.0);
    engine.set_param(ChorusParam::Depth, 0.8);

    let noise: Vec<f32> = (0..4096).map(|i| ((i * 7919) % 200) as f32 / 100.0 - 1.0).collect();
    render(&mut engine, &[noise.clone(), noise], 512);

    engine.reset();
    let outputs = render(&mut engine, &[vec![0.0; 4096], vec![0.0; 4096]], 512);
    assert!(outputs.iter().flatten().all(|&s| s == 0.0));
    assert_eq!(engine.get_param(ChorusParam::Feedback), 1.0);
    assert_eq!(engine.channel(1).unwrap().write_position(), 4096);
}

#[test]
fn channels_are_independent() {
    let mut engine = fully_wet(2);
    engine.set_param(ChorusParam::Feedback, 1.0);
    engine.set_param(ChorusParam::Depth, 0.6);

    let outputs = render(&mut engine, &[sine(330.0, 0.9, 8192), vec![0.0; 8192]], 512);
    assert!(outputs[1].iter().all(|&s| s == 0.0));
    assert!(outputs[0].iter().any(|&s| s != 0.0));
}

#[test]
fn unknown_parameter_ids() {
    let mut engine = ChorusEngine::new(1, SAMPLE_RATE).unwrap();
    engine.set_parameter(5, 1.0);
    engine.set_parameter(u32::MAX, 1.0);
    engine.start_ramp(17, 1.0, 64);

    assert_eq!(engine.get_parameter(5), 0.0);
    assert_eq!(engine.get_parameter(u32::MAX), 0.0);
    for param in ChorusParam::ALL {
        assert_eq!(engine.get_param(param), 0.0);
    }
}

#[test]
fn toggle_needs_exact_one() {
    let mut engine = fully_wet(1);
    engine.set_param(ChorusParam::Delay, 0.999);

    let output = render(&mut engine, &[impulse(0.5, 2000)], 500).remove(0);
    assert!(output[PREDELAY_FRAMES].abs() < 1e-7);
}

#[test]
fn init_errors_describe_the_problem() {
    let err = ChorusEngine::new(0, SAMPLE_RATE).unwrap_err();
    assert_eq!(err, InitError::NoChannels);
    assert_eq!(err.to_string(), "channel count must be at least 1");

    let err = ChorusEngine::new(2, -48000.0).unwrap_err();
    assert_eq!(err.to_string(), "invalid sample rate: -48000");
}

#[test]
fn reinitialize_changes_geometry() {
    let mut engine = ChorusEngine::new(2, SAMPLE_RATE).unwrap();
    engine.set_param(ChorusParam::Mix, 0.4);
    engine.reinitialize(6, 96000.0).unwrap();

    assert_eq!(engine.channel_count(), 6);
    assert_eq!(engine.buffer_size(), 384_000);
    assert_eq!(engine.tail_frames(), 384_000);
    assert_eq!(engine.dezipper_durations(), (7680, 38_400));
    assert_eq!(engine.get_param(ChorusParam::Mix), 0.4);

    let inputs = vec![vec![0.25f32; 1024]; 6];
    let outputs = render(&mut engine, &inputs, 256);
    assert!(outputs.iter().flatten().all(|s| s.is_finite()));
}
