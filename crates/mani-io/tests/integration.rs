//! Integration tests for mani-io WAV I/O and the offline host.

use mani_chorus::{ChorusEngine, ChorusParam};
use mani_io::{Error, OfflineHost, WavFormat, WavSpec, read_wav, read_wav_info, write_wav};
use tempfile::NamedTempFile;

fn sine_wave(sample_rate: u32, freq_hz: f32, num_samples: usize) -> Vec<f32> {
    (0..num_samples)
        .map(|i| (2.0 * std::f32::consts::PI * freq_hz * i as f32 / sample_rate as f32).sin())
        .collect()
}

// ---------------------------------------------------------------------------
// WAV round trips
// ---------------------------------------------------------------------------

#[test]
fn wav_roundtrip_multichannel_f32() {
    let sr = 48000;
    let channels: Vec<Vec<f32>> = [220.0, 330.0, 440.0, 550.0]
        .iter()
        .map(|&f| sine_wave(sr, f, 4800))
        .collect();
    let spec = WavSpec {
        channels: 4,
        sample_rate: sr,
        bits_per_sample: 32,
    };

    let file = NamedTempFile::new().unwrap();
    write_wav(file.path(), &channels, spec).unwrap();

    let (loaded, loaded_spec) = read_wav(file.path()).unwrap();
    assert_eq!(loaded_spec, spec);
    assert_eq!(loaded, channels);
}

#[test]
fn wav_roundtrip_24bit_stereo() {
    let sr = 44100;
    let channels = vec![sine_wave(sr, 440.0, 2000), sine_wave(sr, 880.0, 2000)];
    let spec = WavSpec {
        channels: 2,
        sample_rate: sr,
        bits_per_sample: 24,
    };

    let file = NamedTempFile::new().unwrap();
    write_wav(file.path(), &channels, spec).unwrap();

    let (loaded, _) = read_wav(file.path()).unwrap();
    for (orig, back) in channels.iter().zip(&loaded) {
        assert_eq!(orig.len(), back.len());
        for (a, b) in orig.iter().zip(back) {
            assert!((a - b).abs() < 1e-5, "{a} vs {b}");
        }
    }
}

#[test]
fn wav_info_reports_layout() {
    let spec = WavSpec {
        channels: 3,
        sample_rate: 32000,
        bits_per_sample: 16,
    };
    let file = NamedTempFile::new().unwrap();
    write_wav(file.path(), &vec![vec![0.0; 16000]; 3], spec).unwrap();

    let info = read_wav_info(file.path()).unwrap();
    assert_eq!(info.channels, 3);
    assert_eq!(info.num_frames, 16000);
    assert_eq!(info.format, WavFormat::Pcm);
    assert!((info.duration_secs - 0.5).abs() < 1e-9);
}

#[test]
fn missing_file_is_a_wav_error() {
    let err = read_wav("/nonexistent/definitely/missing.wav").unwrap_err();
    assert!(matches!(err, Error::Wav(_)));
}

// ---------------------------------------------------------------------------
// Engine errors surface through the I/O error type
// ---------------------------------------------------------------------------

#[test]
fn init_error_converts() {
    fn build() -> mani_io::Result<ChorusEngine> {
        Ok(ChorusEngine::new(0, 48000.0)?)
    }
    let err = build().unwrap_err();
    assert!(matches!(err, Error::Init(_)));
    assert!(err.to_string().contains("channel count"));
}

// ---------------------------------------------------------------------------
// File -> chorus -> file
// ---------------------------------------------------------------------------

#[test]
fn render_file_through_chorus() {
    let sr = 44100;
    let input = vec![
        sine_wave(sr, 1000.0, sr as usize)
            .into_iter()
            .map(|s| s * 0.5)
            .collect::<Vec<f32>>(),
        sine_wave(sr, 500.0, sr as usize)
            .into_iter()
            .map(|s| s * 0.5)
            .collect(),
    ];
    let spec = WavSpec {
        channels: 2,
        sample_rate: sr,
        bits_per_sample: 32,
    };

    let in_file = NamedTempFile::new().unwrap();
    write_wav(in_file.path(), &input, spec).unwrap();

    let (channels, read_spec) = read_wav(in_file.path()).unwrap();
    let engine = ChorusEngine::new(channels.len(), read_spec.sample_rate as f32).unwrap();
    engine.set_param(ChorusParam::Mix, 0.5);
    engine.set_param(ChorusParam::Rate, 0.3);
    engine.set_param(ChorusParam::Depth, 0.6);
    engine.set_param(ChorusParam::Feedback, 1.0);

    let mut host = OfflineHost::new(engine, 512).unwrap();
    let output = host.process(&channels);

    let out_file = NamedTempFile::new().unwrap();
    let out_spec = WavSpec {
        bits_per_sample: 16,
        ..read_spec
    };
    write_wav(out_file.path(), &output, out_spec).unwrap();

    let (loaded, loaded_spec) = read_wav(out_file.path()).unwrap();
    assert_eq!(loaded_spec.channels, 2);
    assert_eq!(loaded[0].len(), sr as usize);
    assert!(loaded.iter().flatten().all(|s| s.is_finite() && s.abs() <= 1.03));
    assert_ne!(loaded[0], loaded[1]);
}
