//! Audio file I/O and offline hosting for the mani chorus.
//!
//! This crate provides:
//!
//! - **WAV file I/O**: [`read_wav`] and [`write_wav`] for loading/saving
//!   multi-channel audio as de-interleaved channel buffers
//! - **Offline hosting**: [`OfflineHost`] for rendering whole files through a
//!   [`ChorusEngine`](mani_chorus::ChorusEngine) block by block
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mani_chorus::{ChorusEngine, ChorusParam};
//! use mani_io::{OfflineHost, read_wav, write_wav};
//!
//! // Load audio file
//! let (channels, spec) = read_wav("input.wav")?;
//!
//! // Render through the chorus
//! let engine = ChorusEngine::new(channels.len(), spec.sample_rate as f32)?;
//! engine.set_param(ChorusParam::Mix, 0.5);
//! let mut host = OfflineHost::new(engine, 512)?;
//! let processed = host.process(&channels);
//!
//! // Save result
//! write_wav("output.wav", &processed, spec)?;
//! ```

mod host;
mod wav;

pub use host::OfflineHost;
pub use wav::{
    WavFormat, WavInfo, WavSpec, deinterleave, interleave, read_wav, read_wav_info, write_wav,
};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Engine construction failed.
    #[error("Engine initialization failed: {0}")]
    Init(#[from] mani_core::InitError),

    /// The requested bit depth cannot be written.
    #[error("Unsupported bit depth: {0} (expected 16, 24, or 32)")]
    UnsupportedBitDepth(u16),

    /// Channel buffers handed to the writer disagree with the spec.
    #[error("Channel layout mismatch: {0}")]
    ChannelMismatch(String),

    /// Block size of zero.
    #[error("Block size must be at least 1")]
    InvalidBlockSize,
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
