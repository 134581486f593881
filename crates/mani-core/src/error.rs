//! Construction errors.
//!
//! Processing never fails; everything that can go wrong happens while buffers
//! and tables are being built. A failed construction never yields a partially
//! initialized value.

/// Errors raised while building a wavetable or an engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InitError {
    /// The engine was asked to run with zero audio channels.
    NoChannels,
    /// The host sample rate was zero, negative or not finite.
    InvalidSampleRate(f32),
    /// The sample rate is too low to give the delay buffer any samples.
    ZeroBufferSize,
    /// A buffer could not be allocated.
    Allocation {
        /// Number of `f32` samples that were requested.
        requested: usize,
    },
}

impl core::fmt::Display for InitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NoChannels => write!(f, "channel count must be at least 1"),
            Self::InvalidSampleRate(rate) => write!(f, "invalid sample rate: {rate}"),
            Self::ZeroBufferSize => write!(f, "delay buffer size must be at least 1 sample"),
            Self::Allocation { requested } => {
                write!(f, "failed to allocate buffer of {requested} samples")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InitError {}
