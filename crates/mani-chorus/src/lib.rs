//! Mani Chorus - wavetable-modulated multi-channel chorus
//!
//! A chorus that delays each channel by a time modulated by a sine LFO,
//! saturates the delayed signal together with the dry input and blends the
//! result back with the dry signal.
//!
//! # Signal Flow
//!
//! ```text
//! in ──┬──────────────────────────────────────┬──► mix ──► out
//!      │                                      │     ▲
//!      └─► delay line ──► fractional read ──► tanh(delayed + dry) · 1.03
//!             ▲                 ▲      │
//!             │         LFO offset     │
//!             └── tanh(slot + 0.8·delayed) (feedback on)
//! ```
//!
//! # Parameters
//!
//! | Parameter | Range | Behavior |
//! |-----------|-------|----------|
//! | [`ChorusParam::Mix`] | 0–1 | dry/wet blend, 20 ms dezipper |
//! | [`ChorusParam::Rate`] | 0–1 | LFO 0.05–20 Hz (quartic), 100 ms dezipper |
//! | [`ChorusParam::Depth`] | 0–1 | 0–5 ms modulation (cubic), 100 ms dezipper |
//! | [`ChorusParam::Feedback`] | off/on | feeds the delayed signal back into the line |
//! | [`ChorusParam::Delay`] | off/on | adds 10 ms predelay |
//!
//! # Example
//!
//! ```rust
//! use mani_chorus::{ChorusEngine, ChorusParam};
//!
//! let mut engine = ChorusEngine::new(1, 48000.0).unwrap();
//! let control = engine.params();
//! control.set(ChorusParam::Mix, 1.0);
//! control.set(ChorusParam::Delay, 1.0);
//!
//! let input = vec![0.0f32; 512];
//! let mut output = vec![0.0f32; 512];
//! engine.process(512, 0, &[&input], &mut [&mut output]);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod engine;
pub mod params;
pub mod state;

pub use engine::{
    ChorusEngine, FEEDBACK_GAIN, MAX_DEPTH_SECONDS, MAX_RATE_HZ, MIN_RATE_HZ,
    MIX_DEZIPPER_SECONDS, MODULATION_DEZIPPER_FACTOR, OVERSAMPLING, PREDELAY_SECONDS,
    SOFT_CLIP_GAIN,
};
pub use params::{ChorusParam, ChorusParams, lfo_rate_hz, modulation_depth_seconds};
pub use state::ChannelDelayState;
