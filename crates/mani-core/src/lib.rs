//! Mani Core - DSP primitives for the mani chorus
//!
//! This crate provides the leaf building blocks of the chorus engine, designed
//! for real-time audio processing with zero allocation in the audio path.
//!
//! # Core Abstractions
//!
//! ## Wavetable
//!
//! - [`Wavetable`] - Precomputed sine table with linearly interpolated lookup,
//!   built once and shared read-only between channels
//!
//! ## Parameter Ramping
//!
//! Sample-accurate linear ramps for click-free parameter changes:
//!
//! - [`ParameterRamper`] - Render-side ramp state, stepped once per sample
//! - [`UiValue`] - Lock-free cell holding the last externally requested target
//!
//! ## Parameter Metadata
//!
//! - [`ParameterInfo`], [`ParamDescriptor`], [`ParamId`], [`ParamUnit`], [`ParamFlags`]
//!
//! ## Utilities
//!
//! - Math functions: [`soft_clip`], [`lerp`], [`wrap_phase`], [`wrap_position`], [`wrap_index`]
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible for embedded audio applications.
//! Disable the default `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! mani-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use mani_core::{ParameterRamper, Wavetable};
//!
//! let table = Wavetable::new().unwrap();
//! let mut depth = ParameterRamper::new(0.0);
//!
//! // Control thread: request a new value
//! depth.set_ui_value(0.8);
//!
//! // Render thread: once per block, then once per sample
//! depth.dezipper_check(64);
//! for _ in 0..64 {
//!     let level = depth.get_and_step();
//!     let _lfo = table.sample(level * core::f32::consts::PI);
//! }
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: No allocations, locks or I/O in per-sample paths
//! - **No dependencies on std**: Pure `no_std` with `libm` for math
//! - **Lock-free control**: Control threads only touch atomics

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod error;
pub mod math;
pub mod param_info;
pub mod ramper;
pub mod wavetable;

// Re-export main types at crate root
pub use error::InitError;
pub use math::{lerp, soft_clip, wrap_index, wrap_phase, wrap_position};
pub use param_info::{ParamDescriptor, ParamFlags, ParamId, ParamUnit, ParameterInfo};
pub use ramper::{ParameterRamper, UiValue};
pub use wavetable::{WAVETABLE_SIZE, Wavetable};
