//! Mathematical utility functions for DSP.
//!
//! Allocation-free helpers shared by the chorus engine and suitable for
//! `no_std`.
//!
//! # Saturation
//!
//! - [`soft_clip`] - Hyperbolic tangent saturation, output in (-1, 1)
//!
//! # Circular Indexing
//!
//! - [`wrap_phase`] - Fold a phase in radians into `[0, 2π)`
//! - [`wrap_position`] - Fold a fractional buffer position into `[0, len)`
//! - [`wrap_index`] - Fold a signed integer index into `[0, len)`
//!
//! # Interpolation
//!
//! - [`lerp`] - Linear interpolation

use core::f32::consts::TAU;
use libm::{floorf, tanhf};

/// Soft clip using hyperbolic tangent.
///
/// Smooth saturation that approaches ±1 asymptotically.
///
/// # Arguments
/// * `x` - Input sample (any range)
///
/// # Returns
/// Soft-clipped output in range (-1, 1)
#[inline]
pub fn soft_clip(x: f32) -> f32 {
    tanhf(x)
}

/// Linear interpolation between `a` and `b`.
///
/// # Example
/// ```rust
/// use mani_core::lerp;
///
/// assert_eq!(lerp(0.0, 10.0, 0.25), 2.5);
/// ```
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Wrap a phase in radians into `[0, 2π)`.
///
/// Phase accumulators only ever move forward by less than a full turn per
/// sample, so the common case is a single subtraction. Arbitrary inputs are
/// still folded correctly.
///
/// # Example
/// ```rust
/// use core::f32::consts::TAU;
/// use mani_core::wrap_phase;
///
/// assert!((wrap_phase(TAU + 1.0) - 1.0).abs() < 1e-5);
/// assert!(wrap_phase(-0.5) > 0.0);
/// ```
#[inline]
pub fn wrap_phase(phase: f32) -> f32 {
    let mut wrapped = phase;
    if wrapped >= TAU {
        wrapped -= TAU;
    }
    if !(0.0..TAU).contains(&wrapped) {
        wrapped -= TAU * floorf(wrapped / TAU);
    }
    // Rounding in the subtraction can land exactly on TAU
    if wrapped >= TAU || wrapped < 0.0 { 0.0 } else { wrapped }
}

/// Wrap a fractional buffer position into `[0, len)`.
///
/// `len` must be non-zero.
#[inline]
pub fn wrap_position(position: f32, len: usize) -> f32 {
    let size = len as f32;
    let mut wrapped = position;
    if wrapped < 0.0 {
        wrapped += size;
    }
    if !(0.0..size).contains(&wrapped) {
        wrapped -= size * floorf(wrapped / size);
    }
    if wrapped >= size || wrapped < 0.0 { 0.0 } else { wrapped }
}

/// Wrap a signed index into `[0, len)`.
///
/// `len` must be non-zero.
///
/// # Example
/// ```rust
/// use mani_core::wrap_index;
///
/// assert_eq!(wrap_index(-1, 8), 7);
/// assert_eq!(wrap_index(8, 8), 0);
/// assert_eq!(wrap_index(3, 8), 3);
/// ```
#[inline]
pub fn wrap_index(index: i64, len: usize) -> usize {
    index.rem_euclid(len as i64) as usize
}
