//! Sine wavetable for the chorus LFO.
//!
//! The LFO reads a precomputed sine table instead of evaluating `sin` per
//! sample. The table covers one full period and is sampled by phase in
//! radians with linear interpolation between neighbouring entries.
//!
//! A [`Wavetable`] is immutable once built. An engine builds one and hands
//! out shared references (`Arc<Wavetable>`) to every channel.

use alloc::vec::Vec;
use core::f32::consts::TAU;
use libm::{ceilf, floorf};

use crate::error::InitError;

/// Number of entries in the sine table.
pub const WAVETABLE_SIZE: usize = 65584;

/// Precomputed single-cycle sine table.
///
/// Entry `i` holds `sin(2π·i/N)`. Lookups map phase `[0, 2π]` onto the
/// index range `[0, N-1]`.
///
/// # Example
///
/// ```rust
/// use core::f32::consts::PI;
/// use mani_core::Wavetable;
///
/// let table = Wavetable::new().unwrap();
/// assert!((table.sample(PI / 2.0) - 1.0).abs() < 1e-3);
/// ```
#[derive(Debug, Clone)]
pub struct Wavetable {
    table: Vec<f32>,
}

impl Wavetable {
    /// Builds the sine table.
    ///
    /// The only failure is the table allocation itself.
    pub fn new() -> Result<Self, InitError> {
        let mut table = Vec::new();
        table
            .try_reserve_exact(WAVETABLE_SIZE)
            .map_err(|_| InitError::Allocation {
                requested: WAVETABLE_SIZE,
            })?;

        let step = core::f64::consts::TAU / WAVETABLE_SIZE as f64;
        table.extend((0..WAVETABLE_SIZE).map(|i| libm::sin(step * i as f64) as f32));

        #[cfg(feature = "tracing")]
        tracing::debug!(entries = WAVETABLE_SIZE, "wavetable built");

        Ok(Self { table })
    }

    /// Number of table entries.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Always `false`; the table is never empty.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Raw table entry at `index`, if in range.
    pub fn entry(&self, index: usize) -> Option<f32> {
        self.table.get(index).copied()
    }

    /// Samples the table at `phase` radians.
    ///
    /// The fractional index is `phase / 2π · (N-1)`. Both neighbouring indices
    /// are clamped into `[0, N-1]`, so phases at or beyond `2π` (and below 0)
    /// read the edge entries instead of indexing past the table.
    #[inline]
    pub fn sample(&self, phase: f32) -> f32 {
        let last = self.table.len() - 1;
        let index = phase / TAU * last as f32;

        let lower = floorf(index);
        let frac = (index - lower).clamp(0.0, 1.0);

        let a = self.table[clamp_index(lower, last)];
        let b = self.table[clamp_index(ceilf(index), last)];
        a + (b - a) * frac
    }
}

#[inline]
fn clamp_index(index: f32, last: usize) -> usize {
    if index <= 0.0 {
        0
    } else if index >= last as f32 {
        last
    } else {
        index as usize
    }
}
