//! Per-channel delay line and LFO phase.
//!
//! Each audio channel owns one [`ChannelDelayState`]: a circular buffer sized
//! to one second at the internal (oversampled) rate, the position the next
//! input sample is written to, and the channel's LFO phase in radians.
//!
//! Reads are fractional: the read position `write_position - offset` is
//! wrapped into the buffer and linearly interpolated between its floor and
//! ceil slots, each wrapped independently.

use alloc::vec::Vec;
use libm::{ceilf, floorf};
use mani_core::{InitError, lerp, soft_clip, wrap_index, wrap_phase, wrap_position};

use crate::engine::FEEDBACK_GAIN;

/// Circular sample buffer plus LFO phase accumulator for one channel.
///
/// # Invariants
///
/// - `write_position() < len()`
/// - `0 ≤ lfo_phase() < 2π`
/// - every read or write lands in `[0, len())`
#[derive(Debug, Clone)]
pub struct ChannelDelayState {
    buffer: Vec<f32>,
    write_pos: usize,
    lfo_phase: f32,
}

impl ChannelDelayState {
    /// Allocate a zeroed buffer of `buffer_size` samples.
    pub fn new(buffer_size: usize) -> Result<Self, InitError> {
        if buffer_size == 0 {
            return Err(InitError::ZeroBufferSize);
        }

        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(buffer_size)
            .map_err(|_| InitError::Allocation {
                requested: buffer_size,
            })?;
        buffer.resize(buffer_size, 0.0);

        Ok(Self {
            buffer,
            write_pos: 0,
            lfo_phase: 0.0,
        })
    }

    /// Zero the buffer, rewind the write position and the LFO phase.
    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
        self.lfo_phase = 0.0;
    }

    /// Buffer length in samples.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Always `false`; construction rejects empty buffers.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Raw buffer contents.
    pub fn buffer(&self) -> &[f32] {
        &self.buffer
    }

    /// Slot the next input sample goes to.
    #[inline]
    pub fn write_position(&self) -> usize {
        self.write_pos
    }

    /// LFO phase in radians.
    #[inline]
    pub fn lfo_phase(&self) -> f32 {
        self.lfo_phase
    }

    /// Advance the LFO phase by `increment` radians, wrapping into `[0, 2π)`.
    #[inline]
    pub fn advance_lfo(&mut self, increment: f32) {
        self.lfo_phase = wrap_phase(self.lfo_phase + increment);
    }

    /// Store `sample` at the write position.
    #[inline]
    pub fn write(&mut self, sample: f32) {
        self.buffer[self.write_pos] = sample;
    }

    /// Wrapped fractional read position and its floor/ceil slot indices for a
    /// read `offset` samples behind the write position.
    #[inline]
    pub fn read_indices(&self, offset: f32) -> (usize, usize, f32) {
        let len = self.buffer.len();
        let position = wrap_position(self.write_pos as f32 - offset, len);
        let lower = floorf(position);

        let floor_index = wrap_index(lower as i64, len);
        let ceil_index = wrap_index(ceilf(position) as i64, len);
        (floor_index, ceil_index, position - lower)
    }

    /// Linearly interpolated sample `offset` samples behind the write position.
    ///
    /// An offset of zero reads the sample just written.
    #[inline]
    pub fn read_interpolated(&self, offset: f32) -> f32 {
        let (floor_index, ceil_index, frac) = self.read_indices(offset);
        lerp(self.buffer[floor_index], self.buffer[ceil_index], frac)
    }

    /// Mix the delayed signal back into the slot at the write position.
    ///
    /// The slot becomes `tanh(slot + delayed · 0.8)`, bounding the loop.
    #[inline]
    pub fn feed_back(&mut self, delayed: f32) {
        let slot = &mut self.buffer[self.write_pos];
        *slot = soft_clip(*slot + delayed * FEEDBACK_GAIN);
    }

    /// Move the write position one slot forward, wrapping at the end.
    #[inline]
    pub fn advance(&mut self) {
        self.write_pos += 1;
        if self.write_pos >= self.buffer.len() {
            self.write_pos = 0;
        }
    }
}
