//! Multi-channel wavetable chorus engine.
//!
//! [`ChorusEngine`] renders host-supplied blocks: per sample it steps the
//! three parameter ramps, reads the channel's LFO from the shared wavetable,
//! writes the input into the channel's delay line, reads it back at a
//! modulated fractional offset and blends the saturated wet signal with the
//! dry input.
//!
//! ## Internal Rate
//!
//! All modulation math runs at four times the host rate: buffer length,
//! depth and predelay in samples, the LFO phase increment and the dezipper
//! durations are computed from `4 · sample_rate`. The delay line is still
//! written once per host frame, so these quantities stretch accordingly in
//! real time. This is part of the effect's sound and must not change.
//!
//! ## Threading
//!
//! `process`, `start_ramp`, `reset` and `reinitialize` take `&mut self` and
//! belong to the render thread. Parameter requests go through `&self`
//! ([`set_parameter`](ChorusEngine::set_parameter)) or a [`ChorusParams`]
//! handle from [`params`](ChorusEngine::params), both lock-free.

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::f32::consts::TAU;
use mani_core::{InitError, ParameterRamper, Wavetable, soft_clip};

use crate::params::{ChorusParam, ChorusParams, lfo_rate_hz};
use crate::state::ChannelDelayState;

/// Maximum modulation depth in seconds (5 ms).
pub const MAX_DEPTH_SECONDS: f32 = 0.005;
/// Slowest LFO rate in Hz.
pub const MIN_RATE_HZ: f32 = 0.05;
/// Fastest LFO rate in Hz.
pub const MAX_RATE_HZ: f32 = 20.0;
/// Internal processing rate as a multiple of the host rate.
pub const OVERSAMPLING: u32 = 4;
/// Predelay added to the read offset when Delay is on, in seconds.
pub const PREDELAY_SECONDS: f64 = 0.01;
/// Dezipper ramp length for Mix, in seconds.
pub const MIX_DEZIPPER_SECONDS: f64 = 0.02;
/// Rate and Depth dezipper ramps are this many Mix ramps long (100 ms).
pub const MODULATION_DEZIPPER_FACTOR: u32 = 5;
/// Gain applied to the delayed signal on the feedback path.
pub const FEEDBACK_GAIN: f32 = 0.8;
/// Makeup gain after the wet soft clipper.
pub const SOFT_CLIP_GAIN: f32 = 1.03;

/// Wavetable-modulated chorus over any number of channels.
///
/// # Example
///
/// ```rust
/// use mani_chorus::{ChorusEngine, ChorusParam};
///
/// let mut engine = ChorusEngine::new(2, 44100.0).unwrap();
/// engine.set_param(ChorusParam::Mix, 0.5);
/// engine.set_param(ChorusParam::Depth, 0.6);
/// engine.set_param(ChorusParam::Rate, 0.3);
///
/// let left = vec![0.25f32; 256];
/// let right = vec![-0.25f32; 256];
/// let mut out_l = vec![0.0f32; 256];
/// let mut out_r = vec![0.0f32; 256];
///
/// engine.process(
///     256,
///     0,
///     &[&left, &right],
///     &mut [&mut out_l, &mut out_r],
/// );
/// assert!(out_l.iter().all(|s| s.is_finite()));
/// ```
#[derive(Debug)]
pub struct ChorusEngine {
    wavetable: Arc<Wavetable>,
    channels: Vec<ChannelDelayState>,
    mix: ParameterRamper,
    rate: ParameterRamper,
    depth: ParameterRamper,
    params: ChorusParams,
    sample_rate: f32,
    internal_rate: f32,
    mix_dezipper: u32,
    modulation_dezipper: u32,
}

impl ChorusEngine {
    /// Build an engine for `channel_count` channels at the host `sample_rate`.
    ///
    /// Allocates the wavetable and one delay buffer per channel. Any failure
    /// is returned before an engine exists.
    pub fn new(channel_count: usize, sample_rate: f32) -> Result<Self, InitError> {
        let layout = Layout::new(channel_count, sample_rate)?;
        let wavetable = Arc::new(Wavetable::new()?);
        let channels = build_channels(channel_count, layout.buffer_size)?;

        let mix = ParameterRamper::new(ChorusParam::Mix.descriptor().default);
        let rate = ParameterRamper::new(ChorusParam::Rate.descriptor().default);
        let depth = ParameterRamper::new(ChorusParam::Depth.descriptor().default);
        let params = ChorusParams::new(mix.ui_cell(), rate.ui_cell(), depth.ui_cell());

        #[cfg(feature = "tracing")]
        tracing::debug!(
            channels = channel_count,
            sample_rate,
            buffer_size = layout.buffer_size,
            "chorus engine initialized"
        );

        Ok(Self {
            wavetable,
            channels,
            mix,
            rate,
            depth,
            params,
            sample_rate,
            internal_rate: layout.internal_rate,
            mix_dezipper: layout.mix_dezipper,
            modulation_dezipper: layout.modulation_dezipper,
        })
    }

    /// Rebuild the channel state for a new channel count or sample rate.
    ///
    /// On error the engine is left exactly as it was. On success every
    /// buffer is fresh and the rampers rest on their UI targets.
    pub fn reinitialize(&mut self, channel_count: usize, sample_rate: f32) -> Result<(), InitError> {
        let layout = Layout::new(channel_count, sample_rate)?;
        let channels = build_channels(channel_count, layout.buffer_size)?;

        self.channels = channels;
        self.sample_rate = sample_rate;
        self.internal_rate = layout.internal_rate;
        self.mix_dezipper = layout.mix_dezipper;
        self.modulation_dezipper = layout.modulation_dezipper;
        self.mix.snap_to_ui();
        self.rate.snap_to_ui();
        self.depth.snap_to_ui();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            channels = channel_count,
            sample_rate,
            buffer_size = layout.buffer_size,
            "chorus engine reinitialized"
        );

        Ok(())
    }

    /// Zero every delay buffer and LFO phase.
    ///
    /// Parameter targets and in-flight ramps are untouched.
    pub fn reset(&mut self) {
        for state in &mut self.channels {
            state.reset();
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(channels = self.channels.len(), "chorus engine reset");
    }

    /// Handle for setting parameters from another thread.
    pub fn params(&self) -> ChorusParams {
        self.params.clone()
    }

    /// Request a new parameter value by raw host address.
    ///
    /// Values are clamped into `[0, 1]`. Mix, Rate and Depth ramp toward the
    /// new value starting with the next block; Feedback and Delay switch at
    /// the next block. Unknown IDs are ignored.
    pub fn set_parameter(&self, id: u32, value: f32) {
        self.params.set_by_id(id, value);
    }

    /// UI-facing value by raw host address; unknown IDs read as `0.0`.
    pub fn get_parameter(&self, id: u32) -> f32 {
        self.params.get_by_id(id)
    }

    /// Typed variant of [`set_parameter`](Self::set_parameter).
    pub fn set_param(&self, param: ChorusParam, value: f32) {
        self.params.set(param, value);
    }

    /// Typed variant of [`get_parameter`](Self::get_parameter).
    pub fn get_param(&self, param: ChorusParam) -> f32 {
        self.params.get(param)
    }

    /// Schedule an explicit ramp of `duration` samples (host automation).
    ///
    /// Toggles have no ramp and switch immediately. Unknown IDs are ignored.
    pub fn start_ramp(&mut self, id: u32, value: f32, duration: u32) {
        let Some(param) = ChorusParam::from_id(id) else {
            return;
        };
        let value = param.descriptor().clamp(value);
        match param {
            ChorusParam::Mix => self.mix.start_ramp(value, duration),
            ChorusParam::Rate => self.rate.start_ramp(value, duration),
            ChorusParam::Depth => self.depth.start_ramp(value, duration),
            ChorusParam::Feedback | ChorusParam::Delay => self.params.set(param, value),
        }
    }

    /// Render one block.
    ///
    /// Consumes `frame_count` samples from each input channel starting at
    /// `buffer_offset` and writes the same range of the matching output
    /// channel. Channels beyond the engine's channel count are left alone,
    /// and the frame range is cut to the shortest supplied slice.
    ///
    /// Never allocates, locks or fails.
    pub fn process(
        &mut self,
        frame_count: usize,
        buffer_offset: usize,
        inputs: &[&[f32]],
        outputs: &mut [&mut [f32]],
    ) {
        let channel_count = self.channels.len().min(inputs.len()).min(outputs.len());
        let available = inputs[..channel_count]
            .iter()
            .map(|c| c.len())
            .chain(outputs[..channel_count].iter().map(|c| c.len()))
            .min()
            .unwrap_or(0)
            .saturating_sub(buffer_offset);
        debug_assert!(
            frame_count <= available || channel_count == 0,
            "block of {frame_count} frames at offset {buffer_offset} exceeds host buffers"
        );
        let frames = frame_count.min(available);

        self.mix.dezipper_check(self.mix_dezipper);
        self.rate.dezipper_check(self.modulation_dezipper);
        self.depth.dezipper_check(self.modulation_dezipper);

        let feedback_on = self.params.is_on(ChorusParam::Feedback);
        let predelay = if self.params.is_on(ChorusParam::Delay) {
            libm::floor(PREDELAY_SECONDS * self.internal_rate as f64) as f32
        } else {
            0.0
        };
        let depth_scale = MAX_DEPTH_SECONDS * self.internal_rate;
        let phase_scale = TAU / self.internal_rate;

        for frame in 0..frames {
            let index = buffer_offset + frame;

            let mix = self.mix.get_and_step();
            let rate = self.rate.get_and_step();
            let depth = self.depth.get_and_step();

            let depth_samples = depth * depth * depth * depth_scale;
            let phase_increment = lfo_rate_hz(rate) * phase_scale;

            for (channel, state) in self.channels[..channel_count].iter_mut().enumerate() {
                let dry = inputs[channel][index];
                state.write(dry);

                let lfo = (self.wavetable.sample(state.lfo_phase()) + 1.0) * 0.5;
                let offset = depth_samples * lfo + predelay;
                state.advance_lfo(phase_increment);

                let delayed = state.read_interpolated(offset);
                let wet = soft_clip(delayed + dry) * SOFT_CLIP_GAIN;
                outputs[channel][index] = dry + (wet - dry) * mix;

                if feedback_on {
                    state.feed_back(delayed);
                }
                state.advance();
            }
        }
    }

    /// Number of channels the engine was built for.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Host sample rate in Hz.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Internal processing rate in Hz (host rate × [`OVERSAMPLING`]).
    pub fn internal_sample_rate(&self) -> f32 {
        self.internal_rate
    }

    /// Delay buffer length per channel in samples.
    pub fn buffer_size(&self) -> usize {
        self.channels.first().map_or(0, ChannelDelayState::len)
    }

    /// Host frames a signal can keep circulating after the input stops.
    ///
    /// One buffer write happens per host frame, so this is the buffer length.
    pub fn tail_frames(&self) -> usize {
        self.buffer_size()
    }

    /// Dezipper ramp lengths in samples: `(mix, rate_and_depth)`.
    pub fn dezipper_durations(&self) -> (u32, u32) {
        (self.mix_dezipper, self.modulation_dezipper)
    }

    /// Delay state of one channel.
    pub fn channel(&self, index: usize) -> Option<&ChannelDelayState> {
        self.channels.get(index)
    }

    /// The shared LFO table.
    pub fn wavetable(&self) -> &Arc<Wavetable> {
        &self.wavetable
    }

    /// Current (possibly mid-ramp) values of `(mix, rate, depth)`.
    pub fn ramped_values(&self) -> (f32, f32, f32) {
        (self.mix.get(), self.rate.get(), self.depth.get())
    }
}

/// Sizes derived from the channel count and host rate.
struct Layout {
    internal_rate: f32,
    buffer_size: usize,
    mix_dezipper: u32,
    modulation_dezipper: u32,
}

impl Layout {
    fn new(channel_count: usize, sample_rate: f32) -> Result<Self, InitError> {
        if channel_count == 0 {
            return Err(InitError::NoChannels);
        }
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(InitError::InvalidSampleRate(sample_rate));
        }

        let internal_rate = sample_rate * OVERSAMPLING as f32;
        let buffer_size = internal_rate as usize;
        if buffer_size == 0 {
            return Err(InitError::ZeroBufferSize);
        }

        let mix_dezipper = libm::floor(MIX_DEZIPPER_SECONDS * internal_rate as f64) as u32;
        Ok(Self {
            internal_rate,
            buffer_size,
            mix_dezipper,
            modulation_dezipper: mix_dezipper.saturating_mul(MODULATION_DEZIPPER_FACTOR),
        })
    }
}

fn build_channels(
    channel_count: usize,
    buffer_size: usize,
) -> Result<Vec<ChannelDelayState>, InitError> {
    let mut channels = Vec::new();
    channels
        .try_reserve_exact(channel_count)
        .map_err(|_| InitError::Allocation {
            requested: channel_count.saturating_mul(buffer_size),
        })?;
    for _ in 0..channel_count {
        channels.push(ChannelDelayState::new(buffer_size)?);
    }
    Ok(channels)
}
