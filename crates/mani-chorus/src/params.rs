//! Chorus parameter address space and the shared control-side store.
//!
//! ## Parameter Table
//!
//! | ID | Name | Range | Default | Ramped |
//! |----|------|-------|---------|--------|
//! | 0 | Mix | 0–1 | 0.0 | 20 ms |
//! | 1 | Rate | 0–1 (0.05–20 Hz, quartic) | 0.0 | 100 ms |
//! | 2 | Depth | 0–1 (0–5 ms, cubic) | 0.0 | 100 ms |
//! | 3 | Feedback | off / on | off | no |
//! | 4 | Delay | off / on | off | no |
//!
//! [`ChorusParams`] is a cheap-to-clone handle. Every clone points at the same
//! lock-free cells, so a control thread can hold one while the engine renders.

use alloc::sync::Arc;
use libm::powf;
use mani_core::{ParamDescriptor, ParamId, ParamUnit, ParameterInfo, UiValue};

use crate::engine::{MAX_DEPTH_SECONDS, MAX_RATE_HZ, MIN_RATE_HZ};

/// Addressable chorus parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ChorusParam {
    /// Dry/wet blend.
    Mix = 0,
    /// LFO rate, normalized.
    Rate = 1,
    /// Modulation depth, normalized.
    Depth = 2,
    /// Feedback toggle.
    Feedback = 3,
    /// Predelay toggle.
    Delay = 4,
}

impl ChorusParam {
    /// All parameters in address order.
    pub const ALL: [Self; 5] = [
        Self::Mix,
        Self::Rate,
        Self::Depth,
        Self::Feedback,
        Self::Delay,
    ];

    /// Parameter for a raw host address, `None` if unknown.
    pub const fn from_id(id: u32) -> Option<Self> {
        match id {
            0 => Some(Self::Mix),
            1 => Some(Self::Rate),
            2 => Some(Self::Depth),
            3 => Some(Self::Feedback),
            4 => Some(Self::Delay),
            _ => None,
        }
    }

    /// Raw host address.
    pub const fn id(self) -> u32 {
        self as u32
    }

    /// `true` for the three continuously ramped parameters.
    pub const fn is_ramped(self) -> bool {
        matches!(self, Self::Mix | Self::Rate | Self::Depth)
    }

    /// Metadata for this parameter.
    pub const fn descriptor(self) -> ParamDescriptor {
        match self {
            Self::Mix => {
                ParamDescriptor::normalized("Mix", "Mix", 0.0).with_id(ParamId(0), "mix")
            }
            Self::Rate => ParamDescriptor::normalized("Rate", "Rate", 0.0)
                .with_id(ParamId(1), "rate")
                .with_unit(ParamUnit::Hertz),
            Self::Depth => ParamDescriptor::normalized("Depth", "Depth", 0.0)
                .with_id(ParamId(2), "depth")
                .with_unit(ParamUnit::Milliseconds),
            Self::Feedback => {
                ParamDescriptor::toggle("Feedback", "Fdbk").with_id(ParamId(3), "feedback")
            }
            Self::Delay => ParamDescriptor::toggle("Delay", "Dly").with_id(ParamId(4), "delay"),
        }
    }
}

impl ChorusParam {
    /// What a normalized `level` means, in this parameter's display unit.
    ///
    /// Mix reads as percent, Rate as LFO Hz, Depth as milliseconds of
    /// modulation. Toggles return the level unchanged.
    ///
    /// ```rust
    /// use mani_chorus::ChorusParam;
    ///
    /// assert_eq!(ChorusParam::Mix.display_value(0.25), 25.0);
    /// assert!((ChorusParam::Depth.display_value(1.0) - 5.0).abs() < 1e-5);
    /// ```
    pub fn display_value(self, level: f32) -> f32 {
        match self {
            Self::Mix => level * 100.0,
            Self::Rate => lfo_rate_hz(level),
            Self::Depth => modulation_depth_seconds(level) * 1000.0,
            Self::Feedback | Self::Delay => level,
        }
    }
}

impl TryFrom<u32> for ChorusParam {
    type Error = u32;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        Self::from_id(id).ok_or(id)
    }
}

/// LFO frequency for a normalized rate level.
///
/// Quartic shaping puts most of the control travel at slow rates.
///
/// ```rust
/// use mani_chorus::lfo_rate_hz;
///
/// assert_eq!(lfo_rate_hz(0.0), 0.05);
/// assert!((lfo_rate_hz(1.0) - 20.0).abs() < 1e-4);
/// ```
#[inline]
pub fn lfo_rate_hz(rate_level: f32) -> f32 {
    MIN_RATE_HZ + (MAX_RATE_HZ - MIN_RATE_HZ) * powf(rate_level, 4.0)
}

/// Modulation depth in seconds for a normalized depth level.
///
/// Cubic shaping gives finer control near zero depth.
#[inline]
pub fn modulation_depth_seconds(depth_level: f32) -> f32 {
    powf(depth_level, 3.0) * MAX_DEPTH_SECONDS
}

/// Shared, lock-free store of the UI-facing parameter values.
///
/// Mix, Rate and Depth cells are the UI halves of the engine's rampers;
/// Feedback and Delay are read directly by the engine once per block.
#[derive(Debug, Clone)]
pub struct ChorusParams {
    mix: Arc<UiValue>,
    rate: Arc<UiValue>,
    depth: Arc<UiValue>,
    feedback: Arc<UiValue>,
    delay: Arc<UiValue>,
}

impl ChorusParams {
    pub(crate) fn new(mix: Arc<UiValue>, rate: Arc<UiValue>, depth: Arc<UiValue>) -> Self {
        Self {
            mix,
            rate,
            depth,
            feedback: Arc::new(UiValue::new(ChorusParam::Feedback.descriptor().default)),
            delay: Arc::new(UiValue::new(ChorusParam::Delay.descriptor().default)),
        }
    }

    fn cell(&self, param: ChorusParam) -> &UiValue {
        match param {
            ChorusParam::Mix => &self.mix,
            ChorusParam::Rate => &self.rate,
            ChorusParam::Depth => &self.depth,
            ChorusParam::Feedback => &self.feedback,
            ChorusParam::Delay => &self.delay,
        }
    }

    /// Store a new value, clamped into `[0, 1]`.
    ///
    /// Ramped parameters only move when the engine next picks the change up.
    #[inline]
    pub fn set(&self, param: ChorusParam, value: f32) {
        self.cell(param).set(param.descriptor().clamp(value));
    }

    /// Current UI-facing value.
    #[inline]
    pub fn get(&self, param: ChorusParam) -> f32 {
        self.cell(param).get()
    }

    /// `true` when a toggle parameter is exactly on (`1.0`).
    #[inline]
    pub fn is_on(&self, param: ChorusParam) -> bool {
        self.get(param) == 1.0
    }

    /// Store by raw address; unknown IDs are ignored.
    pub fn set_by_id(&self, id: u32, value: f32) {
        if let Some(param) = ChorusParam::from_id(id) {
            self.set(param, value);
        }
    }

    /// Read by raw address; unknown IDs read as `0.0`.
    pub fn get_by_id(&self, id: u32) -> f32 {
        ChorusParam::from_id(id).map_or(0.0, |param| self.get(param))
    }
}

impl ParameterInfo for ChorusParams {
    fn param_count(&self) -> usize {
        ChorusParam::ALL.len()
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        ChorusParam::ALL.get(index).map(|p| p.descriptor())
    }

    fn get_param(&self, index: usize) -> f32 {
        ChorusParam::ALL.get(index).map_or(0.0, |&p| self.get(p))
    }

    fn set_param(&self, index: usize, value: f32) {
        if let Some(&param) = ChorusParam::ALL.get(index) {
            self.set(param, value);
        }
    }
}
