//! Parameter introspection for host-facing parameter tables.
//!
//! This module provides the [`ParameterInfo`] trait and supporting types that
//! let a host, a CLI or a test enumerate an effect's parameters without
//! hard-coding them:
//!
//! - **Host automation**: stable numeric IDs for automation lanes
//! - **Generic UIs**: names, units, ranges and defaults for every control
//! - **Validation**: clamping into the declared range
//!
//! # Design
//!
//! Parameters are addressed by a small zero-based index that doubles as the
//! host address. Each is described by a [`ParamDescriptor`]. Setting goes
//! through `&self` so a shared, lock-free parameter store can implement the
//! trait and be written from a control thread while audio runs.
//!
//! # Example
//!
//! ```rust
//! use core::sync::atomic::{AtomicU32, Ordering};
//! use mani_core::{ParamDescriptor, ParamId, ParameterInfo};
//!
//! struct Level(AtomicU32);
//!
//! impl ParameterInfo for Level {
//!     fn param_count(&self) -> usize { 1 }
//!
//!     fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
//!         match index {
//!             0 => Some(ParamDescriptor::normalized("Level", "Level", 1.0)
//!                 .with_id(ParamId(0), "level")),
//!             _ => None,
//!         }
//!     }
//!
//!     fn get_param(&self, index: usize) -> f32 {
//!         match index {
//!             0 => f32::from_bits(self.0.load(Ordering::Acquire)),
//!             _ => 0.0,
//!         }
//!     }
//!
//!     fn set_param(&self, index: usize, value: f32) {
//!         if index == 0 {
//!             self.0.store(value.clamp(0.0, 1.0).to_bits(), Ordering::Release);
//!         }
//!     }
//! }
//! ```
//!
//! # no_std Support
//!
//! This module is fully `no_std` compatible with no heap allocations required.

/// Stable parameter identifier used as the host address.
///
/// Once assigned, a `ParamId` must never change for a given parameter:
/// automation recorded by a host refers to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamId(pub u32);

/// Parameter capability flags for host communication.
///
/// Use [`union`](Self::union) to combine.
///
/// # Example
///
/// ```rust
/// use mani_core::ParamFlags;
///
/// let flags = ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED);
/// assert!(flags.contains(ParamFlags::AUTOMATABLE));
/// assert!(flags.contains(ParamFlags::STEPPED));
/// assert!(!ParamFlags::AUTOMATABLE.contains(ParamFlags::STEPPED));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamFlags(u8);

impl ParamFlags {
    /// No flags set.
    pub const NONE: Self = Self(0);
    /// Host can automate this parameter (default for all params).
    pub const AUTOMATABLE: Self = Self(1 << 0);
    /// Parameter has discrete steps (on/off toggles).
    pub const STEPPED: Self = Self(1 << 1);

    /// Returns `true` if all bits in `other` are set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of two flag sets.
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl Default for ParamFlags {
    fn default() -> Self {
        Self::AUTOMATABLE
    }
}

/// Trait for effects that expose introspectable parameters.
///
/// # Parameter Indexing
///
/// Parameters are accessed by zero-based index, stable for the lifetime of
/// the implementor. Out-of-range indices are not errors: `param_info`
/// returns `None`, `get_param` returns `0.0` and `set_param` does nothing.
///
/// # Thread Safety
///
/// `set_param` takes `&self`. Implementors are expected to store values in
/// atomics so the setter can run on a control thread concurrently with
/// audio processing.
pub trait ParameterInfo {
    /// Number of parameters.
    fn param_count(&self) -> usize;

    /// Descriptor for the parameter at `index`, or `None` if out of range.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Current UI-facing value of the parameter at `index`.
    fn get_param(&self, index: usize) -> f32;

    /// Request a new value for the parameter at `index`.
    ///
    /// Implementors clamp into the descriptor's range.
    fn set_param(&self, index: usize, value: f32);

    /// Finds a parameter index by its string ID.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let idx = params.find_param_by_name("mix");
    /// ```
    fn find_param_by_name(&self, name: &str) -> Option<usize> {
        (0..self.param_count()).find(|&i| {
            self.param_info(i).is_some_and(|d| {
                d.string_id.eq_ignore_ascii_case(name) || d.name.eq_ignore_ascii_case(name)
            })
        })
    }
}

/// Metadata describing a single parameter.
///
/// # Example
///
/// ```rust
/// use mani_core::{ParamDescriptor, ParamId, ParamFlags};
///
/// let feedback = ParamDescriptor::toggle("Feedback", "Fdbk")
///     .with_id(ParamId(3), "feedback");
/// assert!(feedback.flags.contains(ParamFlags::STEPPED));
/// assert_eq!(feedback.clamp(3.0), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full parameter name for display.
    pub name: &'static str,

    /// Short name for narrow displays, max 8 characters.
    pub short_name: &'static str,

    /// Unit of the value the normalized setting maps to, for display.
    pub unit: ParamUnit,

    /// Minimum allowed value.
    pub min: f32,

    /// Maximum allowed value.
    pub max: f32,

    /// Value the parameter holds when the effect is created.
    pub default: f32,

    /// Recommended step increment for encoder-based control.
    pub step: f32,

    /// Stable numeric ID (host address).
    pub id: ParamId,

    /// Human-readable stable ID, also accepted by the CLI.
    pub string_id: &'static str,

    /// Capability flags for host communication.
    pub flags: ParamFlags,
}

impl ParamDescriptor {
    /// Continuous parameter normalized to `[0, 1]`.
    pub const fn normalized(name: &'static str, short_name: &'static str, default: f32) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Percent,
            min: 0.0,
            max: 1.0,
            default,
            step: 0.01,
            id: ParamId(0),
            string_id: "",
            flags: ParamFlags::AUTOMATABLE,
        }
    }

    /// Binary on/off parameter encoded as `0.0` / `1.0`, default off.
    pub const fn toggle(name: &'static str, short_name: &'static str) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::None,
            min: 0.0,
            max: 1.0,
            default: 0.0,
            step: 1.0,
            id: ParamId(0),
            string_id: "",
            flags: ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED),
        }
    }

    /// Sets the stable parameter ID and string ID.
    ///
    /// Builder; call after a factory method or struct literal.
    pub const fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// Sets the display unit.
    pub const fn with_unit(mut self, unit: ParamUnit) -> Self {
        self.unit = unit;
        self
    }

    /// `true` for stepped on/off parameters.
    #[inline]
    pub const fn is_toggle(&self) -> bool {
        self.flags.contains(ParamFlags::STEPPED)
    }

    /// Clamps a value to this parameter's valid range.
    ///
    /// NaN clamps to `min`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mani_core::ParamDescriptor;
    ///
    /// let desc = ParamDescriptor::normalized("Mix", "Mix", 0.5);
    /// assert_eq!(desc.clamp(0.25), 0.25);
    /// assert_eq!(desc.clamp(-1.0), 0.0);
    /// assert_eq!(desc.clamp(7.0), 1.0);
    /// ```
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value > self.max {
            self.max
        } else if value >= self.min {
            value
        } else {
            self.min
        }
    }
}

/// Unit type for parameter display and formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Hertz (Hz) - for LFO rate.
    Hertz,

    /// Milliseconds (ms) - for modulation depth.
    Milliseconds,

    /// Percentage (%) - for mix and normalized parameters.
    Percent,

    /// No unit - for toggles and dimensionless parameters.
    None,
}

impl ParamUnit {
    /// Returns the unit suffix string for display.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mani_core::ParamUnit;
    ///
    /// assert_eq!(ParamUnit::Hertz.suffix(), " Hz");
    /// assert_eq!(ParamUnit::None.suffix(), "");
    /// ```
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Hertz => " Hz",
            ParamUnit::Milliseconds => " ms",
            ParamUnit::Percent => "%",
            ParamUnit::None => "",
        }
    }
}
