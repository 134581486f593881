//! Sample-accurate parameter ramping for zipper-free changes.
//!
//! A ramped parameter has two halves that live on different threads:
//!
//! - [`UiValue`]: the last externally requested target. Written by the
//!   control thread, read by the render thread. Lock-free (`f32` bits in an
//!   `AtomicU32` plus a change counter).
//! - [`ParameterRamper`]: the current value and the ramp toward its goal.
//!   Owned and stepped exclusively by the render thread.
//!
//! No field is written by both threads, so no lock is needed anywhere.
//!
//! ## Usage
//!
//! ```rust
//! use mani_core::ParameterRamper;
//!
//! let mut mix = ParameterRamper::new(0.0);
//!
//! // Control thread (any thread holding a `UiValue` handle)
//! mix.set_ui_value(1.0);
//!
//! // Render thread: pick up pending changes once per block...
//! mix.dezipper_check(100);
//! // ...then step once per sample
//! let first = mix.get_and_step();
//! assert!(first.abs() < 1e-6);
//! assert!(mix.is_ramping());
//! ```

use alloc::sync::Arc;
use core::sync::atomic::{AtomicU32, Ordering};

/// Lock-free cell holding a parameter's UI-facing value.
///
/// Every [`set`](Self::set) bumps a change counter, which the render thread
/// compares against the last count it consumed to detect pending changes.
#[derive(Debug)]
pub struct UiValue {
    bits: AtomicU32,
    changes: AtomicU32,
}

impl UiValue {
    /// Create a cell holding `value` with no pending change.
    pub fn new(value: f32) -> Self {
        Self {
            bits: AtomicU32::new(value.to_bits()),
            changes: AtomicU32::new(0),
        }
    }

    /// Store a new requested value and signal a pending change.
    #[inline]
    pub fn set(&self, value: f32) {
        self.bits.store(value.to_bits(), Ordering::Release);
        self.changes.fetch_add(1, Ordering::Release);
    }

    /// Load the last stored value.
    #[inline]
    pub fn get(&self) -> f32 {
        f32::from_bits(self.bits.load(Ordering::Acquire))
    }

    /// Number of [`set`](Self::set) calls so far (wrapping).
    #[inline]
    pub fn change_count(&self) -> u32 {
        self.changes.load(Ordering::Acquire)
    }

    /// Store a value without signalling a change.
    ///
    /// Used when the render thread itself moved the parameter (explicit
    /// ramps), so the UI reflects the new target without re-triggering a
    /// dezipper ramp.
    #[inline]
    fn sync(&self, value: f32) {
        self.bits.store(value.to_bits(), Ordering::Release);
    }
}

impl Default for UiValue {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// A parameter that moves toward its target along a linear ramp.
///
/// The current value is `goal + slope · samples_remaining`, so it reaches the
/// goal exactly when the ramp runs out and holds it afterwards.
///
/// # Threading
///
/// `set_ui_value` and `ui_value` take `&self` and only touch the shared
/// [`UiValue`]. Everything that takes `&mut self` belongs to the render thread.
/// Use [`ui_cell`](Self::ui_cell) to hand the control thread its own handle.
#[derive(Debug)]
pub struct ParameterRamper {
    ui: Arc<UiValue>,
    /// Value the ramp ends on
    goal: f32,
    /// Per-sample distance from the goal, signed so that `goal + slope * n` is the value
    slope: f32,
    samples_remaining: u32,
    /// Last `UiValue::change_count` turned into a ramp
    seen_changes: u32,
}

impl ParameterRamper {
    /// Create a ramper resting at `initial`.
    pub fn new(initial: f32) -> Self {
        Self {
            ui: Arc::new(UiValue::new(initial)),
            goal: initial,
            slope: 0.0,
            samples_remaining: 0,
            seen_changes: 0,
        }
    }

    /// Shared handle to the UI-facing value.
    pub fn ui_cell(&self) -> Arc<UiValue> {
        Arc::clone(&self.ui)
    }

    /// Store the externally visible target.
    ///
    /// Nothing moves until the render thread calls
    /// [`dezipper_check`](Self::dezipper_check).
    #[inline]
    pub fn set_ui_value(&self, value: f32) {
        self.ui.set(value);
    }

    /// Last externally requested target (not the interpolated value).
    #[inline]
    pub fn ui_value(&self) -> f32 {
        self.ui.get()
    }

    /// Start a linear ramp from the current value to `value`.
    ///
    /// A zero `duration` jumps immediately. The UI value follows the new
    /// target and any UI change stored before this call is consumed: the
    /// last writer wins.
    pub fn start_ramp(&mut self, value: f32, duration: u32) {
        self.seen_changes = self.ui.change_count();
        self.ui.sync(value);
        self.begin_ramp(value, duration);
    }

    /// Ramp toward the UI target if it changed and no ramp is running.
    ///
    /// Called once per processing block with the parameter's default
    /// dezipper duration.
    pub fn dezipper_check(&mut self, duration: u32) {
        let changes = self.ui.change_count();
        if changes != self.seen_changes && self.samples_remaining == 0 {
            self.seen_changes = changes;
            self.begin_ramp(self.ui.get(), duration);
        }
    }

    /// Current value without advancing.
    #[inline]
    pub fn get(&self) -> f32 {
        self.goal + self.slope * self.samples_remaining as f32
    }

    /// Current value, then advance one sample toward the goal.
    #[inline]
    pub fn get_and_step(&mut self) -> f32 {
        if self.samples_remaining == 0 {
            return self.goal;
        }
        let value = self.get();
        self.samples_remaining -= 1;
        value
    }

    /// Value the current ramp ends on.
    #[inline]
    pub fn goal(&self) -> f32 {
        self.goal
    }

    /// `true` while a ramp is in progress.
    #[inline]
    pub fn is_ramping(&self) -> bool {
        self.samples_remaining != 0
    }

    /// Samples left in the current ramp.
    #[inline]
    pub fn samples_remaining(&self) -> u32 {
        self.samples_remaining
    }

    /// Jump to `value` with no ramp. The UI value follows and pending UI
    /// changes are consumed.
    pub fn set_immediate(&mut self, value: f32) {
        self.seen_changes = self.ui.change_count();
        self.ui.sync(value);
        self.begin_ramp(value, 0);
    }

    /// Jump to the current UI target and mark all changes as consumed.
    pub fn snap_to_ui(&mut self) {
        self.seen_changes = self.ui.change_count();
        self.begin_ramp(self.ui.get(), 0);
    }

    fn begin_ramp(&mut self, value: f32, duration: u32) {
        if duration == 0 {
            self.slope = 0.0;
            self.samples_remaining = 0;
        } else {
            self.slope = (self.get() - value) / duration as f32;
            self.samples_remaining = duration;
        }
        self.goal = value;
    }
}

impl Default for ParameterRamper {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ui_value_is_independent_of_ramp_progress() {
        let mut ramper = ParameterRamper::new(0.0);
        ramper.set_ui_value(0.75);
        assert_eq!(ramper.ui_value(), 0.75);
        assert_eq!(ramper.get(), 0.0, "nothing moves before dezipper_check");

        ramper.dezipper_check(10);
        ramper.get_and_step();
        assert_eq!(ramper.ui_value(), 0.75);
    }

    #[test]
    fn ramp_reaches_target_exactly() {
        let mut ramper = ParameterRamper::new(0.0);
        ramper.start_ramp(1.0, 480);

        for _ in 0..480 {
            ramper.get_and_step();
        }
        assert!(!ramper.is_ramping());
        assert_eq!(ramper.get_and_step(), 1.0);
        assert_eq!(ramper.get_and_step(), 1.0);
    }

    #[test]
    fn ramp_is_linear() {
        let mut ramper = ParameterRamper::new(0.0);
        ramper.start_ramp(1.0, 100);

        let values: Vec<f32> = (0..100).map(|_| ramper.get_and_step()).collect();
        assert!(values[0].abs() < 1e-6, "first step returns the pre-ramp value");
        assert!((values[50] - 0.5).abs() < 1e-5, "halfway, got {}", values[50]);
        for pair in values.windows(2) {
            assert!(((pair[1] - pair[0]) - 0.01).abs() < 1e-5);
        }
    }

    #[test]
    fn zero_duration_jumps() {
        let mut ramper = ParameterRamper::new(0.2);
        ramper.start_ramp(0.9, 0);
        assert_eq!(ramper.get_and_step(), 0.9);
        assert!(!ramper.is_ramping());
    }

    #[test]
    fn start_ramp_updates_ui_without_pending_change() {
        let mut ramper = ParameterRamper::new(0.0);
        ramper.start_ramp(0.6, 10);
        assert_eq!(ramper.ui_value(), 0.6);

        for _ in 0..10 {
            ramper.get_and_step();
        }
        ramper.dezipper_check(1000);
        assert!(!ramper.is_ramping(), "explicit ramp must not re-trigger dezippering");
    }

    #[test]
    fn explicit_ramp_overrides_earlier_ui_write() {
        let mut ramper = ParameterRamper::new(0.0);
        ramper.set_ui_value(0.3);
        ramper.start_ramp(0.8, 4);

        for _ in 0..4 {
            ramper.get_and_step();
        }
        ramper.dezipper_check(10);
        assert!(!ramper.is_ramping(), "superseded UI write must not ramp again");
        assert_eq!(ramper.get(), 0.8);
        assert_eq!(ramper.ui_value(), 0.8);
    }

    #[test]
    fn set_immediate_consumes_pending_change() {
        let mut ramper = ParameterRamper::new(0.0);
        ramper.set_ui_value(0.3);
        ramper.set_immediate(0.5);

        ramper.dezipper_check(10);
        assert!(!ramper.is_ramping());
        assert_eq!(ramper.get(), 0.5);
    }

    #[test]
    fn dezipper_waits_for_active_ramp() {
        let mut ramper = ParameterRamper::new(0.0);
        ramper.start_ramp(1.0, 4);
        ramper.set_ui_value(0.0);

        ramper.dezipper_check(8);
        assert_eq!(ramper.goal(), 1.0, "active ramp is not interrupted");

        for _ in 0..4 {
            ramper.get_and_step();
        }
        ramper.dezipper_check(8);
        assert_eq!(ramper.goal(), 0.0);
        assert_eq!(ramper.samples_remaining(), 8);
    }

    #[test]
    fn dezipper_without_change_is_noop() {
        let mut ramper = ParameterRamper::new(0.3);
        ramper.dezipper_check(100);
        assert!(!ramper.is_ramping());
        assert_eq!(ramper.get_and_step(), 0.3);
    }

    #[test]
    fn snap_to_ui_consumes_changes() {
        let mut ramper = ParameterRamper::new(0.0);
        ramper.set_ui_value(0.4);
        ramper.snap_to_ui();
        assert_eq!(ramper.get(), 0.4);

        ramper.dezipper_check(100);
        assert!(!ramper.is_ramping());
    }

    #[test]
    fn shared_cell_reaches_render_side() {
        let mut ramper = ParameterRamper::new(0.0);
        let cell = ramper.ui_cell();

        let handle = std::thread::spawn(move || cell.set(0.5));
        handle.join().unwrap();

        ramper.dezipper_check(2);
        ramper.get_and_step();
        ramper.get_and_step();
        assert_eq!(ramper.get_and_step(), 0.5);
    }
}
