//! Gesture input snapshot and the shared last-write-wins slot
//!
//! The camera/hand-landmark sensor is an external collaborator running on
//! its own cadence. It publishes one `GestureState` per video frame into a
//! `GestureSlot`; the render-driven tick reads whatever is latest without
//! blocking or queueing. Newer snapshots simply overwrite older ones.

use std::sync::{Mutex, PoisonError};

/// Sensor-derived summary of one video frame of hand tracking.
///
/// When `is_tracking` is false the remaining fields are not meaningful and
/// must not drive forces; only the idle behavior applies.
#[derive(Debug, Clone, Copy)]
pub struct GestureState {
    pub is_tracking: bool, // false when no hand is detected
    pub distance: f32, // normalized fingertip spread in [0, 1]
    pub is_fist: bool, // closed-fist flag
    pub center: (f32, f32), // hand center in [0, 1]^2 screen space
    pub rotation_hint: (f32, f32), // (tilt, yaw) suggestion in radians
}

impl GestureState {
    /// The state used before the sensor has produced anything, or after it
    /// lost the hand. `distance` sits at the indeterminate midpoint.
    pub fn not_tracking() -> Self {
        Self {
            is_tracking: false,
            distance: 0.5,
            is_fist: false,
            center: (0.5, 0.5),
            rotation_hint: (0.0, 0.0),
        }
    }
}

impl Default for GestureState {
    fn default() -> Self {
        Self::not_tracking()
    }
}

/// Single-slot holder connecting the asynchronous sensor to the frame loop.
///
/// `latest` always returns a value: the default "not tracking" state until
/// the first publish, the most recent snapshot afterwards. There is no
/// backpressure and no ordering guarantee beyond last write wins.
#[derive(Debug, Default)]
pub struct GestureSlot {
    current: Mutex<GestureState>,
}

impl GestureSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the slot with a fresh snapshot.
    pub fn publish(&self, state: GestureState) {
        *self.lock() = state;
    }

    /// Copy out the most recent snapshot. Never blocks on the sensor; the
    /// lock is only held for the copy.
    pub fn latest(&self) -> GestureState {
        *self.lock()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, GestureState> {
        // A poisoned slot still holds a valid (if stale) snapshot
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
