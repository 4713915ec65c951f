//! Force field selection: gesture snapshot -> per-tick parameters
//!
//! `derive_tick` is a pure map from the latest `GestureState` and the
//! breathing clock to the parameters the integrator consumes this tick.
//! The only carried state lives in `RotationState` and `VisualState`, and
//! it exists purely for smooth visual transitions, never for the dynamics.

use crate::simulation::gesture::GestureState;
use crate::simulation::params::Parameters;

/// Everything the physics core needs to know for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickParams {
    pub expansion: f32, // scale applied to all target points
    pub return_strength: f32, // 0 while bursting, nominal otherwise
    pub fist: bool, // collapse force active
    pub burst: bool, // radial burst force active
}

/// Map one gesture snapshot to this tick's force parameters.
///
/// `t` is the elapsed simulation time; it drives the ambient breathing when
/// the hand is not tracked (and during burst, where the spread distance no
/// longer means anything useful).
pub fn derive_tick(gesture: &GestureState, t: f32, params: &Parameters) -> TickParams {
    let burst = gesture.is_tracking && gesture.distance > params.burst_threshold;

    let expansion = if gesture.is_tracking && !burst {
        // Linear map of fingertip spread, [0, 1] -> [0.5, 2.0]
        0.5 + gesture.distance * 1.5
    } else {
        // Ambient breathing: slow sinusoidal pulsation around 1.0
        (t * params.breath_rate).sin() * params.breath_amp + 1.0
    };

    TickParams {
        expansion,
        // Shape attraction fully disabled during burst so particles fly free
        return_strength: if burst { 0.0 } else { params.return_strength },
        fist: gesture.is_tracking && gesture.is_fist,
        burst,
    }
}

// =========================================================================
// Rotation easing
// =========================================================================

/// Eased rigid-body rotation of the whole cloud.
///
/// Rotation is never applied per particle. The viewer applies these angles
/// to the cloud root as one transform; this struct only owns the easing so
/// the behavior stays testable away from the renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct RotationState {
    pub tilt: f32, // rotation about x, radians
    pub yaw: f32, // rotation about y, radians
}

impl RotationState {
    /// Advance the rotation by one tick.
    /// Tracking: ease both angles toward the hand's rotation hint.
    /// Idle: constant auto-spin around the vertical, tilt decays to level.
    pub fn update(&mut self, gesture: &GestureState, params: &Parameters) {
        if gesture.is_tracking {
            let (tilt_hint, yaw_hint) = gesture.rotation_hint;
            self.tilt += (tilt_hint - self.tilt) * params.rotation_ease;
            self.yaw += (yaw_hint - self.yaw) * params.rotation_ease;
        } else {
            self.yaw += params.auto_spin;
            self.tilt += (0.0 - self.tilt) * params.tilt_decay;
        }
    }
}

// =========================================================================
// Visual state easing
// =========================================================================

/// Render-facing color/opacity/size, eased toward a burst or idle target
/// every tick. Always interpolated, never snapped, so the burst flash and
/// its decay read as one continuous transition.
#[derive(Debug, Clone, Copy)]
pub struct VisualState {
    pub color: [f32; 3], // linear rgb
    pub opacity: f32,
    pub size: f32, // particle point size in world units
}

/// Steady-state targets when not bursting.
const IDLE_OPACITY: f32 = 0.8;
const IDLE_SIZE: f32 = 0.15;

/// Flash targets while bursting.
const BURST_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
const BURST_OPACITY: f32 = 0.9;
const BURST_SIZE: f32 = 0.2;

impl VisualState {
    /// Start at the idle steady state for `base_color`.
    pub fn new(base_color: [f32; 3]) -> Self {
        Self {
            color: base_color,
            opacity: IDLE_OPACITY,
            size: IDLE_SIZE,
        }
    }

    /// Ease one step toward the target determined by the burst flag.
    pub fn update(&mut self, burst: bool, base_color: [f32; 3], params: &Parameters) {
        let (target_color, target_opacity, target_size) = if burst {
            (BURST_COLOR, BURST_OPACITY, BURST_SIZE)
        } else {
            (base_color, IDLE_OPACITY, IDLE_SIZE)
        };

        let k = params.visual_ease;
        for (c, tc) in self.color.iter_mut().zip(target_color.iter()) {
            *c = lerp(*c, *tc, k);
        }
        self.opacity = lerp(self.opacity, target_opacity, k);
        self.size = lerp(self.size, target_size, k);
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
