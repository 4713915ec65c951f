//! Numerical tuning parameters for the simulation
//!
//! `Parameters` holds the runtime constants:
//! - velocity damping applied every tick,
//! - force strengths for shape return, fist collapse, and burst,
//! - gesture thresholds and easing rates,
//! - breathing oscillation shape and the random seed

#[derive(Debug, Clone)]
pub struct Parameters {
    pub damping: f32, // uniform velocity decay per tick, bounds the system
    pub return_strength: f32, // spring pull toward the assigned target point
    pub burst_threshold: f32, // spread distance above which burst triggers
    pub fist_strength: f32, // pull toward origin while the fist is held
    pub fist_jitter: f32, // per-axis jitter amplitude during collapse
    pub burst_base: f32, // base radial push during burst
    pub burst_spread: f32, // random extra push on top of burst_base
    pub breath_rate: f32, // angular rate of the idle breathing sine
    pub breath_amp: f32, // amplitude of the idle breathing sine
    pub rotation_ease: f32, // easing toward the hand rotation while tracking
    pub tilt_decay: f32, // easing of tilt back to level when idle
    pub auto_spin: f32, // constant yaw increment per tick when idle
    pub visual_ease: f32, // easing rate for color/opacity/size
    pub seed: u64, // deterministic seed to make runs reproducable
}
