//! Frame-step time integrator for the particle cloud
//!
//! A damped explicit-Euler step driven by `AccelSet` and `Parameters`.
//! Forces are per-tick impulses rather than dt-scaled accelerations: the
//! uniform damping factor is what bounds the system, so the step stays
//! stable at variable frame intervals without clamping.

use rand::RngCore;

use super::forces::AccelSet;
use super::params::Parameters;
use super::states::{NVec3, ParticleCloud};

/// Advance the cloud by exactly one simulation step.
/// Updates velocities and positions in-place and moves `cloud.t` forward by
/// `dt` (the clock only feeds the breathing oscillation, not the forces).
pub fn damped_euler_step(
    cloud: &mut ParticleCloud,
    forces: &AccelSet,
    params: &Parameters,
    rng: &mut dyn RngCore,
    dt: f32,
) {
    let n = cloud.len();

    // Accumulate a[i] for the current positions at time t = cloud.t
    let mut accel = vec![NVec3::zeros(); n];
    forces.accumulate_accels(cloud.t, &*cloud, rng, &mut accel);

    // Kick then damp: v = (v + a) * damping
    // Damping before reintegration keeps the velocity geometrically bounded
    // no matter what the force terms injected this tick.
    for (v, a) in cloud.velocity.iter_mut().zip(accel.iter()) {
        *v += *a;
        *v *= params.damping;
    }

    // Drift: x += v
    for (x, v) in cloud.position.iter_mut().zip(cloud.velocity.iter()) {
        *x += *v;
    }

    // Advance the breathing clock
    cloud.t += dt;
}
