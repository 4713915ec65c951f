//! Core state buffers for the particle cloud.
//!
//! Stored struct-of-arrays style: one position and one velocity buffer,
//! indexed by particle. The particle count is fixed at construction and the
//! index of a particle never changes for the lifetime of the cloud.

use nalgebra::Vector3;
pub type NVec3 = Vector3<f32>;

/// Position/velocity buffers for all particles plus the simulation clock.
///
/// Buffers are allocated once in [`ParticleCloud::new`] and only ever
/// overwritten in place. Nothing is spawned or destroyed at runtime; burst
/// and collapse effects are purely kinematic.
#[derive(Debug, Clone)]
pub struct ParticleCloud {
    pub position: Vec<NVec3>, // current simulated locations
    pub velocity: Vec<NVec3>, // current simulated velocities
    pub t: f32, // elapsed time, drives the breathing oscillation
}

impl ParticleCloud {
    /// Allocate zeroed buffers for `n` particles.
    /// Panics if `n == 0`: an empty cloud is a construction bug, not a
    /// runtime state.
    pub fn new(n: usize) -> Self {
        assert!(n > 0, "particle count must be positive");
        Self {
            position: vec![NVec3::zeros(); n],
            velocity: vec![NVec3::zeros(); n],
            t: 0.0,
        }
    }

    /// Number of particles, immutable after construction.
    pub fn len(&self) -> usize {
        self.position.len()
    }

    /// Mean distance of all particles from the world origin.
    /// Observable for the collapse/burst trends in tests and diagnostics.
    pub fn mean_radius(&self) -> f32 {
        let sum: f32 = self.position.iter().map(|p| p.norm()).sum();
        sum / self.position.len() as f32
    }
}
