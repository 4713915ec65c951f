//! Force / acceleration contributors for the particle cloud
//!
//! Defines the acceleration trait plus the three gesture-driven force
//! terms: shape return (spring toward the morph target), fist collapse
//! (pull to the origin with jitter), and burst (radial push outward)

use std::sync::Arc;

use rand::{Rng, RngCore};

use crate::simulation::states::{NVec3, ParticleCloud};

/// Collection of acceleration terms active for one tick.
/// Each term implements [`Acceleration`] and their contributions are summed
/// into a single acceleration vector per particle.
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self {
            terms: Vec::new(),
        }
    }

    /// Add an acceleration term
    pub fn with(mut self, term: impl Acceleration + Send + Sync + 'static) -> Self {
        self.terms.push(Box::new(term));
        self
    }

    /// Compute total accelerations at time `t` for all particles in `cloud`
    /// - `out[i]` will be set to the sum of contributions from all terms
    pub fn accumulate_accels(
        &self,
        t: f32,
        cloud: &ParticleCloud,
        rng: &mut dyn RngCore,
        out: &mut [NVec3],
    ) {
        assert_eq!(out.len(), cloud.len(), "acceleration buffer length mismatch");
        // Zero buffer
        for a in out.iter_mut() {
            *a = NVec3::zeros();
        }
        // Iterate over all acceleration contributors
        for term in &self.terms {
            term.acceleration(t, cloud, rng, out);
        }
    }
}

impl Default for AccelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for acceleration sources operating on a [`ParticleCloud`].
/// Implementations add their contribution into `out[i]` for each particle.
/// The shared `rng` is for terms that re-draw randomness per particle per
/// tick; deterministic terms ignore it.
pub trait Acceleration {
    fn acceleration(&self, t: f32, cloud: &ParticleCloud, rng: &mut dyn RngCore, out: &mut [NVec3]);
}

/// Spring pulling each particle toward its assigned point on the current
/// morph shape, scaled by the tick's expansion factor.
///
/// The target set is captured behind an `Arc` when the term is built, so a
/// shape swap happening mid-frame can never be observed half-applied.
/// `strength` is globally uniform and may be zero (burst disables return).
pub struct ShapeReturn {
    pub targets: Arc<Vec<NVec3>>, // one target point per particle, same index
    pub expansion: f32, // scale applied to every target this tick
    pub strength: f32, // spring constant, 0.03 nominal
}

impl Acceleration for ShapeReturn {
    fn acceleration(&self, _t: f32, cloud: &ParticleCloud, _rng: &mut dyn RngCore, out: &mut [NVec3]) {
        // Particle i is always attracted to target i. No reassignment or
        // matching happens between shapes, which is what makes morph
        // transitions index-stable.
        for ((a, x), target) in out.iter_mut().zip(cloud.position.iter()).zip(self.targets.iter()) {
            let t = target * self.expansion;
            *a += (t - x) * self.strength;
        }
    }
}

/// Fist/gravity collapse: every particle is pulled toward the world origin,
/// plus isotropic jitter drawn fresh per particle per tick. A stored
/// per-particle seed would freeze the chaos into a pattern; the draws must
/// be independent every tick.
pub struct FistCollapse {
    pub strength: f32, // origin pull, 0.05 nominal
    pub jitter: f32, // per-axis uniform amplitude, 0.05 nominal
}

impl Acceleration for FistCollapse {
    fn acceleration(&self, _t: f32, cloud: &ParticleCloud, rng: &mut dyn RngCore, out: &mut [NVec3]) {
        let j = self.jitter;
        for (a, x) in out.iter_mut().zip(cloud.position.iter()) {
            // Pull toward the origin
            *a -= x * self.strength;
            // Fresh jitter per particle, every tick
            if j > 0.0 {
                *a += NVec3::new(
                    rng.gen_range(-j..j),
                    rng.gen_range(-j..j),
                    rng.gen_range(-j..j),
                );
            }
        }
    }
}

/// Supernova burst: radial push away from the origin with a randomized
/// magnitude per particle per tick.
///
/// The narrow random band turns the expanding cloud into a slightly uneven
/// shell instead of a uniform sphere.
pub struct Burst {
    pub base: f32, // base outward gain, 0.02 nominal
    pub spread: f32, // random extra gain in [0, spread), 0.01 nominal
}

impl Acceleration for Burst {
    fn acceleration(&self, _t: f32, cloud: &ParticleCloud, rng: &mut dyn RngCore, out: &mut [NVec3]) {
        for (a, x) in out.iter_mut().zip(cloud.position.iter()) {
            let extra = if self.spread > 0.0 {
                rng.gen_range(0.0..self.spread)
            } else {
                0.0
            };
            *a += x * (self.base + extra);
        }
    }
}
