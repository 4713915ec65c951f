//! Morph target storage
//!
//! Holds the point set the particles are currently attracted toward. The
//! whole set is replaced wholesale on a shape change; no interpolation
//! happens in target space. The resulting motion is smoothed implicitly by
//! the return force, which is what turns a swap into an animated morph.

use std::sync::Arc;

use rand::RngCore;

use crate::configuration::config::ShapeKind;
use crate::simulation::shapes::sample_shape;
use crate::simulation::states::NVec3;

/// Current morph target set, one point per particle index.
///
/// Targets live behind an `Arc`: a tick clones the handle once up front, so
/// a `set_shape` arriving from a UI event mid-frame swaps the stored handle
/// without the running tick ever observing a partially written buffer.
#[derive(Debug, Clone)]
pub struct MorphTargetStore {
    kind: ShapeKind,
    targets: Arc<Vec<NVec3>>,
}

impl MorphTargetStore {
    /// Sample the initial target set for `kind`.
    pub fn new(kind: ShapeKind, particle_count: usize, radius: f32, rng: &mut dyn RngCore) -> Self {
        Self {
            kind,
            targets: Arc::new(sample_shape(kind, particle_count, radius, rng)),
        }
    }

    /// Resample and replace the full target set. Takes effect on the next
    /// tick; particle `i` keeps mapping to target index `i`.
    pub fn set_shape(&mut self, kind: ShapeKind, particle_count: usize, radius: f32, rng: &mut dyn RngCore) {
        self.kind = kind;
        self.targets = Arc::new(sample_shape(kind, particle_count, radius, rng));
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// Snapshot handle to the current target set, for this tick's forces.
    pub fn targets(&self) -> Arc<Vec<NVec3>> {
        Arc::clone(&self.targets)
    }

    /// Target points scaled by `factor`, without mutating storage. Backs the
    /// breathing/expansion effects when a caller wants the materialized set.
    pub fn expand(&self, factor: f32) -> Vec<NVec3> {
        self.targets.iter().map(|p| p * factor).collect()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }
}
