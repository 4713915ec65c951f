//! High-level runtime engine
//!
//! `MorphEngine` owns the particle buffers, the morph target store, the
//! seeded rng, and the eased rotation/visual states. Each `tick` derives
//! the active force set from the latest gesture snapshot and advances the
//! simulation by exactly one step.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::configuration::config::ShapeKind;
use crate::simulation::forces::{AccelSet, Burst, FistCollapse, ShapeReturn};
use crate::simulation::gesture::GestureState;
use crate::simulation::integrator::damped_euler_step;
use crate::simulation::morph::MorphTargetStore;
use crate::simulation::params::Parameters;
use crate::simulation::selector::{derive_tick, RotationState, VisualState};
use crate::simulation::states::{NVec3, ParticleCloud};

pub struct MorphEngine {
    pub cloud: ParticleCloud, // position/velocity buffers, persist across shape changes
    pub params: Parameters,
    pub rotation: RotationState, // whole-cloud rigid rotation, eased
    pub visual: VisualState, // eased color/opacity/size for the renderer
    store: Option<MorphTargetStore>, // None until the first set_shape
    base_color: [f32; 3],
    radius: f32,
    rng: StdRng,
    initialized: bool, // set by the first shape assignment (cold-start snap)
}

impl MorphEngine {
    /// Allocate buffers for `particle_count` particles. The cloud is inert
    /// until the first [`set_shape`](Self::set_shape) call.
    pub fn new(particle_count: usize, radius: f32, base_color: [f32; 3], params: Parameters) -> Self {
        let rng = StdRng::seed_from_u64(params.seed);
        Self {
            cloud: ParticleCloud::new(particle_count),
            params,
            rotation: RotationState::default(),
            visual: VisualState::new(base_color),
            store: None,
            base_color,
            radius,
            rng,
            initialized: false,
        }
    }

    /// Select a new morph shape, resampling the full target set.
    ///
    /// The very first call snaps positions onto the shape with zero
    /// velocity. Every later call leaves position/velocity untouched, so
    /// the transition is an animated morph driven by the return force. The
    /// explicit flag means a cloud that happens to sit at the origin (for
    /// example after a long fist collapse) still morphs instead of snapping.
    pub fn set_shape(&mut self, kind: ShapeKind) {
        let n = self.cloud.len();
        let store = match self.store.take() {
            Some(mut s) => {
                s.set_shape(kind, n, self.radius, &mut self.rng);
                s
            }
            None => MorphTargetStore::new(kind, n, self.radius, &mut self.rng),
        };

        if !self.initialized {
            // Cold start: no prior kinematic state to integrate from
            for (x, target) in self.cloud.position.iter_mut().zip(store.targets().iter()) {
                *x = *target;
            }
            for v in self.cloud.velocity.iter_mut() {
                *v = NVec3::zeros();
            }
            self.initialized = true;
        }

        self.store = Some(store);
    }

    /// Advance the simulation by one step using the given gesture snapshot.
    /// Tolerates a stale or never-updated snapshot (default "not tracking"
    /// drives the idle breathing) and never blocks.
    pub fn tick(&mut self, dt: f32, gesture: &GestureState) {
        let Some(store) = &self.store else {
            return; // no shape assigned yet, nothing to simulate
        };

        let tick = derive_tick(gesture, self.cloud.t, &self.params);

        // Return force is always present; its strength is zero during burst.
        // Fist and burst terms are added only while their gesture holds.
        let mut forces = AccelSet::new().with(ShapeReturn {
            targets: store.targets(),
            expansion: tick.expansion,
            strength: tick.return_strength,
        });
        if tick.fist {
            forces = forces.with(FistCollapse {
                strength: self.params.fist_strength,
                jitter: self.params.fist_jitter,
            });
        }
        if tick.burst {
            forces = forces.with(Burst {
                base: self.params.burst_base,
                spread: self.params.burst_spread,
            });
        }

        damped_euler_step(&mut self.cloud, &forces, &self.params, &mut self.rng, dt);

        self.rotation.update(gesture, &self.params);
        self.visual.update(tick.burst, self.base_color, &self.params);
    }

    /// Render-ready positions for the current frame.
    pub fn positions(&self) -> &[NVec3] {
        &self.cloud.position
    }

    /// Currently selected shape, if one has been assigned.
    pub fn shape(&self) -> Option<ShapeKind> {
        self.store.as_ref().map(|s| s.kind())
    }

    /// Current morph target store, if one has been assigned.
    pub fn store(&self) -> Option<&MorphTargetStore> {
        self.store.as_ref()
    }

    /// Update the steady-state color the visual easing pulls toward.
    pub fn set_base_color(&mut self, color: [f32; 3]) {
        self.base_color = color;
    }

    pub fn len(&self) -> usize {
        self.cloud.len()
    }
}
