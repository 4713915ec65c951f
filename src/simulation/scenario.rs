//! Build a fully-initialized runtime scenario from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! containing:
//! - the morph engine (buffers, target store, rng, eased states)
//! - the shared gesture slot the sensor (or simulator) publishes into
//!
//! The scenario is inserted into Bevy as a `Resource` and consumed by the
//! tick and visualization systems

use std::sync::Arc;

use bevy::prelude::Resource;

use crate::configuration::config::ScenarioConfig;
use crate::simulation::engine::MorphEngine;
use crate::simulation::gesture::GestureSlot;
use crate::simulation::params::Parameters;

/// Bevy resource representing a fully-initialized morph scenario
///
/// Contains the engine with its cold-started particle cloud plus the
/// gesture slot. The slot is behind an `Arc` so an external sensor thread
/// can hold a publishing handle while the frame loop reads.
#[derive(Resource)]
pub struct Scenario {
    pub engine: MorphEngine,
    pub gestures: Arc<GestureSlot>,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Self {
        // Parameters (runtime) from ParametersConfig
        let p_cfg = cfg.parameters;
        let parameters = Parameters {
            damping: p_cfg.damping,
            return_strength: p_cfg.return_strength,
            burst_threshold: p_cfg.burst_threshold,
            fist_strength: p_cfg.fist_strength,
            fist_jitter: p_cfg.fist_jitter,
            burst_base: p_cfg.burst_base,
            burst_spread: p_cfg.burst_spread,
            breath_rate: p_cfg.breath_rate,
            breath_amp: p_cfg.breath_amp,
            rotation_ease: p_cfg.rotation_ease,
            tilt_decay: p_cfg.tilt_decay,
            auto_spin: p_cfg.auto_spin,
            visual_ease: p_cfg.visual_ease,
            seed: p_cfg.seed,
        };

        // Engine with cold-start snap onto the configured shape
        let e_cfg = cfg.engine;
        let mut engine = MorphEngine::new(
            e_cfg.particle_count,
            e_cfg.radius,
            e_cfg.base_color,
            parameters,
        );
        engine.set_shape(e_cfg.shape);

        Self {
            engine,
            gestures: Arc::new(GestureSlot::new()),
        }
    }
}
