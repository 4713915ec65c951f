//! Configuration types for loading morph scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – cloud setup (shape, particle count, radius, color)
//! - [`ParametersConfig`] – force strengths, thresholds, and easing rates
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! An example scenario YAML matching these types:
//!
//! ```yaml
//! engine:
//!   shape: "sphere"         # sphere | cube | heart | spiral | ringed_body | cloud
//!   particle_count: 15000
//!   radius: 4.0             # nominal shape radius in world units
//!   base_color: [0.31, 0.76, 0.97]
//!
//! parameters:
//!   damping: 0.90           # velocity decay per tick
//!   return_strength: 0.03   # spring toward the morph target
//!   burst_threshold: 0.85   # spread distance that triggers the burst
//!   fist_strength: 0.05     # origin pull while fist is held
//!   fist_jitter: 0.05       # collapse jitter amplitude per axis
//!   burst_base: 0.02        # base radial burst gain
//!   burst_spread: 0.01      # random extra burst gain
//!   breath_rate: 0.5        # idle breathing angular rate
//!   breath_amp: 0.1         # idle breathing amplitude
//!   rotation_ease: 0.1      # easing toward hand rotation
//!   tilt_decay: 0.05        # tilt return-to-level rate when idle
//!   auto_spin: 0.002        # idle yaw per tick
//!   visual_ease: 0.1        # color/opacity/size easing rate
//!   seed: 42                # deterministic seed
//! ```
//!
//! An unknown `shape` name fails at deserialization with serde's
//! unknown-variant error; past this boundary an invalid shape kind is
//! unrepresentable.

use serde::Deserialize;

/// The closed set of morph shapes the sampler knows how to produce.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    #[serde(rename = "sphere")] // uniform spherical shell
    Sphere,

    #[serde(rename = "cube")] // points pushed onto the cube surface
    Cube,

    #[serde(rename = "heart")] // parametric heart curve thickened into 3D
    Heart,

    #[serde(rename = "spiral")] // multi-turn helix with radial jitter
    Spiral,

    #[serde(rename = "ringed_body")] // central sphere plus a flat annulus
    RingedBody,

    #[serde(rename = "cloud")] // overlapping flattened blobs
    Cloud,
}

impl ShapeKind {
    /// Name as written in scenario YAML, for logs and window titles.
    pub fn label(&self) -> &'static str {
        match self {
            ShapeKind::Sphere => "sphere",
            ShapeKind::Cube => "cube",
            ShapeKind::Heart => "heart",
            ShapeKind::Spiral => "spiral",
            ShapeKind::RingedBody => "ringed_body",
            ShapeKind::Cloud => "cloud",
        }
    }
}

/// Cloud setup configuration
/// Controls the structure of the simulation
#[derive(Deserialize, Debug)]
pub struct EngineConfig {
    pub shape: ShapeKind, // initial morph target shape
    pub particle_count: usize, // fixed N, buffers never resize after start
    pub radius: f32, // nominal shape radius in world units
    pub base_color: [f32; 3], // steady-state particle color, linear rgb
}

/// Force strengths, thresholds, and easing rates for a scenario
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub damping: f32, // velocity decay per tick
    pub return_strength: f32, // spring toward the morph target
    pub burst_threshold: f32, // spread distance that triggers the burst
    pub fist_strength: f32, // origin pull while fist is held
    pub fist_jitter: f32, // collapse jitter amplitude per axis
    pub burst_base: f32, // base radial burst gain
    pub burst_spread: f32, // random extra burst gain
    pub breath_rate: f32, // idle breathing angular rate
    pub breath_amp: f32, // idle breathing amplitude
    pub rotation_ease: f32, // easing toward hand rotation
    pub tilt_decay: f32, // tilt return-to-level rate when idle
    pub auto_spin: f32, // idle yaw per tick
    pub visual_ease: f32, // color/opacity/size easing rate
    pub seed: u64, // deterministic seed
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug)]
pub struct ScenarioConfig {
    pub engine: EngineConfig, // cloud setup (shape, count, radius, color)
    pub parameters: ParametersConfig, // force and easing tunables
}
