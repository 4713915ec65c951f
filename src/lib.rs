pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{ParticleCloud, NVec3};
pub use simulation::forces::{Acceleration, AccelSet, ShapeReturn, FistCollapse, Burst};
pub use simulation::integrator::damped_euler_step;
pub use simulation::gesture::{GestureState, GestureSlot};
pub use simulation::selector::{derive_tick, TickParams, RotationState, VisualState};
pub use simulation::shapes::sample_shape;
pub use simulation::morph::MorphTargetStore;
pub use simulation::engine::MorphEngine;
pub use simulation::scenario::Scenario;

pub use configuration::config::{ShapeKind, EngineConfig, ParametersConfig, ScenarioConfig};

pub use visualization::morphsim_vis::run_viewer;

pub use benchmark::benchmark::{bench_tick, bench_sample};
