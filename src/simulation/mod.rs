pub mod states;
pub mod params;
pub mod engine;
pub mod forces;
pub mod integrator;
pub mod gesture;
pub mod selector;
pub mod shapes;
pub mod morph;
pub mod scenario;
