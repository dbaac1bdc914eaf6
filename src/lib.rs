pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{Particle, NVec2, Rgba};
pub use simulation::params::Parameters;
pub use simulation::constraint::Constraint;
pub use simulation::solver::Solver;
pub use simulation::emitter::Emitter;
pub use simulation::error::SolverError;
pub use simulation::scenario::Scenario;

pub use configuration::config::{
    ConstraintConfig, EngineConfig, ParametersConfig, ParticleConfig, ScenarioConfig,
    SpawnerConfig,
};

pub use visualization::vis2d::run_2d;

pub use benchmark::benchmark::{bench_collisions, bench_step};
