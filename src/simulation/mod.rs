pub mod collisions;
pub mod constraint;
pub mod emitter;
pub mod error;
pub mod integrator;
pub mod params;
pub mod scenario;
pub mod solver;
pub mod states;
