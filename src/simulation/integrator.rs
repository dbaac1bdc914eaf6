//! Fixed-step integration over the particle population.
//!
//! Two passes per sub-step, driven by the solver: accumulate the external
//! acceleration (uniform gravity is the only one), then advance every
//! particle with the positional Verlet update.

use crate::simulation::states::{NVec2, Particle};

/// Accumulate `gravity` into every particle's acceleration for this
/// sub-step.
pub fn apply_gravity(particles: &mut [Particle], gravity: NVec2) {
    for p in particles.iter_mut() {
        p.accelerate(gravity);
    }
}

/// Advance every particle by one sub-step of length `dt`.
/// Positions and previous positions are updated in-place; acceleration
/// accumulators are cleared.
pub fn integrate(particles: &mut [Particle], dt: f32) {
    for p in particles.iter_mut() {
        p.integrate(dt);
    }
}
