//! Numerical parameters for the simulation.
//!
//! `Parameters` holds the runtime settings of the stepper:
//! - gravity vector,
//! - sub-step count and frame interval (`step_dt = frame_dt / sub_steps`),
//! - collision response coefficient and mass weighting.
//!
//! All values are fixed within a `step()`; the solver validates mutations
//! between steps.

use crate::simulation::states::NVec2;

#[derive(Debug, Clone)]
pub struct Parameters {
    pub gravity: NVec2, // external acceleration, +y is down
    pub sub_steps: u32, // physics iterations per frame, > 0
    pub frame_dt: f32, // host frame interval in seconds, > 0
    pub response_coef: f32, // collision correction scale in [0, 1]
    pub mass_weighted: bool, // split corrections by radius ratio
}

impl Parameters {
    /// Defaults for the disc-bounded configuration: damped, mass-weighted
    /// collision response.
    pub fn disc_defaults() -> Self {
        Self {
            gravity: NVec2::new(0.0, 1000.0),
            sub_steps: 8,
            frame_dt: 1.0 / 60.0,
            response_coef: 0.75,
            mass_weighted: true,
        }
    }

    /// Defaults for the rectangle-bounded configuration: full single-pass
    /// separation, uniform weights.
    pub fn rect_defaults() -> Self {
        Self {
            response_coef: 1.0,
            mass_weighted: false,
            ..Self::disc_defaults()
        }
    }

    /// Sub-step interval.
    pub fn step_dt(&self) -> f32 {
        self.frame_dt / self.sub_steps as f32
    }
}
