//! The sub-stepping solver.
//!
//! `Solver` owns the particle population, the boundary constraint, the
//! numerical parameters, and the simulation clock. Each `step()` advances
//! one host frame: `sub_steps` iterations of
//! gravity -> collisions -> constraint -> integrate, in that order. The
//! ordering is part of the contract; swapping the passes changes visible
//! behavior at high density.
//!
//! Particles are stored contiguously with stable, append-only indices;
//! only `reset()` invalidates them. The host reads particle state between
//! `step()` calls and addresses particles by index, never by reference.

use crate::simulation::collisions;
use crate::simulation::constraint::Constraint;
use crate::simulation::error::SolverError;
use crate::simulation::integrator;
use crate::simulation::params::Parameters;
use crate::simulation::states::{NVec2, Particle, Rgba};

pub struct Solver {
    params: Parameters,
    constraint: Constraint,
    particles: Vec<Particle>,
    time: f32, // simulated seconds since last reset
}

impl Solver {
    /// Solver with the given boundary and variant-appropriate collision
    /// defaults (disc: damped + mass-weighted, rect: full + uniform).
    pub fn new(constraint: Constraint) -> Result<Self, SolverError> {
        let params = match constraint {
            Constraint::Disc { .. } => Parameters::disc_defaults(),
            Constraint::Rect { .. } => Parameters::rect_defaults(),
        };
        validate_constraint(&constraint)?;
        Ok(Self {
            params,
            constraint,
            particles: Vec::new(),
            time: 0.0,
        })
    }

    /// Disc-bounded solver centered at `center`.
    pub fn new_disc(center: NVec2, radius: f32) -> Result<Self, SolverError> {
        Self::new(Constraint::Disc { center, radius })
    }

    /// Rectangle-bounded solver spanning `[0, size.x] x [0, size.y]`.
    pub fn new_rect(size: NVec2) -> Result<Self, SolverError> {
        Self::new(Constraint::Rect { size })
    }

    // =====================================================================
    // Configuration
    // =====================================================================

    /// Select the disc constraint. Resets the collision response to the
    /// disc defaults (0.75, mass-weighted); override afterwards if needed.
    pub fn configure_disc(&mut self, center: NVec2, radius: f32) -> Result<(), SolverError> {
        let constraint = Constraint::Disc { center, radius };
        validate_constraint(&constraint)?;
        self.constraint = constraint;
        self.params.response_coef = 0.75;
        self.params.mass_weighted = true;
        Ok(())
    }

    /// Select the rectangular constraint. Resets the collision response to
    /// the rect defaults (1.0, uniform); override afterwards if needed.
    pub fn configure_rect(&mut self, size: NVec2) -> Result<(), SolverError> {
        let constraint = Constraint::Rect { size };
        validate_constraint(&constraint)?;
        self.constraint = constraint;
        self.params.response_coef = 1.0;
        self.params.mass_weighted = false;
        Ok(())
    }

    pub fn set_gravity(&mut self, gravity: NVec2) {
        self.params.gravity = gravity;
    }

    pub fn set_sub_steps(&mut self, sub_steps: u32) -> Result<(), SolverError> {
        if sub_steps == 0 {
            return Err(SolverError::ZeroSubSteps);
        }
        self.params.sub_steps = sub_steps;
        Ok(())
    }

    pub fn set_frame_dt(&mut self, frame_dt: f32) -> Result<(), SolverError> {
        if !(frame_dt > 0.0) {
            return Err(SolverError::NonPositiveFrameDt(frame_dt));
        }
        self.params.frame_dt = frame_dt;
        Ok(())
    }

    /// Equivalent to `set_frame_dt(1 / rate)`.
    pub fn set_rate(&mut self, rate: u32) -> Result<(), SolverError> {
        if rate == 0 {
            return Err(SolverError::ZeroRate);
        }
        self.params.frame_dt = 1.0 / rate as f32;
        Ok(())
    }

    pub fn set_response_coef(&mut self, coef: f32) -> Result<(), SolverError> {
        if !(0.0..=1.0).contains(&coef) {
            return Err(SolverError::ResponseCoefOutOfRange(coef));
        }
        self.params.response_coef = coef;
        Ok(())
    }

    pub fn set_mass_weighted(&mut self, mass_weighted: bool) {
        self.params.mass_weighted = mass_weighted;
    }

    // =====================================================================
    // Population
    // =====================================================================

    /// Append a particle at rest. Returns its index, stable until the next
    /// `reset()`.
    pub fn add_particle(&mut self, position: NVec2, radius: f32) -> Result<usize, SolverError> {
        if !(radius > 0.0) {
            return Err(SolverError::NonPositiveRadius(radius));
        }
        self.particles.push(Particle::new(position, radius));
        Ok(self.particles.len() - 1)
    }

    /// Assign a particle's velocity (world units per second, applied over
    /// the sub-step interval).
    pub fn set_velocity(&mut self, index: usize, v: NVec2) -> Result<(), SolverError> {
        let dt = self.params.step_dt();
        self.particle_mut(index)?.set_velocity(v, dt);
        Ok(())
    }

    /// Add to a particle's velocity.
    pub fn add_velocity(&mut self, index: usize, v: NVec2) -> Result<(), SolverError> {
        let dt = self.params.step_dt();
        self.particle_mut(index)?.add_velocity(v, dt);
        Ok(())
    }

    /// Derived velocity of one particle.
    pub fn velocity(&self, index: usize) -> Result<NVec2, SolverError> {
        Ok(self.get(index)?.velocity(self.params.step_dt()))
    }

    /// Tag a particle with a renderer color.
    pub fn set_color(&mut self, index: usize, color: Rgba) -> Result<(), SolverError> {
        self.particle_mut(index)?.color = color;
        Ok(())
    }

    pub fn get(&self, index: usize) -> Result<&Particle, SolverError> {
        let len = self.particles.len();
        self.particles
            .get(index)
            .ok_or(SolverError::OutOfBounds { index, len })
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn count(&self) -> usize {
        self.particles.len()
    }

    // =====================================================================
    // Stepping
    // =====================================================================

    /// Advance one host frame. Total once configuration is valid: numerical
    /// degeneracies are handled inside the passes, never raised.
    pub fn step(&mut self) {
        self.time += self.params.frame_dt;
        let step_dt = self.params.step_dt();
        for _ in 0..self.params.sub_steps {
            integrator::apply_gravity(&mut self.particles, self.params.gravity);
            collisions::resolve(
                &mut self.particles,
                self.params.response_coef,
                self.params.mass_weighted,
            );
            self.constraint.apply(&mut self.particles);
            integrator::integrate(&mut self.particles, step_dt);
        }
    }

    /// Clear the population and zero the clock. Configuration (constraint,
    /// gravity, sub-steps, frame interval) is preserved. The only operation
    /// that invalidates indices.
    pub fn reset(&mut self) {
        self.particles.clear();
        self.time = 0.0;
    }

    // =====================================================================
    // Queries
    // =====================================================================

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn step_dt(&self) -> f32 {
        self.params.step_dt()
    }

    pub fn constraint(&self) -> &Constraint {
        &self.constraint
    }

    pub fn parameters(&self) -> &Parameters {
        &self.params
    }

    fn particle_mut(&mut self, index: usize) -> Result<&mut Particle, SolverError> {
        let len = self.particles.len();
        self.particles
            .get_mut(index)
            .ok_or(SolverError::OutOfBounds { index, len })
    }
}

fn validate_constraint(constraint: &Constraint) -> Result<(), SolverError> {
    match *constraint {
        Constraint::Disc { radius, .. } => {
            if !(radius > 0.0) {
                return Err(SolverError::NonPositiveConstraintRadius(radius));
            }
        }
        Constraint::Rect { size } => {
            if !(size.x > 0.0 && size.y > 0.0) {
                return Err(SolverError::NonPositiveWorldSize(size.x, size.y));
            }
        }
    }
    Ok(())
}
