//! Core state types for the particle simulation.
//!
//! Defines the Verlet particle record:
//! - `Particle` using `NVec2` (current position, previous position,
//!   per-sub-step acceleration accumulator, radius, color tag)
//!
//! Velocity is never stored: it is implied by the distance between the
//! current and previous positions, so any positional correction applied
//! between integrations adjusts velocity for free.

use nalgebra::Vector2;
pub type NVec2 = Vector2<f32>;

/// Opaque RGBA color tag. Nothing in the physics reads it; it exists for
/// the renderer and the palette-sampling host feature.
pub type Rgba = [u8; 4];

pub const WHITE: Rgba = [255, 255, 255, 255];

#[derive(Debug, Clone)]
pub struct Particle {
    pub position: NVec2, // current position
    pub position_prev: NVec2, // position at the end of the previous sub-step
    pub acceleration: NVec2, // accumulated for the current sub-step, cleared on integrate
    pub radius: f32, // strictly positive
    pub color: Rgba, // opaque to physics
}

impl Particle {
    /// New particle at rest: `position_prev == position`, zero acceleration.
    pub fn new(position: NVec2, radius: f32) -> Self {
        Self {
            position,
            position_prev: position,
            acceleration: NVec2::zeros(),
            radius,
            color: WHITE,
        }
    }

    /// Størmer–Verlet positional update for one sub-step of length `dt`.
    /// Consumes and clears the acceleration accumulator.
    pub fn integrate(&mut self, dt: f32) {
        let displacement = self.position - self.position_prev;
        self.position_prev = self.position;
        self.position = self.position + displacement + self.acceleration * (dt * dt);
        self.acceleration = NVec2::zeros();
    }

    /// Accumulate an acceleration for the current sub-step.
    pub fn accelerate(&mut self, a: NVec2) {
        self.acceleration += a;
    }

    /// Assign the implicit velocity: `position_prev := position - v * dt`.
    pub fn set_velocity(&mut self, v: NVec2, dt: f32) {
        self.position_prev = self.position - v * dt;
    }

    /// Add to the implicit velocity.
    pub fn add_velocity(&mut self, v: NVec2, dt: f32) {
        self.position_prev -= v * dt;
    }

    /// Implicit velocity over a sub-step of length `dt`.
    pub fn velocity(&self, dt: f32) -> NVec2 {
        (self.position - self.position_prev) / dt
    }
}
