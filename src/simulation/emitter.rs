//! Rate-limited particle emitter.
//!
//! Spawns at most one particle per `spawn_delay` seconds of simulated time
//! at a fixed source point, up to `max_count`, with a launch velocity whose
//! angle sweeps as a function of the solver clock:
//! `theta = max_angle * sin(t) + pi/2`. Radii are drawn from a seeded RNG
//! so identical runs spawn identical particles; `reset()` reseeds.

use std::f32::consts::PI;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::simulation::error::SolverError;
use crate::simulation::solver::Solver;
use crate::simulation::states::NVec2;

pub struct Emitter {
    pub position: NVec2, // world-space source point
    pub spawn_delay: f32, // minimum simulated seconds between spawns
    pub speed: f32, // launch speed
    pub min_radius: f32, // radius range, inclusive
    pub max_radius: f32,
    pub max_count: usize, // population cap
    pub max_angle: f32, // half-width of the sweeping fan, radians
    seed: u64,
    cooldown: f32,
    rng: StdRng,
}

impl Emitter {
    /// Emitter at `position` with the reference settings (40 Hz spawn rate,
    /// speed 1200, radius 10, cap 1850, unit fan).
    pub fn new(position: NVec2, seed: u64) -> Self {
        Self {
            position,
            spawn_delay: 0.025,
            speed: 1200.0,
            min_radius: 10.0,
            max_radius: 10.0,
            max_count: 1850,
            max_angle: 1.0,
            seed,
            cooldown: 0.0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Advance the throttle by one host frame and spawn if due. Returns the
    /// new particle's index when one was emitted.
    ///
    /// Call once per frame, before `solver.step()`.
    pub fn update(&mut self, solver: &mut Solver) -> Result<Option<usize>, SolverError> {
        self.cooldown += solver.parameters().frame_dt;
        if solver.count() >= self.max_count || self.cooldown < self.spawn_delay {
            return Ok(None);
        }
        self.cooldown = 0.0;

        let radius = if self.max_radius > self.min_radius {
            self.rng.gen_range(self.min_radius..=self.max_radius)
        } else {
            self.min_radius
        };
        let index = solver.add_particle(self.position, radius)?;

        let angle = self.max_angle * solver.time().sin() + PI * 0.5;
        let v = self.speed * NVec2::new(angle.cos(), angle.sin());
        solver.set_velocity(index, v)?;
        Ok(Some(index))
    }

    /// Clear the throttle and reseed the RNG so the spawn sequence replays.
    pub fn reset(&mut self) {
        self.cooldown = 0.0;
        self.rng = StdRng::seed_from_u64(self.seed);
    }
}
