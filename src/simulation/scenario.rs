//! Build fully-initialized simulation scenarios from configuration.
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! (`Scenario`) containing:
//! - the configured solver (constraint, parameters, preset particles)
//! - the optional rate-limited emitter
//! - the optional palette image path
//!
//! The scenario is inserted into Bevy as a `Resource` and consumed by the
//! stepping and rendering systems.

use bevy::prelude::Resource;

use crate::configuration::config::{ConstraintConfig, ScenarioConfig};
use crate::simulation::constraint::Constraint;
use crate::simulation::emitter::Emitter;
use crate::simulation::error::SolverError;
use crate::simulation::solver::Solver;
use crate::simulation::states::NVec2;

/// Bevy resource representing a fully-initialized simulation scenario.
///
/// This is the main runtime bundle constructed from a [`ScenarioConfig`]:
/// it contains the solver (constraint, parameters, particle population)
/// and the spawn policy. The visualization systems step the solver and
/// drive the emitter once per frame.
#[derive(Resource)]
pub struct Scenario {
    pub solver: Solver,
    pub emitter: Option<Emitter>,
    pub palette_image: Option<String>,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, SolverError> {
        // Constraint: map the YAML variant to the runtime sum type
        let constraint = match cfg.engine.constraint {
            ConstraintConfig::Disc { center, radius } => Constraint::Disc {
                center: NVec2::new(center[0], center[1]),
                radius,
            },
            ConstraintConfig::Rect { size } => Constraint::Rect {
                size: NVec2::new(size[0], size[1]),
            },
        };

        // Solver: variant defaults first, then explicit overrides
        let mut solver = Solver::new(constraint)?;
        solver.set_gravity(NVec2::new(cfg.parameters.gravity[0], cfg.parameters.gravity[1]));
        solver.set_sub_steps(cfg.parameters.sub_steps)?;
        solver.set_rate(cfg.parameters.frame_rate)?;
        if let Some(coef) = cfg.engine.response_coef {
            solver.set_response_coef(coef)?;
        }
        if let Some(weighted) = cfg.engine.mass_weighted {
            solver.set_mass_weighted(weighted);
        }

        // Preset particles: spawn at rest, then assign any listed velocity
        if let Some(particles) = &cfg.particles {
            for pc in particles {
                let index =
                    solver.add_particle(NVec2::new(pc.position[0], pc.position[1]), pc.radius)?;
                if let Some(v) = pc.velocity {
                    solver.set_velocity(index, NVec2::new(v[0], v[1]))?;
                }
            }
        }

        // Emitter: reference settings overridden field by field
        let emitter = cfg.spawner.as_ref().map(|sc| {
            let mut emitter = Emitter::new(
                NVec2::new(sc.position[0], sc.position[1]),
                cfg.parameters.seed,
            );
            emitter.spawn_delay = sc.spawn_delay;
            emitter.speed = sc.speed;
            emitter.min_radius = sc.min_radius;
            emitter.max_radius = sc.max_radius;
            emitter.max_count = sc.max_count;
            emitter.max_angle = sc.max_angle;
            emitter
        });

        Ok(Self {
            solver,
            emitter,
            palette_image: cfg.palette_image,
        })
    }
}
