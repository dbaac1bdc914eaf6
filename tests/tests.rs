use vsim::simulation::collisions;
use vsim::{Constraint, Emitter, NVec2, Particle, Scenario, ScenarioConfig, Solver, SolverError};

/// Rectangle-bounded solver at 60 Hz with the given sub-step count
pub fn rect_solver(size: f32, sub_steps: u32) -> Solver {
    let mut solver = Solver::new_rect(NVec2::new(size, size)).unwrap();
    solver.set_sub_steps(sub_steps).unwrap();
    solver.set_rate(60).unwrap();
    solver
}

/// Reference disc-bounded solver: center (500, 500), radius 450, 8 sub-steps
pub fn disc_solver() -> Solver {
    let mut solver = Solver::new_disc(NVec2::new(500.0, 500.0), 450.0).unwrap();
    solver.set_sub_steps(8).unwrap();
    solver.set_rate(60).unwrap();
    solver
}

/// Largest pairwise overlap depth across the population
pub fn max_overlap(particles: &[Particle]) -> f32 {
    let mut worst = 0.0f32;
    for i in 0..particles.len() {
        for k in (i + 1)..particles.len() {
            let dist = (particles[i].position - particles[k].position).magnitude();
            let overlap = particles[i].radius + particles[k].radius - dist;
            worst = worst.max(overlap);
        }
    }
    worst
}

// ==================================================================================
// Integrator tests
// ==================================================================================

#[test]
fn free_fall_single_step() {
    let mut solver = rect_solver(1000.0, 1);
    solver.set_gravity(NVec2::new(0.0, 1000.0));
    solver.add_particle(NVec2::new(500.0, 500.0), 10.0).unwrap();

    solver.step();

    let dt = 1.0f32 / 60.0;
    let expected_y = 500.0 + 1000.0 * dt * dt;
    let p = solver.get(0).unwrap();
    assert_eq!(p.position.x, 500.0);
    assert!(
        (p.position.y - expected_y).abs() < 1e-3,
        "expected y ~ {}, got {}",
        expected_y,
        p.position.y
    );
}

#[test]
fn velocity_round_trip() {
    let mut solver = rect_solver(1000.0, 1);
    solver.set_gravity(NVec2::zeros());
    solver.add_particle(NVec2::new(500.0, 500.0), 10.0).unwrap();

    let v = NVec2::new(123.0, -45.0);
    solver.set_velocity(0, v).unwrap();
    solver.step();

    let derived = solver.velocity(0).unwrap();
    assert!((derived - v).magnitude() < 1e-2, "got {:?}", derived);
}

#[test]
fn particles_spawn_at_rest() {
    let mut solver = rect_solver(1000.0, 8);
    let i = solver.add_particle(NVec2::new(300.0, 300.0), 10.0).unwrap();

    let p = solver.get(i).unwrap();
    assert_eq!(p.position, p.position_prev);
    assert_eq!(solver.velocity(i).unwrap(), NVec2::zeros());
}

#[test]
fn add_velocity_accumulates() {
    let mut solver = rect_solver(1000.0, 1);
    solver.set_gravity(NVec2::zeros());
    solver.add_particle(NVec2::new(500.0, 500.0), 10.0).unwrap();

    solver.set_velocity(0, NVec2::new(100.0, 0.0)).unwrap();
    solver.add_velocity(0, NVec2::new(0.0, 50.0)).unwrap();
    solver.step();

    let derived = solver.velocity(0).unwrap();
    assert!((derived - NVec2::new(100.0, 50.0)).magnitude() < 1e-2);
}

// ==================================================================================
// Collision tests
// ==================================================================================

#[test]
fn touching_pair_is_not_a_collision() {
    let mut solver = rect_solver(1000.0, 1);
    solver.set_gravity(NVec2::zeros());
    solver.add_particle(NVec2::new(490.0, 500.0), 10.0).unwrap();
    solver.add_particle(NVec2::new(510.0, 500.0), 10.0).unwrap();

    solver.step();

    assert_eq!(solver.get(0).unwrap().position, NVec2::new(490.0, 500.0));
    assert_eq!(solver.get(1).unwrap().position, NVec2::new(510.0, 500.0));
}

#[test]
fn overlapping_pair_separates_mass_weighted() {
    // Equal radii: the mass-ratio weights collapse to 1/2 each
    let mut particles = vec![
        Particle::new(NVec2::new(495.0, 500.0), 10.0),
        Particle::new(NVec2::new(505.0, 500.0), 10.0),
    ];

    collisions::resolve(&mut particles, 1.0, true);

    assert!((particles[0].position - NVec2::new(492.5, 500.0)).magnitude() < 1e-4);
    assert!((particles[1].position - NVec2::new(507.5, 500.0)).magnitude() < 1e-4);
}

#[test]
fn overlapping_pair_separates_fully_unweighted() {
    let mut particles = vec![
        Particle::new(NVec2::new(495.0, 500.0), 10.0),
        Particle::new(NVec2::new(505.0, 500.0), 10.0),
    ];

    collisions::resolve(&mut particles, 1.0, false);

    assert!((particles[0].position - NVec2::new(490.0, 500.0)).magnitude() < 1e-4);
    assert!((particles[1].position - NVec2::new(510.0, 500.0)).magnitude() < 1e-4);
}

#[test]
fn larger_particle_moves_less() {
    let mut particles = vec![
        Particle::new(NVec2::new(495.0, 500.0), 30.0),
        Particle::new(NVec2::new(505.0, 500.0), 10.0),
    ];

    collisions::resolve(&mut particles, 1.0, true);

    let moved_big = (particles[0].position - NVec2::new(495.0, 500.0)).magnitude();
    let moved_small = (particles[1].position - NVec2::new(505.0, 500.0)).magnitude();
    assert!(moved_big < moved_small);
    // Weights r_k / (r_i + r_k): big gets 1/4 of the correction, small 3/4
    assert!((moved_small / moved_big - 3.0).abs() < 1e-3);
}

#[test]
fn coincident_centers_fall_back_to_canonical_normal() {
    let mut particles = vec![
        Particle::new(NVec2::new(500.0, 500.0), 10.0),
        Particle::new(NVec2::new(500.0, 500.0), 10.0),
    ];

    collisions::resolve(&mut particles, 1.0, false);

    for p in &particles {
        assert!(p.position.x.is_finite() && p.position.y.is_finite());
        assert_eq!(p.position.y, 500.0);
    }
    // Full min_dist penetration resolved along (1, 0)
    let dist = (particles[0].position - particles[1].position).magnitude();
    assert!((dist - 20.0).abs() < 1e-4);
}

#[test]
fn repeated_passes_drive_penetration_to_zero() {
    // Dense unconstrained cluster: 20 particles of radius 10 scattered
    // within a 15-unit disc
    let mut particles: Vec<Particle> = (0..20)
        .map(|i| {
            let i_f = i as f32;
            Particle::new(
                NVec2::new(500.0 + (i_f * 0.7).sin() * 15.0, 500.0 + (i_f * 1.3).cos() * 15.0),
                10.0,
            )
        })
        .collect();

    let initial = max_overlap(&particles);
    assert!(initial > 10.0, "scatter should start heavily overlapped");

    for _ in 0..200 {
        collisions::resolve(&mut particles, 0.75, true);
    }

    let residual = max_overlap(&particles);
    assert!(residual < 0.5, "residual overlap {} after 200 passes", residual);
}

// ==================================================================================
// Constraint tests
// ==================================================================================

#[test]
fn disc_containment_under_upward_gravity() {
    let mut solver = disc_solver();
    solver.set_gravity(NVec2::new(0.0, -2000.0));
    solver.add_particle(NVec2::new(500.0, 50.0), 10.0).unwrap();

    solver.step();

    let center = NVec2::new(500.0, 500.0);
    let dist = (solver.get(0).unwrap().position - center).magnitude();
    assert!(dist <= 440.0 + 1e-3, "escaped the disc: dist = {}", dist);
}

#[test]
fn disc_containment_settled_population() {
    let mut solver = disc_solver();
    let mut emitter = Emitter::new(NVec2::new(500.0, 200.0), 42);
    emitter.max_count = 60;

    for _ in 0..240 {
        emitter.update(&mut solver).unwrap();
        solver.step();
    }

    assert_eq!(solver.count(), 60);
    let center = NVec2::new(500.0, 500.0);
    for p in solver.particles() {
        let dist = (p.position - center).magnitude();
        assert!(
            dist <= 450.0 - p.radius + 0.5,
            "particle outside the disc: dist = {}",
            dist
        );
    }
}

#[test]
fn rect_containment_settled_population() {
    let mut solver = rect_solver(1000.0, 8);
    let mut emitter = Emitter::new(NVec2::new(500.0, 200.0), 42);
    emitter.max_count = 60;

    for _ in 0..240 {
        emitter.update(&mut solver).unwrap();
        solver.step();
    }

    for p in solver.particles() {
        assert!(p.position.x >= p.radius - 0.5 && p.position.x <= 1000.0 - p.radius + 0.5);
        assert!(p.position.y >= p.radius - 0.5 && p.position.y <= 1000.0 - p.radius + 0.5);
    }
}

#[test]
fn projection_leaves_previous_position_alone() {
    let constraint = Constraint::Disc {
        center: NVec2::new(500.0, 500.0),
        radius: 450.0,
    };
    let mut particles = vec![Particle::new(NVec2::new(500.0, 30.0), 10.0)];
    let prev = particles[0].position_prev;

    constraint.apply(&mut particles);

    assert_ne!(particles[0].position, NVec2::new(500.0, 30.0));
    assert_eq!(particles[0].position_prev, prev);
}

#[test]
fn bounded_penetration_after_settling() {
    let mut solver = disc_solver();
    let mut emitter = Emitter::new(NVec2::new(500.0, 200.0), 7);
    emitter.max_count = 40;

    for _ in 0..300 {
        emitter.update(&mut solver).unwrap();
        solver.step();
    }

    let overlap = max_overlap(solver.particles());
    assert!(overlap < 1.0, "max overlap {} after settling", overlap);
}

// ==================================================================================
// Emitter tests
// ==================================================================================

#[test]
fn spawn_fan_launches_straight_down_at_time_zero() {
    let mut solver = rect_solver(1000.0, 1);
    solver.set_gravity(NVec2::new(0.0, 1000.0));
    let mut emitter = Emitter::new(NVec2::new(500.0, 200.0), 1);
    emitter.spawn_delay = 0.0;

    let index = emitter.update(&mut solver).unwrap().unwrap();
    assert_eq!(index, 0);

    // theta = max_angle * sin(0) + pi/2 = pi/2, straight down (+y)
    let v = solver.velocity(0).unwrap();
    assert!(v.x.abs() < 1e-2);
    assert!((v.y - 1200.0).abs() < 1e-2);

    solver.step();
    let dt = 1.0f32 / 60.0;
    let expected_y = 200.0 + 1200.0 * dt + 1000.0 * dt * dt;
    let p = solver.get(0).unwrap();
    assert!((p.position.y - expected_y).abs() < 1e-2, "got y = {}", p.position.y);
    assert!((p.position.x - 500.0).abs() < 1e-2);
}

#[test]
fn emitter_throttles_by_simulated_time() {
    let mut solver = rect_solver(1000.0, 8);
    let mut emitter = Emitter::new(NVec2::new(500.0, 200.0), 1);
    emitter.spawn_delay = 0.05; // one spawn per 3 frames at 60 Hz

    let mut spawned = 0;
    for _ in 0..30 {
        if emitter.update(&mut solver).unwrap().is_some() {
            spawned += 1;
        }
        solver.step();
    }

    assert_eq!(spawned, 10);
    assert_eq!(solver.count(), 10);
}

#[test]
fn emitter_respects_population_cap() {
    let mut solver = rect_solver(1000.0, 8);
    let mut emitter = Emitter::new(NVec2::new(500.0, 200.0), 1);
    emitter.spawn_delay = 0.0;
    emitter.max_count = 5;

    for _ in 0..20 {
        emitter.update(&mut solver).unwrap();
        solver.step();
    }

    assert_eq!(solver.count(), 5);
}

#[test]
fn identical_runs_are_bit_identical() {
    let run = || {
        let mut solver = disc_solver();
        let mut emitter = Emitter::new(NVec2::new(500.0, 200.0), 42);
        emitter.min_radius = 5.0;
        emitter.max_radius = 15.0;
        emitter.max_count = 80;
        for _ in 0..120 {
            emitter.update(&mut solver).unwrap();
            solver.step();
        }
        solver
    };

    let a = run();
    let b = run();

    assert_eq!(a.count(), b.count());
    for (pa, pb) in a.particles().iter().zip(b.particles()) {
        assert_eq!(pa.position, pb.position);
        assert_eq!(pa.position_prev, pb.position_prev);
        assert_eq!(pa.radius, pb.radius);
    }
}

// ==================================================================================
// Clock and reset tests
// ==================================================================================

#[test]
fn time_advances_by_frame_dt() {
    let mut solver = rect_solver(1000.0, 8);
    assert_eq!(solver.time(), 0.0);

    for _ in 0..10 {
        let before = solver.time();
        solver.step();
        assert_eq!(solver.time(), before + solver.parameters().frame_dt);
    }
}

#[test]
fn reset_clears_population_and_clock() {
    let mut solver = disc_solver();
    for i in 0..100 {
        let offset = i as f32;
        solver
            .add_particle(NVec2::new(300.0 + offset * 4.0, 400.0), 10.0)
            .unwrap();
    }
    for _ in 0..10 {
        solver.step();
    }

    solver.reset();

    assert_eq!(solver.count(), 0);
    assert_eq!(solver.time(), 0.0);
    let index = solver.add_particle(NVec2::new(500.0, 500.0), 10.0).unwrap();
    assert_eq!(index, 0);
}

#[test]
fn reset_preserves_configuration() {
    let mut solver = rect_solver(1000.0, 4);
    solver.set_gravity(NVec2::new(0.0, 500.0));
    solver.reset();

    assert_eq!(solver.parameters().sub_steps, 4);
    assert_eq!(solver.parameters().gravity, NVec2::new(0.0, 500.0));
    assert!(matches!(solver.constraint(), Constraint::Rect { .. }));
}

#[test]
fn indices_are_append_only() {
    let mut solver = rect_solver(1000.0, 8);
    for expected in 0..10 {
        let index = solver
            .add_particle(NVec2::new(100.0 + expected as f32 * 50.0, 100.0), 5.0)
            .unwrap();
        assert_eq!(index, expected);
    }
}

// ==================================================================================
// Error tests
// ==================================================================================

#[test]
fn configuration_errors_are_reported_synchronously() {
    let mut solver = rect_solver(1000.0, 8);

    assert_eq!(solver.set_sub_steps(0), Err(SolverError::ZeroSubSteps));
    assert_eq!(solver.set_rate(0), Err(SolverError::ZeroRate));
    assert_eq!(
        solver.set_frame_dt(0.0),
        Err(SolverError::NonPositiveFrameDt(0.0))
    );
    assert_eq!(
        solver.set_response_coef(1.5),
        Err(SolverError::ResponseCoefOutOfRange(1.5))
    );
    assert_eq!(
        solver.add_particle(NVec2::new(500.0, 500.0), -1.0),
        Err(SolverError::NonPositiveRadius(-1.0))
    );

    // Failed configuration leaves the previous values in place
    assert_eq!(solver.parameters().sub_steps, 8);
    assert_eq!(solver.count(), 0);
}

#[test]
fn invalid_constraints_are_rejected() {
    assert!(matches!(
        Solver::new_disc(NVec2::new(500.0, 500.0), 0.0),
        Err(SolverError::NonPositiveConstraintRadius(_))
    ));
    assert!(matches!(
        Solver::new_rect(NVec2::new(0.0, 1000.0)),
        Err(SolverError::NonPositiveWorldSize(_, _))
    ));

    let mut solver = rect_solver(1000.0, 8);
    assert!(solver.configure_disc(NVec2::new(500.0, 500.0), -10.0).is_err());
    // The rejected call must not have switched the variant
    assert!(matches!(solver.constraint(), Constraint::Rect { .. }));
}

#[test]
fn out_of_bounds_indices_are_rejected() {
    let mut solver = rect_solver(1000.0, 8);
    assert_eq!(
        solver.set_velocity(3, NVec2::zeros()),
        Err(SolverError::OutOfBounds { index: 3, len: 0 })
    );
    assert!(solver.get(0).is_err());
    assert!(solver.velocity(0).is_err());
}

// ==================================================================================
// Scenario configuration tests
// ==================================================================================

#[test]
fn scenario_builds_from_yaml() {
    let yaml = r#"
engine:
  constraint:
    disc:
      center: [500.0, 500.0]
      radius: 450.0
parameters:
  gravity: [0.0, 1000.0]
  sub_steps: 8
  frame_rate: 60
  seed: 42
spawner:
  position: [500.0, 200.0]
  spawn_delay: 0.025
  speed: 1200.0
  min_radius: 10.0
  max_radius: 10.0
  max_count: 1850
  max_angle: 1.0
"#;
    let cfg: ScenarioConfig = serde_yaml::from_str(yaml).unwrap();
    let scenario = Scenario::build_scenario(cfg).unwrap();

    assert!(matches!(scenario.solver.constraint(), Constraint::Disc { .. }));
    // Disc variant defaults: damped, mass-weighted response
    assert_eq!(scenario.solver.parameters().response_coef, 0.75);
    assert!(scenario.solver.parameters().mass_weighted);
    assert!(scenario.emitter.is_some());
}

#[test]
fn scenario_presets_particles_with_velocity() {
    let yaml = r#"
engine:
  constraint:
    rect:
      size: [1000.0, 1000.0]
parameters:
  gravity: [0.0, 0.0]
  sub_steps: 1
  frame_rate: 60
  seed: 0
particles:
  - position: [500.0, 500.0]
    radius: 10.0
    velocity: [100.0, 0.0]
  - position: [200.0, 200.0]
    radius: 5.0
"#;
    let cfg: ScenarioConfig = serde_yaml::from_str(yaml).unwrap();
    let scenario = Scenario::build_scenario(cfg).unwrap();

    // Rect variant defaults: full single-pass separation, uniform weights
    assert_eq!(scenario.solver.parameters().response_coef, 1.0);
    assert!(!scenario.solver.parameters().mass_weighted);

    assert_eq!(scenario.solver.count(), 2);
    let v = scenario.solver.velocity(0).unwrap();
    assert!((v - NVec2::new(100.0, 0.0)).magnitude() < 1e-2);
    assert_eq!(scenario.solver.velocity(1).unwrap(), NVec2::zeros());
}
