//! Manual timing harness for the physics passes.
//!
//! The collision pass is the only quadratic cost, so `bench_collisions`
//! walks a size ladder over it in isolation; `bench_step` times full
//! frames at the reference configuration. Positions are deterministic
//! sin/cos scatters, no rand needed.

use std::time::Instant;

use crate::simulation::collisions;
use crate::simulation::solver::Solver;
use crate::simulation::states::{NVec2, Particle};

/// Deterministic scatter of `n` particles inside a 1000x1000 world.
fn scatter(n: usize, radius: f32) -> Vec<Particle> {
    (0..n)
        .map(|i| {
            let i_f = i as f32;
            let position = NVec2::new(
                500.0 + (i_f * 0.37).sin() * 400.0,
                500.0 + (i_f * 0.13).cos() * 400.0,
            );
            Particle::new(position, radius)
        })
        .collect()
}

/// Time one collision pass at each population size.
pub fn bench_collisions() {
    let ns = [200, 400, 800, 1600, 3200, 6400];

    for n in ns {
        let mut particles = scatter(n, 10.0);

        let start = Instant::now();
        collisions::resolve(&mut particles, 0.75, true);
        let elapsed = start.elapsed();

        println!("bench_collisions: n = {:5}  pass = {:?}", n, elapsed);
    }
}

/// Time full frames (8 sub-steps at 60 Hz) in the reference disc world.
pub fn bench_step() {
    let ns = [200, 400, 800, 1600];
    let frames = 60;

    for n in ns {
        let mut solver = Solver::new_disc(NVec2::new(500.0, 500.0), 450.0)
            .expect("valid reference constraint");
        for p in scatter(n, 10.0) {
            solver
                .add_particle(p.position, p.radius)
                .expect("valid radius");
        }

        let start = Instant::now();
        for _ in 0..frames {
            solver.step();
        }
        let elapsed = start.elapsed();

        println!(
            "bench_step: n = {:5}  {} frames = {:?}  ({:?}/frame)",
            n,
            frames,
            elapsed,
            elapsed / frames
        );
    }
}
