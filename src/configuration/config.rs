//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – boundary constraint and collision response
//! - [`ParametersConfig`] – gravity, sub-steps, frame rate, seed
//! - [`SpawnerConfig`]    – optional rate-limited emitter
//! - [`ParticleConfig`]   – optional preset particles
//! - [`ScenarioConfig`]   – top-level wrapper used to load from YAML
//!
//! # YAML format
//! An example disc-bounded scenario matching these types:
//!
//! ```yaml
//! engine:
//!   constraint:
//!     disc:
//!       center: [500.0, 500.0]
//!       radius: 450.0
//!   # response_coef: 0.75   # optional, defaults per constraint variant
//!   # mass_weighted: true
//!
//! parameters:
//!   gravity: [0.0, 1000.0]  # +y is down
//!   sub_steps: 8
//!   frame_rate: 60
//!   seed: 42
//!
//! spawner:
//!   position: [500.0, 200.0]
//!   spawn_delay: 0.025      # seconds between spawns
//!   speed: 1200.0
//!   min_radius: 10.0
//!   max_radius: 10.0
//!   max_count: 1850
//!   max_angle: 1.0          # radians; fan sweeps max_angle * sin(t)
//!
//! palette_image: img.png    # optional, sampled with the L key
//!
//! particles:                # optional preset particles
//!   - position: [500.0, 500.0]
//!     radius: 10.0
//!     velocity: [0.0, 0.0]
//! ```
//!
//! The engine maps this configuration into its runtime scenario
//! representation (`Scenario`), which uses nalgebra vectors.

use serde::Deserialize;

/// Boundary constraint variant. The two shapes are mutually exclusive by
/// construction: a scenario carries exactly one.
#[derive(Deserialize, Debug, Clone)]
pub enum ConstraintConfig {
    #[serde(rename = "disc")] // circular region {center, radius}
    Disc { center: [f32; 2], radius: f32 },

    #[serde(rename = "rect")] // axis-aligned rectangle spanning [0, size]
    Rect { size: [f32; 2] },
}

/// Boundary and collision-response settings.
#[derive(Deserialize, Debug, Clone)]
pub struct EngineConfig {
    pub constraint: ConstraintConfig, // disc or rect
    pub response_coef: Option<f32>, // default: 0.75 for disc, 1.0 for rect
    pub mass_weighted: Option<bool>, // default: true for disc, false for rect
}

/// Global numerical parameters for a scenario.
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub gravity: [f32; 2], // external acceleration
    pub sub_steps: u32, // physics iterations per frame
    pub frame_rate: u32, // host frames per second; frame_dt = 1 / frame_rate
    pub seed: u64, // spawn RNG seed, makes runs reproducible
}

/// Rate-limited emitter settings.
#[derive(Deserialize, Debug, Clone)]
pub struct SpawnerConfig {
    pub position: [f32; 2], // world-space source point
    pub spawn_delay: f32, // seconds between spawns
    pub speed: f32, // launch speed
    pub min_radius: f32, // spawn radius range, inclusive
    pub max_radius: f32,
    pub max_count: usize, // population cap
    pub max_angle: f32, // fan half-width in radians
}

/// Initial state for one preset particle.
#[derive(Deserialize, Debug, Clone)]
pub struct ParticleConfig {
    pub position: [f32; 2],
    pub radius: f32,
    pub velocity: Option<[f32; 2]>, // default: at rest
}

/// Top-level wrapper used to load a scenario from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub engine: EngineConfig,
    pub parameters: ParametersConfig,
    pub spawner: Option<SpawnerConfig>,
    pub particles: Option<Vec<ParticleConfig>>,
    pub palette_image: Option<String>, // PNG sampled at particle positions
}
