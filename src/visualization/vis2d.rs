//! Bevy 2D host shell for the solver.
//!
//! Drives the core once per frame: emitter -> `step()` -> mesh sync. The
//! solver owns its particles exclusively; this layer only reads state
//! between steps and addresses particles by index.
//!
//! Input: `R` resets the simulation (replaying the captured palette onto
//! respawned particles), `S` toggles vsync, `L` samples the palette image
//! at each particle's current position, `Esc` or window close exits.

use bevy::math::primitives::{Circle, Rectangle};
use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};
use bevy::window::PresentMode;

use crate::simulation::constraint::Constraint;
use crate::simulation::scenario::Scenario;
use crate::simulation::states::{NVec2, Rgba};

#[derive(Component)]
struct ParticleIndex(pub usize);

/// Colors captured with the L key, indexed by particle index. Applied to
/// live particles when sampled and replayed onto respawns after a reset.
#[derive(Resource, Default)]
struct Palette {
    colors: Vec<Rgba>,
}

pub fn run_2d(scenario: Scenario) {
    println!(
        "run_2d: starting Bevy 2D viewer with {} particles",
        scenario.solver.count()
    );

    let (min, max) = scenario.solver.constraint().bounds();
    let extent = max - min;

    App::new()
        .insert_resource(ClearColor(Color::WHITE))
        .insert_resource(scenario)
        .init_resource::<Palette>()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "vsim".into(),
                resolution: (extent.x, extent.y).into(),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .add_systems(Startup, setup_scene_system)
        .add_systems(
            Update,
            (
                keyboard_system,
                emitter_system,
                physics_step_system,
                sync_particles_system,
            )
                .chain(),
        )
        .add_systems(Update, bevy::window::close_on_esc)
        .run();
}

/// World coordinates are y-down with the constraint bounds min at the top
/// left; Bevy is y-up and centered. Map through the bounds midpoint.
fn to_screen(p: NVec2, scenario: &Scenario) -> Vec2 {
    let (min, max) = scenario.solver.constraint().bounds();
    let mid = (min + max) * 0.5;
    Vec2::new(p.x - mid.x, mid.y - p.y)
}

fn setup_scene_system(
    mut commands: Commands,
    scenario: Res<Scenario>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    commands.spawn(Camera2dBundle::default());

    // Dark backdrop in the shape of the feasible region
    let mesh = match *scenario.solver.constraint() {
        Constraint::Disc { radius, .. } => meshes.add(Circle::new(radius)),
        Constraint::Rect { size } => meshes.add(Rectangle::new(size.x, size.y)),
    };
    commands.spawn(MaterialMesh2dBundle {
        mesh: Mesh2dHandle(mesh),
        material: materials.add(ColorMaterial::from(Color::BLACK)),
        transform: Transform::from_xyz(0.0, 0.0, -1.0),
        ..Default::default()
    });
}

fn keyboard_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut scenario: ResMut<Scenario>,
    mut palette: ResMut<Palette>,
    mut windows: Query<&mut Window>,
) {
    if keys.just_pressed(KeyCode::KeyR) {
        let Scenario { solver, emitter, .. } = &mut *scenario;
        solver.reset();
        if let Some(emitter) = emitter {
            emitter.reset();
        }
    }

    if keys.just_pressed(KeyCode::KeyS) {
        for mut window in &mut windows {
            window.present_mode = match window.present_mode {
                PresentMode::AutoNoVsync => PresentMode::AutoVsync,
                _ => PresentMode::AutoNoVsync,
            };
        }
    }

    if keys.just_pressed(KeyCode::KeyL) {
        match sample_palette(&scenario) {
            Ok(colors) => {
                for (index, color) in colors.iter().enumerate() {
                    // indices come from the live population, cannot fail
                    let _ = scenario.solver.set_color(index, *color);
                }
                palette.colors = colors;
            }
            Err(e) => eprintln!("palette sampling failed: {}", e),
        }
    }
}

/// Sample the scenario's palette image at each particle's current position,
/// mapping the constraint bounds onto the image.
fn sample_palette(scenario: &Scenario) -> Result<Vec<Rgba>, image::ImageError> {
    let Some(path) = &scenario.palette_image else {
        return Ok(Vec::new());
    };
    let img = image::open(path)?.to_rgba8();
    let (min, max) = scenario.solver.constraint().bounds();
    let extent = max - min;
    let scale = NVec2::new(img.width() as f32 / extent.x, img.height() as f32 / extent.y);

    let colors = scenario
        .solver
        .particles()
        .iter()
        .map(|p| {
            let rel = p.position - min;
            let px = (rel.x * scale.x).clamp(0.0, img.width() as f32 - 1.0) as u32;
            let py = (rel.y * scale.y).clamp(0.0, img.height() as f32 - 1.0) as u32;
            img.get_pixel(px, py).0
        })
        .collect();
    Ok(colors)
}

fn emitter_system(mut scenario: ResMut<Scenario>, palette: Res<Palette>) {
    let Scenario { solver, emitter, .. } = &mut *scenario;
    let Some(emitter) = emitter else {
        return;
    };
    match emitter.update(solver) {
        Ok(Some(index)) => {
            // Replay captured palette colors onto respawned particles
            if let Some(color) = palette.colors.get(index) {
                let _ = solver.set_color(index, *color);
            }
        }
        Ok(None) => {}
        Err(e) => eprintln!("spawn failed: {}", e),
    }
}

fn physics_step_system(mut scenario: ResMut<Scenario>) {
    scenario.solver.step();
}

/// Keep one circle mesh per particle: lazily spawn meshes as the
/// population grows, despawn stale ones after a reset, and sync transform
/// and color every frame.
fn sync_particles_system(
    mut commands: Commands,
    scenario: Res<Scenario>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut existing: Query<(
        Entity,
        &ParticleIndex,
        &mut Transform,
        &Handle<ColorMaterial>,
    )>,
    mut spawned: Local<usize>,
) {
    let count = scenario.solver.count();

    for (entity, ParticleIndex(i), mut transform, material) in &mut existing {
        match scenario.solver.particles().get(*i) {
            Some(p) => {
                let screen = to_screen(p.position, &scenario);
                transform.translation.x = screen.x;
                transform.translation.y = screen.y;
                if let Some(material) = materials.get_mut(material) {
                    let [r, g, b, a] = p.color;
                    material.color = Color::rgba_u8(r, g, b, a);
                }
            }
            None => {
                commands.entity(entity).despawn();
            }
        }
    }

    if *spawned > count {
        *spawned = count;
    }
    for (i, p) in scenario.solver.particles().iter().enumerate().skip(*spawned) {
        let screen = to_screen(p.position, &scenario);
        let [r, g, b, a] = p.color;
        commands.spawn((
            MaterialMesh2dBundle {
                mesh: Mesh2dHandle(meshes.add(Circle::new(p.radius))),
                material: materials.add(ColorMaterial::from(Color::rgba_u8(r, g, b, a))),
                transform: Transform::from_xyz(screen.x, screen.y, 0.0),
                ..Default::default()
            },
            ParticleIndex(i),
        ));
    }
    *spawned = count;
}
