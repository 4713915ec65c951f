//! Real-time Bevy viewer for the particle cloud
//!
//! Spawns one small sphere per particle under a shared cloud root, runs the
//! engine tick every frame, and mirrors positions, rotation, and visual
//! state back into the scene. A keyboard/mouse gesture simulator publishes
//! into the scenario's gesture slot so the full gesture path is exercised
//! without a camera sensor.
//!
//! Controls:
//! - hold Space: hand tracking on (cursor is the hand center)
//! - ArrowUp / ArrowDown while tracking: open / close the spread
//! - F while tracking: fist collapse
//! - 1..6: select sphere / cube / heart / spiral / ringed body / cloud

use std::f32::consts::PI;

use bevy::math::primitives::Sphere;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::configuration::config::ShapeKind;
use crate::simulation::gesture::GestureState;
use crate::simulation::scenario::Scenario;

/// Component tagging each sphere with its particle index into the engine buffers
#[derive(Component)]
struct ParticleIndex(pub usize);

/// Marker for the entity the rigid cloud rotation is applied to
#[derive(Component)]
struct CloudRoot;

/// The one material shared by every particle; color/opacity ease globally
#[derive(Resource)]
struct CloudMaterial(Handle<StandardMaterial>);

/// World-space -> screen-space scaling factor for positions
const SCALE: f32 = 50.0;

/// Distance of the camera from the origin along +Z
const CAMERA_DISTANCE: f32 = 600.0;

/// How fast the simulated spread opens/closes, per second
const SPREAD_RATE: f32 = 0.6;

/// Convenience entrypoint: consume a built scenario and run the app
pub fn run_viewer(scenario: Scenario) {
    println!(
        "run_viewer: starting Bevy viewer with {} particles",
        scenario.engine.len()
    );

    App::new()
        .insert_resource(scenario)
        .add_plugins(DefaultPlugins)
        .add_systems(Startup, setup_cloud)
        .add_systems(
            Update,
            (
                gesture_sim_system,
                shape_select_system,
                physics_step_system,
                sync_cloud_system,
            )
                .chain(),
        )
        .run();
}

/// Startup system: spawn camera, the cloud root, and one sphere per particle
fn setup_cloud(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    scenario: Res<Scenario>,
) {
    commands.spawn(Camera3dBundle {
        camera: Camera {
            clear_color: ClearColorConfig::Custom(Color::srgb(0.01, 0.01, 0.03)),
            ..Default::default()
        },
        transform: Transform::from_xyz(0.0, 40.0, CAMERA_DISTANCE).looking_at(Vec3::ZERO, Vec3::Y),
        ..Default::default()
    });

    let visual = scenario.engine.visual;
    let material = materials.add(StandardMaterial {
        base_color: Color::srgba(visual.color[0], visual.color[1], visual.color[2], visual.opacity),
        unlit: true,
        alpha_mode: AlphaMode::Blend,
        ..Default::default()
    });
    commands.insert_resource(CloudMaterial(material.clone()));

    // One shared low-poly mesh; per-particle size comes from transform scale
    let mesh = meshes.add(Sphere::new(1.0).mesh().uv(8, 6));
    let scale = Vec3::splat(visual.size * SCALE * 0.5);

    commands
        .spawn((SpatialBundle::default(), CloudRoot))
        .with_children(|parent| {
            for (i, p) in scenario.engine.positions().iter().enumerate() {
                parent.spawn((
                    PbrBundle {
                        mesh: mesh.clone(),
                        material: material.clone(),
                        transform: Transform::from_xyz(p.x * SCALE, p.y * SCALE, p.z * SCALE)
                            .with_scale(scale),
                        ..Default::default()
                    },
                    ParticleIndex(i),
                ));
            }
        });
}

/// Simulated spread distance carried between frames
struct SimSpread {
    value: f32,
}

impl Default for SimSpread {
    fn default() -> Self {
        // Indeterminate midpoint, same as an untracked hand
        Self { value: 0.5 }
    }
}

/// Keyboard/mouse stand-in for the camera sensor. Publishes one snapshot
/// per frame into the slot, exactly like a landmark pipeline would.
fn gesture_sim_system(
    keys: Res<ButtonInput<KeyCode>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    time: Res<Time>,
    mut spread: Local<SimSpread>,
    scenario: Res<Scenario>,
) {
    if !keys.pressed(KeyCode::Space) {
        scenario.gestures.publish(GestureState::not_tracking());
        return;
    }

    let dt = time.delta_seconds();
    if keys.pressed(KeyCode::ArrowUp) {
        spread.value += SPREAD_RATE * dt;
    }
    if keys.pressed(KeyCode::ArrowDown) {
        spread.value -= SPREAD_RATE * dt;
    }
    spread.value = spread.value.clamp(0.0, 1.0);

    // Cursor in [0,1]^2 as the hand center; window may be unfocused
    let center = windows
        .get_single()
        .ok()
        .and_then(|w| {
            w.cursor_position()
                .map(|c| (c.x / w.width(), c.y / w.height()))
        })
        .unwrap_or((0.5, 0.5));

    // Tilt follows vertical offset, yaw follows horizontal offset
    let rotation_hint = ((center.1 - 0.5) * PI, (center.0 - 0.5) * PI);

    scenario.gestures.publish(GestureState {
        is_tracking: true,
        distance: spread.value,
        is_fist: keys.pressed(KeyCode::KeyF),
        center,
        rotation_hint,
    });
}

/// Number keys hot-swap the morph target shape
fn shape_select_system(keys: Res<ButtonInput<KeyCode>>, mut scenario: ResMut<Scenario>) {
    let selected = if keys.just_pressed(KeyCode::Digit1) {
        Some(ShapeKind::Sphere)
    } else if keys.just_pressed(KeyCode::Digit2) {
        Some(ShapeKind::Cube)
    } else if keys.just_pressed(KeyCode::Digit3) {
        Some(ShapeKind::Heart)
    } else if keys.just_pressed(KeyCode::Digit4) {
        Some(ShapeKind::Spiral)
    } else if keys.just_pressed(KeyCode::Digit5) {
        Some(ShapeKind::RingedBody)
    } else if keys.just_pressed(KeyCode::Digit6) {
        Some(ShapeKind::Cloud)
    } else {
        None
    };

    if let Some(kind) = selected {
        if scenario.engine.shape() != Some(kind) {
            println!("morphing to {}", kind.label());
            scenario.engine.set_shape(kind);
        }
    }
}

/// Per-frame engine tick using the latest gesture snapshot
fn physics_step_system(mut scenario: ResMut<Scenario>, time: Res<Time>) {
    let gesture = scenario.gestures.latest();
    scenario.engine.tick(time.delta_seconds(), &gesture);
}

/// Mirror engine state into the scene: particle transforms, the rigid cloud
/// rotation on the root, and the shared material's color/opacity
fn sync_cloud_system(
    scenario: Res<Scenario>,
    cloud_mat: Res<CloudMaterial>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut roots: Query<&mut Transform, (With<CloudRoot>, Without<ParticleIndex>)>,
    mut particles: Query<(&ParticleIndex, &mut Transform), Without<CloudRoot>>,
) {
    let positions = scenario.engine.positions();
    let visual = scenario.engine.visual;
    let scale = Vec3::splat(visual.size * SCALE * 0.5);

    for (ParticleIndex(i), mut transform) in &mut particles {
        if let Some(p) = positions.get(*i) {
            transform.translation = Vec3::new(p.x, p.y, p.z) * SCALE;
            transform.scale = scale;
        }
    }

    // Rotation is a rigid transform on the root, never per particle
    let rot = scenario.engine.rotation;
    for mut transform in &mut roots {
        transform.rotation = Quat::from_euler(EulerRot::XYZ, rot.tilt, rot.yaw, 0.0);
    }

    if let Some(mat) = materials.get_mut(&cloud_mat.0) {
        mat.base_color =
            Color::srgba(visual.color[0], visual.color[1], visual.color[2], visual.opacity);
    }
}
