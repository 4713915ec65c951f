use std::sync::Arc;
use std::thread;

use rand::rngs::StdRng;
use rand::SeedableRng;

use morphsim::configuration::config::ShapeKind;
use morphsim::simulation::engine::MorphEngine;
use morphsim::simulation::forces::{AccelSet, Burst, FistCollapse, ShapeReturn};
use morphsim::simulation::gesture::{GestureSlot, GestureState};
use morphsim::simulation::integrator::damped_euler_step;
use morphsim::simulation::morph::MorphTargetStore;
use morphsim::simulation::params::Parameters;
use morphsim::simulation::selector::{derive_tick, RotationState, VisualState};
use morphsim::simulation::shapes::sample_shape;
use morphsim::simulation::states::{NVec3, ParticleCloud};

const DT: f32 = 1.0 / 60.0;

/// Default physics parameters for tests
pub fn test_params() -> Parameters {
    Parameters {
        damping: 0.90,
        return_strength: 0.03,
        burst_threshold: 0.85,
        fist_strength: 0.05,
        fist_jitter: 0.05,
        burst_base: 0.02,
        burst_spread: 0.01,
        breath_rate: 0.5,
        breath_amp: 0.1,
        rotation_ease: 0.1,
        tilt_decay: 0.05,
        auto_spin: 0.002,
        visual_ease: 0.1,
        seed: 42,
    }
}

pub fn test_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// Four targets on the unit axes in the xy plane, scaled by `scale`
pub fn quad_targets(scale: f32) -> Arc<Vec<NVec3>> {
    Arc::new(vec![
        NVec3::new(scale, 0.0, 0.0),
        NVec3::new(-scale, 0.0, 0.0),
        NVec3::new(0.0, scale, 0.0),
        NVec3::new(0.0, -scale, 0.0),
    ])
}

/// Cloud snapped onto the given targets with zero velocity
pub fn snapped_cloud(targets: &[NVec3]) -> ParticleCloud {
    let mut cloud = ParticleCloud::new(targets.len());
    cloud.position.copy_from_slice(targets);
    cloud
}

fn tracking_gesture(distance: f32, is_fist: bool) -> GestureState {
    GestureState {
        is_tracking: true,
        distance,
        is_fist,
        ..GestureState::not_tracking()
    }
}

// ==================================================================================
// Integrator / damping tests
// ==================================================================================

#[test]
fn damping_decays_velocity_to_rest() {
    let mut cloud = ParticleCloud::new(4);
    cloud.position[0] = NVec3::new(1.0, 2.0, 3.0);
    cloud.velocity[0] = NVec3::new(1.0, -0.5, 0.25);
    cloud.velocity[1] = NVec3::new(-2.0, 0.0, 0.0);
    cloud.velocity[2] = NVec3::new(0.0, 3.0, -1.0);

    // No force terms at all: only the damping acts
    let forces = AccelSet::new();
    let p = test_params();
    let mut rng = test_rng();

    for _ in 0..200 {
        damped_euler_step(&mut cloud, &forces, &p, &mut rng, DT);
    }

    for v in &cloud.velocity {
        assert!(v.norm() < 1e-6, "velocity did not decay: {:?}", v);
    }

    // Positions have stabilized: one more step barely moves anything
    let before = cloud.position.clone();
    damped_euler_step(&mut cloud, &forces, &p, &mut rng, DT);
    for (a, b) in cloud.position.iter().zip(before.iter()) {
        assert!((a - b).norm() < 1e-6, "position still drifting");
    }
}

#[test]
fn return_force_converges_to_target() {
    let targets = quad_targets(4.0);
    let mut cloud = ParticleCloud::new(4); // all particles start at the origin
    let p = test_params();
    let mut rng = test_rng();

    let forces = AccelSet::new().with(ShapeReturn {
        targets: Arc::clone(&targets),
        expansion: 1.0,
        strength: p.return_strength,
    });

    for _ in 0..500 {
        damped_euler_step(&mut cloud, &forces, &p, &mut rng, DT);
    }

    for (x, t) in cloud.position.iter().zip(targets.iter()) {
        let dist = (x - t).norm();
        assert!(dist < 1e-2, "particle ended {dist} away from its target");
    }
}

#[test]
#[should_panic(expected = "particle count must be positive")]
fn zero_particle_cloud_is_rejected() {
    let _ = ParticleCloud::new(0);
}

#[test]
#[should_panic(expected = "acceleration buffer length mismatch")]
fn mismatched_accel_buffer_is_rejected() {
    let cloud = ParticleCloud::new(4);
    let forces = AccelSet::new();
    let mut rng = test_rng();

    let mut too_short = vec![NVec3::zeros(); 3];
    forces.accumulate_accels(0.0, &cloud, &mut rng, &mut too_short);
}

// ==================================================================================
// Burst / fist force tests
// ==================================================================================

#[test]
fn burst_mean_radius_strictly_increases() {
    let mut rng = test_rng();
    let targets = Arc::new(sample_shape(ShapeKind::Sphere, 512, 4.0, &mut rng));
    let mut cloud = snapped_cloud(&targets);
    let p = test_params();

    // Burst regime: return force present but zero strength, burst active
    let forces = AccelSet::new()
        .with(ShapeReturn {
            targets: Arc::clone(&targets),
            expansion: 1.0,
            strength: 0.0,
        })
        .with(Burst {
            base: p.burst_base,
            spread: p.burst_spread,
        });

    let mut prev = cloud.mean_radius();
    for _ in 0..30 {
        damped_euler_step(&mut cloud, &forces, &p, &mut rng, DT);
        let r = cloud.mean_radius();
        assert!(r > prev, "mean radius did not grow: {r} <= {prev}");
        prev = r;
    }
}

#[test]
fn fist_collapse_pulls_cloud_inward_vs_control() {
    let mut rng = test_rng();
    let targets = Arc::new(sample_shape(ShapeKind::Sphere, 512, 4.0, &mut rng));
    let p = test_params();

    let return_term = || ShapeReturn {
        targets: Arc::clone(&targets),
        expansion: 1.0,
        strength: p.return_strength,
    };

    // Control: return force only, cloud stays near the shell
    let mut control = snapped_cloud(&targets);
    let control_forces = AccelSet::new().with(return_term());

    // Fist run: same start, collapse force added on top
    let mut fisted = snapped_cloud(&targets);
    let fist_forces = AccelSet::new().with(return_term()).with(FistCollapse {
        strength: p.fist_strength,
        jitter: p.fist_jitter,
    });

    for _ in 0..60 {
        damped_euler_step(&mut control, &control_forces, &p, &mut rng, DT);
        damped_euler_step(&mut fisted, &fist_forces, &p, &mut rng, DT);
    }

    let r_control = control.mean_radius();
    let r_fisted = fisted.mean_radius();
    assert!(
        r_fisted < r_control * 0.8,
        "collapse did not pull inward: fist {r_fisted} vs control {r_control}"
    );
}

// ==================================================================================
// End-to-end quad scenario
// ==================================================================================

#[test]
fn snapped_quad_stays_at_rest_through_one_idle_tick() {
    let targets = quad_targets(1.0);
    let mut cloud = snapped_cloud(&targets);
    let p = test_params();
    let mut rng = test_rng();

    // Idle at t = 0: breathing factor is exactly 1.0, so the scaled target
    // equals the snapped position and the net force is zero
    let tick = derive_tick(&GestureState::not_tracking(), cloud.t, &p);
    assert_eq!(tick.expansion, 1.0);

    let forces = AccelSet::new().with(ShapeReturn {
        targets: Arc::clone(&targets),
        expansion: tick.expansion,
        strength: tick.return_strength,
    });
    damped_euler_step(&mut cloud, &forces, &p, &mut rng, DT);

    for (i, (x, t)) in cloud.position.iter().zip(targets.iter()).enumerate() {
        assert_eq!(x, t, "particle {i} moved off its target");
        assert_eq!(cloud.velocity[i], NVec3::zeros());
    }
}

#[test]
fn displaced_particle_follows_damped_spring_step() {
    let targets = quad_targets(1.0);
    let mut cloud = snapped_cloud(&targets);
    let p = test_params();
    let mut rng = test_rng();

    // Push particle 0 off its target and integrate one step
    let offset = NVec3::new(0.5, 0.0, 0.0);
    cloud.position[0] += offset;
    let prev = cloud.position[0];

    let forces = AccelSet::new().with(ShapeReturn {
        targets: Arc::clone(&targets),
        expansion: 1.0,
        strength: p.return_strength,
    });
    damped_euler_step(&mut cloud, &forces, &p, &mut rng, DT);

    // v = (target - x) * strength * damping, then x += v
    let expected_v = -offset * p.return_strength * p.damping;
    assert!((cloud.velocity[0] - expected_v).norm() < 1e-6);
    assert!((cloud.position[0] - (prev + expected_v)).norm() < 1e-6);
}

// ==================================================================================
// Force field selector tests
// ==================================================================================

#[test]
fn burst_needs_tracking_and_spread_above_threshold() {
    let p = test_params();

    assert!(derive_tick(&tracking_gesture(0.9, false), 0.0, &p).burst);
    // Threshold is a strict greater-than
    assert!(!derive_tick(&tracking_gesture(0.85, false), 0.0, &p).burst);

    // An untracked hand can not burst no matter what the stale fields say
    let stale = GestureState {
        distance: 0.95,
        ..GestureState::not_tracking()
    };
    assert!(!derive_tick(&stale, 0.0, &p).burst);
}

#[test]
fn expansion_maps_spread_linearly_while_tracking() {
    let p = test_params();

    let closed = derive_tick(&tracking_gesture(0.0, false), 0.0, &p);
    assert!((closed.expansion - 0.5).abs() < 1e-6);

    let half = derive_tick(&tracking_gesture(0.5, false), 0.0, &p);
    assert!((half.expansion - 1.25).abs() < 1e-6);

    let wide = derive_tick(&tracking_gesture(0.8, false), 0.0, &p);
    assert!((wide.expansion - 1.7).abs() < 1e-6);
}

#[test]
fn idle_expansion_breathes_around_one() {
    let p = test_params();
    let idle = GestureState::not_tracking();

    // sin(0) = 0 -> exactly 1.0 at t = 0
    assert_eq!(derive_tick(&idle, 0.0, &p).expansion, 1.0);

    // Peak of the sine at t * breath_rate = pi/2
    let t_peak = std::f32::consts::FRAC_PI_2 / p.breath_rate;
    let peak = derive_tick(&idle, t_peak, &p).expansion;
    assert!((peak - 1.1).abs() < 1e-4, "breathing peak was {peak}");
}

#[test]
fn burst_disables_return_force() {
    let p = test_params();

    let bursting = derive_tick(&tracking_gesture(0.95, false), 0.0, &p);
    assert_eq!(bursting.return_strength, 0.0);

    let idle = derive_tick(&GestureState::not_tracking(), 0.0, &p);
    assert_eq!(idle.return_strength, p.return_strength);
}

#[test]
fn fist_requires_tracking() {
    let p = test_params();

    assert!(derive_tick(&tracking_gesture(0.3, true), 0.0, &p).fist);

    let stale = GestureState {
        is_fist: true,
        ..GestureState::not_tracking()
    };
    assert!(!derive_tick(&stale, 0.0, &p).fist);
}

// ==================================================================================
// Rotation / visual easing tests
// ==================================================================================

#[test]
fn rotation_eases_toward_hint_while_tracking() {
    let p = test_params();
    let mut rot = RotationState::default();

    let gesture = GestureState {
        rotation_hint: (0.4, 0.8),
        ..tracking_gesture(0.5, false)
    };
    rot.update(&gesture, &p);

    assert!((rot.tilt - 0.04).abs() < 1e-6);
    assert!((rot.yaw - 0.08).abs() < 1e-6);
}

#[test]
fn idle_rotation_spins_and_levels_out() {
    let p = test_params();
    let mut rot = RotationState {
        tilt: 0.2,
        yaw: 0.0,
    };

    rot.update(&GestureState::not_tracking(), &p);

    assert!((rot.yaw - p.auto_spin).abs() < 1e-6, "auto spin missing");
    assert!((rot.tilt - 0.19).abs() < 1e-6, "tilt did not decay");
}

#[test]
fn visual_state_eases_and_never_snaps() {
    let p = test_params();
    let base = [0.2, 0.4, 0.8];
    let mut visual = VisualState::new(base);

    // One burst tick moves a tenth of the way toward the flash target
    visual.update(true, base, &p);
    assert!((visual.color[0] - 0.28).abs() < 1e-6);
    assert!((visual.opacity - 0.81).abs() < 1e-6);
    assert!((visual.size - 0.155).abs() < 1e-6);
    assert!(visual.color[0] < 1.0, "color snapped to the flash target");

    // Dropping out of burst eases back toward the base state
    let flashed = visual;
    visual.update(false, base, &p);
    assert!(visual.color[0] < flashed.color[0]);
    assert!(visual.opacity < flashed.opacity);
    assert!(visual.size < flashed.size);
}

// ==================================================================================
// Morph target store / shape tests
// ==================================================================================

#[test]
fn target_mapping_is_index_stable() {
    // Two rngs with the same seed: the store must hand back exactly the
    // sampler's points in the sampler's order, no reindexing or sorting
    let mut rng_store = StdRng::seed_from_u64(7);
    let mut rng_direct = StdRng::seed_from_u64(7);

    let mut store = MorphTargetStore::new(ShapeKind::Sphere, 64, 4.0, &mut rng_store);
    store.set_shape(ShapeKind::Heart, 64, 4.0, &mut rng_store);

    let _ = sample_shape(ShapeKind::Sphere, 64, 4.0, &mut rng_direct);
    let expected = sample_shape(ShapeKind::Heart, 64, 4.0, &mut rng_direct);

    let targets = store.targets();
    assert_eq!(targets.len(), expected.len());
    for (i, (got, want)) in targets.iter().zip(expected.iter()).enumerate() {
        assert_eq!(got, want, "target {i} was remapped");
    }
}

#[test]
fn expand_scales_without_mutating_storage() {
    let mut rng = test_rng();
    let store = MorphTargetStore::new(ShapeKind::Cube, 32, 2.0, &mut rng);
    let original = store.targets();

    let doubled = store.expand(2.0);
    for (p, q) in original.iter().zip(doubled.iter()) {
        assert!((p * 2.0 - q).norm() < 1e-6);
    }

    // Storage unchanged
    for (p, q) in original.iter().zip(store.targets().iter()) {
        assert_eq!(p, q);
    }
}

#[test]
fn every_shape_kind_yields_requested_count() {
    let kinds = [
        ShapeKind::Sphere,
        ShapeKind::Cube,
        ShapeKind::Heart,
        ShapeKind::Spiral,
        ShapeKind::RingedBody,
        ShapeKind::Cloud,
    ];
    let mut rng = test_rng();

    for kind in kinds {
        let points = sample_shape(kind, 777, 4.0, &mut rng);
        assert_eq!(points.len(), 777, "{} count off", kind.label());
    }
}

#[test]
fn sphere_points_sit_on_the_shell() {
    let mut rng = test_rng();
    for p in sample_shape(ShapeKind::Sphere, 256, 4.0, &mut rng) {
        assert!((p.norm() - 4.0).abs() < 1e-3, "off-shell point {:?}", p);
    }
}

#[test]
fn cube_points_sit_on_the_surface() {
    let mut rng = test_rng();
    let half = 4.0 * 0.75;
    for p in sample_shape(ShapeKind::Cube, 256, 4.0, &mut rng) {
        let m = p.x.abs().max(p.y.abs()).max(p.z.abs());
        assert!((m - half).abs() < 1e-4, "interior point {:?}", p);
    }
}

// ==================================================================================
// Engine lifecycle tests
// ==================================================================================

#[test]
fn cold_start_snaps_position_onto_first_shape() {
    let mut engine = MorphEngine::new(256, 4.0, [0.3, 0.7, 1.0], test_params());
    engine.set_shape(ShapeKind::Sphere);

    let targets = engine.store().unwrap().targets();
    for (i, (x, t)) in engine.positions().iter().zip(targets.iter()).enumerate() {
        assert_eq!(x, t, "particle {i} not snapped");
        assert_eq!(engine.cloud.velocity[i], NVec3::zeros());
    }
}

#[test]
fn later_shape_changes_morph_instead_of_snapping() {
    let mut engine = MorphEngine::new(256, 4.0, [0.3, 0.7, 1.0], test_params());
    engine.set_shape(ShapeKind::Sphere);

    let idle = GestureState::not_tracking();
    for _ in 0..5 {
        engine.tick(DT, &idle);
    }

    // Swapping the target set must not touch the kinematic state
    let before = engine.positions().to_vec();
    engine.set_shape(ShapeKind::Cube);
    for (x, b) in engine.positions().iter().zip(before.iter()) {
        assert_eq!(x, b, "shape change teleported a particle");
    }

    // The return force then drives an animated transition toward the cube
    let cube_targets = engine.store().unwrap().targets();
    let dist_at_swap: f32 = engine
        .positions()
        .iter()
        .zip(cube_targets.iter())
        .map(|(x, t)| (x - t).norm())
        .sum::<f32>()
        / 256.0;

    for _ in 0..300 {
        engine.tick(DT, &idle);
    }

    let dist_later: f32 = engine
        .positions()
        .iter()
        .zip(cube_targets.iter())
        .map(|(x, t)| (x - t).norm())
        .sum::<f32>()
        / 256.0;

    assert!(
        dist_later < dist_at_swap * 0.5,
        "no morph progress: {dist_later} vs {dist_at_swap}"
    );
}

#[test]
fn engine_ticks_forever_on_default_gesture_without_blocking() {
    // No gesture is ever published: the engine must keep running on the
    // "not tracking" default and produce the idle breathing behavior
    let mut engine = MorphEngine::new(64, 4.0, [0.3, 0.7, 1.0], test_params());
    engine.set_shape(ShapeKind::Sphere);

    let slot = GestureSlot::new();
    for _ in 0..120 {
        let gesture = slot.latest();
        assert!(!gesture.is_tracking);
        engine.tick(DT, &gesture);
    }

    // Breathing keeps the cloud near its shell, nothing exploded
    let r = engine.cloud.mean_radius();
    assert!(r > 3.0 && r < 5.0, "idle cloud drifted to radius {r}");
}

// ==================================================================================
// Gesture slot tests
// ==================================================================================

#[test]
fn gesture_slot_defaults_to_not_tracking() {
    let slot = GestureSlot::new();
    let g = slot.latest();
    assert!(!g.is_tracking);
    assert_eq!(g.distance, 0.5);
}

#[test]
fn gesture_slot_is_last_write_wins() {
    let slot = GestureSlot::new();
    slot.publish(tracking_gesture(0.2, false));
    slot.publish(tracking_gesture(0.9, true));

    let g = slot.latest();
    assert_eq!(g.distance, 0.9);
    assert!(g.is_fist);
}

#[test]
fn gesture_slot_accepts_publishes_from_another_thread() {
    let slot = Arc::new(GestureSlot::new());

    let publisher = {
        let slot = Arc::clone(&slot);
        thread::spawn(move || {
            for i in 0..100 {
                slot.publish(tracking_gesture(i as f32 / 100.0, false));
            }
        })
    };

    // Reader side never blocks and always sees a valid snapshot
    for _ in 0..100 {
        let g = slot.latest();
        assert!(g.distance >= 0.0 && g.distance <= 1.0);
    }

    publisher.join().unwrap();
    assert!((slot.latest().distance - 0.99).abs() < 1e-6);
}
