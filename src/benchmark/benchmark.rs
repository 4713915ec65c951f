use std::time::Instant;

use crate::configuration::config::ShapeKind;
use crate::simulation::engine::MorphEngine;
use crate::simulation::gesture::GestureState;
use crate::simulation::params::Parameters;
use crate::simulation::shapes::sample_shape;

use rand::rngs::StdRng;
use rand::SeedableRng;

const FRAME_DT: f32 = 1.0 / 60.0;

fn bench_params() -> Parameters {
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

/// Time one engine tick across a range of particle counts, in the three
/// force regimes (idle return, fist collapse, burst). The budget to beat is
/// ~16 ms at the reference 15,000 particles.
pub fn bench_tick() {
    let ns = [1000, 2000, 4000, 8000, 15000, 30000];
    let steps = 200;

    // One gesture snapshot per regime
    let idle = GestureState::not_tracking();
    let fist = GestureState {
        is_tracking: true,
        distance: 0.3,
        is_fist: true,
        ..GestureState::not_tracking()
    };
    let burst = GestureState {
        is_tracking: true,
        distance: 0.95,
        is_fist: false,
        ..GestureState::not_tracking()
    };

    println!("N,idle_ms,fist_ms,burst_ms");

    for n in ns {
        let mut row = vec![format!("{n}")];

        for gesture in [&idle, &fist, &burst] {
            let mut engine = MorphEngine::new(n, 4.0, [0.3, 0.7, 1.0], bench_params());
            engine.set_shape(ShapeKind::Sphere);

            // Warm up
            engine.tick(FRAME_DT, gesture);

            let t0 = Instant::now();
            for _ in 0..steps {
                engine.tick(FRAME_DT, gesture);
            }
            let ms = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;
            row.push(format!("{ms:.4}"));
        }

        println!("{}", row.join(","));
    }
}

/// Time the shape sampler for every kind at the reference particle count.
/// Sampling runs on a UI-thread shape-change event, so it has to be cheap.
pub fn bench_sample() {
    let kinds = [
        ShapeKind::Sphere,
        ShapeKind::Cube,
        ShapeKind::Heart,
        ShapeKind::Spiral,
        ShapeKind::RingedBody,
        ShapeKind::Cloud,
    ];
    let n = 15000;
    let mut rng = StdRng::seed_from_u64(42);

    for kind in kinds {
        // Warm up
        let _ = sample_shape(kind, n, 4.0, &mut rng);

        let t0 = Instant::now();
        let points = sample_shape(kind, n, 4.0, &mut rng);
        let ms = t0.elapsed().as_secs_f64() * 1000.0;

        println!(
            "sample {:12} N = {:5}, {:8.4} ms ({} points)",
            kind.label(),
            n,
            ms,
            points.len()
        );
    }
}
