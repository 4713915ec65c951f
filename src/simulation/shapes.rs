//! Point cloud samplers for the morph target shapes
//!
//! Pure functions: `(kind, count, radius)` -> `count` points. Each shape
//! family uses randomized sampling, so the distribution is deterministic
//! but the exact values depend on the rng handed in. Dispatch is a closed
//! match over [`ShapeKind`]; every variant is independent and stateless.

use std::f32::consts::TAU;

use rand::{Rng, RngCore};

use crate::configuration::config::ShapeKind;
use crate::simulation::states::NVec3;

/// Sample `count` points for `kind` at the nominal `radius`.
/// Cheap enough to run on a shape-change event without a visible stall
/// (reference count: 15,000 points).
pub fn sample_shape(kind: ShapeKind, count: usize, radius: f32, rng: &mut dyn RngCore) -> Vec<NVec3> {
    match kind {
        ShapeKind::Sphere => sample_sphere(count, radius, rng),
        ShapeKind::Cube => sample_cube(count, radius, rng),
        ShapeKind::Heart => sample_heart(count, radius, rng),
        ShapeKind::Spiral => sample_spiral(count, radius, rng),
        ShapeKind::RingedBody => sample_ringed_body(count, radius, rng),
        ShapeKind::Cloud => sample_cloud(count, radius, rng),
    }
}

/// Uniform direction on the unit sphere (y up).
fn unit_sphere(rng: &mut dyn RngCore) -> NVec3 {
    let y = rng.gen_range(-1.0f32..1.0);
    let phi = rng.gen_range(0.0f32..TAU);
    let s = (1.0 - y * y).sqrt();
    NVec3::new(s * phi.cos(), y, s * phi.sin())
}

/// Uniform spherical shell.
fn sample_sphere(count: usize, radius: f32, rng: &mut dyn RngCore) -> Vec<NVec3> {
    (0..count).map(|_| unit_sphere(rng) * radius).collect()
}

/// Uniform on the cube surface: sample the volume, then push the point out
/// to a random face.
fn sample_cube(count: usize, radius: f32, rng: &mut dyn RngCore) -> Vec<NVec3> {
    let half = radius * 0.75; // side length 1.5 * radius
    (0..count)
        .map(|_| {
            let mut p = NVec3::new(
                rng.gen_range(-half..half),
                rng.gen_range(-half..half),
                rng.gen_range(-half..half),
            );
            let axis = rng.gen_range(0..3usize);
            p[axis] = if rng.gen_bool(0.5) { half } else { -half };
            p
        })
        .collect()
}

/// Classic parametric heart curve, partially filled toward the interior and
/// thickened along z.
fn sample_heart(count: usize, radius: f32, rng: &mut dyn RngCore) -> Vec<NVec3> {
    // Curve spans roughly [-16, 16], normalize to the nominal radius
    let scale = radius / 16.0;
    (0..count)
        .map(|_| {
            let t = rng.gen_range(0.0f32..TAU);
            let fill = rng.gen_range(0.6f32..1.0);
            let x = 16.0 * t.sin().powi(3);
            let y = 13.0 * t.cos()
                - 5.0 * (2.0 * t).cos()
                - 2.0 * (3.0 * t).cos()
                - (4.0 * t).cos();
            let z = rng.gen_range(-0.25f32..0.25) * radius;
            NVec3::new(x * fill * scale, y * fill * scale, z)
        })
        .collect()
}

/// Multi-turn helix widening outward, with a little radial jitter so the
/// strand does not read as a wire.
fn sample_spiral(count: usize, radius: f32, rng: &mut dyn RngCore) -> Vec<NVec3> {
    const TURNS: f32 = 4.0;
    (0..count)
        .map(|_| {
            let u = rng.gen_range(0.0f32..1.0);
            let angle = u * TURNS * TAU;
            let r = radius * (0.25 + 0.75 * u) + rng.gen_range(-0.05f32..0.05) * radius;
            let y = (u - 0.5) * 1.6 * radius;
            NVec3::new(r * angle.cos(), y, r * angle.sin())
        })
        .collect()
}

/// Central sphere plus a flat annulus ring, Saturn style. Roughly 40% of
/// the points land in the ring.
fn sample_ringed_body(count: usize, radius: f32, rng: &mut dyn RngCore) -> Vec<NVec3> {
    (0..count)
        .map(|_| {
            if rng.gen_bool(0.6) {
                unit_sphere(rng) * radius * 0.55
            } else {
                let angle = rng.gen_range(0.0f32..TAU);
                let r = rng.gen_range(0.8f32..1.3) * radius;
                let y = rng.gen_range(-0.03f32..0.03) * radius;
                NVec3::new(r * angle.cos(), y, r * angle.sin())
            }
        })
        .collect()
}

/// Several overlapping spheroid blobs, flattened vertically.
fn sample_cloud(count: usize, radius: f32, rng: &mut dyn RngCore) -> Vec<NVec3> {
    const BLOBS: usize = 5;
    let centers: Vec<NVec3> = (0..BLOBS)
        .map(|_| {
            NVec3::new(
                rng.gen_range(-0.5f32..0.5),
                rng.gen_range(-0.2f32..0.2),
                rng.gen_range(-0.5f32..0.5),
            ) * radius
        })
        .collect();

    (0..count)
        .map(|_| {
            let center = centers[rng.gen_range(0..BLOBS)];
            // Uniform in the unit ball: shell direction, cbrt radius
            let r = rng.gen_range(0.0f32..1.0).powf(1.0 / 3.0);
            let mut offset = unit_sphere(rng) * r * radius * 0.45;
            offset.y *= 0.6; // flatten into a cloud layer
            center + offset
        })
        .collect()
}
