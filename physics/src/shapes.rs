//! Point sets for building convex colliders.

use glam::{Mat3, Quat, Vec3};
use rand::Rng;

/// Corners of an axis aligned block centred on the origin.
pub fn block_points(width: f32, height: f32, depth: f32) -> [Vec3; 8] {
    let (x, y, z) = (width * 0.5, height * 0.5, depth * 0.5);
    [
        Vec3::new(-x, -y, -z),
        Vec3::new(-x, -y, z),
        Vec3::new(-x, y, -z),
        Vec3::new(-x, y, z),
        Vec3::new(x, -y, -z),
        Vec3::new(x, -y, z),
        Vec3::new(x, y, -z),
        Vec3::new(x, y, z),
    ]
}

/// Points of a latitude/longitude sphere with its poles on the y axis.
///
/// The poles come first, followed by `stacks - 1` rings of `slices` points.
pub fn uv_sphere_points(radius: f32, slices: usize, stacks: usize) -> Vec<Vec3> {
    let slices = slices.max(3);
    let stacks = stacks.max(2);
    let mut points = Vec::with_capacity(2 + slices * (stacks - 1));
    points.push(Vec3::new(0.0, radius, 0.0));
    points.push(Vec3::new(0.0, -radius, 0.0));

    for stack in 1..stacks {
        let polar = std::f32::consts::PI * stack as f32 / stacks as f32;
        let (ring_radius, y) = (polar.sin() * radius, polar.cos() * radius);
        for slice in 0..slices {
            let azimuth = std::f32::consts::TAU * slice as f32 / slices as f32;
            points.push(Vec3::new(
                azimuth.cos() * ring_radius,
                y,
                azimuth.sin() * ring_radius,
            ));
        }
    }
    points
}

/// A cut gem: seven points swept eight times around the y axis.
pub fn diamond_points() -> Vec<Vec3> {
    let quat_half = Quat::from_rotation_y(std::f32::consts::TAU * 0.125 * 0.5);
    let facet = [
        Vec3::new(0.1, -1.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(1.0, 0.1, 0.0),
        Vec3::new(0.4, 0.4, 0.0),
        quat_half * Vec3::new(0.8, 0.3, 0.0),
        quat_half * Vec3::new(1.0, 0.0, 0.0),
        quat_half * Vec3::new(1.0, 0.1, 0.0),
    ];

    let quat = Quat::from_rotation_y(std::f32::consts::TAU * 0.125);
    let mut points = Vec::with_capacity(facet.len() * 8);
    let mut quat_acc = Quat::IDENTITY;
    for _ in 0..8 {
        points.extend(facet.iter().map(|pt| quat_acc * *pt));
        quat_acc *= quat;
    }
    points
}

/// A random ellipsoidal cloud of `count` points centred on the origin.
///
/// The principal axes form a random orthonormal basis, each stretched by a
/// factor in `[0.5, 1.5)`, so successive calls give differently shaped blobs.
pub fn random_points<R: Rng>(rng: &mut R, radius: f32, count: usize) -> Vec<Vec3> {
    let unit = |rng: &mut R| {
        (Vec3::new(rng.gen(), rng.gen(), rng.gen()) - Vec3::splat(0.5)).normalize_or_zero()
    };
    let e1 = unit(rng);
    let e2 = unit(rng);
    let e2 = (e2 - e1 * e2.dot(e1)).normalize_or_zero();
    let e3 = e1.cross(e2);
    let basis = Mat3::from_cols(
        e1 * rng.gen_range(0.5..1.5),
        e2 * rng.gen_range(0.5..1.5),
        e3 * rng.gen_range(0.5..1.5),
    );

    (0..count)
        .map(|_| {
            let dir = unit(rng);
            let dist: f32 = rng.gen();
            basis * dir * radius * dist
        })
        .collect()
}
