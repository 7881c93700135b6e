//! Simplex helpers shared by the hull builder, GJK and EPA.
//!
//! The closest point routines are the signed volume form of Johnson's
//! sub-algorithm: project the origin onto the simplex's affine hull, keep the
//! barycentric weights when the projection lands inside, otherwise recurse
//! onto the boundary features and keep the closest.

use super::glam_ext::Mat4Ext;
use glam::{Mat4, Vec2, Vec3, Vec4};

/// Six times the signed volume of the tetrahedron `abcd`.
///
/// Equals the determinant of the 4x4 matrix with columns `(a,1) (b,1) (c,1)
/// (d,1)`. For a counter-clockwise triangle `abc` (seen from outside) the
/// value is negative exactly when `d` lies in front of the triangle, which is
/// the visibility test used throughout.
pub fn tetrahedron_6_times_volume(a: Vec3, b: Vec3, c: Vec3, d: Vec3) -> f32 {
    -(b - a).dot((c - a).cross(d - a))
}

/// Strict containment of `p` in the tetrahedron `abcd` (any winding).
pub fn point_in_tetrahedron(a: Vec3, b: Vec3, c: Vec3, d: Vec3, p: Vec3) -> bool {
    let wa = tetrahedron_6_times_volume(a, b, c, p);
    let wb = tetrahedron_6_times_volume(b, a, d, p);
    let wc = tetrahedron_6_times_volume(c, b, d, p);
    let wd = tetrahedron_6_times_volume(a, c, d, p);
    [wa, wb, wc, wd].iter().all(|w| *w != 0.0)
        && (wa < 0.0) == (wb < 0.0)
        && (wb < 0.0) == (wc < 0.0)
        && (wc < 0.0) == (wd < 0.0)
}

/// Barycentric weights of the projection of `p` onto the plane of `abc`.
///
/// Returns `None` for a zero area triangle.
pub fn triangle_barycentric(a: Vec3, b: Vec3, c: Vec3, p: Vec3) -> Option<Vec3> {
    let normal = (b - a).cross(c - a);
    let ap = a - p;
    let bp = b - p;
    let cp = c - p;
    let weights = Vec3::new(
        normal.dot(bp.cross(cp)),
        normal.dot(cp.cross(ap)),
        normal.dot(ap.cross(bp)),
    );
    let sum = weights.x + weights.y + weights.z;
    if sum == 0.0 || !sum.is_finite() {
        None
    } else {
        Some(weights / sum)
    }
}

/// Index of the point furthest along `dir`, first index wins ties.
pub fn extreme_index(points: impl IntoIterator<Item = Vec3>, dir: Vec3) -> usize {
    let mut max_idx = 0;
    let mut max_dist = f32::MIN;
    for (i, pt) in points.into_iter().enumerate() {
        let dist = pt.dot(dir);
        if i == 0 || dist > max_dist {
            max_dist = dist;
            max_idx = i;
        }
    }
    max_idx
}

pub(crate) fn signed_volume_1d(s1: Vec3, s2: Vec3) -> Vec2 {
    let ab = s2 - s1; // ray from a to b
    let ap = Vec3::ZERO - s1; // ray from a to origin
    let length_sq = ab.length_squared();
    if length_sq == 0.0 {
        // coincident points, the segment is a single point
        return Vec2::X;
    }
    let p0 = s1 + ab * ab.dot(ap) / length_sq; // projection of the origin onto the line

    // Choose the axis with the greatest difference/length
    let mut idx = 0;
    let mut mu_max = 0.0;
    for i in 0..3 {
        let mu = s2[i] - s1[i];
        if mu * mu > mu_max * mu_max {
            mu_max = mu;
            idx = i;
        }
    }

    // Project the simplex points and projected origin onto the axis with the greatest length
    let a = s1[idx];
    let b = s2[idx];
    let p = p0[idx];

    // Get the signed distance from a to p and from p to b
    let c1 = p - a;
    let c2 = b - p;

    if (p > a && p < b) || (p > b && p < a) {
        // p is between [a,b]
        Vec2::new(c2 / mu_max, c1 / mu_max)
    } else if (a <= b && p <= a) || (a >= b && p >= a) {
        // p is on the far side of a
        Vec2::X
    } else {
        // p must be on the far side of b
        Vec2::Y
    }
}

fn compare_signs(a: f32, b: f32) -> bool {
    (a > 0.0 && b > 0.0) || (a < 0.0 && b < 0.0)
}

pub(crate) fn signed_volume_2d(s1: Vec3, s2: Vec3, s3: Vec3) -> Vec3 {
    // find the axis with the greatest projected area
    let mut idx = 0;
    let mut area_max = 0.0;
    for i in 0..3 {
        let j = (i + 1) % 3;
        let k = (i + 2) % 3;

        let a = Vec2::new(s1[j], s1[k]);
        let b = Vec2::new(s2[j], s2[k]);
        let c = Vec2::new(s3[j], s3[k]);
        let ab = b - a;
        let ac = c - a;
        let area = ab.x * ac.y - ab.y * ac.x;
        if area * area > area_max * area_max {
            idx = i;
            area_max = area;
        }
    }

    if area_max != 0.0 {
        let normal = (s2 - s1).cross(s3 - s1);
        let p0 = normal * s1.dot(normal) / normal.length_squared();

        // Project onto the appropriate axis
        let x = (idx + 1) % 3;
        let y = (idx + 2) % 3;
        let s = [
            Vec2::new(s1[x], s1[y]),
            Vec2::new(s2[x], s2[y]),
            Vec2::new(s3[x], s3[y]),
        ];
        let p = Vec2::new(p0[x], p0[y]);

        // Get the sub-areas of the triangles formed from the projected origin and the edges
        let mut areas = Vec3::ZERO;
        for i in 0..3 {
            let j = (i + 1) % 3;
            let k = (i + 2) % 3;

            let ab = s[j] - p;
            let ac = s[k] - p;

            areas[i] = ab.x * ac.y - ab.y * ac.x;
        }

        if compare_signs(area_max, areas[0])
            && compare_signs(area_max, areas[1])
            && compare_signs(area_max, areas[2])
        {
            // the projected origin is inside the triangle
            return areas / area_max;
        }
    }

    // project onto the edges and keep the closest
    let edge_pts = [s1, s2, s3];
    let mut dist = f32::MAX;
    let mut lambdas = Vec3::X;
    for i in 0..3 {
        let k = (i + 1) % 3;
        let l = (i + 2) % 3;

        let lambda_edge = signed_volume_1d(edge_pts[k], edge_pts[l]);
        let pt = edge_pts[k] * lambda_edge[0] + edge_pts[l] * lambda_edge[1];
        if pt.length_squared() < dist {
            dist = pt.length_squared();
            lambdas[i] = 0.0;
            lambdas[k] = lambda_edge[0];
            lambdas[l] = lambda_edge[1];
        }
    }
    lambdas
}

pub(crate) fn signed_volume_3d(s1: Vec3, s2: Vec3, s3: Vec3, s4: Vec3) -> Vec4 {
    let m = Mat4::from_cols(
        Vec4::new(s1.x, s2.x, s3.x, s4.x),
        Vec4::new(s1.y, s2.y, s3.y, s4.y),
        Vec4::new(s1.z, s2.z, s3.z, s4.z),
        Vec4::ONE,
    );

    let c4 = Vec4::new(
        m.cofactor(3, 0),
        m.cofactor(3, 1),
        m.cofactor(3, 2),
        m.cofactor(3, 3),
    );

    let det_m = c4[0] + c4[1] + c4[2] + c4[3];

    if compare_signs(det_m, c4[0])
        && compare_signs(det_m, c4[1])
        && compare_signs(det_m, c4[2])
        && compare_signs(det_m, c4[3])
    {
        // the barycentric coordinates put the origin inside the simplex
        return c4 * det_m.recip();
    }

    // project the origin onto the faces and keep the closest one
    let face_pts = [s1, s2, s3, s4];
    let mut lambdas = Vec4::ZERO;
    let mut dist = f32::MAX;
    for i in 0..4 {
        let j = (i + 1) % 4;
        let k = (i + 2) % 4;

        let lambdas_face = signed_volume_2d(face_pts[i], face_pts[j], face_pts[k]);
        let pt = face_pts[i] * lambdas_face[0]
            + face_pts[j] * lambdas_face[1]
            + face_pts[k] * lambdas_face[2];
        if pt.length_squared() < dist {
            dist = pt.length_squared();
            let l = (i + 3) % 4;
            lambdas[i] = lambdas_face[0];
            lambdas[j] = lambdas_face[1];
            lambdas[k] = lambdas_face[2];
            lambdas[l] = 0.0;
        }
    }
    lambdas
}

/// Closest point to the origin on a simplex of 1 to 4 points, with the
/// barycentric weights that produce it. Unused weight slots are zero.
pub fn closest_point_on_simplex(pts: &[Vec3]) -> (Vec3, [f32; 4]) {
    let lambdas = match *pts {
        [a] => {
            return (a, [1.0, 0.0, 0.0, 0.0]);
        }
        [a, b] => {
            let l = signed_volume_1d(a, b);
            [l.x, l.y, 0.0, 0.0]
        }
        [a, b, c] => {
            let l = signed_volume_2d(a, b, c);
            [l.x, l.y, l.z, 0.0]
        }
        [a, b, c, d] => signed_volume_3d(a, b, c, d).to_array(),
        _ => return (Vec3::ZERO, [0.0; 4]),
    };
    let point = pts
        .iter()
        .zip(lambdas.iter())
        .fold(Vec3::ZERO, |acc, (pt, l)| acc + *pt * *l);
    (point, lambdas)
}
