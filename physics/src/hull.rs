//! Incremental convex hull construction and queries on convex polyhedra.

use crate::{
    bounds::Bounds,
    math::{extreme_index, tetrahedron_6_times_volume},
    mesh::{EdgeId, PointId, PolyhedronMesh},
    shapes::block_points,
};
use glam::{Vec2, Vec3};

const NEEDED: u32 = 1;
const BOUNDARY: u32 = 2;
const VISIBLE: u32 = 1;

/// Distances below this fraction of the input's coordinate range are treated
/// as zero when picking the seed and classifying visibility.
const HULL_TOLERANCE: f32 = 1e-5;

/// Builds the convex hull of `points`.
///
/// Fewer than three points come back as a point-only mesh and exactly three as
/// a single triangle. Otherwise the first four affinely independent points
/// seed a tetrahedron and the rest are added in input order, each tagged with
/// its input index. Points inside the current hull, or within tolerance of
/// it, are skipped.
///
/// Input without volume is logged and returned flat: a single point, the two
/// extreme points of a line, or a polygon outline fanned into triangles that
/// face along the normal of the first three independent points.
pub fn build_convex_hull(points: &[Vec3]) -> PolyhedronMesh {
    let mut mesh = PolyhedronMesh::new();

    if points.len() <= 3 {
        let ids: Vec<PointId> = points
            .iter()
            .enumerate()
            .map(|(i, pt)| mesh.add_tagged_point(*pt, i))
            .collect();
        if let [a, b, c] = ids[..] {
            let e1 = mesh.add_edge(a, b);
            let e2 = mesh.add_edge(b, c);
            let e3 = mesh.add_edge(c, a);
            mesh.add_triangle(a, b, c, e1, e2, e3);
        }
        return mesh;
    }

    let range = points
        .iter()
        .fold(0.0_f32, |acc, pt| acc.max(pt.abs().max_element()));
    let tolerance = HULL_TOLERANCE * range.max(f32::MIN_POSITIVE);

    let independent = independent_points(points, tolerance);
    let mut seed = match independent[..] {
        [i0, i1, i2, i3] => [i0, i1, i2, i3],
        _ => {
            log::warn!(
                "convex hull input of {} points spans only {} dimensions",
                points.len(),
                independent.len() - 1
            );
            return flat_hull(points, &independent, tolerance);
        }
    };
    let [p0, p1, p2, p3] = seed.map(|i| points[i]);
    if tetrahedron_6_times_volume(p0, p1, p2, p3) < 0.0 {
        seed.swap(0, 1);
    }
    let [t0, t1, t2, t3] = seed.map(|i| mesh.add_tagged_point(points[i], i));

    let e1 = mesh.add_edge(t0, t1);
    let e2 = mesh.add_edge(t1, t2);
    let e3 = mesh.add_edge(t2, t0);
    let e4 = mesh.add_edge(t0, t3);
    let e5 = mesh.add_edge(t1, t3);
    let e6 = mesh.add_edge(t2, t3);
    mesh.add_triangle(t0, t1, t2, e1, e2, e3);
    mesh.add_triangle(t3, t1, t0, e1, e5, e4);
    mesh.add_triangle(t3, t2, t1, e2, e6, e5);
    mesh.add_triangle(t3, t0, t2, e3, e4, e6);

    for (i, pt) in points.iter().enumerate() {
        if !seed.contains(&i) {
            add_hull_point(&mut mesh, *pt, i, tolerance);
        }
    }

    log::trace!(
        "hull of {} points: {} vertices, {} triangles",
        points.len(),
        mesh.num_points(),
        mesh.num_triangles()
    );
    mesh
}

/// Indices of the first point, the first point away from it, the first point
/// off their line and the first point off their plane. Stops early when the
/// input runs out of dimensions.
fn independent_points(points: &[Vec3], tolerance: f32) -> Vec<usize> {
    let origin = points[0];
    let mut found = vec![0];

    let i1 = match points.iter().position(|pt| pt.distance(origin) > tolerance) {
        Some(i) => i,
        None => return found,
    };
    found.push(i1);

    let axis = points[i1] - origin;
    let axis_len = axis.length();
    let i2 = match points
        .iter()
        .position(|pt| axis.cross(*pt - origin).length() > tolerance * axis_len)
    {
        Some(i) => i,
        None => return found,
    };
    found.push(i2);

    let normal = axis.cross(points[i2] - origin);
    let normal_len = normal.length();
    if let Some(i3) = points
        .iter()
        .position(|pt| normal.dot(*pt - origin).abs() > tolerance * normal_len)
    {
        found.push(i3);
    }
    found
}

/// Mesh for input without volume, see [`build_convex_hull`].
fn flat_hull(points: &[Vec3], independent: &[usize], tolerance: f32) -> PolyhedronMesh {
    let mut mesh = PolyhedronMesh::new();
    match *independent {
        [i0] => {
            mesh.add_tagged_point(points[i0], i0);
        }
        [i0, i1] => {
            let axis = points[i1] - points[i0];
            let lo = extreme_index(points.iter().copied(), -axis);
            let hi = extreme_index(points.iter().copied(), axis);
            mesh.add_tagged_point(points[lo], lo);
            mesh.add_tagged_point(points[hi], hi);
        }
        [i0, i1, i2, ..] => {
            let origin = points[i0];
            let u = (points[i1] - origin).normalize();
            let normal = u.cross(points[i2] - origin).normalize();
            let v = normal.cross(u);
            let outline = planar_outline(points, origin, u, v, tolerance);
            if outline.len() < 3 {
                return mesh;
            }

            let ids: Vec<PointId> = outline
                .iter()
                .map(|&i| mesh.add_tagged_point(points[i], i))
                .collect();
            let n = ids.len();
            let sides: Vec<EdgeId> = (0..n)
                .map(|k| mesh.add_edge(ids[k], ids[(k + 1) % n]))
                .collect();

            // fan from the first outline point
            let mut from_first = sides[0];
            for k in 1..n - 1 {
                let to_first = if k + 2 == n {
                    sides[n - 1]
                } else {
                    mesh.add_edge(ids[k + 1], ids[0])
                };
                mesh.add_triangle(ids[0], ids[k], ids[k + 1], from_first, sides[k], to_first);
                from_first = to_first;
            }
        }
        [] => {}
    }
    mesh
}

/// Counter-clockwise outline (seen from `u x v`) of points lying in the plane
/// through `origin` spanned by `u` and `v`.
fn planar_outline(
    points: &[Vec3],
    origin: Vec3,
    u: Vec3,
    v: Vec3,
    tolerance: f32,
) -> Vec<usize> {
    let mut order: Vec<(usize, Vec2)> = points
        .iter()
        .enumerate()
        .map(|(i, pt)| {
            let d = *pt - origin;
            (i, Vec2::new(d.dot(u), d.dot(v)))
        })
        .collect();
    order.sort_by(|a, b| a.1.x.total_cmp(&b.1.x).then(a.1.y.total_cmp(&b.1.y)));

    let mut outline = monotone_chain(order.iter(), tolerance);
    outline.extend(monotone_chain(order.iter().rev(), tolerance));
    outline.into_iter().map(|(i, _)| i).collect()
}

/// One half of Andrew's monotone chain. The last point is left for the other
/// half to start from.
fn monotone_chain<'a>(
    sorted: impl Iterator<Item = &'a (usize, Vec2)>,
    tolerance: f32,
) -> Vec<(usize, Vec2)> {
    let left_turn = |o: Vec2, a: Vec2, b: Vec2| {
        (a - o).perp_dot(b - o) > tolerance * (a - o).length()
    };
    let mut chain: Vec<(usize, Vec2)> = Vec::new();
    for &pt in sorted {
        while let [.., o, a] = chain[..] {
            if left_turn(o.1, a.1, pt.1) {
                break;
            }
            chain.pop();
        }
        chain.push(pt);
    }
    chain.pop();
    chain
}

/// `point` lies in front of the plane of `abc` by more than `tolerance`.
/// Zero area triangles face nowhere.
fn is_visible(a: Vec3, b: Vec3, c: Vec3, point: Vec3, tolerance: f32) -> bool {
    let area = (b - a).cross(c - a).length();
    area > 0.0 && tetrahedron_6_times_volume(a, b, c, point) < -tolerance * area
}

/// Grows the hull to include `point`. Returns false if the point was inside.
fn add_hull_point(mesh: &mut PolyhedronMesh, point: Vec3, tag: usize, tolerance: f32) -> bool {
    mesh.clear_marks();

    let mut any_visible = false;
    for tri_id in mesh.triangle_ids() {
        let [a, b, c] = mesh.triangle_positions(tri_id);
        let visible = is_visible(a, b, c, point, tolerance);
        let tri = mesh[tri_id].clone();
        if let Some(mark) = mesh.triangle_mark_mut(tri_id) {
            *mark = if visible { VISIBLE } else { 0 };
        }
        if visible {
            any_visible = true;
            continue;
        }
        for pt_id in tri.points() {
            mesh[pt_id].mark |= NEEDED;
        }
        for edge_id in tri.edges().iter().flatten() {
            if let Some(mark) = mesh.edge_mark_mut(*edge_id) {
                *mark |= NEEDED;
            }
        }
    }
    if !any_visible {
        return false;
    }

    // the horizon separates visible triangles from hidden ones
    for edge_id in mesh.edge_ids() {
        if let [Some(t0), Some(t1)] = mesh[edge_id].triangles() {
            if mesh[t0].mark != mesh[t1].mark {
                if let Some(mark) = mesh.edge_mark_mut(edge_id) {
                    *mark |= BOUNDARY;
                }
            }
        }
    }

    let visible: Vec<_> = mesh
        .triangles_iter()
        .filter(|(_, tri)| tri.mark == VISIBLE)
        .map(|(id, _)| id)
        .collect();
    for tri_id in visible {
        mesh.remove_triangle(tri_id);
    }
    let unneeded_edges: Vec<_> = mesh
        .edges_iter()
        .filter(|(_, edge)| edge.mark & NEEDED == 0)
        .map(|(id, _)| id)
        .collect();
    for edge_id in unneeded_edges {
        mesh.remove_edge(edge_id);
    }
    let unneeded_points: Vec<_> = mesh
        .points_iter()
        .filter(|(_, pt)| pt.mark & NEEDED == 0)
        .map(|(id, _)| id)
        .collect();
    for pt_id in unneeded_points {
        mesh.remove_point(pt_id);
    }

    let apex = mesh.add_tagged_point(point, tag);
    for edge_id in mesh.edge_ids() {
        let edge = &mesh[edge_id];
        if edge.mark & BOUNDARY == 0 {
            continue;
        }
        let (a, b) = (edge.a(), edge.b());
        let reverse = match edge.triangles().iter().flatten().next() {
            Some(tri_id) => mesh[*tri_id].traverses(a, b),
            None => {
                log::warn!("horizon edge {:?} has no remaining triangle", edge_id);
                false
            }
        };
        let (p1, p2) = if reverse { (b, a) } else { (a, b) };
        let to_p1 = cone_edge(mesh, apex, p1);
        let to_p2 = cone_edge(mesh, apex, p2);
        mesh.add_triangle(apex, p1, p2, to_p1, edge_id, to_p2);
    }
    true
}

/// The edge from the new apex to `pt`, shared by both cone triangles using it.
fn cone_edge(mesh: &mut PolyhedronMesh, apex: PointId, pt: PointId) -> EdgeId {
    if let Some(edge_id) = mesh[pt].saved_edge {
        return edge_id;
    }
    let edge_id = mesh.add_edge(apex, pt);
    mesh[pt].saved_edge = Some(edge_id);
    edge_id
}

impl PolyhedronMesh {
    /// True unless some triangle faces `pt`. Points on the surface count as
    /// inside.
    pub fn contains_point(&self, pt: Vec3) -> bool {
        self.triangles_iter().all(|(id, _)| {
            let [a, b, c] = self.triangle_positions(id);
            tetrahedron_6_times_volume(a, b, c, pt) >= 0.0
        })
    }

    /// Largest signed distance from `pt` to a face plane, positive outside.
    ///
    /// Returns `f32::MIN` for a mesh without triangles.
    pub fn distance_outside(&self, pt: Vec3) -> f32 {
        self.triangles_iter()
            .filter_map(|(id, _)| {
                let [a, b, c] = self.triangle_positions(id);
                let normal = (b - a).cross(c - a).try_normalize()?;
                Some(normal.dot(pt - a))
            })
            .fold(f32::MIN, f32::max)
    }

    /// Enclosed volume, summing the origin to triangle tetrahedra.
    pub fn volume(&self) -> f32 {
        self.triangles_iter()
            .map(|(id, _)| {
                let [a, b, c] = self.triangle_positions(id);
                tetrahedron_6_times_volume(a, b, c, Vec3::ZERO)
            })
            .sum::<f32>()
            / 6.0
    }

    /// Center of mass of the solid, `None` if it encloses no volume.
    pub fn center_of_mass(&self) -> Option<Vec3> {
        let mut weighted = Vec3::ZERO;
        let mut total = 0.0;
        for (id, _) in self.triangles_iter() {
            let [a, b, c] = self.triangle_positions(id);
            let vol = tetrahedron_6_times_volume(a, b, c, Vec3::ZERO);
            weighted += (a + b + c) * 0.25 * vol;
            total += vol;
        }
        if total == 0.0 {
            None
        } else {
            Some(weighted / total)
        }
    }

    pub fn extreme_point(&self, dir: Vec3) -> Option<Vec3> {
        let positions = self.positions();
        if positions.is_empty() {
            return None;
        }
        Some(positions[extreme_index(positions.iter().copied(), dir)])
    }

    pub fn bounds(&self) -> Bounds {
        self.points_iter()
            .fold(Bounds::new(), |acc, (_, pt)| acc + pt.position)
    }
}

pub fn polytope_center_of_mass(points: &[Vec3]) -> Option<Vec3> {
    build_convex_hull(points).center_of_mass()
}

pub fn polytope_extreme_point(points: &[Vec3], dir: Vec3) -> Option<Vec3> {
    if points.is_empty() {
        return None;
    }
    Some(points[extreme_index(points.iter().copied(), dir)])
}

/// Hull of every pairwise difference `a - b`. Contains the origin exactly
/// when the two polyhedra overlap.
pub fn minkowski_difference(a: &PolyhedronMesh, b: &PolyhedronMesh) -> PolyhedronMesh {
    let b_points = b.positions();
    let differences: Vec<Vec3> = a
        .positions()
        .iter()
        .flat_map(|pa| b_points.iter().map(move |pb| *pa - *pb))
        .collect();
    build_convex_hull(&differences)
}

/// Axis aligned block centred on the origin.
pub fn make_block(width: f32, height: f32, depth: f32) -> PolyhedronMesh {
    build_convex_hull(&block_points(width, height, depth))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shapes::{diamond_points, random_points, uv_sphere_points};
    use approx::assert_abs_diff_eq;
    use rand::{seq::SliceRandom, SeedableRng};
    use rand_pcg::Pcg32;

    fn assert_closed_manifold(mesh: &PolyhedronMesh) {
        let (v, e, f) = (
            mesh.num_points() as i64,
            mesh.num_edges() as i64,
            mesh.num_triangles() as i64,
        );
        assert_eq!(v - e + f, 2, "euler characteristic of {} {} {}", v, e, f);
        for (id, edge) in mesh.edges_iter() {
            assert_eq!(edge.num_triangles(), 2, "edge {:?}", id);
        }
        for (_, tri) in mesh.triangles_iter() {
            assert!(tri.edges().iter().all(|e| e.is_some()));
        }
    }

    #[test]
    fn test_small_inputs() {
        let pts = [Vec3::ZERO, Vec3::X];
        let mesh = build_convex_hull(&pts);
        assert_eq!(mesh.positions(), pts.to_vec());
        assert_eq!(mesh.num_triangles(), 0);

        let mesh = build_convex_hull(&[Vec3::ZERO, Vec3::X, Vec3::Y]);
        assert_eq!(mesh.num_points(), 3);
        assert_eq!(mesh.num_edges(), 3);
        assert_eq!(mesh.num_triangles(), 1);
    }

    #[test]
    fn test_tetrahedron_winding() {
        // negative seed volume, first two points get swapped
        let mesh = build_convex_hull(&[Vec3::X, Vec3::ZERO, Vec3::Y, Vec3::Z]);
        assert_closed_manifold(&mesh);
        assert_abs_diff_eq!(mesh.volume(), 1.0 / 6.0, epsilon = 1e-6);
        assert!(mesh.contains_point(Vec3::splat(0.1)));
        assert!(!mesh.contains_point(Vec3::splat(1.0)));
    }

    #[test]
    fn test_interior_point_skipped() {
        let mesh = build_convex_hull(&[
            Vec3::ZERO,
            Vec3::X,
            Vec3::Y,
            Vec3::Z,
            Vec3::splat(0.1),
        ]);
        assert_eq!(mesh.num_points(), 4);
        assert!(mesh.points_iter().all(|(_, p)| p.tag != Some(4)));
    }

    #[test]
    fn test_cube() {
        let mesh = make_block(1.0, 1.0, 1.0);
        assert_closed_manifold(&mesh);
        assert_eq!(mesh.num_points(), 8);
        assert_eq!(mesh.num_edges(), 18);
        assert_eq!(mesh.num_triangles(), 12);
        assert_abs_diff_eq!(mesh.volume(), 1.0, epsilon = 1e-5);
        let com = mesh.center_of_mass().unwrap();
        assert!(com.abs_diff_eq(Vec3::ZERO, 1e-5));
        let extreme = mesh.extreme_point(Vec3::new(1.0, 2.0, -3.0)).unwrap();
        assert_eq!(extreme, Vec3::new(0.5, 0.5, -0.5));
    }

    #[test]
    fn test_offset_block_center_of_mass() {
        let pts: Vec<Vec3> = block_points(2.0, 1.0, 4.0)
            .iter()
            .map(|p| *p + Vec3::new(3.0, -1.0, 0.5))
            .collect();
        let com = polytope_center_of_mass(&pts).unwrap();
        assert!(com.abs_diff_eq(Vec3::new(3.0, -1.0, 0.5), 1e-4));
        assert_abs_diff_eq!(build_convex_hull(&pts).volume(), 8.0, epsilon = 1e-4);
    }

    #[test]
    fn test_random_hulls_contain_input() {
        let mut rng = Pcg32::seed_from_u64(0x5eed);
        for _ in 0..20 {
            let pts = random_points(&mut rng, 1.0, 60);
            let mesh = build_convex_hull(&pts);
            assert_closed_manifold(&mesh);
            for p in &pts {
                assert!(mesh.distance_outside(*p) <= 1e-4);
            }
            assert!(mesh.volume() > 0.0);
        }
    }

    #[test]
    fn test_extreme_point_matches_brute_force() {
        let mut rng = Pcg32::seed_from_u64(11);
        let pts = random_points(&mut rng, 2.0, 40);
        let mesh = build_convex_hull(&pts);
        for dir in [Vec3::X, -Vec3::Y, Vec3::new(0.3, -0.2, 0.9)] {
            let best = pts.iter().map(|p| p.dot(dir)).fold(f32::MIN, f32::max);
            let hull_best = mesh.extreme_point(dir).unwrap().dot(dir);
            assert_abs_diff_eq!(best, hull_best, epsilon = 1e-6);
            assert_abs_diff_eq!(
                polytope_extreme_point(&pts, dir).unwrap().dot(dir),
                best,
                epsilon = 1e-6
            );
        }
    }

    #[test]
    fn test_sphere_and_diamond_hulls() {
        let sphere = build_convex_hull(&uv_sphere_points(1.0, 12, 8));
        assert_closed_manifold(&sphere);
        assert_eq!(sphere.num_points(), 2 + 12 * 7);

        // first four points are coplanar
        let diamond = build_convex_hull(&diamond_points());
        assert_closed_manifold(&diamond);
        assert!(diamond.volume() > 1.0);
    }

    fn assert_contains_all(mesh: &PolyhedronMesh, pts: &[Vec3]) {
        for p in pts {
            let outside = mesh.distance_outside(*p);
            assert!(outside <= 1e-5, "{} is {} outside", p, outside);
        }
    }

    #[test]
    fn test_lattice_in_order() {
        // first three points are collinear, first nine coplanar
        let mut pts = Vec::new();
        for i in 0..3 {
            for j in 0..3 {
                for k in 0..3 {
                    pts.push(Vec3::new(i as f32, j as f32, k as f32));
                }
            }
        }
        let mesh = build_convex_hull(&pts);
        assert_closed_manifold(&mesh);
        assert_contains_all(&mesh, &pts);
        assert_abs_diff_eq!(mesh.volume(), 8.0, epsilon = 1e-4);
        let positions = mesh.positions();
        for corner in block_points(2.0, 2.0, 2.0) {
            assert!(positions.contains(&(corner + Vec3::ONE)), "missing {}", corner);
        }
    }

    #[test]
    fn test_collinear_prefix() {
        let mut pts = vec![Vec3::ZERO, Vec3::X, Vec3::X * 2.0, Vec3::X * 3.0];
        pts.extend(block_points(4.0, 4.0, 4.0));
        let mesh = build_convex_hull(&pts);
        assert_closed_manifold(&mesh);
        assert_contains_all(&mesh, &pts);
        assert_eq!(mesh.num_points(), 9);
        // block plus a pyramid over its +x face
        assert_abs_diff_eq!(mesh.volume(), 64.0 + 16.0 / 3.0, epsilon = 1e-3);
    }

    #[test]
    fn test_shuffled_duplicates() {
        let mut rng = Pcg32::seed_from_u64(21);
        let block = block_points(2.0, 1.0, 3.0);
        for _ in 0..20 {
            let mut pts: Vec<Vec3> = (0..4).flat_map(|_| block).collect();
            pts.extend([Vec3::ZERO, Vec3::new(1.0, 0.5, 0.0), Vec3::new(0.0, 0.0, 1.5)]);
            pts.shuffle(&mut rng);
            let mesh = build_convex_hull(&pts);
            assert_closed_manifold(&mesh);
            assert_contains_all(&mesh, &pts);
            assert_abs_diff_eq!(mesh.volume(), 6.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_shuffled_cube_differences() {
        let mut rng = Pcg32::seed_from_u64(5);
        let cube = block_points(1.0, 1.0, 1.0);
        let offset = Vec3::new(0.6, 0.2, 0.0);
        let diffs: Vec<Vec3> = cube
            .iter()
            .flat_map(|a| cube.iter().map(move |b| *a - (*b + offset)))
            .collect();
        for _ in 0..50 {
            let mut pts = diffs.clone();
            pts.shuffle(&mut rng);
            let mesh = build_convex_hull(&pts);
            assert_closed_manifold(&mesh);
            assert_contains_all(&mesh, &pts);
            assert_abs_diff_eq!(mesh.volume(), 8.0, epsilon = 1e-4);
            assert!(mesh.contains_point(Vec3::ZERO));
        }
    }

    #[test]
    fn test_flat_inputs() {
        let square = [
            Vec3::new(0.5, 0.5, 0.0),
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(-1.0, 1.0, 0.0),
            Vec3::new(0.0, -1.0, 0.0),
        ];
        let mesh = build_convex_hull(&square);
        assert_eq!(mesh.num_points(), 4);
        assert_eq!(mesh.num_triangles(), 2);
        assert_eq!(mesh.num_edges(), 5);
        for (_, p) in mesh.points_iter() {
            assert_eq!(p.position.abs(), Vec3::new(1.0, 1.0, 0.0));
        }
        assert_abs_diff_eq!(mesh.volume(), 0.0);

        let line: Vec<Vec3> = [0.5, -2.0, 1.0, 3.0, 0.0]
            .iter()
            .map(|t| Vec3::new(1.0, 2.0, 3.0) * *t)
            .collect();
        let mesh = build_convex_hull(&line);
        assert_eq!(mesh.num_points(), 2);
        assert_eq!(mesh.num_triangles(), 0);
        let mut tags: Vec<Option<usize>> = mesh.points_iter().map(|(_, p)| p.tag).collect();
        tags.sort();
        assert_eq!(tags, vec![Some(1), Some(3)]);

        let mesh = build_convex_hull(&[Vec3::ONE; 5]);
        assert_eq!(mesh.positions(), vec![Vec3::ONE]);
    }

    #[test]
    fn test_minkowski_difference() {
        let a = make_block(1.0, 1.0, 1.0);
        let shifted = |offset: Vec3| {
            let pts: Vec<Vec3> = block_points(1.0, 1.0, 1.0)
                .iter()
                .map(|p| *p + offset)
                .collect();
            build_convex_hull(&pts)
        };
        let overlapping = minkowski_difference(&a, &shifted(Vec3::new(0.6, 0.2, 0.0)));
        assert!(overlapping.contains_point(Vec3::ZERO));
        let apart = minkowski_difference(&a, &shifted(Vec3::new(1.5, 0.0, 0.0)));
        assert!(!apart.contains_point(Vec3::ZERO));
    }
}
