//! Expanding polytope algorithm for penetration depth.
//!
//! Starts from a GJK tetrahedron around the origin and keeps pushing out the
//! face nearest to the origin until the Minkowski difference has no vertex
//! beyond it. Scratch state lives in bounded pools so a runaway expansion
//! fails with an error instead of growing without limit.

use crate::{
    config::SolverConfig,
    error::{PhysicsError, Result},
    gjk::{cso_support, CsoPoint, SupportMap},
    manifold::Manifold,
    math::{tetrahedron_6_times_volume, triangle_barycentric},
};
use glam::Vec3;
use std::collections::HashSet;

pub(crate) enum EpaOutcome {
    /// `weights` are the barycentric coordinates of the separation on the
    /// nearest polytope triangle.
    Contact { manifold: Manifold, weights: Vec3 },
    Unresolved { iterations: usize },
}

/// Fixed capacity slot pool. Freed slots become tombstones and the lowest
/// one is reused first.
struct Pool<T> {
    name: &'static str,
    slots: Vec<Option<T>>,
    capacity: usize,
}

impl<T> Pool<T> {
    fn new(name: &'static str, capacity: usize) -> Self {
        Self {
            name,
            slots: Vec::new(),
            capacity,
        }
    }

    fn insert(&mut self, value: T) -> Result<usize> {
        if let Some(index) = self.slots.iter().position(Option::is_none) {
            self.slots[index] = Some(value);
            return Ok(index);
        }
        if self.slots.len() >= self.capacity {
            log::warn!("{} pool exhausted at {} slots", self.name, self.capacity);
            return Err(PhysicsError::ResourceExhausted {
                pool: self.name,
                capacity: self.capacity,
            });
        }
        self.slots.push(Some(value));
        Ok(self.slots.len() - 1)
    }

    fn remove(&mut self, index: usize) -> Option<T> {
        self.slots.get_mut(index)?.take()
    }

    fn iter(&self) -> impl Iterator<Item = (usize, &T)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|value| (i, value)))
    }
}

#[derive(Copy, Clone, Debug)]
struct Edge {
    a: usize,
    b: usize,
}

#[derive(Copy, Clone, Debug)]
struct Triangle {
    points: [usize; 3],
    edges: [usize; 3],
}

struct Polytope {
    points: Pool<CsoPoint>,
    edges: Pool<Edge>,
    triangles: Pool<Triangle>,
}

impl Polytope {
    fn new(capacity: usize) -> Self {
        Self {
            points: Pool::new("epa points", capacity),
            edges: Pool::new("epa edges", capacity),
            triangles: Pool::new("epa triangles", capacity),
        }
    }

    fn point(&self, index: usize) -> CsoPoint {
        match &self.points.slots[index] {
            Some(pt) => *pt,
            None => unreachable!("polytope triangle references a free point slot"),
        }
    }

    fn positions(&self, tri: &Triangle) -> [Vec3; 3] {
        tri.points.map(|i| self.point(i).point)
    }

    /// Adds triangle `abc` together with its three directed edges.
    fn add_triangle(&mut self, a: usize, b: usize, c: usize) -> Result<usize> {
        let index = self.triangles.insert(Triangle {
            points: [a, b, c],
            edges: [0; 3],
        })?;
        let edges = [
            self.edges.insert(Edge { a, b })?,
            self.edges.insert(Edge { a: b, b: c })?,
            self.edges.insert(Edge { a: c, b: a })?,
        ];
        if let Some(Some(tri)) = self.triangles.slots.get_mut(index) {
            tri.edges = edges;
        }
        Ok(index)
    }

    fn remove_triangle(&mut self, index: usize) {
        if let Some(tri) = self.triangles.remove(index) {
            for edge in tri.edges {
                self.edges.remove(edge);
            }
        }
    }

    /// Live triangle nearest to the origin: its index, the projection of the
    /// origin onto its plane and the barycentric weights of that projection.
    ///
    /// Coplanar triangles share a projection; among those the one containing
    /// it wins.
    fn nearest_triangle(&self) -> Option<(usize, Vec3, Vec3)> {
        const TIE: f32 = 1e-5;
        let mut nearest: Option<(usize, Vec3, Vec3)> = None;
        let mut nearest_dist_sq = f32::MAX;
        let mut nearest_inside = false;
        for (index, tri) in self.triangles.iter() {
            let [a, b, c] = self.positions(tri);
            if is_sliver(a, b, c) {
                continue;
            }
            let weights = match triangle_barycentric(a, b, c, Vec3::ZERO) {
                Some(weights) => weights,
                None => continue,
            };
            let projected = a * weights.x + b * weights.y + c * weights.z;
            let dist_sq = projected.length_squared();
            let inside = weights.cmpge(Vec3::ZERO).all();
            let tied = (dist_sq - nearest_dist_sq).abs() <= TIE * nearest_dist_sq.max(TIE);
            if nearest.is_none()
                || (dist_sq < nearest_dist_sq && !tied)
                || (tied && inside && !nearest_inside)
            {
                nearest = Some((index, projected, weights));
                nearest_dist_sq = dist_sq;
                nearest_inside = inside;
            }
        }
        nearest
    }
}

/// Near collinear triangles have no usable plane.
fn is_sliver(a: Vec3, b: Vec3, c: Vec3) -> bool {
    let (ab, ac) = (b - a, c - a);
    ab.cross(ac).length_squared() <= 1e-10 * ab.length_squared() * ac.length_squared()
}

pub(crate) fn expand_polytope<A, B>(
    a: &A,
    b: &B,
    mut tetrahedron: [CsoPoint; 4],
    config: &SolverConfig,
) -> Result<EpaOutcome>
where
    A: SupportMap + ?Sized,
    B: SupportMap + ?Sized,
{
    let [p0, p1, p2, p3] = tetrahedron.map(|pt| pt.point);
    if tetrahedron_6_times_volume(p0, p1, p2, p3) < 0.0 {
        tetrahedron.swap(0, 1);
    }

    let mut polytope = Polytope::new(config.epa_pool_capacity);
    for pt in tetrahedron {
        polytope.points.insert(pt)?;
    }
    polytope.add_triangle(0, 1, 2)?;
    polytope.add_triangle(1, 0, 3)?;
    polytope.add_triangle(2, 1, 3)?;
    polytope.add_triangle(0, 2, 3)?;

    for iteration in 0..config.epa_max_iterations {
        let (nearest, projected, weights) = match polytope.nearest_triangle() {
            Some(nearest) => nearest,
            None => {
                log::warn!("epa polytope has no usable triangle");
                return Ok(EpaOutcome::Unresolved { iterations: iteration });
            }
        };
        let tri = match polytope.triangles.slots[nearest] {
            Some(tri) => tri,
            None => unreachable!("nearest triangle is live"),
        };
        let [ta, tb, tc] = polytope.positions(&tri);
        let normal = (tb - ta).cross(tc - ta);
        let new_pt = cso_support(a, b, normal);

        if polytope.points.iter().any(|(_, pt)| pt.same_pair(&new_pt)) {
            log::trace!("epa converged after {} iterations", iteration);
            let corners = tri.points.map(|i| polytope.point(i));
            let mut a_contact = Vec3::ZERO;
            let mut b_contact = Vec3::ZERO;
            for (pt, weight) in corners.iter().zip(weights.to_array()) {
                a_contact += a.vertex(pt.ia) * weight;
                b_contact += b.vertex(pt.ib) * weight;
            }
            return Ok(EpaOutcome::Contact {
                manifold: Manifold {
                    separation: projected,
                    a_contact,
                    b_contact,
                },
                weights,
            });
        }

        let visible: Vec<usize> = polytope
            .triangles
            .iter()
            .filter(|(_, tri)| {
                let [a, b, c] = polytope.positions(tri);
                tetrahedron_6_times_volume(a, b, c, new_pt.point) < 0.0
            })
            .map(|(index, _)| index)
            .collect();
        for index in visible {
            polytope.remove_triangle(index);
        }

        let apex = polytope.points.insert(new_pt)?;

        // edges whose twin went with a visible triangle form the horizon
        let live: HashSet<(usize, usize)> =
            polytope.edges.iter().map(|(_, e)| (e.a, e.b)).collect();
        let horizon: Vec<Edge> = polytope
            .edges
            .iter()
            .filter(|(_, e)| !live.contains(&(e.b, e.a)))
            .map(|(_, e)| *e)
            .collect();
        for edge in horizon {
            polytope.add_triangle(edge.b, edge.a, apex)?;
        }
    }

    log::warn!(
        "epa did not converge within {} iterations",
        config.epa_max_iterations
    );
    Ok(EpaOutcome::Unresolved {
        iterations: config.epa_max_iterations,
    })
}
