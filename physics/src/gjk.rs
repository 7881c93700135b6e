//! Gilbert-Johnson-Keerthi intersection test between convex point sets.
//!
//! The search walks a simplex of Minkowski difference (CSO) vertices towards
//! the origin. Each vertex remembers which input vertices produced it so the
//! closest or deepest points can be mapped back onto the two shapes.

use crate::{
    config::SolverConfig,
    epa::{expand_polytope, EpaOutcome},
    error::{PhysicsError, Result},
    manifold::{ClosestPoints, Manifold},
    math::{closest_point_on_simplex, extreme_index, point_in_tetrahedron},
    transform::Transform,
};
use glam::Vec3;

/// A convex shape addressed by vertex index.
pub trait SupportMap {
    fn num_vertices(&self) -> usize;
    /// Index of the vertex furthest along `dir` in world space. The first
    /// index wins ties.
    fn support(&self, dir: Vec3) -> usize;
    /// World position of a vertex.
    fn vertex(&self, index: usize) -> Vec3;
}

/// Local points placed in the world by a transform. Nothing is copied.
#[derive(Copy, Clone, Debug)]
pub struct TransformedPoints<'a> {
    points: &'a [Vec3],
    transform: &'a Transform,
}

impl<'a> TransformedPoints<'a> {
    pub fn new(points: &'a [Vec3], transform: &'a Transform) -> Result<Self> {
        if points.is_empty() {
            return Err(PhysicsError::InvalidInput("empty point set".into()));
        }
        if !transform.is_valid() {
            return Err(PhysicsError::InvalidInput(format!(
                "transform with scale {} is not usable",
                transform.scale
            )));
        }
        Ok(Self { points, transform })
    }
}

impl SupportMap for TransformedPoints<'_> {
    fn num_vertices(&self) -> usize {
        self.points.len()
    }

    fn support(&self, dir: Vec3) -> usize {
        extreme_index(self.points.iter().map(|pt| self.transform.to_world(*pt)), dir)
    }

    fn vertex(&self, index: usize) -> Vec3 {
        self.transform.to_world(self.points[index])
    }
}

/// A Minkowski difference vertex and the pair of input vertices behind it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct CsoPoint {
    pub point: Vec3,
    pub ia: usize,
    pub ib: usize,
}

impl CsoPoint {
    pub fn same_pair(&self, other: &CsoPoint) -> bool {
        self.ia == other.ia && self.ib == other.ib
    }
}

pub(crate) fn cso_support<A, B>(a: &A, b: &B, dir: Vec3) -> CsoPoint
where
    A: SupportMap + ?Sized,
    B: SupportMap + ?Sized,
{
    let ia = a.support(dir);
    let ib = b.support(-dir);
    CsoPoint {
        point: a.vertex(ia) - b.vertex(ib),
        ia,
        ib,
    }
}

/// Outcome of a narrow phase test.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Intersection {
    Penetrating(Manifold),
    /// Disjoint or only touching (distance within tolerance).
    Separated(ClosestPoints),
    /// An iteration cap was hit before a decision.
    Unresolved {
        solver: &'static str,
        iterations: usize,
    },
}

impl Intersection {
    pub fn manifold(&self) -> Option<&Manifold> {
        match self {
            Intersection::Penetrating(manifold) => Some(manifold),
            _ => None,
        }
    }

    /// Turns a missed iteration cap into [`PhysicsError::NonConvergence`].
    pub fn into_result(self) -> Result<Option<Manifold>> {
        match self {
            Intersection::Penetrating(manifold) => Ok(Some(manifold)),
            Intersection::Separated(_) => Ok(None),
            Intersection::Unresolved { solver, iterations } => {
                Err(PhysicsError::NonConvergence { solver, iterations })
            }
        }
    }
}

pub struct GjkSolver {
    config: SolverConfig,
}

impl GjkSolver {
    pub fn new(config: &SolverConfig) -> Self {
        Self { config: *config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn intersect<A, B>(&self, a: &A, b: &B) -> Result<Intersection>
    where
        A: SupportMap + ?Sized,
        B: SupportMap + ?Sized,
    {
        if a.num_vertices() == 0 || b.num_vertices() == 0 {
            return Err(PhysicsError::InvalidInput("empty point set".into()));
        }

        let tolerance = self.config.tolerance;
        let tolerance_sq = tolerance * tolerance;

        let first = cso_support(a, b, Vec3::ONE);
        let mut simplex = Vec::with_capacity(4);
        simplex.push(first);
        simplex.push(cso_support(a, b, -first.point));

        for iteration in 0..self.config.gjk_max_iterations {
            let (closest, lambdas) = closest_point_on_simplex(&positions(&simplex));

            if let [s0, s1, s2, s3] = simplex[..] {
                if point_in_tetrahedron(s0.point, s1.point, s2.point, s3.point, Vec3::ZERO) {
                    log::trace!("gjk enclosed the origin after {} iterations", iteration);
                    return self.penetration(a, b, [s0, s1, s2, s3]);
                }
            }

            let dist_sq = closest.length_squared();
            if dist_sq <= tolerance_sq {
                // origin on the simplex boundary, need a full tetrahedron for EPA
                return match self.blow_up(a, b, &simplex, &lambdas) {
                    Some(tetrahedron) => self.penetration(a, b, tetrahedron),
                    None => Ok(Intersection::Separated(closest_points(
                        a, b, &simplex, &lambdas,
                    ))),
                };
            }

            let dir = -closest;
            let new_pt = cso_support(a, b, dir);
            let separated = || Intersection::Separated(closest_points(a, b, &simplex, &lambdas));

            if new_pt.point.dot(dir) + dist_sq <= tolerance * dist_sq {
                // no progress towards the origin
                log::trace!("gjk stalled after {} iterations", iteration);
                return Ok(separated());
            }

            let known = simplex.iter().any(|pt| pt.same_pair(&new_pt));
            if simplex.len() == 4 && !known {
                let result = separated();
                let replace = extreme_index(simplex.iter().map(|pt| pt.point), closest);
                simplex[replace] = new_pt;
                if new_pt.point.dot(dir) <= 0.0 {
                    return Ok(result);
                }
            } else if known {
                if simplex.len() < 4 {
                    return Ok(separated());
                }
                let remove = extreme_index(simplex.iter().map(|pt| pt.point), closest);
                simplex.remove(remove);
            } else {
                simplex.push(new_pt);
            }
        }

        log::warn!(
            "gjk did not converge within {} iterations",
            self.config.gjk_max_iterations
        );
        Ok(Intersection::Unresolved {
            solver: "gjk",
            iterations: self.config.gjk_max_iterations,
        })
    }

    fn penetration<A, B>(&self, a: &A, b: &B, tetrahedron: [CsoPoint; 4]) -> Result<Intersection>
    where
        A: SupportMap + ?Sized,
        B: SupportMap + ?Sized,
    {
        let tolerance = self.config.tolerance;
        Ok(match expand_polytope(a, b, tetrahedron, &self.config)? {
            EpaOutcome::Contact { manifold, weights } => {
                debug_assert!(
                    (weights.x + weights.y + weights.z - 1.0).abs() < 1e-3,
                    "contact weights {} do not sum to one",
                    weights
                );
                if manifold.separation.length_squared() <= tolerance * tolerance {
                    Intersection::Separated(ClosestPoints {
                        distance: 0.0,
                        a_closest: manifold.a_contact,
                        b_closest: manifold.b_contact,
                    })
                } else {
                    Intersection::Penetrating(manifold)
                }
            }
            EpaOutcome::Unresolved { iterations } => Intersection::Unresolved {
                solver: "epa",
                iterations,
            },
        })
    }

    /// Grows a simplex touching the origin into a tetrahedron by searching
    /// along directions orthogonal to its affine hull. `None` when the
    /// Minkowski difference is flat there, which means the shapes only touch.
    fn blow_up<A, B>(
        &self,
        a: &A,
        b: &B,
        simplex: &[CsoPoint],
        lambdas: &[f32; 4],
    ) -> Option<[CsoPoint; 4]>
    where
        A: SupportMap + ?Sized,
        B: SupportMap + ?Sized,
    {
        let mut grown: Vec<CsoPoint> = simplex
            .iter()
            .zip(lambdas.iter())
            .filter(|(_, lambda)| **lambda > 0.0)
            .map(|(pt, _)| *pt)
            .collect();
        if grown.is_empty() {
            grown.push(simplex[0]);
        }

        while grown.len() < 4 {
            let origin = grown[0].point;
            let found = orthogonal_directions(&grown).into_iter().find_map(|dir| {
                let pt = cso_support(a, b, dir);
                let novel = !grown.iter().any(|g| g.same_pair(&pt));
                (novel && (pt.point - origin).dot(dir) > self.config.tolerance).then_some(pt)
            });
            grown.push(found?);
        }

        Some([grown[0], grown[1], grown[2], grown[3]])
    }
}

fn positions(simplex: &[CsoPoint]) -> Vec<Vec3> {
    simplex.iter().map(|pt| pt.point).collect()
}

fn closest_points<A, B>(a: &A, b: &B, simplex: &[CsoPoint], lambdas: &[f32; 4]) -> ClosestPoints
where
    A: SupportMap + ?Sized,
    B: SupportMap + ?Sized,
{
    let mut a_closest = Vec3::ZERO;
    let mut b_closest = Vec3::ZERO;
    for (pt, lambda) in simplex.iter().zip(lambdas.iter()) {
        a_closest += a.vertex(pt.ia) * *lambda;
        b_closest += b.vertex(pt.ib) * *lambda;
    }
    ClosestPoints {
        distance: (a_closest - b_closest).length(),
        a_closest,
        b_closest,
    }
}

fn orthogonal_directions(simplex: &[CsoPoint]) -> Vec<Vec3> {
    match simplex {
        [_] => vec![Vec3::X, -Vec3::X, Vec3::Y, -Vec3::Y, Vec3::Z, -Vec3::Z],
        [p0, p1] => {
            let ab = p1.point - p0.point;
            // cross with the axis least aligned with the segment
            let abs = ab.abs();
            let axis = if abs.x <= abs.y && abs.x <= abs.z {
                Vec3::X
            } else if abs.y <= abs.z {
                Vec3::Y
            } else {
                Vec3::Z
            };
            let u = ab.cross(axis).normalize_or_zero();
            let v = ab.cross(u).normalize_or_zero();
            vec![u, -u, v, -v]
        }
        [p0, p1, p2, ..] => {
            let normal = (p1.point - p0.point)
                .cross(p2.point - p0.point)
                .normalize_or_zero();
            vec![normal, -normal]
        }
        [] => Vec::new(),
    }
}

/// Narrow phase test of two transformed point sets with the default solver
/// configuration. Separated, touching and unresolved pairs all give `None`.
pub fn test_intersection(
    a: &[Vec3],
    a_transform: &Transform,
    b: &[Vec3],
    b_transform: &Transform,
) -> Option<Manifold> {
    let solver = GjkSolver::new(&SolverConfig::default());
    let result = TransformedPoints::new(a, a_transform).and_then(|a| {
        let b = TransformedPoints::new(b, b_transform)?;
        solver.intersect(&a, &b)
    });
    match result {
        Ok(Intersection::Penetrating(manifold)) => Some(manifold),
        Ok(Intersection::Separated(_)) => None,
        Ok(Intersection::Unresolved { solver, iterations }) => {
            log::warn!(
                "{} gave up after {} iterations, treating as no collision",
                solver,
                iterations
            );
            None
        }
        Err(err) => {
            log::warn!("narrow phase failed: {}", err);
            None
        }
    }
}
