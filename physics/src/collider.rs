use crate::{
    bounds::Bounds,
    error::{PhysicsError, Result},
    gjk::TransformedPoints,
    mesh::PolyhedronMesh,
    transform::Transform,
};
use glam::Vec3;
use std::sync::Arc;

/// Convex collision geometry: a local point set plus broad phase bounds.
///
/// The points are shared, cloning a collider does not copy them.
#[derive(Clone, Debug)]
pub struct Collider {
    points: Arc<[Vec3]>,
    bounding_radius: f32,
    local_bounds: Bounds,
    use_aabb: bool,
}

impl Collider {
    /// A collider over `points`, which are expected to be in convex position
    /// (hull vertices) but any point set works.
    ///
    /// Colliders that never rotate get their tight local box and opt into the
    /// AABB test. Rotating ones use the cube around the bounding sphere.
    pub fn new(points: Vec<Vec3>, can_rotate: bool) -> Result<Self> {
        if points.is_empty() {
            return Err(PhysicsError::InvalidInput("collider without points".into()));
        }
        if points.iter().any(|pt| !pt.is_finite()) {
            return Err(PhysicsError::InvalidInput("non-finite collider point".into()));
        }

        let bounding_radius = points
            .iter()
            .map(|pt| pt.length())
            .fold(0.0, f32::max);
        let local_bounds = if can_rotate {
            Bounds::from_centre_half_extent(Vec3::ZERO, bounding_radius)
        } else {
            Bounds::from_points(&points)
        };

        Ok(Self {
            points: points.into(),
            bounding_radius,
            local_bounds,
            use_aabb: !can_rotate,
        })
    }

    pub fn from_mesh(mesh: &PolyhedronMesh, can_rotate: bool) -> Result<Self> {
        Self::new(mesh.positions(), can_rotate)
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn bounding_radius(&self) -> f32 {
        self.bounding_radius
    }

    pub fn local_bounds(&self) -> &Bounds {
        &self.local_bounds
    }

    pub fn use_aabb(&self) -> bool {
        self.use_aabb
    }

    pub fn world_bounds(&self, transform: &Transform) -> Bounds {
        self.local_bounds.transformed(transform)
    }

    /// World space bounding sphere as centre and radius.
    pub fn bounding_sphere(&self, transform: &Transform) -> (Vec3, f32) {
        (
            transform.to_world(Vec3::ZERO),
            self.bounding_radius * transform.scale,
        )
    }

    /// Broad phase test. Always compares bounding spheres and also compares
    /// world boxes when either collider asks for it.
    pub fn bounding_test(
        &self,
        transform: &Transform,
        other: &Collider,
        other_transform: &Transform,
    ) -> bool {
        let (centre, radius) = self.bounding_sphere(transform);
        let (other_centre, other_radius) = other.bounding_sphere(other_transform);
        let reach = radius + other_radius;
        if centre.distance_squared(other_centre) > reach * reach {
            return false;
        }

        if self.use_aabb || other.use_aabb {
            return self
                .world_bounds(transform)
                .intersects(&other.world_bounds(other_transform));
        }
        true
    }

    pub fn support_map<'a>(&'a self, transform: &'a Transform) -> Result<TransformedPoints<'a>> {
        TransformedPoints::new(&self.points, transform)
    }
}
