use crate::{
    collider::Collider,
    error::Result,
    hull::build_convex_hull,
    inertia::{compute_inertia, MassProperties},
    math::Mat3Ext,
    transform::Transform,
};
use glam::{Mat3, Vec3};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectHandle(pub u32);

impl ObjectHandle {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Dynamic state of a simulated object. Momenta are stored in world space,
/// the inertia tensors in the body's local frame.
#[derive(Clone, Debug)]
pub struct RigidBody {
    pub linear_momentum: Vec3,
    pub angular_momentum: Vec3,
    pub mass: f32,
    pub inverse_mass: f32,
    pub center_of_mass: Vec3,
    pub inertia_tensor: Mat3,
    pub inverse_inertia_tensor: Mat3,
}

impl RigidBody {
    pub fn new(mass: f32, props: &MassProperties) -> Self {
        Self {
            linear_momentum: Vec3::ZERO,
            angular_momentum: Vec3::ZERO,
            mass,
            inverse_mass: if mass > 0.0 { mass.recip() } else { 0.0 },
            center_of_mass: props.center_of_mass,
            inertia_tensor: props.inertia_tensor,
            inverse_inertia_tensor: props.inverse_inertia_tensor,
        }
    }

    pub fn linear_velocity(&self) -> Vec3 {
        self.linear_momentum * self.inverse_mass
    }

    /// `R I^-1 R^T`, divided by `scale^2` since scaling the body by `s`
    /// scales its inertia by `s^2`.
    pub fn inverse_inertia_world(&self, transform: &Transform) -> Mat3 {
        let rotation = transform.rotation;
        rotation * self.inverse_inertia_tensor * rotation.transpose()
            * (transform.scale * transform.scale).recip()
    }

    pub fn angular_velocity(&self, transform: &Transform) -> Vec3 {
        self.inverse_inertia_world(transform) * self.angular_momentum
    }

    /// Velocity of the material point at `point` (world space).
    pub fn point_velocity(&self, transform: &Transform, point: Vec3) -> Vec3 {
        self.linear_velocity() + self.angular_velocity(transform).cross(point - transform.position)
    }

    pub fn apply_gravity(&mut self, gravity: Vec3, delta_seconds: f32) {
        self.linear_momentum += gravity * self.mass * delta_seconds;
    }

    /// Linear and angular impulse, both in world space.
    pub fn apply_impulse(&mut self, linear: Vec3, angular: Vec3) {
        self.linear_momentum += linear;
        self.angular_momentum += angular;
    }

    /// Advances the transform by one explicit Euler step.
    pub fn integrate(&self, transform: &mut Transform, delta_seconds: f32) {
        transform.position += self.linear_velocity() * delta_seconds;

        let omega = self.angular_velocity(transform);
        let rotation = transform.rotation + Mat3::skew(omega * delta_seconds) * transform.rotation;
        transform.rotation = rotation.orthonormalize();
    }
}

/// An entry of the registry: where it is, what it collides as and, for
/// simulated objects, its dynamic state.
#[derive(Clone, Debug)]
pub struct Object {
    pub transform: Transform,
    pub collider: Collider,
    pub rigid_body: Option<RigidBody>,
}

impl Object {
    /// Objects without a rigid body never move.
    pub fn inverse_mass(&self) -> f32 {
        self.rigid_body
            .as_ref()
            .map_or(0.0, |body| body.inverse_mass)
    }

    pub fn is_dynamic(&self) -> bool {
        self.rigid_body.is_some()
    }
}

#[derive(Clone, Debug, Default)]
pub struct ObjectArena {
    objects: Vec<Object>,
}

impl ObjectArena {
    pub fn new() -> Self {
        ObjectArena {
            objects: Vec::new(),
        }
    }

    pub fn add(&mut self, object: Object) -> ObjectHandle {
        let handle = ObjectHandle(self.objects.len() as u32);
        self.objects.push(object);
        handle
    }

    /// Adds an immovable object whose collider is the hull of `points`.
    pub fn add_static(&mut self, points: &[Vec3], transform: Transform) -> Result<ObjectHandle> {
        let hull = build_convex_hull(points);
        let collider = Collider::from_mesh(&hull, false)?;
        Ok(self.add(Object {
            transform,
            collider,
            rigid_body: None,
        }))
    }

    /// Adds a simulated object whose collider is the hull of `points`.
    ///
    /// The transform's center is moved to the center of mass and its position
    /// compensated, so the object keeps its world placement.
    pub fn add_rigid_body(
        &mut self,
        points: &[Vec3],
        mut transform: Transform,
        mass: f32,
    ) -> Result<ObjectHandle> {
        let hull = build_convex_hull(points);
        let props = compute_inertia(&hull, mass)?;
        let collider = Collider::from_mesh(&hull, true)?;

        let shift = props.center_of_mass - transform.center;
        transform.position += transform.rotation * (shift * transform.scale);
        transform.center = props.center_of_mass;

        Ok(self.add(Object {
            transform,
            collider,
            rigid_body: Some(RigidBody::new(mass, &props)),
        }))
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectHandle, &Object)> + '_ {
        self.objects
            .iter()
            .enumerate()
            .map(|(i, object)| (ObjectHandle(i as u32), object))
    }

    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, Object> {
        self.objects.iter_mut()
    }

    pub fn clear(&mut self) {
        self.objects.clear();
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn get(&self, handle: ObjectHandle) -> Option<&Object> {
        self.objects.get(handle.index())
    }

    pub fn get_mut(&mut self, handle: ObjectHandle) -> Option<&mut Object> {
        self.objects.get_mut(handle.index())
    }

    /// Mutable access to two distinct objects, `None` if either handle is
    /// out of range or both are the same.
    pub fn get_pair_mut(
        &mut self,
        a: ObjectHandle,
        b: ObjectHandle,
    ) -> Option<(&mut Object, &mut Object)> {
        let (index_a, index_b) = (a.index(), b.index());
        match index_a.cmp(&index_b) {
            std::cmp::Ordering::Less => {
                let mut iter = self.objects.iter_mut();
                let object_a = iter.nth(index_a)?;
                let object_b = iter.nth(index_b - index_a - 1)?;
                Some((object_a, object_b))
            }
            std::cmp::Ordering::Greater => {
                let mut iter = self.objects.iter_mut();
                let object_b = iter.nth(index_b)?;
                let object_a = iter.nth(index_a - index_b - 1)?;
                Some((object_a, object_b))
            }
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn log_bodies(&self, step_num: u64) {
        for (handle, object) in self.iter() {
            if let Some(body) = &object.rigid_body {
                log::info!(
                    "step: {} object: {} pos: {} lin: {} ang: {}",
                    step_num,
                    handle.0,
                    object.transform.position,
                    body.linear_velocity(),
                    body.angular_velocity(&object.transform)
                );
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shapes::block_points;
    use approx::assert_abs_diff_eq;

    fn offset_block() -> Vec<Vec3> {
        block_points(1.0, 1.0, 1.0)
            .iter()
            .map(|p| *p + Vec3::new(2.0, 0.0, 0.0))
            .collect()
    }

    #[test]
    fn test_rigid_body_keeps_world_placement() {
        let mut objects = ObjectArena::new();
        let transform = Transform::from_position(Vec3::new(0.0, 5.0, 0.0)).with_scale(2.0);
        let handle = objects.add_rigid_body(&offset_block(), transform, 2.0).unwrap();
        let object = objects.get(handle).unwrap();
        assert!(object.transform.center.abs_diff_eq(Vec3::new(2.0, 0.0, 0.0), 1e-4));
        assert!(object
            .transform
            .position
            .abs_diff_eq(Vec3::new(4.0, 5.0, 0.0), 1e-4));
        let corner = Vec3::new(2.5, 0.5, 0.5);
        assert!(object
            .transform
            .to_world(corner)
            .abs_diff_eq(transform.to_world(corner), 1e-4));
        assert_eq!(object.inverse_mass(), 0.5);
    }

    #[test]
    fn test_free_fall() {
        let mut objects = ObjectArena::new();
        let handle = objects
            .add_rigid_body(&block_points(1.0, 1.0, 1.0), Transform::IDENTITY, 3.0)
            .unwrap();
        let object = objects.get_mut(handle).unwrap();
        let body = object.rigid_body.as_mut().unwrap();
        let dt = 0.1;
        for _ in 0..10 {
            body.apply_gravity(Vec3::new(0.0, -10.0, 0.0), dt);
            body.integrate(&mut object.transform, dt);
        }
        // semi-implicit Euler: sum of k * g * dt^2 for k = 1..=10
        assert_abs_diff_eq!(object.transform.position.y, -5.5, epsilon = 1e-4);
        assert_abs_diff_eq!(body.linear_velocity().y, -10.0, epsilon = 1e-4);
    }

    #[test]
    fn test_spin_keeps_rotation_orthonormal() {
        let mut objects = ObjectArena::new();
        let handle = objects
            .add_rigid_body(&block_points(1.0, 2.0, 0.5), Transform::IDENTITY, 1.0)
            .unwrap();
        let object = objects.get_mut(handle).unwrap();
        let body = object.rigid_body.as_mut().unwrap();
        body.apply_impulse(Vec3::ZERO, Vec3::new(0.1, 0.3, -0.2));
        for _ in 0..200 {
            body.integrate(&mut object.transform, 1.0 / 60.0);
        }
        let r = object.transform.rotation;
        assert!((r * r.transpose()).abs_diff_eq(Mat3::IDENTITY, 1e-5));
        assert!(object.transform.position.abs_diff_eq(Vec3::ZERO, 1e-6));
    }

    #[test]
    fn test_point_velocity() {
        let mut objects = ObjectArena::new();
        let handle = objects
            .add_rigid_body(&block_points(1.0, 1.0, 1.0), Transform::IDENTITY, 1.0)
            .unwrap();
        let object = objects.get_mut(handle).unwrap();
        let body = object.rigid_body.as_mut().unwrap();
        body.apply_impulse(Vec3::X, Vec3::ZERO);
        let at_centre = body.point_velocity(&object.transform, Vec3::ZERO);
        assert!(at_centre.abs_diff_eq(Vec3::X, 1e-6));

        // spin about z, the +x side moves towards +y
        let spin = body.inertia_tensor * Vec3::Z;
        body.apply_impulse(-Vec3::X, spin);
        let edge = body.point_velocity(&object.transform, Vec3::new(0.5, 0.0, 0.0));
        assert!(edge.abs_diff_eq(Vec3::new(0.0, 0.5, 0.0), 1e-4));
    }

    #[test]
    fn test_scaled_inertia() {
        let mut objects = ObjectArena::new();
        let handle = objects
            .add_rigid_body(
                &block_points(1.0, 1.0, 1.0),
                Transform::IDENTITY.with_scale(2.0),
                1.0,
            )
            .unwrap();
        let object = objects.get(handle).unwrap();
        let body = object.rigid_body.as_ref().unwrap();
        let world = body.inverse_inertia_world(&object.transform);
        assert!((world * 4.0).abs_diff_eq(body.inverse_inertia_tensor, 1e-4));
    }

    #[test]
    fn test_pair_access() {
        let mut objects = ObjectArena::new();
        let a = objects
            .add_static(&block_points(1.0, 1.0, 1.0), Transform::IDENTITY)
            .unwrap();
        let b = objects
            .add_static(&block_points(2.0, 1.0, 1.0), Transform::IDENTITY)
            .unwrap();
        let (oa, ob) = objects.get_pair_mut(b, a).unwrap();
        assert_eq!(ob.collider.points().len(), 8);
        oa.transform.position = Vec3::X;
        assert_eq!(objects.get(b).unwrap().transform.position, Vec3::X);
        assert!(objects.get_pair_mut(a, a).is_none());
        assert!(objects.get_pair_mut(a, ObjectHandle(9)).is_none());
    }

    #[test]
    fn test_empty_static_rejected() {
        let mut objects = ObjectArena::new();
        assert!(objects.add_static(&[], Transform::IDENTITY).is_err());
    }
}
