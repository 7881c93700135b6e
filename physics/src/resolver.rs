use crate::{
    body::{Object, ObjectArena},
    broadphase::{broadphase, CollisionPair},
    config::PhysicsConfig,
    error::{PhysicsError, Result},
    gjk::{GjkSolver, Intersection},
    manifold::Manifold,
};
use glam::Vec3;

/// What happened during one call to [`step_rigid_bodies`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Pairs that survived the broad phase.
    pub pairs_tested: usize,
    /// Penetrating pairs that were pushed apart.
    pub contacts: usize,
    /// Narrow phase calls that gave up or failed, treated as no collision.
    pub unresolved: usize,
}

/// Advances every rigid body by `delta_seconds` and resolves the resulting
/// penetrations one pair at a time.
pub fn step_rigid_bodies(
    objects: &mut ObjectArena,
    delta_seconds: f32,
    gravity: Vec3,
    config: &PhysicsConfig,
) -> StepReport {
    for object in objects.iter_mut() {
        let Object {
            transform,
            rigid_body,
            ..
        } = object;
        if let Some(body) = rigid_body {
            body.apply_gravity(gravity, delta_seconds);
            body.integrate(transform, delta_seconds);
        }
    }

    let collision_pairs = broadphase(objects);
    let solver = GjkSolver::new(&config.solver);
    let mut report = StepReport::default();

    for pair in collision_pairs {
        report.pairs_tested += 1;
        match narrow_phase(&solver, objects, pair) {
            Ok(Intersection::Penetrating(manifold)) => {
                resolve_contact(objects, pair, &manifold, config.restitution);
                report.contacts += 1;
            }
            Ok(Intersection::Separated(_)) => {}
            Ok(Intersection::Unresolved { solver, iterations }) => {
                log::warn!(
                    "{} gave up on objects {} and {} after {} iterations",
                    solver,
                    pair.a.0,
                    pair.b.0,
                    iterations
                );
                report.unresolved += 1;
            }
            Err(err) => {
                log::warn!(
                    "skipping objects {} and {} this step: {}",
                    pair.a.0,
                    pair.b.0,
                    err
                );
                report.unresolved += 1;
            }
        }
    }

    log::trace!("{:?}", report);
    report
}

fn narrow_phase(
    solver: &GjkSolver,
    objects: &ObjectArena,
    pair: CollisionPair,
) -> Result<Intersection> {
    let (a, b) = match (objects.get(pair.a), objects.get(pair.b)) {
        (Some(a), Some(b)) => (a, b),
        _ => return Err(PhysicsError::InvalidInput("stale object handle".into())),
    };
    let support_a = a.collider.support_map(&a.transform)?;
    let support_b = b.collider.support_map(&b.transform)?;
    solver.intersect(&support_a, &support_b)
}

/// Pushes the pair apart along the separation, split by inverse mass, then
/// applies a normal impulse if the contact points are still approaching.
fn resolve_contact(
    objects: &mut ObjectArena,
    pair: CollisionPair,
    manifold: &Manifold,
    restitution: f32,
) {
    let (a, b) = match objects.get_pair_mut(pair.a, pair.b) {
        Some(pair) => pair,
        None => return,
    };

    let inv_mass_a = a.inverse_mass();
    let inv_mass_b = b.inverse_mass();
    let inv_mass_sum = inv_mass_a + inv_mass_b;

    let separation = manifold.separation;
    let (move_a, move_b) = if inv_mass_sum > 0.0 {
        (
            -separation * (inv_mass_a / inv_mass_sum),
            separation * (inv_mass_b / inv_mass_sum),
        )
    } else {
        (-separation, Vec3::ZERO)
    };
    a.transform.position += move_a;
    b.transform.position += move_b;

    let contact = manifold.a_contact + move_a;
    let normal = manifold.normal();

    let (vel_a, omega_a, k_a, u_a) = match &a.rigid_body {
        Some(body) => {
            let r = contact - a.transform.position;
            let k = r.cross(normal);
            let inv_inertia = body.inverse_inertia_world(&a.transform);
            (
                body.linear_velocity(),
                inv_inertia * body.angular_momentum,
                k,
                inv_inertia * k,
            )
        }
        None => (Vec3::ZERO, Vec3::ZERO, Vec3::ZERO, Vec3::ZERO),
    };
    let (vel_b, omega_b, k_b, u_b) = match &b.rigid_body {
        Some(body) => {
            let r = contact - b.transform.position;
            let k = r.cross(normal);
            let inv_inertia = body.inverse_inertia_world(&b.transform);
            (
                body.linear_velocity(),
                inv_inertia * body.angular_momentum,
                k,
                inv_inertia * k,
            )
        }
        None => (Vec3::ZERO, Vec3::ZERO, Vec3::ZERO, Vec3::ZERO),
    };

    // n . (v + w x r) == n . v + w . (r x n)
    let approach = normal.dot(vel_a - vel_b) + omega_a.dot(k_a) - omega_b.dot(k_b);
    if approach <= 0.0 {
        return;
    }

    let denominator = inv_mass_a + inv_mass_b + k_a.dot(u_a) + k_b.dot(u_b);
    if denominator <= 0.0 {
        return;
    }
    let j = -(1.0 + restitution) * approach / denominator;

    if let Some(body) = a.rigid_body.as_mut() {
        body.apply_impulse(normal * j, k_a * j);
    }
    if let Some(body) = b.rigid_body.as_mut() {
        body.apply_impulse(-normal * j, -k_b * j);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        shapes::{block_points, uv_sphere_points},
        transform::Transform,
    };
    use approx::assert_abs_diff_eq;

    fn ground(objects: &mut ObjectArena) {
        // top face at y = 0
        objects
            .add_static(
                &block_points(20.0, 1.0, 20.0),
                Transform::from_position(Vec3::new(0.0, -0.5, 0.0)),
            )
            .unwrap();
    }

    #[test]
    fn test_sphere_comes_to_rest() {
        let config = PhysicsConfig::default();
        let mut objects = ObjectArena::new();
        ground(&mut objects);
        let ball = objects
            .add_rigid_body(
                &uv_sphere_points(0.5, 16, 8),
                Transform::from_position(Vec3::new(0.0, 2.0, 0.0)),
                1.0,
            )
            .unwrap();

        let dt = 1.0 / 60.0;
        let mut contacts = 0;
        for _ in 0..240 {
            let report = step_rigid_bodies(&mut objects, dt, config.gravity, &config);
            assert_eq!(report.unresolved, 0);
            contacts += report.contacts;
        }
        assert!(contacts > 0);

        let object = objects.get(ball).unwrap();
        let body = object.rigid_body.as_ref().unwrap();
        // one step of gravity is the most the ball can sink before correction
        assert!(object.transform.position.y > 0.5 - 0.01);
        assert!(object.transform.position.y < 0.5 + 0.01);
        assert!(body.linear_velocity().y.abs() < 0.2);
    }

    #[test]
    fn test_static_objects_do_not_move() {
        let config = PhysicsConfig::default();
        let mut objects = ObjectArena::new();
        ground(&mut objects);
        objects
            .add_rigid_body(
                &block_points(1.0, 1.0, 1.0),
                Transform::from_position(Vec3::new(0.0, 0.45, 0.0)),
                2.0,
            )
            .unwrap();
        for _ in 0..10 {
            step_rigid_bodies(&mut objects, 1.0 / 60.0, config.gravity, &config);
        }
        let (_, slab) = objects.iter().next().unwrap();
        assert_eq!(slab.transform.position, Vec3::new(0.0, -0.5, 0.0));
    }

    #[test]
    fn test_elastic_collision_conserves_momentum_and_energy() {
        let config = PhysicsConfig {
            restitution: 1.0,
            ..Default::default()
        };
        let cube = block_points(1.0, 1.0, 1.0);
        let mut objects = ObjectArena::new();
        let left = objects
            .add_rigid_body(&cube, Transform::from_position(Vec3::new(-0.55, 0.0, 0.0)), 1.0)
            .unwrap();
        let right = objects
            .add_rigid_body(&cube, Transform::from_position(Vec3::new(0.55, 0.0, 0.0)), 1.0)
            .unwrap();
        for (handle, momentum) in [(left, Vec3::X * 6.0), (right, -Vec3::X * 6.0)] {
            let body = objects.get_mut(handle).unwrap().rigid_body.as_mut().unwrap();
            body.linear_momentum = momentum;
        }

        let report = step_rigid_bodies(&mut objects, 1.0 / 60.0, Vec3::ZERO, &config);
        assert_eq!(report.contacts, 1);

        let mut linear = Vec3::ZERO;
        let mut angular = Vec3::ZERO;
        let mut energy = 0.0;
        for handle in [left, right] {
            let object = objects.get(handle).unwrap();
            let body = object.rigid_body.as_ref().unwrap();
            linear += body.linear_momentum;
            angular += body.angular_momentum;
            energy += 0.5 * body.linear_momentum.length_squared() * body.inverse_mass
                + 0.5 * body.angular_velocity(&object.transform).dot(body.angular_momentum);
        }
        assert!(linear.abs_diff_eq(Vec3::ZERO, 1e-4));
        assert!(angular.abs_diff_eq(Vec3::ZERO, 1e-4));
        assert_abs_diff_eq!(energy, 36.0, epsilon = 1e-2);

        let gap = objects.get(right).unwrap().transform.position.x
            - objects.get(left).unwrap().transform.position.x;
        assert!(gap >= 1.0 - 1e-4);
    }

    #[test]
    fn test_report_counts_unresolved() {
        let config = PhysicsConfig {
            solver: crate::config::SolverConfig {
                gjk_max_iterations: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        let mut objects = ObjectArena::new();
        ground(&mut objects);
        objects
            .add_rigid_body(
                &block_points(1.0, 1.0, 1.0),
                Transform::from_position(Vec3::new(0.0, 0.4, 0.0)),
                1.0,
            )
            .unwrap();
        let report = step_rigid_bodies(&mut objects, 1.0 / 60.0, Vec3::ZERO, &config);
        assert_eq!(
            report,
            StepReport {
                pairs_tested: 1,
                contacts: 0,
                unresolved: 1
            }
        );
    }
}
