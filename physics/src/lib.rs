//! Convex polyhedron collision detection and a simple impulse based rigid
//! body resolver.
//!
//! Shapes are point sets in object space. [`build_convex_hull`] turns them
//! into a [`PolyhedronMesh`], [`test_intersection`] runs GJK and EPA on two
//! transformed point sets and [`step_rigid_bodies`] advances an
//! [`ObjectArena`] by one fixed step.

pub mod body;
pub mod bounds;
mod broadphase;
pub mod collider;
pub mod config;
mod epa;
pub mod error;
pub mod gjk;
pub mod hull;
pub mod inertia;
pub mod manifold;
pub mod math;
pub mod mesh;
pub mod resolver;
pub mod scene;
pub mod shapes;
pub mod transform;

pub use body::{Object, ObjectArena, ObjectHandle, RigidBody};
pub use collider::Collider;
pub use config::{PhysicsConfig, SolverConfig};
pub use error::PhysicsError;
pub use gjk::{test_intersection, GjkSolver, Intersection, SupportMap, TransformedPoints};
pub use hull::{build_convex_hull, make_block, minkowski_difference};
pub use inertia::{compute_inertia, MassProperties};
pub use manifold::{ClosestPoints, Manifold};
pub use mesh::PolyhedronMesh;
pub use resolver::{step_rigid_bodies, StepReport};
pub use scene::PhysicsScene;
pub use transform::Transform;
