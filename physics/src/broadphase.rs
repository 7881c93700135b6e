use crate::body::{ObjectArena, ObjectHandle};

/// Two objects worth handing to the narrow phase. `a` always has a rigid
/// body.
#[derive(Copy, Clone, Debug)]
pub struct CollisionPair {
    pub a: ObjectHandle,
    pub b: ObjectHandle,
}

impl PartialEq for CollisionPair {
    fn eq(&self, other: &Self) -> bool {
        (self.a == other.a && self.b == other.b) || (self.a == other.b && self.b == other.a)
    }
}

impl Eq for CollisionPair {}

/// Pairs each rigid body with every other object whose bounds it touches.
/// Two rigid bodies are paired once, lower handle first.
pub fn broadphase(objects: &ObjectArena) -> Vec<CollisionPair> {
    let mut collision_pairs = Vec::new();

    for (handle_a, a) in objects.iter() {
        if !a.is_dynamic() {
            continue;
        }

        for (handle_b, b) in objects.iter() {
            if handle_b == handle_a || (b.is_dynamic() && handle_b < handle_a) {
                continue;
            }
            if a
                .collider
                .bounding_test(&a.transform, &b.collider, &b.transform)
            {
                collision_pairs.push(CollisionPair {
                    a: handle_a,
                    b: handle_b,
                });
            }
        }
    }

    collision_pairs
}
