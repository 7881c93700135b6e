use glam::Vec3;

/// Result of a penetrating narrow phase test.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Manifold {
    /// Nearest point of the Minkowski difference (A - B) boundary to the
    /// origin. Moving A by `-separation` ends the overlap.
    pub separation: Vec3,
    /// Deepest point of A in world space.
    pub a_contact: Vec3,
    /// Deepest point of B in world space.
    pub b_contact: Vec3,
}

impl Manifold {
    pub fn depth(&self) -> f32 {
        self.separation.length()
    }

    /// Unit direction of `separation`, zero for a degenerate manifold.
    pub fn normal(&self) -> Vec3 {
        self.separation.normalize_or_zero()
    }
}

/// Closest features of two disjoint (or touching) shapes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ClosestPoints {
    pub distance: f32,
    pub a_closest: Vec3,
    pub b_closest: Vec3,
}
