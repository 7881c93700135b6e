use glam::{Mat3, Vec3};
use serde::{Deserialize, Serialize};

/// Placement of a collider in the world.
///
/// Local points are first re-centred on `center`, then uniformly scaled,
/// rotated and moved to `position`. Rigid bodies keep `center` at their
/// center of mass so `position` tracks the world center of mass.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    /// Orthonormal rotation matrix.
    pub rotation: Mat3,
    pub scale: f32,
    pub center: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Mat3::IDENTITY,
        scale: 1.0,
        center: Vec3::ZERO,
    };

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    pub fn with_rotation(mut self, rotation: Mat3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    #[inline]
    pub fn to_world(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation * ((local - self.center) * self.scale)
    }

    #[inline]
    pub fn to_local(&self, world: Vec3) -> Vec3 {
        self.rotation.transpose() * (world - self.position) / self.scale + self.center
    }

    pub fn is_valid(&self) -> bool {
        self.scale > 0.0
            && self.scale.is_finite()
            && self.position.is_finite()
            && self.center.is_finite()
            && self.rotation.is_finite()
    }
}
