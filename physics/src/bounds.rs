use crate::transform::Transform;
use glam::Vec3;
use std::ops::{Add, AddAssign};

/// Axis aligned bounding box.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds {
    pub mins: Vec3,
    pub maxs: Vec3,
}

impl Bounds {
    /// An empty box that any point expands.
    pub fn new() -> Bounds {
        Bounds {
            mins: Vec3::splat(f32::MAX),
            maxs: Vec3::splat(-f32::MAX),
        }
    }

    pub fn from_points(pts: &[Vec3]) -> Self {
        pts.iter().fold(Bounds::new(), |acc, pt| acc + *pt)
    }

    /// A cube of half-width `half` around `centre`.
    pub fn from_centre_half_extent(centre: Vec3, half: f32) -> Self {
        Bounds {
            mins: centre - Vec3::splat(half),
            maxs: centre + Vec3::splat(half),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.maxs.cmplt(self.mins).any()
    }

    pub fn intersects(&self, rhs: &Self) -> bool {
        !(self.maxs.cmplt(rhs.mins).any() || rhs.maxs.cmplt(self.mins).any())
    }

    pub fn expand_by_point(&mut self, pt: Vec3) {
        self.add_assign(pt);
    }

    pub fn width(&self) -> Vec3 {
        self.maxs - self.mins
    }

    pub fn min_extent(&self) -> f32 {
        self.width().min_element()
    }

    pub fn corners(&self) -> [Vec3; 8] {
        let (lo, hi) = (self.mins, self.maxs);
        [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(lo.x, hi.y, hi.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(hi.x, hi.y, hi.z),
        ]
    }

    /// World space box enclosing this local box after `transform`.
    pub fn transformed(&self, transform: &Transform) -> Self {
        self.corners()
            .iter()
            .fold(Bounds::new(), |acc, pt| acc + transform.to_world(*pt))
    }
}

impl Default for Bounds {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Add<Vec3> for Bounds {
    type Output = Self;
    fn add(mut self, pt: Vec3) -> Self::Output {
        self += pt;
        self
    }
}

impl AddAssign<Vec3> for Bounds {
    fn add_assign(&mut self, pt: Vec3) {
        self.mins = Vec3::select(pt.cmplt(self.mins), pt, self.mins);
        self.maxs = Vec3::select(pt.cmpgt(self.maxs), pt, self.maxs);
    }
}
