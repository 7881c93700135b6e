use glam::{Mat3, Mat4, Vec3};

pub trait Mat4Ext {
    fn minor(&self, i: usize, j: usize) -> Mat3;
    fn cofactor(&self, i: usize, j: usize) -> f32;
}

impl Mat4Ext for Mat4 {
    fn minor(&self, i: usize, j: usize) -> Mat3 {
        let mut minor = Mat3::ZERO;
        let mut yy = 0;
        for y in 0..4 {
            if y == j {
                continue;
            }

            let mut xx = 0;
            for x in 0..4 {
                if x == i {
                    continue;
                }

                minor.col_mut(xx)[yy] = self.col(x)[y];
                xx += 1;
            }

            yy += 1;
        }
        minor
    }

    fn cofactor(&self, i: usize, j: usize) -> f32 {
        let minor = self.minor(i, j);
        i32::pow(-1, (i + 1 + j + 1) as u32) as f32 * minor.determinant()
    }
}

pub trait Mat3Ext: Sized {
    /// Cross product matrix, `skew(v) * x == v.cross(x)`.
    fn skew(v: Vec3) -> Self;
    /// Gram-Schmidt re-orthonormalization of the columns.
    fn orthonormalize(&self) -> Self;
    /// Inverse by Cramer's rule, `None` when the determinant is zero.
    fn try_inverse(&self) -> Option<Self>;
}

impl Mat3Ext for Mat3 {
    fn skew(v: Vec3) -> Self {
        Mat3::from_cols(
            Vec3::new(0.0, v.z, -v.y),
            Vec3::new(-v.z, 0.0, v.x),
            Vec3::new(v.y, -v.x, 0.0),
        )
    }

    fn orthonormalize(&self) -> Self {
        let x = self.x_axis.normalize_or_zero();
        let y = (self.y_axis - x * x.dot(self.y_axis)).normalize_or_zero();
        let z = x.cross(y);
        Mat3::from_cols(x, y, z)
    }

    fn try_inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }

        // rows of the inverse are the cross products of the other two columns
        let adjugate = Mat3::from_cols(
            self.y_axis.cross(self.z_axis),
            self.z_axis.cross(self.x_axis),
            self.x_axis.cross(self.y_axis),
        )
        .transpose();
        Some(adjugate * det.recip())
    }
}
