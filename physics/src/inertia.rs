use crate::{
    error::{PhysicsError, Result},
    math::Mat3Ext,
    mesh::PolyhedronMesh,
};
use glam::{Mat3, Vec3};

/// Voxel spacing as a fraction of the smallest bounding box extent.
const VOXEL_FRACTION: f32 = 0.05;
/// Axes that would need more samples than this get a coarser spacing.
const MAX_SAMPLES_PER_AXIS: usize = 128;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MassProperties {
    pub center_of_mass: Vec3,
    /// Inertia tensor about the center of mass in the local frame.
    pub inertia_tensor: Mat3,
    pub inverse_inertia_tensor: Mat3,
}

/// Mass properties of a solid convex polyhedron of uniform density.
///
/// The inertia tensor is integrated numerically by sampling a voxel grid over
/// the mesh bounds, so expect errors of a few percent.
pub fn compute_inertia(mesh: &PolyhedronMesh, mass: f32) -> Result<MassProperties> {
    if !(mass >= 0.0 && mass.is_finite()) {
        return Err(PhysicsError::InvalidInput(format!("mass {} is not usable", mass)));
    }

    let center_of_mass = mesh.center_of_mass().ok_or_else(|| {
        PhysicsError::InvalidInput("polyhedron encloses no volume".into())
    })?;

    if mass == 0.0 {
        return Ok(MassProperties {
            center_of_mass,
            inertia_tensor: Mat3::ZERO,
            inverse_inertia_tensor: Mat3::ZERO,
        });
    }

    let bounds = mesh.bounds();
    let min_extent = bounds.min_extent();
    if !(min_extent > 0.0) {
        return Err(PhysicsError::InvalidInput(
            "polyhedron has zero extent along an axis".into(),
        ));
    }

    let d = VOXEL_FRACTION * min_extent;
    // the slack keeps the last sample when the extent is a whole number of steps
    let axis_samples = |extent: f32| match ((extent / d + 1e-3).floor() as usize).checked_add(1) {
        Some(n) if n <= MAX_SAMPLES_PER_AXIS => (n, d),
        _ => (
            MAX_SAMPLES_PER_AXIS,
            extent / (MAX_SAMPLES_PER_AXIS - 1) as f32,
        ),
    };
    let extents = bounds.maxs - bounds.mins;
    let (nx, dx) = axis_samples(extents.x);
    let (ny, dy) = axis_samples(extents.y);
    let (nz, dz) = axis_samples(extents.z);
    if [nx, ny, nz].contains(&MAX_SAMPLES_PER_AXIS) {
        log::warn!(
            "polyhedron extents {} are lopsided, inertia sampled on a coarser {}x{}x{} grid",
            extents,
            nx,
            ny,
            nz
        );
    }
    let step = Vec3::new(dx, dy, dz);
    let voxel = dx * dy * dz;

    let mut volume = 0.0;
    let (mut xx, mut yy, mut zz) = (0.0, 0.0, 0.0);
    let (mut xy, mut xz, mut yz) = (0.0, 0.0, 0.0);
    for i in 0..nx {
        for j in 0..ny {
            for k in 0..nz {
                let sample = bounds.mins + Vec3::new(i as f32, j as f32, k as f32) * step;
                if !mesh.contains_point(sample) {
                    continue;
                }
                let r = sample - center_of_mass;
                volume += voxel;
                xx += r.x * r.x * voxel;
                yy += r.y * r.y * voxel;
                zz += r.z * r.z * voxel;
                xy += r.x * r.y * voxel;
                xz += r.x * r.z * voxel;
                yz += r.y * r.z * voxel;
            }
        }
    }
    if volume == 0.0 {
        return Err(PhysicsError::InvalidInput(
            "no voxel sample fell inside the polyhedron".into(),
        ));
    }

    let inertia_tensor = Mat3::from_cols(
        Vec3::new(yy + zz, -xy, -xz),
        Vec3::new(-xy, xx + zz, -yz),
        Vec3::new(-xz, -yz, xx + yy),
    ) * (mass / volume);
    let inverse_inertia_tensor = inertia_tensor
        .try_inverse()
        .ok_or_else(|| PhysicsError::InvalidInput("singular inertia tensor".into()))?;

    log::debug!(
        "inertia from {} voxels, sampled volume {}",
        nx * ny * nz,
        volume
    );
    Ok(MassProperties {
        center_of_mass,
        inertia_tensor,
        inverse_inertia_tensor,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::hull::{build_convex_hull, make_block};
    use approx::assert_relative_eq;

    #[test]
    fn test_unit_cube() {
        let props = compute_inertia(&make_block(1.0, 1.0, 1.0), 1.0).unwrap();
        assert!(props.center_of_mass.abs_diff_eq(Vec3::ZERO, 1e-5));
        let diagonal = props.inertia_tensor.to_cols_array();
        for i in [0, 4, 8] {
            assert_relative_eq!(diagonal[i], 1.0 / 6.0, max_relative = 0.15);
        }
        for i in [1, 2, 3, 5, 6, 7] {
            assert!(diagonal[i].abs() < 5e-3);
        }
        let identity = props.inertia_tensor * props.inverse_inertia_tensor;
        assert!(identity.abs_diff_eq(Mat3::IDENTITY, 1e-4));
    }

    #[test]
    fn test_box_proportions() {
        // solid box: I_xx = m (h^2 + d^2) / 12
        let props = compute_inertia(&make_block(2.0, 1.0, 4.0), 3.0).unwrap();
        let m = props.inertia_tensor;
        assert_relative_eq!(m.x_axis.x, 3.0 * (1.0 + 16.0) / 12.0, max_relative = 0.15);
        assert_relative_eq!(m.y_axis.y, 3.0 * (4.0 + 16.0) / 12.0, max_relative = 0.15);
        assert_relative_eq!(m.z_axis.z, 3.0 * (4.0 + 1.0) / 12.0, max_relative = 0.15);
    }

    #[test]
    fn test_thin_slab_sampling_is_capped() {
        // uncapped spacing would need 20001 samples along x and y
        let props = compute_inertia(&make_block(10.0, 10.0, 0.01), 2.0).unwrap();
        let m = props.inertia_tensor;
        assert_relative_eq!(m.x_axis.x, 2.0 * 100.0 / 12.0, max_relative = 0.15);
        assert_relative_eq!(m.y_axis.y, 2.0 * 100.0 / 12.0, max_relative = 0.15);
        assert_relative_eq!(m.z_axis.z, 2.0 * 200.0 / 12.0, max_relative = 0.15);
    }

    #[test]
    fn test_zero_mass() {
        let props = compute_inertia(&make_block(1.0, 2.0, 1.0), 0.0).unwrap();
        assert_eq!(props.inertia_tensor, Mat3::ZERO);
        assert_eq!(props.inverse_inertia_tensor, Mat3::ZERO);
    }

    #[test]
    fn test_degenerate_meshes_rejected() {
        let flat = build_convex_hull(&[Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::new(1.0, 1.0, 0.0)]);
        assert!(matches!(
            compute_inertia(&flat, 1.0),
            Err(PhysicsError::InvalidInput(_))
        ));
        assert!(compute_inertia(&PolyhedronMesh::new(), 1.0).is_err());
        assert!(compute_inertia(&make_block(1.0, 1.0, 1.0), -1.0).is_err());
    }
}
