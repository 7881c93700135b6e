pub mod glam_ext;
pub mod simplex;

pub use glam_ext::{Mat3Ext, Mat4Ext};
pub use simplex::{
    closest_point_on_simplex, extreme_index, point_in_tetrahedron, tetrahedron_6_times_volume,
    triangle_barycentric,
};
