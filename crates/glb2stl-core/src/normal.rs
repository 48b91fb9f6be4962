//! Per-face normal computation

use glam::Vec3;

/// Unit normal of the triangle `(v0, v1, v2)` by the right-hand rule.
///
/// Computed in double precision and narrowed to `f32` at the end.
/// Degenerate (zero-area) triangles yield the zero vector.
pub fn face_normal(v0: Vec3, v1: Vec3, v2: Vec3) -> Vec3 {
    let (v0, v1, v2) = (v0.as_dvec3(), v1.as_dvec3(), v2.as_dvec3());
    let normal = (v1 - v0).cross(v2 - v0);
    let length = normal.length();
    if length > 0.0 {
        (normal / length).as_vec3()
    } else {
        normal.as_vec3()
    }
}
