//! Vector operations used by the camera and the projector
use nalgebra::{Point2, Vector3};

/// Below this length a vector is treated as having no direction.
pub(crate) const EPS: f64 = 1e-9;

/// Rotate `v` about `axis` by `angle` radians, right-hand rule.
///
/// Rodrigues' formula: `v' = v cos + (a x v) sin + a (v . a)(1 - cos)`.
/// The axis is normalized before use; a zero axis leaves `v` unchanged.
pub fn rotate_about_axis(v: Vector3<f64>, axis: Vector3<f64>, angle: f64) -> Vector3<f64> {
    let norm = axis.norm();
    if norm < EPS {
        return v;
    }
    let a = axis / norm;
    let (sin, cos) = angle.sin_cos();
    v * cos + a.cross(&v) * sin + a * v.dot(&a) * (1.0 - cos)
}

/// Drop the component of `p` along `normal`, projecting it onto the plane
/// through the origin with that normal.
pub fn project_to_plane(p: Vector3<f64>, normal: Vector3<f64>) -> Vector3<f64> {
    let norm = normal.norm();
    if norm < EPS {
        return p;
    }
    let n = normal / norm;
    p - n * p.dot(&n)
}

/// Express an in-plane vector in the 2D coordinates of the plane's basis.
pub fn plane_coordinates(
    p: Vector3<f64>,
    basis_x: Vector3<f64>,
    basis_y: Vector3<f64>,
) -> Point2<f64> {
    Point2::new(p.dot(&basis_x), p.dot(&basis_y))
}

/// Gram-Schmidt step: remove from `v` its component along the unit vector
/// `fixed` and normalize the remainder.
pub fn orthonormalize_against(v: Vector3<f64>, fixed: Vector3<f64>) -> Vector3<f64> {
    let rejected = v - fixed * v.dot(&fixed);
    let norm = rejected.norm();
    if norm < EPS {
        // v lies along the fixed axis; there is no perpendicular part left.
        return v;
    }
    rejected / norm
}
