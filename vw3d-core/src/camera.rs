//! Picture-plane camera and its motion operators
use crate::vector::{orthonormalize_against, rotate_about_axis, EPS};
use nalgebra::{Point3, Vector3};
use std::f64::consts::PI;

/// Orthonormal orientation of the picture plane.
///
/// `x` and `y` span the plane; `z` is its normal and points from the scene
/// toward the camera, opposite the view direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Basis {
    pub x: Vector3<f64>,
    pub y: Vector3<f64>,
    pub z: Vector3<f64>,
}

impl Default for Basis {
    fn default() -> Self {
        Self {
            x: Vector3::x(),
            y: Vector3::y(),
            z: Vector3::z(),
        }
    }
}

/// Logical width and height of the picture-plane window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extents {
    pub w: f64,
    pub h: f64,
}

impl Default for Extents {
    fn default() -> Self {
        Self { w: 10.0, h: 10.0 }
    }
}

/// Movable orthographic camera.
///
/// The basis triple stays orthonormal and right-handed through every
/// operator; each rotation is followed by a Gram-Schmidt pass against the
/// axis the rotation left untouched.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Point3<f64>,
    basis: Basis,
    extents: Extents,
    rotation: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera {
    /// Camera in the 2D drafting orientation: at the origin, looking down
    /// -z, with the world axes as its basis and a 10 x 10 window.
    pub fn new() -> Self {
        Self {
            position: Point3::origin(),
            basis: Basis::default(),
            extents: Extents::default(),
            rotation: 0.0,
        }
    }

    /// Restore the default configuration.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn position(&self) -> Point3<f64> {
        self.position
    }

    pub fn set_position(&mut self, position: Point3<f64>) {
        self.position = position;
    }

    /// Point one unit ahead of the camera along the view direction.
    pub fn target(&self) -> Point3<f64> {
        self.position + self.view_direction()
    }

    /// Reorient toward `target`. Equivalent to [`Camera::look_at`].
    pub fn set_target(&mut self, target: Point3<f64>) {
        self.look_at(target);
    }

    /// Unit view direction, into the scene (`-basis.z`).
    pub fn view_direction(&self) -> Vector3<f64> {
        -self.basis.z
    }

    pub fn extents(&self) -> Extents {
        self.extents
    }

    pub fn set_extents(&mut self, w: f64, h: f64) {
        self.extents = Extents { w, h };
    }

    /// Accumulated picture-plane roll in radians.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Translate by a world-space delta. The basis is untouched.
    pub fn move_by(&mut self, dx: f64, dy: f64, dz: f64) {
        self.position += Vector3::new(dx, dy, dz);
    }

    /// Translate within the picture plane: `dx` along `basis.x`, `dy`
    /// along `basis.y`.
    pub fn track(&mut self, dx: f64, dy: f64) {
        self.position += self.basis.x * dx + self.basis.y * dy;
    }

    /// Turn left or right: rotate `basis.x` and `basis.z` about `basis.y`.
    /// Positive angles look left.
    pub fn pan(&mut self, angle: f64, degrees: bool) {
        let theta = to_radians(angle, degrees);
        self.basis.x = rotate_about_axis(self.basis.x, self.basis.y, theta);
        self.basis.z = rotate_about_axis(self.basis.z, self.basis.y, theta);
        self.renormalize_about_y();
    }

    /// Turn up or down: rotate `basis.y` and `basis.z` about `basis.x`.
    /// Positive angles look up.
    pub fn tilt(&mut self, angle: f64, degrees: bool) {
        let theta = to_radians(angle, degrees);
        self.basis.y = rotate_about_axis(self.basis.y, self.basis.x, theta);
        self.basis.z = rotate_about_axis(self.basis.z, self.basis.x, theta);
        self.renormalize_about_x();
    }

    /// Roll the picture plane counterclockwise: rotate `basis.x` and
    /// `basis.y` about `basis.z`. Consecutive rolls accumulate in
    /// [`Camera::rotation`].
    pub fn rotate(&mut self, angle: f64, degrees: bool) {
        let theta = to_radians(angle, degrees);
        self.basis.x = rotate_about_axis(self.basis.x, self.basis.z, theta);
        self.basis.y = rotate_about_axis(self.basis.y, self.basis.z, theta);
        self.rotation += theta;
        self.renormalize_about_z();
    }

    /// Reorient the whole basis so the camera looks toward `target`.
    ///
    /// Two half-turns: the first about the bisector of the current and
    /// desired view directions (the only axis whose half-turn swaps them),
    /// the second about the new view axis to undo the roll the first one
    /// introduces. A target directly behind the camera has no bisector;
    /// the fallback is a half-turn about `basis.y`. A target at the camera
    /// position leaves the orientation unchanged.
    pub fn look_at(&mut self, target: Point3<f64>) {
        let to_target = target - self.position;
        if to_target.norm() < EPS {
            log::debug!("look_at target coincides with the camera; orientation unchanged");
            return;
        }
        let desired = to_target.normalize();
        let current = -self.basis.z;
        let bisector = current + desired;
        if bisector.norm() < EPS {
            log::debug!("look_at target is directly behind; turning about basis.y");
            self.basis.x = rotate_about_axis(self.basis.x, self.basis.y, PI);
            self.basis.z = rotate_about_axis(self.basis.z, self.basis.y, PI);
            self.renormalize_about_y();
            return;
        }
        let axis = bisector.normalize();
        self.basis.x = rotate_about_axis(self.basis.x, axis, PI);
        self.basis.y = rotate_about_axis(self.basis.y, axis, PI);
        self.basis.z = rotate_about_axis(self.basis.z, axis, PI);
        let roll_axis = self.basis.z;
        self.basis.x = rotate_about_axis(self.basis.x, roll_axis, PI);
        self.basis.y = rotate_about_axis(self.basis.y, roll_axis, PI);
        self.renormalize_about_z();
    }

    /// Current orientation triple, for the projector.
    pub fn stage(&self) -> Basis {
        self.basis
    }

    /// Position and picture-plane normal, for the projector.
    pub fn compile(&self) -> (Point3<f64>, Vector3<f64>) {
        (self.position, self.basis.z)
    }

    fn renormalize_about_x(&mut self) {
        self.basis.x = self.basis.x.normalize();
        self.basis.z = orthonormalize_against(self.basis.z, self.basis.x);
        self.basis.y = self.basis.z.cross(&self.basis.x);
    }

    fn renormalize_about_y(&mut self) {
        self.basis.y = self.basis.y.normalize();
        self.basis.z = orthonormalize_against(self.basis.z, self.basis.y);
        self.basis.x = self.basis.y.cross(&self.basis.z);
    }

    fn renormalize_about_z(&mut self) {
        self.basis.z = self.basis.z.normalize();
        self.basis.x = orthonormalize_against(self.basis.x, self.basis.z);
        self.basis.y = self.basis.z.cross(&self.basis.x);
    }
}

fn to_radians(angle: f64, degrees: bool) -> f64 {
    if degrees {
        angle.to_radians()
    } else {
        angle
    }
}
