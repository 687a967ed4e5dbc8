use ciel_math::Vec3;

use super::VolumeField;

/// Ellipsoid of revolution around `axis`.
///
/// `radius_axis` is the semi-axis along `axis`, `radius_perp` the semi-axis
/// across it. The field is `1 - Z²/r1² - |xp|²/r2²`, which is zero on the
/// surface and 1 at the center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    center: Vec3,
    axis: Vec3,
    radius_axis: f32,
    radius_perp: f32,
}

impl Ellipsoid {
    /// `axis` is normalized; a zero axis degrades to a sphere of `radius_perp`.
    pub fn new(center: Vec3, axis: Vec3, radius_axis: f32, radius_perp: f32) -> Self {
        Self {
            center,
            axis: axis.normalize_or_zero(),
            radius_axis,
            radius_perp,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn axis(&self) -> Vec3 {
        self.axis
    }

    pub fn radii(&self) -> (f32, f32) {
        (self.radius_axis, self.radius_perp)
    }

    pub fn set_center(&mut self, center: Vec3) {
        self.center = center;
    }

    pub fn set_axis(&mut self, axis: Vec3) {
        self.axis = axis.normalize_or_zero();
    }

    pub fn set_radii(&mut self, radius_axis: f32, radius_perp: f32) {
        self.radius_axis = radius_axis;
        self.radius_perp = radius_perp;
    }
}

impl VolumeField for Ellipsoid {
    fn eval(&self, p: Vec3) -> f32 {
        let x = p - self.center;
        let z = x.dot(self.axis);
        let xp = x - z * self.axis;
        1.0 - (z * z) / (self.radius_axis * self.radius_axis)
            - xp.length_squared() / (self.radius_perp * self.radius_perp)
    }
}
