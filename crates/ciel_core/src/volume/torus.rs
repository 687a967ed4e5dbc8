use ciel_math::Vec3;

use super::VolumeField;

/// Torus around `normal` with ring radius `major` and tube radius `minor`.
///
/// Uses the quartic implicit form `4R²|xp|² - (|x|² + R² - r²)²`. It is
/// positive inside the tube but is not a distance field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Torus {
    center: Vec3,
    normal: Vec3,
    major: f32,
    minor: f32,
}

impl Torus {
    pub fn new(center: Vec3, normal: Vec3, major: f32, minor: f32) -> Self {
        Self {
            center,
            normal: normal.normalize_or_zero(),
            major,
            minor,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn radii(&self) -> (f32, f32) {
        (self.major, self.minor)
    }

    pub fn set_center(&mut self, center: Vec3) {
        self.center = center;
    }

    pub fn set_normal(&mut self, normal: Vec3) {
        self.normal = normal.normalize_or_zero();
    }

    pub fn set_radii(&mut self, major: f32, minor: f32) {
        self.major = major;
        self.minor = minor;
    }
}

impl VolumeField for Torus {
    fn eval(&self, p: Vec3) -> f32 {
        let x = p - self.center;
        let xp = x - x.dot(self.normal) * self.normal;
        let r2 = self.major * self.major;
        let k = x.length_squared() + r2 - self.minor * self.minor;
        4.0 * r2 * xp.length_squared() - k * k
    }
}
