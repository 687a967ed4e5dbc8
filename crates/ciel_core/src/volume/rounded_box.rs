use ciel_math::Vec3;

use super::VolumeField;

/// Axis-aligned box with rounded edges.
///
/// `bound` holds the half-extents and `exponent` the rounding radius: larger
/// values give softer edges, zero gives sharp corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundedBox {
    center: Vec3,
    bound: Vec3,
    exponent: f32,
}

impl RoundedBox {
    pub fn new(center: Vec3, bound: Vec3, exponent: f32) -> Self {
        Self {
            center,
            bound,
            exponent,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn bound(&self) -> Vec3 {
        self.bound
    }

    pub fn exponent(&self) -> f32 {
        self.exponent
    }

    pub fn set_center(&mut self, center: Vec3) {
        self.center = center;
    }

    pub fn set_bound(&mut self, bound: Vec3) {
        self.bound = bound;
    }

    pub fn set_exponent(&mut self, exponent: f32) {
        self.exponent = exponent;
    }
}

impl VolumeField for RoundedBox {
    fn eval(&self, p: Vec3) -> f32 {
        let q = (p - self.center).abs() - self.bound + Vec3::splat(self.exponent);
        self.exponent - q.max(Vec3::ZERO).length()
    }
}
