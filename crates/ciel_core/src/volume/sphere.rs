use ciel_math::Vec3;

use super::VolumeField;

/// Solid sphere: `radius - |p - center|`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn set_center(&mut self, center: Vec3) {
        self.center = center;
    }

    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius;
    }
}

impl VolumeField for Sphere {
    #[inline]
    fn eval(&self, p: Vec3) -> f32 {
        self.radius - (p - self.center).length()
    }

    /// Points toward the center; undefined exactly at the center.
    fn gradient(&self, p: Vec3) -> Option<Vec3> {
        (self.center - p).try_normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::volume::test_util::sample_directions;

    #[test]
    fn test_center_is_radius() {
        let sphere = Sphere::new(Vec3::new(-0.5, 0.0, 0.0), 0.5);
        assert_eq!(sphere.eval(Vec3::new(-0.5, 0.0, 0.0)), 0.5);

        let big = Sphere::new(Vec3::new(3.0, -2.0, 7.5), 12.25);
        assert_eq!(big.eval(big.center()), big.radius());
    }

    #[test]
    fn test_just_outside_is_negative() {
        let sphere = Sphere::new(Vec3::new(1.0, 2.0, 3.0), 0.75);
        for dir in sample_directions(3, 100) {
            let p = sphere.center() + dir * (sphere.radius() + 1e-3);
            assert!(sphere.eval(p) < 0.0, "eval({p}) = {}", sphere.eval(p));
        }
    }

    #[test]
    fn test_just_inside_is_positive() {
        let sphere = Sphere::new(Vec3::ZERO, 2.0);
        for dir in sample_directions(4, 100) {
            assert!(sphere.eval(dir * 1.99) > 0.0);
        }
    }

    #[test]
    fn test_gradient_points_inward() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0);
        let g = sphere.gradient(Vec3::new(2.0, 0.0, 0.0)).unwrap();
        assert_eq!(g, Vec3::NEG_X);
        assert!(sphere.gradient(Vec3::ZERO).is_none());
    }

    #[test]
    fn test_setters() {
        let mut sphere = Sphere::new(Vec3::ZERO, 1.0);
        sphere.set_center(Vec3::X);
        sphere.set_radius(3.0);
        assert_eq!(sphere.eval(Vec3::X), 3.0);
    }
}
