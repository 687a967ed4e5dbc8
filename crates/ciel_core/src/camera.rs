//! Pinhole camera for ray generation.

use ciel_math::{Ray, Vec3};
use thiserror::Error;

/// Errors from building a camera basis.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CameraError {
    #[error("view direction {0} has no length")]
    DegenerateView(Vec3),

    #[error("up vector {up} is parallel to view direction {view}")]
    DegenerateUp { view: Vec3, up: Vec3 },
}

/// Pinhole camera with an orthonormal `view`/`up`/`right` basis.
///
/// `htanfov` and `vtanfov` are cached from the field of view and aspect
/// ratio, and recomputed whenever either changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    eye: Vec3,
    view: Vec3,
    up: Vec3,
    right: Vec3,

    fov: f32,
    aspect_ratio: f32,
    htanfov: f32,
    vtanfov: f32,

    near: f32,
    far: f32,
}

impl Camera {
    /// Create a camera looking along `view` from `eye`.
    pub fn new(eye: Vec3, view: Vec3, up: Vec3) -> Result<Self, CameraError> {
        let mut camera = Self::default();
        camera.set_eye_view_up(eye, view, up)?;
        Ok(camera)
    }

    /// Set position and orientation.
    ///
    /// `view` is normalized, `up` is Gram-Schmidt orthogonalized against it,
    /// and `right = view × up`. On error the camera is left unchanged.
    pub fn set_eye_view_up(&mut self, eye: Vec3, view: Vec3, up: Vec3) -> Result<(), CameraError> {
        let v = view
            .try_normalize()
            .ok_or(CameraError::DegenerateView(view))?;
        let u = (up - up.dot(v) * v)
            .try_normalize()
            .ok_or(CameraError::DegenerateUp { view, up })?;

        self.eye = eye;
        self.view = v;
        self.up = u;
        self.right = v.cross(u).normalize();
        Ok(())
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    /// Forward axis of the basis.
    pub fn view_dir(&self) -> Vec3 {
        self.view
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// View direction of a pixel at the fractional position `(x, y)`.
    ///
    /// Nominally `0 <= x, y <= 1` covers the field of view, but values
    /// outside that range sample beyond the frustum.
    pub fn view(&self, x: f32, y: f32) -> Vec3 {
        let xx = (2.0 * x - 1.0) * self.htanfov;
        let yy = (2.0 * y - 1.0) * self.vtanfov;
        (self.up * yy + self.right * xx + self.view).normalize()
    }

    /// Primary ray for `(x, y)`, starting at the near plane.
    pub fn ray(&self, x: f32, y: f32) -> Ray {
        let direction = self.view(x, y);
        Ray::new(self.eye + direction * self.near, direction)
    }

    /// Set the horizontal field of view in degrees.
    pub fn set_fov(&mut self, fov: f32) {
        self.fov = fov;
        self.htanfov = (fov * 0.5).to_radians().tan();
        self.vtanfov = self.htanfov / self.aspect_ratio;
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// Set width / height and refresh the vertical extent.
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
        self.vtanfov = self.htanfov / aspect_ratio;
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn set_near_plane(&mut self, near: f32) {
        self.near = near;
    }

    pub fn near_plane(&self) -> f32 {
        self.near
    }

    pub fn set_far_plane(&mut self, far: f32) {
        self.far = far;
    }

    pub fn far_plane(&self) -> f32 {
        self.far
    }
}

impl Default for Camera {
    fn default() -> Self {
        let fov: f32 = 60.0;
        let aspect_ratio = 3.0 / 2.0;
        let htanfov = (fov * 0.5).to_radians().tan();
        Self {
            eye: Vec3::Z,
            view: Vec3::NEG_Z,
            up: Vec3::Y,
            right: Vec3::NEG_Z.cross(Vec3::Y),
            fov,
            aspect_ratio,
            htanfov,
            vtanfov: htanfov / aspect_ratio,
            near: 0.0,
            far: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const EPS: f32 = 1e-5;

    fn assert_orthonormal(camera: &Camera) {
        let (v, u, r) = (camera.view_dir(), camera.up(), camera.right());
        assert!((v.length() - 1.0).abs() < EPS);
        assert!((u.length() - 1.0).abs() < EPS);
        assert!((r.length() - 1.0).abs() < EPS);
        assert!(u.dot(v).abs() < EPS, "up·view = {}", u.dot(v));
        assert!(r.dot(v).abs() < EPS, "right·view = {}", r.dot(v));
        assert!(r.dot(u).abs() < EPS, "right·up = {}", r.dot(u));
    }

    #[test]
    fn test_default_camera() {
        let camera = Camera::default();
        assert_eq!(camera.eye(), Vec3::Z);
        assert_eq!(camera.fov(), 60.0);
        assert_eq!(camera.aspect_ratio(), 1.5);
        assert_orthonormal(&camera);
    }

    #[test]
    fn test_up_is_orthogonalized() {
        // Up tilted toward the view direction
        let camera = Camera::new(
            Vec3::new(0.0, 0.0, -5.0),
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::new(0.0, 1.0, 1.0),
        )
        .unwrap();

        assert_orthonormal(&camera);
        assert!((camera.up() - Vec3::Y).length() < EPS);
        assert!((camera.view_dir() - Vec3::Z).length() < EPS);
    }

    #[test]
    fn test_random_bases_are_orthonormal() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let mut v = || Vec3::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0));
            let (eye, view, up) = (v() * 10.0, v(), v());
            if let Ok(camera) = Camera::new(eye, view, up) {
                assert_orthonormal(&camera);
            }
        }
    }

    #[test]
    fn test_degenerate_view() {
        let err = Camera::new(Vec3::ZERO, Vec3::ZERO, Vec3::Y).unwrap_err();
        assert_eq!(err, CameraError::DegenerateView(Vec3::ZERO));
    }

    #[test]
    fn test_degenerate_up() {
        let result = Camera::new(Vec3::ZERO, Vec3::Y, Vec3::new(0.0, 3.0, 0.0));
        assert!(matches!(result, Err(CameraError::DegenerateUp { .. })));
    }

    #[test]
    fn test_failed_update_keeps_basis() {
        let mut camera = Camera::default();
        let before = camera;
        assert!(camera.set_eye_view_up(Vec3::ONE, Vec3::ZERO, Vec3::Y).is_err());
        assert_eq!(camera, before);
    }

    #[test]
    fn test_view_is_unit_length() {
        let mut camera = Camera::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z, Vec3::Y).unwrap();
        camera.set_aspect_ratio(4.0 / 3.0);
        camera.set_fov(40.0);

        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            // Includes coordinates outside the nominal frustum
            let x = rng.gen_range(-1.0..2.0);
            let y = rng.gen_range(-1.0..2.0);
            assert!((camera.view(x, y).length() - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn test_center_ray_is_view_direction() {
        let camera = Camera::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 2.0), Vec3::Y).unwrap();
        assert!((camera.view(0.5, 0.5) - Vec3::Z).length() < EPS);
    }

    #[test]
    fn test_fov_edges() {
        let mut camera = Camera::new(Vec3::ZERO, Vec3::Z, Vec3::Y).unwrap();
        camera.set_aspect_ratio(2.0);
        camera.set_fov(90.0);

        // tan(45°) = 1, so x = 1 is 45° off-axis
        let edge = camera.view(1.0, 0.5);
        assert!((edge.dot(Vec3::Z) - std::f32::consts::FRAC_1_SQRT_2).abs() < EPS);

        // Vertical extent is halved by the aspect ratio
        let top = camera.view(0.5, 1.0);
        let expected = Vec3::new(0.0, 0.5, 1.0).normalize();
        assert!((top - expected).length() < EPS);
    }

    #[test]
    fn test_aspect_change_recomputes_vertical() {
        let mut camera = Camera::new(Vec3::ZERO, Vec3::Z, Vec3::Y).unwrap();
        camera.set_fov(90.0);
        camera.set_aspect_ratio(1.0);
        let square = camera.view(0.5, 1.0);
        camera.set_aspect_ratio(4.0);
        let wide = camera.view(0.5, 1.0);
        assert!(wide.y < square.y);
    }

    #[test]
    fn test_ray_starts_at_near_plane() {
        let mut camera = Camera::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z, Vec3::Y).unwrap();
        camera.set_near_plane(0.1);
        camera.set_far_plane(10.0);

        let ray = camera.ray(0.5, 0.5);
        assert!((ray.origin - Vec3::new(0.0, 0.0, -4.9)).length() < EPS);
        assert_eq!(camera.far_plane(), 10.0);
    }
}
