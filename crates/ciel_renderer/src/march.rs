//! Ray marching through a scene.
//!
//! A ray is sampled at `steps` evenly spaced points starting one step past
//! its origin. Each sample is reduced to a [`StepSample`], and the samples are
//! composited front-to-back by an [`Accumulator`]:
//!
//! ```text
//! occ   = density < ε ? 0 : 1
//! a     = exp(-k * occ)
//! L    += color * (1 - a) * T     (only where occ > 0)
//! T    *= a
//! alpha = 1 - T
//! ```
//!
//! Sampling is independent per step, compositing is not: the fold must run in
//! ascending step order.

use ciel_core::Scene;
use ciel_math::{Color, ColorExt, Ray};
use rayon::prelude::*;

/// One ray step reduced to what compositing needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepSample {
    /// Whether the aggregate density passed the occupancy threshold
    pub occupied: bool,
    /// `color * (1 - attenuation)`
    pub emission: Color,
    /// Fraction of light that survives this step
    pub attenuation: f32,
}

impl StepSample {
    /// Empty space: nothing emitted, nothing absorbed.
    pub const EMPTY: StepSample = StepSample {
        occupied: false,
        emission: Color::TRANSPARENT,
        attenuation: 1.0,
    };

    /// Binarize `density` and derive the step's emission and attenuation.
    #[inline]
    pub fn new(density: f32, color: Color, exp_k: f32) -> Self {
        let occupancy = if density < f32::EPSILON { 0.0 } else { 1.0 };
        let attenuation = (-exp_k * occupancy).exp();
        Self {
            occupied: occupancy > 0.0,
            emission: color * (1.0 - attenuation),
            attenuation,
        }
    }
}

/// Front-to-back compositing state for one ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accumulator {
    radiance: Color,
    transmittance: f32,
}

impl Accumulator {
    pub fn new() -> Self {
        Self {
            // Alpha is bookkeeping only; `finish` replaces it
            radiance: Color::BLACK,
            transmittance: 1.0,
        }
    }

    /// Fold in the next step. Steps must arrive in march order.
    #[inline]
    pub fn composite(&mut self, sample: &StepSample) {
        if sample.occupied {
            self.radiance += sample.emission * self.transmittance;
        }
        self.transmittance *= sample.attenuation;
    }

    pub fn transmittance(&self) -> f32 {
        self.transmittance
    }

    pub fn radiance(&self) -> Color {
        self.radiance
    }

    /// Final RGBA with `alpha = 1 - T`.
    pub fn finish(self) -> [f32; 4] {
        let c = self.radiance;
        [c.x, c.y, c.z, 1.0 - self.transmittance]
    }
}

impl Default for Accumulator {
    fn default() -> Self {
        Self::new()
    }
}

/// Marches rays through a read-only scene with fixed step parameters.
#[derive(Debug, Clone, Copy)]
pub struct RayMarcher<'a> {
    scene: &'a Scene,
    ray_dt: f32,
    exp_k: f32,
    steps: usize,
}

impl<'a> RayMarcher<'a> {
    pub fn new(scene: &'a Scene, ray_dt: f32, exp_k: f32, steps: usize) -> Self {
        Self {
            scene,
            ray_dt,
            exp_k,
            steps,
        }
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Sample step `s` (1-based) of `ray`.
    #[inline]
    pub fn sample(&self, ray: &Ray, s: usize) -> StepSample {
        let p = ray.at(s as f32 * self.ray_dt);
        let (density, color) = self.scene.eval(p);
        StepSample::new(density, color, self.exp_k)
    }

    /// March `ray` sequentially and return its RGBA.
    pub fn march(&self, ray: &Ray) -> [f32; 4] {
        let mut acc = Accumulator::new();
        for s in 1..=self.steps {
            acc.composite(&self.sample(ray, s));
        }
        acc.finish()
    }

    /// March `ray` in two phases: sample every step in parallel into a
    /// ray-private buffer, then composite the buffer in step order.
    ///
    /// Produces the same result as [`march`](Self::march).
    pub fn march_two_phase(&self, ray: &Ray) -> [f32; 4] {
        let samples: Vec<StepSample> = (1..=self.steps)
            .into_par_iter()
            .map(|s| self.sample(ray, s))
            .collect();

        samples
            .iter()
            .fold(Accumulator::new(), |mut acc, sample| {
                acc.composite(sample);
                acc
            })
            .finish()
    }

    /// Transmittance before the first step and after each step of `ray`.
    ///
    /// The returned vector has `steps + 1` entries starting at 1.
    pub fn transmittance_trace(&self, ray: &Ray) -> Vec<f32> {
        let mut acc = Accumulator::new();
        let mut trace = Vec::with_capacity(self.steps.saturating_add(1));
        trace.push(acc.transmittance());
        for s in 1..=self.steps {
            acc.composite(&self.sample(ray, s));
            trace.push(acc.transmittance());
        }
        trace
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use ciel_core::volume::Sphere;
    use ciel_core::SceneConfig;
    use ciel_math::Vec3;

    fn sphere_scene(radius: f32) -> Scene {
        let mut scene = Scene::new(SceneConfig::empty());
        scene.add_field(Arc::new(Sphere::new(Vec3::ZERO, radius)));
        scene
    }

    #[test]
    fn test_step_sample_threshold() {
        let empty = StepSample::new(0.0, Color::WHITE, 0.5);
        assert_eq!(empty, StepSample::EMPTY);

        // Below machine epsilon counts as empty
        let tiny = StepSample::new(f32::EPSILON / 2.0, Color::WHITE, 0.5);
        assert!(!tiny.occupied);

        // Any magnitude above the threshold is treated identically
        let thin = StepSample::new(f32::EPSILON, Color::WHITE, 0.5);
        let dense = StepSample::new(1000.0, Color::WHITE, 0.5);
        assert!(thin.occupied);
        assert_eq!(thin, dense);
        assert_eq!(dense.attenuation, (-0.5f32).exp());
    }

    #[test]
    fn test_accumulator_order_matters() {
        let red = StepSample::new(1.0, Color::rgba(1.0, 0.0, 0.0, 1.0), 1.0);
        let blue = StepSample::new(1.0, Color::rgba(0.0, 0.0, 1.0, 1.0), 1.0);

        let mut front_red = Accumulator::new();
        front_red.composite(&red);
        front_red.composite(&blue);

        let mut front_blue = Accumulator::new();
        front_blue.composite(&blue);
        front_blue.composite(&red);

        let a = front_red.finish();
        let b = front_blue.finish();
        assert!(a[0] > a[2]);
        assert!(b[2] > b[0]);
        // Alpha only depends on total absorption
        assert!((a[3] - b[3]).abs() < 1e-6);
    }

    #[test]
    fn test_empty_steps_leave_ray_transparent() {
        let mut acc = Accumulator::new();
        for _ in 0..100 {
            acc.composite(&StepSample::EMPTY);
        }
        assert_eq!(acc.finish(), [0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_march_through_sphere() {
        let scene = sphere_scene(1.0);
        let marcher = RayMarcher::new(&scene, 0.01, 0.005, 1000);

        let hit = marcher.march(&Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z));
        let miss = marcher.march(&Ray::new(Vec3::new(0.0, 3.0, -5.0), Vec3::Z));

        // ~200 occupied steps through the diameter
        let expected_alpha = 1.0 - (-0.005f32 * 200.0).exp();
        assert!((hit[3] - expected_alpha).abs() < 0.01, "alpha = {}", hit[3]);
        // White medium: color equals coverage
        assert!((hit[0] - hit[3]).abs() < 1e-4);
        assert_eq!(miss, [0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_zero_steps_is_transparent() {
        let scene = sphere_scene(10.0);
        let marcher = RayMarcher::new(&scene, 0.01, 1.0, 0);
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert_eq!(marcher.march(&ray), [0.0, 0.0, 0.0, 0.0]);
        assert_eq!(marcher.march_two_phase(&ray), [0.0, 0.0, 0.0, 0.0]);
        assert_eq!(marcher.transmittance_trace(&ray), vec![1.0]);
    }

    #[test]
    fn test_two_phase_matches_sequential() {
        let mut scene = Scene::default();
        scene.init(4, 4).unwrap();
        let marcher = RayMarcher::new(&scene, 0.01, 0.02, 990);
        for y in [-0.3, -0.1, 0.0, 0.25] {
            let ray = Ray::new(Vec3::new(0.0, y, -4.9), Vec3::new(0.05, 0.0, 1.0).normalize());
            assert_eq!(marcher.march(&ray), marcher.march_two_phase(&ray));
        }
    }

    #[test]
    fn test_transmittance_is_monotonic() {
        let scene = sphere_scene(1.0);
        let ray = Ray::new(Vec3::new(0.1, -0.2, -3.0), Vec3::Z);
        for exp_k in [0.0, 0.02, 0.5, 5.0] {
            let marcher = RayMarcher::new(&scene, 0.01, exp_k, 600);
            let trace = marcher.transmittance_trace(&ray);
            assert_eq!(trace.len(), 601);
            assert_eq!(trace[0], 1.0);
            assert!(trace.windows(2).all(|w| w[1] <= w[0]));

            let alpha = marcher.march(&ray)[3];
            assert!((0.0..=1.0).contains(&alpha));
            assert_eq!(alpha, 1.0 - trace[600]);
        }
    }
}
