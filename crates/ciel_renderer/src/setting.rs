//! Render configuration.

use ciel_core::SceneError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that stop a render before any pixel is produced.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid image size {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Invalid ray step size {0} (must be positive and finite)")]
    InvalidStepSize(f32),

    #[error("Invalid tile size {0}")]
    InvalidTileSize(u32),

    #[error("March needs {steps} steps per ray, more than the limit of {max}")]
    TooManySteps { steps: usize, max: usize },

    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// How the work of one frame is spread over threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarchStrategy {
    /// Tiles of pixels in parallel, each ray marched sequentially.
    #[default]
    PerPixel,
    /// Pixels in order, the steps of each ray sampled in parallel and then
    /// composited sequentially.
    PerStep,
}

/// Interactive tweaks a display front-end can request between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    DecreaseStep,
    IncreaseStep,
    DecreaseAbsorption,
    IncreaseAbsorption,
}

const STEP_DECREMENT: f32 = 0.00025;
const STEP_INCREMENT: f32 = 0.0005;
const ABSORPTION_DELTA: f32 = 0.001;

/// Parameters for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSetting {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Ray-march step length in world units
    pub ray_dt: f32,
    /// Per-step extinction coefficient; larger means faster opacity buildup
    pub exp_k: f32,
    pub strategy: MarchStrategy,
    /// Edge length of the square tiles used by `MarchStrategy::PerPixel`
    pub tile_size: u32,
}

impl Default for RenderSetting {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            ray_dt: 0.01,
            exp_k: 0.02,
            strategy: MarchStrategy::PerPixel,
            tile_size: DEFAULT_TILE_SIZE,
        }
    }
}

/// Default tile size in pixels.
pub const DEFAULT_TILE_SIZE: u32 = 64;

/// Upper bound on samples per ray.
pub const MAX_MARCH_STEPS: usize = 1 << 20;

impl RenderSetting {
    /// Setting for a `width` x `height` image with default march parameters.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn with_step(mut self, ray_dt: f32, exp_k: f32) -> Self {
        self.ray_dt = ray_dt;
        self.exp_k = exp_k;
        self
    }

    pub fn with_strategy(mut self, strategy: MarchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Check the values a render depends on.
    pub fn validate(&self) -> RenderResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if !(self.ray_dt > 0.0) || !self.ray_dt.is_finite() {
            return Err(RenderError::InvalidStepSize(self.ray_dt));
        }
        if self.tile_size == 0 {
            return Err(RenderError::InvalidTileSize(self.tile_size));
        }
        Ok(())
    }

    /// Number of floats in the RGBA pixel buffer.
    pub fn pixmap_size(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }

    /// Apply a step or absorption tweak.
    pub fn adjust(&mut self, adjustment: Adjustment) {
        match adjustment {
            Adjustment::DecreaseStep => self.ray_dt -= STEP_DECREMENT,
            Adjustment::IncreaseStep => self.ray_dt += STEP_INCREMENT,
            Adjustment::DecreaseAbsorption => self.exp_k -= ABSORPTION_DELTA,
            Adjustment::IncreaseAbsorption => self.exp_k += ABSORPTION_DELTA,
        }
        log::info!("Changed {:?}: ray_dt={} exp_k={}", adjustment, self.ray_dt, self.exp_k);
    }
}
