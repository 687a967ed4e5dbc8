//! Scene: one camera plus an ordered list of root volume fields.

use ciel_math::{Color, ColorExt, Vec3};
use thiserror::Error;

use crate::camera::{Camera, CameraError};
use crate::config::SceneConfig;
use crate::volume::FieldRef;

/// Errors that can occur while building or loading a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scene description error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Camera error: {0}")]
    Camera(#[from] CameraError),

    #[error("Invalid render target {width}x{height}")]
    InvalidTarget { width: u32, height: u32 },
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// The renderable world.
///
/// Camera and fields are rebuilt wholesale from the [`SceneConfig`] by
/// [`init`](Self::init) and [`update`](Self::update); nothing is mutated
/// incrementally. During a render the scene is only read, so it can be
/// shared across worker threads as `&Scene`.
#[derive(Debug)]
pub struct Scene {
    config: SceneConfig,
    camera: Camera,
    volumes: Vec<FieldRef>,
    frame_count: u64,
    target: Option<(u32, u32)>,
}

impl Scene {
    /// Create an uninitialized scene. Call [`init`](Self::init) before rendering.
    pub fn new(config: SceneConfig) -> Self {
        Self {
            config,
            camera: Camera::default(),
            volumes: Vec::new(),
            frame_count: 0,
            target: None,
        }
    }

    /// Build camera and fields for a `width` x `height` image.
    pub fn init(&mut self, width: u32, height: u32) -> SceneResult<()> {
        if width == 0 || height == 0 {
            return Err(SceneError::InvalidTarget { width, height });
        }

        self.init_camera(width as f32 / height as f32)?;
        self.init_volumes();
        self.target = Some((width, height));

        log::debug!(
            "Scene initialized for {}x{}: eye={} view={} fov={} near={} far={}, {} fields",
            width,
            height,
            self.camera.eye(),
            self.camera.view_dir(),
            self.camera.fov(),
            self.camera.near_plane(),
            self.camera.far_plane(),
            self.volumes.len()
        );
        Ok(())
    }

    /// Rebuild camera and fields from the current configuration.
    ///
    /// Fields added with [`add_field`](Self::add_field) are discarded. If the
    /// configured camera is degenerate the scene is left untouched.
    pub fn update(&mut self) -> SceneResult<()> {
        let camera = self.config.camera.build(self.camera.aspect_ratio())?;
        self.camera = camera;
        self.init_volumes();

        log::debug!("Scene updated: {} fields", self.volumes.len());
        Ok(())
    }

    fn init_camera(&mut self, aspect_ratio: f32) -> SceneResult<()> {
        self.camera = self.config.camera.build(aspect_ratio)?;
        Ok(())
    }

    fn init_volumes(&mut self) {
        self.volumes = self.config.fields.iter().map(|desc| desc.build()).collect();
    }

    /// Density and color at `p`.
    ///
    /// Density is the sum of every root field's positive part; negative
    /// values never subtract occupancy here, so carving must happen through
    /// a cutout below the root. Color is always opaque white.
    pub fn eval(&self, p: Vec3) -> (f32, Color) {
        let density: f32 = self
            .volumes
            .iter()
            .map(|field| field.eval(p).max(0.0))
            .sum();
        (density, Color::WHITE)
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn volumes(&self) -> &[FieldRef] {
        &self.volumes
    }

    /// Append a root field. It lives until the next `init` or `update`.
    pub fn add_field(&mut self, field: FieldRef) {
        self.volumes.push(field);
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Replace the configuration. Takes effect on the next `init`/`update`.
    pub fn set_config(&mut self, config: SceneConfig) {
        self.config = config;
    }

    /// Image size from the last successful `init`.
    pub fn target(&self) -> Option<(u32, u32)> {
        self.target
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn inc_frame_count(&mut self) {
        self.frame_count += 1;
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(SceneConfig::default())
    }
}
