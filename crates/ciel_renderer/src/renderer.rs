//! Frame rendering.

use std::time::Instant;

use ciel_core::{Scene, SceneConfig};
use ciel_math::Interval;
use rayon::prelude::*;

use crate::march::RayMarcher;
use crate::pixmap::Pixmap;
use crate::setting::{
    MarchStrategy, RenderError, RenderResult, RenderSetting, MAX_MARCH_STEPS,
};
use crate::tile::{generate_tiles, render_tile, TileResult};

/// Render one frame of an initialized scene.
///
/// The march covers the camera's near/far bracket in `ray_dt` steps. An
/// empty bracket (far ≤ near) yields zero steps and a fully transparent
/// frame. A bracket needing more than [`MAX_MARCH_STEPS`] samples per ray
/// is rejected. The scene is only read, so it is shared by all workers.
pub fn render(scene: &Scene, setting: &RenderSetting) -> RenderResult<Pixmap> {
    setting.validate()?;

    let camera = scene.camera();
    let bracket = Interval::new(camera.near_plane(), camera.far_plane());
    let steps = bracket.steps(setting.ray_dt);
    if steps > MAX_MARCH_STEPS {
        return Err(RenderError::TooManySteps {
            steps,
            max: MAX_MARCH_STEPS,
        });
    }
    if steps == 0 {
        log::warn!(
            "Empty march bracket [{}, {}] with ray_dt={}; frame will be transparent",
            bracket.min,
            bracket.max,
            setting.ray_dt
        );
    } else {
        log::info!(
            "Marching {} steps per ray over [{}, {}]",
            steps,
            bracket.min,
            bracket.max
        );
    }

    let marcher = RayMarcher::new(scene, setting.ray_dt, setting.exp_k, steps);
    let size = (setting.width, setting.height);
    let tiles = generate_tiles(setting.width, setting.height, setting.tile_size);

    let results: Vec<TileResult> = match setting.strategy {
        MarchStrategy::PerPixel => tiles
            .par_iter()
            .map(|tile| render_tile(tile, camera, &marcher, size, setting.strategy))
            .collect(),
        // Parallelism lives inside each ray
        MarchStrategy::PerStep => tiles
            .iter()
            .map(|tile| render_tile(tile, camera, &marcher, size, setting.strategy))
            .collect(),
    };

    let mut pixmap = Pixmap::new(setting.width, setting.height);
    for result in &results {
        pixmap.write_tile(result);
    }
    Ok(pixmap)
}

/// Owns a scene and the most recent frame.
#[derive(Debug)]
pub struct Renderer {
    scene: Scene,
    pixmap: Pixmap,
}

impl Renderer {
    pub fn new(scene: Scene) -> Self {
        Self {
            scene,
            pixmap: Pixmap::new(0, 0),
        }
    }

    pub fn with_config(config: SceneConfig) -> Self {
        Self::new(Scene::new(config))
    }

    /// Render a full frame, replacing the previous one.
    ///
    /// The scene is (re)initialized whenever the image size differs from
    /// the size it was built for. On error the previous frame is kept.
    pub fn render(&mut self, setting: &RenderSetting) -> RenderResult<()> {
        setting.validate()?;

        let size = (setting.width, setting.height);
        if self.scene.target() != Some(size) {
            self.scene.init(setting.width, setting.height)?;
        }

        log::info!(
            "Rendering frame {} at {}x{} (ray_dt={}, exp_k={}, {:?})",
            self.scene.frame_count(),
            setting.width,
            setting.height,
            setting.ray_dt,
            setting.exp_k,
            setting.strategy
        );
        let start = Instant::now();

        self.pixmap = render(&self.scene, setting)?;
        self.scene.inc_frame_count();

        log::info!("Rendering complete in {:?}", start.elapsed());
        Ok(())
    }

    /// Copy of the last rendered frame.
    pub fn last_render(&self) -> Pixmap {
        self.pixmap.clone()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable scene access, e.g. to `update()` between frames.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(Scene::default())
    }
}
