//! Ciel Renderer - CPU volume ray marching.
//!
//! Renders a [`Scene`](ciel_core::Scene) of implicit density fields by
//! marching one ray per pixel and compositing front-to-back. Pixels are
//! rendered in parallel tiles with rayon; alternatively the steps of each
//! ray can be sampled in parallel and folded sequentially.

mod march;
mod pixmap;
mod renderer;
mod setting;
mod tile;

pub use march::{Accumulator, RayMarcher, StepSample};
pub use pixmap::Pixmap;
pub use renderer::{render, Renderer};
pub use setting::{
    Adjustment, MarchStrategy, RenderError, RenderResult, RenderSetting, DEFAULT_TILE_SIZE,
    MAX_MARCH_STEPS,
};
pub use tile::{generate_tiles, render_tile, Tile, TileResult};
