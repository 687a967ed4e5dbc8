//! Tile-based partitioning of a frame.
//!
//! The image is cut into rectangular tiles that are marched independently,
//! in parallel with rayon. Each tile returns its own RGBA block, so workers
//! never share output memory; blocks are copied into the frame afterwards.

use ciel_core::Camera;

use crate::march::RayMarcher;
use crate::setting::MarchStrategy;

/// A rectangular region of the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    /// X coordinate of the tile's first column
    pub x: u32,
    /// Y coordinate of the tile's first row
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Tile {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Get the total number of pixels in this tile.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }
}

/// Cover a `width` x `height` image with tiles of at most `tile_size` pixels
/// per side, in row-major order. Edge tiles are clipped to the image.
pub fn generate_tiles(width: u32, height: u32, tile_size: u32) -> Vec<Tile> {
    let tile_size = tile_size.max(1);
    let mut tiles = Vec::new();

    for y in (0..height).step_by(tile_size as usize) {
        for x in (0..width).step_by(tile_size as usize) {
            let tw = tile_size.min(width - x);
            let th = tile_size.min(height - y);
            tiles.push(Tile::new(x, y, tw, th));
        }
    }

    tiles
}

/// RGBA floats for one tile, row-major within the tile.
#[derive(Debug, Clone)]
pub struct TileResult {
    pub tile: Tile,
    pub pixels: Vec<f32>,
}

/// March every pixel of `tile`.
///
/// Pixel `(i, j)` of a `width` x `height` image looks along
/// `camera.view(i / width, j / height)`.
pub fn render_tile(
    tile: &Tile,
    camera: &Camera,
    marcher: &RayMarcher<'_>,
    image_size: (u32, u32),
    strategy: MarchStrategy,
) -> TileResult {
    let (width, height) = image_size;
    let mut pixels = Vec::with_capacity(tile.pixel_count() as usize * 4);

    for j in tile.y..tile.y + tile.height {
        for i in tile.x..tile.x + tile.width {
            let ray = camera.ray(i as f32 / width as f32, j as f32 / height as f32);
            let rgba = match strategy {
                MarchStrategy::PerPixel => marcher.march(&ray),
                MarchStrategy::PerStep => marcher.march_two_phase(&ray),
            };
            pixels.extend_from_slice(&rgba);
        }
    }

    TileResult {
        tile: *tile,
        pixels,
    }
}
