//! Flat RGBA float pixel buffer.

use std::path::Path;

use image::{ImageResult, Rgba, RgbaImage};

use crate::tile::TileResult;

/// Row-major RGBA image, 4 consecutive `f32`s per pixel.
///
/// Row `j = 0` is the bottom of the view, matching the camera's `y` axis
/// and the usual texture-upload convention.
#[derive(Debug, Clone, PartialEq)]
pub struct Pixmap {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl Pixmap {
    /// Create a fully transparent pixmap.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; width as usize * height as usize * 4],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn offset(&self, i: u32, j: u32) -> usize {
        (j as usize * self.width as usize + i as usize) * 4
    }

    /// RGBA of pixel `(i, j)`.
    pub fn pixel(&self, i: u32, j: u32) -> [f32; 4] {
        let o = self.offset(i, j);
        [self.data[o], self.data[o + 1], self.data[o + 2], self.data[o + 3]]
    }

    pub fn set_pixel(&mut self, i: u32, j: u32, rgba: [f32; 4]) {
        let o = self.offset(i, j);
        self.data[o..o + 4].copy_from_slice(&rgba);
    }

    /// Iterate over pixels in buffer order.
    pub fn pixels(&self) -> impl Iterator<Item = &[f32]> {
        self.data.chunks_exact(4)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Raw bytes of the float buffer, e.g. for a float texture upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.data.as_slice())
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Copy a rendered tile into place.
    pub fn write_tile(&mut self, result: &TileResult) {
        let tile = &result.tile;
        let row_len = tile.width as usize * 4;
        for (row, src) in result.pixels.chunks_exact(row_len).enumerate() {
            let o = self.offset(tile.x, tile.y + row as u32);
            self.data[o..o + row_len].copy_from_slice(src);
        }
    }

    /// Convert to an 8-bit image, clamping each channel to `[0, 1]`.
    ///
    /// Rows are flipped so the top of the view is the first image row.
    pub fn to_rgba8(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            let p = self.pixel(x, self.height - 1 - y);
            Rgba(p.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8))
        })
    }

    /// Save as PNG (or any format `image` infers from the extension).
    pub fn save(&self, path: impl AsRef<Path>) -> ImageResult<()> {
        self.to_rgba8().save(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::Tile;

    #[test]
    fn test_new_is_transparent() {
        let pixmap = Pixmap::new(3, 2);
        assert_eq!(pixmap.len(), 3 * 2 * 4);
        assert!(pixmap.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_row_major_layout() {
        let mut pixmap = Pixmap::new(4, 3);
        pixmap.set_pixel(1, 2, [0.1, 0.2, 0.3, 0.4]);
        let o = (2 * 4 + 1) * 4;
        assert_eq!(&pixmap.as_slice()[o..o + 4], &[0.1, 0.2, 0.3, 0.4]);
        assert_eq!(pixmap.pixel(1, 2), [0.1, 0.2, 0.3, 0.4]);
    }

    #[test]
    fn test_write_tile() {
        let mut pixmap = Pixmap::new(4, 4);
        let tile = Tile::new(2, 1, 2, 2);
        let pixels = (0..tile.pixel_count())
            .flat_map(|n| [n as f32, 0.0, 0.0, 1.0])
            .collect();
        pixmap.write_tile(&TileResult { tile, pixels });

        assert_eq!(pixmap.pixel(2, 1), [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(pixmap.pixel(3, 1), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(pixmap.pixel(2, 2), [2.0, 0.0, 0.0, 1.0]);
        assert_eq!(pixmap.pixel(3, 2), [3.0, 0.0, 0.0, 1.0]);
        assert_eq!(pixmap.pixel(1, 1), [0.0; 4]);
    }

    #[test]
    fn test_as_bytes() {
        let pixmap = Pixmap::new(2, 2);
        assert_eq!(pixmap.as_bytes().len(), 2 * 2 * 4 * 4);
    }

    #[test]
    fn test_to_rgba8_clamps_and_flips() {
        let mut pixmap = Pixmap::new(1, 2);
        pixmap.set_pixel(0, 0, [2.0, -1.0, 0.5, 1.0]);
        let image = pixmap.to_rgba8();
        // Bottom row of the view lands at the bottom of the image
        assert_eq!(image.get_pixel(0, 1), &Rgba([255, 0, 128, 255]));
        assert_eq!(image.get_pixel(0, 0), &Rgba([0, 0, 0, 0]));
    }
}
