//! RGBA color values.
//!
//! Colors are plain linear 4-vectors: addition, subtraction, component-wise
//! product and scalar scaling all come from `Vec4`. There is no color-space
//! handling beyond linear blending.

use glam::Vec4;

/// Linear RGBA color.
pub type Color = Vec4;

/// Named colors used by the scene and the integrator.
pub trait ColorExt {
    /// Opaque black, `(0, 0, 0, 1)`.
    const BLACK: Color;
    /// Opaque white, `(1, 1, 1, 1)`.
    const WHITE: Color;
    /// Fully transparent, all channels zero.
    const TRANSPARENT: Color;

    /// Build a color from its four channels.
    fn rgba(r: f32, g: f32, b: f32, a: f32) -> Color;
}

impl ColorExt for Color {
    const BLACK: Color = Vec4::new(0.0, 0.0, 0.0, 1.0);
    const WHITE: Color = Vec4::ONE;
    const TRANSPARENT: Color = Vec4::ZERO;

    #[inline]
    fn rgba(r: f32, g: f32, b: f32, a: f32) -> Color {
        Vec4::new(r, g, b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_blending() {
        let a = Color::rgba(0.25, 0.5, 0.75, 1.0);
        let b = Color::rgba(0.125, 0.125, 0.125, 0.0);

        assert_eq!(a + b, Color::rgba(0.375, 0.625, 0.875, 1.0));
        assert_eq!(a - b, Color::rgba(0.125, 0.375, 0.625, 1.0));
        assert_eq!(a * 0.5, Color::rgba(0.125, 0.25, 0.375, 0.5));
        assert_eq!(Color::WHITE * a, a);
    }

    #[test]
    fn test_named_colors() {
        assert_eq!(Color::BLACK.w, 1.0);
        assert_eq!(Color::BLACK.truncate(), glam::Vec3::ZERO);
        assert_eq!(Color::TRANSPARENT, Vec4::ZERO);
    }
}
