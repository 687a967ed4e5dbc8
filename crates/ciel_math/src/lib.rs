// Re-export glam for convenience
pub use glam::*;

// Ciel math types
mod color;
mod interval;
mod ray;
pub use color::{Color, ColorExt};
pub use interval::Interval;
pub use ray::Ray;
