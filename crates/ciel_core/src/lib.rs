//! Ciel Core - implicit volume fields, camera and scene.
//!
//! This crate provides:
//!
//! - **Volume fields**: the [`VolumeField`] capability, closed-form leaves
//!   (sphere, rounded box, ellipsoid, torus) and CSG combinators
//! - **Camera**: a pinhole camera that turns fractional image coordinates
//!   into ray directions
//! - **Scene**: camera plus root fields, rebuilt from a [`SceneConfig`]
//!
//! # Example
//!
//! ```
//! use ciel_core::{Scene, SceneConfig};
//! use ciel_math::Vec3;
//!
//! let mut scene = Scene::new(SceneConfig::default());
//! scene.init(800, 600).unwrap();
//! let (density, _color) = scene.eval(Vec3::new(-0.5, 0.0, 0.0));
//! assert!(density > 0.0);
//! ```

pub mod camera;
pub mod config;
pub mod scene;
pub mod volume;

// Re-export commonly used types
pub use camera::{Camera, CameraError};
pub use config::{CameraConfig, FieldDesc, SceneConfig};
pub use scene::{Scene, SceneError, SceneResult};
pub use volume::{FieldRef, VolumeField};
