//! Serializable scene descriptions.
//!
//! A [`SceneConfig`] is what [`Scene`](crate::Scene) builds its camera and
//! root fields from on every `init`/`update`. `Default` gives the stock scene:
//! two touching spheres seen from `z = -5`.
//!
//! Scenes can be written as JSON:
//!
//! ```json
//! {
//!   "camera": { "eye": [0, 0, -5], "view": [0, 0, 5], "up": [0, 1, 0],
//!               "fov": 40, "near": 0.1, "far": 10 },
//!   "fields": [
//!     { "type": "cutout",
//!       "a": { "type": "box", "center": [0, 0, 0], "bound": [1, 1, 1], "exponent": 0.2 },
//!       "b": { "type": "sphere", "center": [0, 0, 0], "radius": 1.2 } }
//!   ]
//! }
//! ```

use std::path::Path;
use std::sync::Arc;

use ciel_math::Vec3;
use serde::{Deserialize, Serialize};

use crate::camera::{Camera, CameraError};
use crate::scene::SceneResult;
use crate::volume::{csg, Ellipsoid, FieldRef, RoundedBox, Sphere, Torus};

/// Camera placement and lens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub eye: Vec3,
    /// Viewing direction (need not be normalized).
    pub view: Vec3,
    pub up: Vec3,
    /// Horizontal field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        let eye = Vec3::new(0.0, 0.0, -5.0);
        Self {
            eye,
            view: Vec3::ZERO - eye,
            up: Vec3::Y,
            fov: 40.0,
            near: 0.1,
            far: 10.0,
        }
    }
}

impl CameraConfig {
    /// Build a camera for an image with the given width / height ratio.
    pub fn build(&self, aspect_ratio: f32) -> Result<Camera, CameraError> {
        let mut camera = Camera::new(self.eye, self.view, self.up)?;
        camera.set_aspect_ratio(aspect_ratio);
        camera.set_fov(self.fov);
        camera.set_near_plane(self.near);
        camera.set_far_plane(self.far);
        Ok(camera)
    }
}

/// A field tree node, as written in a scene file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldDesc {
    Sphere {
        center: Vec3,
        radius: f32,
    },
    #[serde(rename = "box")]
    RoundedBox {
        center: Vec3,
        bound: Vec3,
        exponent: f32,
    },
    Ellipsoid {
        center: Vec3,
        axis: Vec3,
        radius_axis: f32,
        radius_perp: f32,
    },
    Torus {
        center: Vec3,
        normal: Vec3,
        major: f32,
        minor: f32,
    },
    Union {
        a: Box<FieldDesc>,
        b: Box<FieldDesc>,
    },
    Intersection {
        a: Box<FieldDesc>,
        b: Box<FieldDesc>,
    },
    Cutout {
        a: Box<FieldDesc>,
        b: Box<FieldDesc>,
    },
    Shell {
        field: Box<FieldDesc>,
        thickness: f32,
    },
}

impl FieldDesc {
    /// Instantiate the described tree.
    pub fn build(&self) -> FieldRef {
        match self {
            Self::Sphere { center, radius } => Arc::new(Sphere::new(*center, *radius)),
            Self::RoundedBox {
                center,
                bound,
                exponent,
            } => Arc::new(RoundedBox::new(*center, *bound, *exponent)),
            Self::Ellipsoid {
                center,
                axis,
                radius_axis,
                radius_perp,
            } => Arc::new(Ellipsoid::new(*center, *axis, *radius_axis, *radius_perp)),
            Self::Torus {
                center,
                normal,
                major,
                minor,
            } => Arc::new(Torus::new(*center, *normal, *major, *minor)),
            Self::Union { a, b } => csg::union(a.build(), b.build()),
            Self::Intersection { a, b } => csg::intersection(a.build(), b.build()),
            Self::Cutout { a, b } => csg::cutout(a.build(), b.build()),
            Self::Shell { field, thickness } => csg::shell(field.build(), *thickness),
        }
    }

    /// Number of nodes in this tree.
    pub fn node_count(&self) -> usize {
        match self {
            Self::Union { a, b } | Self::Intersection { a, b } | Self::Cutout { a, b } => {
                1 + a.node_count() + b.node_count()
            }
            Self::Shell { field, .. } => 1 + field.node_count(),
            _ => 1,
        }
    }
}

/// Everything needed to (re)build a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub camera: CameraConfig,
    /// Root fields, summed in order.
    pub fields: Vec<FieldDesc>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            fields: vec![
                FieldDesc::Sphere {
                    center: Vec3::new(-0.5, 0.0, 0.0),
                    radius: 0.5,
                },
                FieldDesc::Sphere {
                    center: Vec3::new(0.5, 0.0, 0.0),
                    radius: 0.5,
                },
            ],
        }
    }
}

impl SceneConfig {
    /// A scene with the default camera and no fields.
    pub fn empty() -> Self {
        Self {
            camera: CameraConfig::default(),
            fields: Vec::new(),
        }
    }

    /// Parse a scene from JSON text.
    pub fn from_json_str(text: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a scene from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> SceneResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        log::info!(
            "Loaded scene {} ({} root fields)",
            path.display(),
            config.fields.len()
        );
        Ok(config)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_string(&self) -> SceneResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
