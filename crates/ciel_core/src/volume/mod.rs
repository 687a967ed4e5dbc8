//! Implicit volume fields.
//!
//! A field maps a point to a signed scalar: positive inside the solid,
//! negative outside, with the magnitude behaving roughly like a distance to
//! the boundary. Leaves are closed-form shapes; the combinators in [`csg`]
//! compose any fields into new ones, so trees of arbitrary depth can be built
//! once and then evaluated read-only from many threads.

use std::fmt::Debug;
use std::sync::Arc;

use ciel_math::Vec3;

pub mod csg;
mod ellipsoid;
mod rounded_box;
mod sphere;
mod torus;

pub use csg::{Cutout, Intersection, Shell, Union};
pub use ellipsoid::Ellipsoid;
pub use rounded_box::RoundedBox;
pub use sphere::Sphere;
pub use torus::Torus;

/// A scalar density field over 3D space.
pub trait VolumeField: Debug + Send + Sync {
    /// Signed value at `p`; positive means inside.
    fn eval(&self, p: Vec3) -> f32;

    /// Gradient approximation at `p`, if this field provides one.
    fn gradient(&self, _p: Vec3) -> Option<Vec3> {
        None
    }
}

/// Shared handle to a field; one node may have several parents.
pub type FieldRef = Arc<dyn VolumeField>;
