//! Constructive solid geometry over volume fields.
//!
//! Every combinator is itself a [`VolumeField`], and children are shared
//! [`FieldRef`]s, so the same subtree can appear under several parents.
//! Evaluation is a plain recursive walk with no caching: a shared subtree is
//! recomputed each time it is reached.

use std::sync::Arc;

use ciel_math::Vec3;

use super::{FieldRef, VolumeField};

/// Inside either child: `max(a, b)`.
#[derive(Debug, Clone)]
pub struct Union {
    a: FieldRef,
    b: FieldRef,
}

impl Union {
    pub fn new(a: FieldRef, b: FieldRef) -> Self {
        Self { a, b }
    }
}

impl VolumeField for Union {
    #[inline]
    fn eval(&self, p: Vec3) -> f32 {
        self.a.eval(p).max(self.b.eval(p))
    }

    fn gradient(&self, p: Vec3) -> Option<Vec3> {
        if self.a.eval(p) >= self.b.eval(p) {
            self.a.gradient(p)
        } else {
            self.b.gradient(p)
        }
    }
}

/// Inside both children: `min(a, b)`.
#[derive(Debug, Clone)]
pub struct Intersection {
    a: FieldRef,
    b: FieldRef,
}

impl Intersection {
    pub fn new(a: FieldRef, b: FieldRef) -> Self {
        Self { a, b }
    }
}

impl VolumeField for Intersection {
    #[inline]
    fn eval(&self, p: Vec3) -> f32 {
        self.a.eval(p).min(self.b.eval(p))
    }

    fn gradient(&self, p: Vec3) -> Option<Vec3> {
        if self.a.eval(p) <= self.b.eval(p) {
            self.a.gradient(p)
        } else {
            self.b.gradient(p)
        }
    }
}

/// Inside `a` and outside `b`: `min(a, -b)`. Not commutative.
#[derive(Debug, Clone)]
pub struct Cutout {
    a: FieldRef,
    b: FieldRef,
}

impl Cutout {
    pub fn new(a: FieldRef, b: FieldRef) -> Self {
        Self { a, b }
    }
}

impl VolumeField for Cutout {
    #[inline]
    fn eval(&self, p: Vec3) -> f32 {
        self.a.eval(p).min(-self.b.eval(p))
    }

    fn gradient(&self, p: Vec3) -> Option<Vec3> {
        if self.a.eval(p) <= -self.b.eval(p) {
            self.a.gradient(p)
        } else {
            self.b.gradient(p).map(|g| -g)
        }
    }
}

/// Slab of total `thickness` straddling the boundary of `field`.
///
/// With `d = field(p)` the value is `min(d + t/2, -(d - t/2))`. A zero
/// thickness leaves nothing with positive value.
#[derive(Debug, Clone)]
pub struct Shell {
    field: FieldRef,
    thickness: f32,
}

impl Shell {
    pub fn new(field: FieldRef, thickness: f32) -> Self {
        Self { field, thickness }
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }
}

impl VolumeField for Shell {
    #[inline]
    fn eval(&self, p: Vec3) -> f32 {
        let d = self.field.eval(p);
        let half = self.thickness / 2.0;
        (d + half).min(-(d - half))
    }

    fn gradient(&self, p: Vec3) -> Option<Vec3> {
        let g = self.field.gradient(p)?;
        // Inner half of the slab faces outward, outer half inward
        if self.field.eval(p) < 0.0 { Some(g) } else { Some(-g) }
    }
}

/// Shared union node.
pub fn union(a: FieldRef, b: FieldRef) -> FieldRef {
    Arc::new(Union::new(a, b))
}

/// Shared intersection node.
pub fn intersection(a: FieldRef, b: FieldRef) -> FieldRef {
    Arc::new(Intersection::new(a, b))
}

/// Shared cutout node, `a` minus `b`.
pub fn cutout(a: FieldRef, b: FieldRef) -> FieldRef {
    Arc::new(Cutout::new(a, b))
}

/// Shared shell node.
pub fn shell(field: FieldRef, thickness: f32) -> FieldRef {
    Arc::new(Shell::new(field, thickness))
}
