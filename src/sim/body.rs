//! Axis-aligned bodies owned by the arena
//!
//! Every entity in the arena is a `Body`: an id, a kind tag and an
//! axis-aligned bounding box. Circles are tracked by their bounding box
//! too, since all overlap tests are box-vs-box.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Stable identity of a body inside the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BodyId(pub u32);

/// What role a body plays in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
    Ball,
    Paddle,
    Brick,
}

/// Drawable outline of a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shape {
    Circle,
    Rect,
}

/// Axis-aligned bounding box in arena coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            min: Vec2::new(left, top),
            max: Vec2::new(right, bottom),
        }
    }

    /// Box of the given size centered on `center`
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Same box shifted by `delta`
    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
    }

    /// Inclusive overlap: boxes that merely touch on an edge still overlap
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }
}

/// A positioned body with identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub id: BodyId,
    pub kind: BodyKind,
    pub shape: Shape,
    pub bounds: Bounds,
}

impl Body {
    pub fn new(id: BodyId, kind: BodyKind, shape: Shape, bounds: Bounds) -> Self {
        Self {
            id,
            kind,
            shape,
            bounds,
        }
    }

    /// Current bounds
    pub fn position(&self) -> Bounds {
        self.bounds
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.bounds = self.bounds.translated(delta);
    }
}
