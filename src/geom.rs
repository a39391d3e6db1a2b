//! 2D geometry helpers over `glam::Vec2`

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Angle (radians) of the line from `from` toward `to`
#[inline]
pub fn angle_to(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Unit vector pointing along `angle`
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Circle-circle overlap (strict: touching circles do not overlap)
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance(b) < ra + rb
}

/// Scale `v` down to `max` length if it exceeds it, preserving direction
#[inline]
pub fn cap_length(v: Vec2, max: f32) -> Vec2 {
    let len = v.length();
    if len > max { v / len * max } else { v }
}

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Rectangle anchored at the origin
    pub const fn from_size(width: f32, height: f32) -> Self {
        Self::new(Vec2::ZERO, Vec2::new(width, height))
    }

    /// Shrink every side by `amount`
    pub fn inset(&self, amount: f32) -> Self {
        Self::new(self.min + Vec2::splat(amount), self.max - Vec2::splat(amount))
    }

    /// Grow every side by `amount`
    pub fn expand(&self, amount: f32) -> Self {
        self.inset(-amount)
    }

    /// Strict containment (points on the edge are outside)
    pub fn contains(&self, p: Vec2) -> bool {
        p.x > self.min.x && p.x < self.max.x && p.y > self.min.y && p.y < self.max.y
    }

    /// Hard-wall clamp of a point into the rectangle
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            p.x.max(self.min.x).min(self.max.x),
            p.y.max(self.min.y).min(self.max.y),
        )
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }
}
