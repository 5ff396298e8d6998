//! Axis-aligned rectangles for hitboxes
//!
//! Screen space: x grows right, y grows down. A rectangle is stored as its
//! top-left (`min`) and bottom-right (`max`) corners.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: DVec2,
    pub max: DVec2,
}

impl Rect {
    /// Rectangle from its top-left corner and size
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            min: DVec2::new(x, y),
            max: DVec2::new(x + width, y + height),
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn size(&self) -> DVec2 {
        self.max - self.min
    }

    /// True if the rectangle has no area
    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Shrink by `margin` on every side, collapsing to the center line if the
    /// margin is larger than half a side
    pub fn inset(&self, margin: f64) -> Self {
        let center = (self.min + self.max) * 0.5;
        let min = (self.min + DVec2::splat(margin)).min(center);
        let max = (self.max - DVec2::splat(margin)).max(center);
        Self { min, max }
    }

    /// Strict overlap test: shared edges or corners do not count, and an
    /// empty rectangle overlaps nothing
    pub fn overlaps(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}
