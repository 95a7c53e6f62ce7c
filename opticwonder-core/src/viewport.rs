use crate::points::Point2D;
use serde::{Deserialize, Serialize};

/// The drawable surface, in surface pixels.
///
/// Surface space has its origin at the top-left corner and +y pointing down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// Axis-aligned rectangle in optical space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OpticalBounds {
    pub min: Point2D,
    pub max: Point2D,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Half the width and height; the optical origin sits here in surface space.
    pub fn half_extents(&self) -> (f64, f64) {
        (self.width as f64 / 2.0, self.height as f64 / 2.0)
    }

    /// Check if a surface-space point lies within `[0, width] x [0, height]`
    pub fn contains(&self, p: &Point2D) -> bool {
        p.x >= 0.0 && p.x <= self.width as f64 && p.y >= 0.0 && p.y <= self.height as f64
    }

    /// The optical-space rectangle covered by this surface.
    pub fn optical_bounds(&self) -> OpticalBounds {
        let (hw, hh) = self.half_extents();
        OpticalBounds {
            min: Point2D::new(-hw, -hh),
            max: Point2D::new(hw, hh),
        }
    }
}

impl OpticalBounds {
    pub fn contains(&self, p: &Point2D) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}
