//! Optical space <-> surface space mapping.
//!
//! Optical space: origin at the element vertex, +x along the axis, +y up.
//! Surface space: origin at the top-left corner, +y down, bounded by the
//! viewport. The optical origin sits at the center of the surface.

use crate::points::Point2D;
use crate::viewport::Viewport;

/// Clamp a single coordinate to `[-bound, bound]`.
///
/// NaN maps to 0 so it can never reach a surface call.
pub fn clamp_coordinate(value: f64, bound: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-bound, bound)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateMapper {
    viewport: Viewport,
}

impl CoordinateMapper {
    pub fn new(viewport: Viewport) -> Self {
        Self { viewport }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Map an optical-space point to surface space.
    pub fn to_surface(&self, p: Point2D) -> Point2D {
        let (hw, hh) = self.viewport.half_extents();
        Point2D::new(hw + p.x, hh - p.y)
    }

    /// Inverse of [`to_surface`](Self::to_surface).
    pub fn to_optical(&self, s: Point2D) -> Point2D {
        let (hw, hh) = self.viewport.half_extents();
        Point2D::new(s.x - hw, hh - s.y)
    }

    /// Clamp both components of an optical-space point to `[-bound, bound]`.
    pub fn clamp_point(p: Point2D, bound: f64) -> Point2D {
        Point2D::new(clamp_coordinate(p.x, bound), clamp_coordinate(p.y, bound))
    }

    /// Whether an optical-space point maps inside the surface.
    pub fn is_visible(&self, p: Point2D) -> bool {
        self.viewport.contains(&self.to_surface(p))
    }

    /// Parametric interval `[t0, t1]` (with `t0 >= 0`) over which the ray
    /// `origin + t * direction` lies inside the viewport.
    ///
    /// Slab clipping against the optical bounds of the viewport. Returns
    /// `None` when the ray never enters the viewport.
    pub fn clip_ray(&self, origin: Point2D, direction: Point2D) -> Option<(f64, f64)> {
        let bounds = self.viewport.optical_bounds();
        let mut t0 = 0.0_f64;
        let mut t1 = f64::INFINITY;

        for (o, d, min, max) in [
            (origin.x, direction.x, bounds.min.x, bounds.max.x),
            (origin.y, direction.y, bounds.min.y, bounds.max.y),
        ] {
            if d == 0.0 {
                if o < min || o > max {
                    return None;
                }
                continue;
            }
            let (mut near, mut far) = ((min - o) / d, (max - o) / d);
            if near > far {
                std::mem::swap(&mut near, &mut far);
            }
            t0 = t0.max(near);
            t1 = t1.min(far);
            if t0 > t1 {
                return None;
            }
        }

        if t0.is_finite() && t1.is_finite() {
            Some((t0, t1))
        } else {
            None
        }
    }
}
