//! Render configuration registry.
//!
//! Constants that shape a frame but are not part of the optics: numeric
//! safety bounds, marker sizes, fonts and text offsets.

/// Configuration for drawing a frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderConfig {
    /// Optical coordinates are clamped to `[-bound, bound]` before drawing.
    pub coordinate_bound: f64,
    /// Step length, in optical units, of the ray march.
    pub ray_step: f64,
    /// Hard ceiling on march iterations for one ray.
    pub max_ray_steps: usize,
    /// Radius of focal-point and 2F markers.
    pub marker_radius: f64,
    /// Radius of the object/image tip markers.
    pub tip_radius: f64,
    /// Stroke width of object and image outlines.
    pub outline_width: f64,
    pub axis_width: f64,
    pub lens_width: f64,
    /// Lens glyph half-width is `lens_glyph_scale / |f|` ...
    pub lens_glyph_scale: f64,
    /// ... but at least this ...
    pub lens_glyph_min: f64,
    /// ... and at most `width / 2 - lens_glyph_margin`.
    pub lens_glyph_margin: f64,
    pub info_font_px: f64,
    pub label_font_px: f64,
    /// Right margin of the info block, in surface pixels.
    pub info_right_margin: f64,
    /// Surface y of the first info line.
    pub info_top: f64,
    pub info_line_height: f64,
    /// Optical y of the focal-point labels (below the axis).
    pub focal_label_y: f64,
    pub object_label_dx: f64,
    pub image_label_dx: f64,
    pub focal_label_dx: f64,
}

pub static DEFAULT_RENDER_CONFIG: RenderConfig = RenderConfig {
    coordinate_bound: 2000.0,
    ray_step: 1.0,
    max_ray_steps: 4096,
    marker_radius: 5.0,
    tip_radius: 4.0,
    outline_width: 3.0,
    axis_width: 1.0,
    lens_width: 2.0,
    lens_glyph_scale: 4000.0,
    lens_glyph_min: 10.0,
    lens_glyph_margin: 20.0,
    info_font_px: 14.0,
    label_font_px: 14.0,
    info_right_margin: 10.0,
    info_top: 30.0,
    info_line_height: 20.0,
    focal_label_y: -15.0,
    object_label_dx: -20.0,
    image_label_dx: -35.0,
    focal_label_dx: -3.0,
};

impl Default for RenderConfig {
    fn default() -> Self {
        DEFAULT_RENDER_CONFIG
    }
}

impl RenderConfig {
    /// Half-width of the lens glyph for focal length `f` on a surface of
    /// `surface_width` pixels.
    pub fn lens_glyph_half_width(&self, focal_length: f64, surface_width: u32) -> f64 {
        let raw = if focal_length == 0.0 || !focal_length.is_finite() {
            self.lens_glyph_min
        } else {
            (self.lens_glyph_scale / focal_length.abs()).max(self.lens_glyph_min)
        };
        let ceiling =
            (surface_width as f64 / 2.0 - self.lens_glyph_margin).max(self.lens_glyph_min);
        raw.min(ceiling)
    }
}

/// Pairs of asymmetric shapes that face the element from opposite sides.
///
/// The first shape is used while the object sits on the negative side, the
/// second on the positive side.
pub static ORIENTATION_PAIRS: &[(&str, &str)] = &[("spider-man", "frog")];

/// Shape the picker should switch to so an asymmetric silhouette keeps facing
/// the element, or `None` when the current shape is fine.
pub fn orientation_swap(object_name: &str, object_distance: f64) -> Option<&'static str> {
    ORIENTATION_PAIRS.iter().find_map(|&(negative, positive)| {
        if object_name == negative && object_distance > 0.0 {
            Some(positive)
        } else if object_name == positive && object_distance < 0.0 {
            Some(negative)
        } else {
            None
        }
    })
}
