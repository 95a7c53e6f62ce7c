//! Frame composition.
//!
//! [`SceneComposer::compose`] paints one frame from a [`SimulationState`]
//! snapshot, back to front: axis, lens glyph, info text, object, image,
//! focal markers, rays, labels. Frame-local failures are reported in the
//! returned [`FrameReport`] instead of aborting the frame.

use crate::config::{orientation_swap, RenderConfig};
use crate::error::OpticsError;
use crate::optics::{compute_image, ElementKind, ImageResult, OpticalElement};
use crate::outline::ObjectOutline;
use crate::points::Point2D;
use crate::rays::{image_tip, trace_from_tip, PlacedObject};
use crate::renderer::PrimitiveRenderer;
use crate::state::SimulationState;
use crate::surface::{Color, Surface, TextStyle};
use crate::viewport::Viewport;

/// What happened while composing a frame.
#[derive(Debug, Default)]
pub struct FrameReport {
    /// Solved image, if the configuration had one.
    pub image: Option<ImageResult>,
    /// Set when the element equation had no solution; image and rays were
    /// skipped.
    pub degenerate: Option<OpticsError>,
    /// Set when the outline could not be drawn; object, image and rays were
    /// skipped.
    pub outline_error: Option<OpticsError>,
    pub rays_drawn: usize,
    /// Shape the picker should switch to, see
    /// [`orientation_swap`](crate::config::orientation_swap).
    pub shape_swap: Option<&'static str>,
}

impl FrameReport {
    /// The image was drawn.
    pub fn has_image(&self) -> bool {
        self.image.is_some_and(|i| i.is_finite()) && self.outline_error.is_none()
    }
}

/// Info overlay lines, top to bottom.
pub fn info_lines(viewport: Viewport, image: Option<&ImageResult>) -> Vec<String> {
    let mut lines = vec![format!("{}x{}", viewport.width, viewport.height)];
    match image.filter(|i| i.is_finite()) {
        Some(image) => {
            lines.push(format!("Image Distance: {:.1} units", image.distance.abs()));
            lines.push(format!("Magnification: {:.2}x", image.magnification.abs()));
            lines.push(format!("Image Type: {}", image.kind_label()));
        }
        None => {
            lines.push("Image Distance: undefined".to_string());
            lines.push("Magnification: undefined".to_string());
            lines.push("Image Type: undefined".to_string());
        }
    }
    lines
}

pub struct SceneComposer<'c> {
    config: &'c RenderConfig,
}

impl<'c> SceneComposer<'c> {
    pub fn new(config: &'c RenderConfig) -> Self {
        Self { config }
    }

    /// Compose one frame of `state` onto `surface`, using `outline` as the
    /// object silhouette.
    pub fn compose<S: Surface + ?Sized>(
        &self,
        state: &SimulationState,
        outline: &ObjectOutline,
        surface: &mut S,
    ) -> FrameReport {
        let config = self.config;
        let element = state.optical_element();
        let mut report = FrameReport {
            shape_swap: orientation_swap(&state.object_name, state.object_distance),
            ..FrameReport::default()
        };

        let image = match compute_image(&element, state.object_distance) {
            Ok(image) => {
                if !image.is_finite() {
                    log::debug!(
                        "object at the focal point (d={}), image at infinity",
                        state.object_distance
                    );
                }
                report.image = Some(image);
                Some(image)
            }
            Err(e) => {
                log::warn!("{}", e);
                report.degenerate = Some(e);
                None
            }
        };

        let mut renderer = PrimitiveRenderer::new(surface, config);
        renderer.clear();
        let viewport = renderer.mapper().viewport();

        self.draw_axis(&mut renderer, viewport);
        if element.kind == ElementKind::Lens {
            self.draw_lens_glyph(&mut renderer, &element, viewport);
        }
        self.draw_info(&mut renderer, viewport, image.as_ref());

        let object = PlacedObject {
            distance: state.object_distance,
            height_scale: state.height_scale,
            outline,
        };
        let object_tip = match self.draw_object(&mut renderer, &object) {
            Ok(tip) => Some(tip),
            Err(e) => {
                log::warn!("{}", e);
                report.outline_error = Some(e);
                None
            }
        };

        let image_top = match (object_tip, image) {
            (Some(tip), Some(image)) if image.is_finite() => {
                self.draw_image(&mut renderer, &object, tip, &image)
            }
            _ => None,
        };

        self.draw_focal_markers(&mut renderer, &element);

        if state.show_rays {
            if let (Some(tip), Some(image)) = (object_tip, image) {
                for ray in trace_from_tip(&element, tip, &image) {
                    let march = renderer.draw(&ray);
                    if march.hit_cap {
                        log::debug!("{:?} ray cut off by the step cap", ray.role);
                    }
                    report.rays_drawn += 1;
                }
            }
        }

        if state.show_labels {
            self.draw_labels(&mut renderer, &element, object_tip, image_top, image.as_ref());
        }

        report
    }

    fn draw_axis<S: Surface + ?Sized>(&self, r: &mut PrimitiveRenderer<'_, S>, viewport: Viewport) {
        let (hw, hh) = viewport.half_extents();
        let width = self.config.axis_width;
        r.draw_segment(Point2D::new(-hw, 0.0), Point2D::new(hw, 0.0), Color::Black, width);
        r.draw_segment(Point2D::new(0.0, -hh), Point2D::new(0.0, hh), Color::Black, width);
    }

    fn draw_lens_glyph<S: Surface + ?Sized>(
        &self,
        r: &mut PrimitiveRenderer<'_, S>,
        element: &OpticalElement,
        viewport: Viewport,
    ) {
        let (_, hh) = viewport.half_extents();
        let half_width = self.config.lens_glyph_half_width(element.focal_length, viewport.width);
        r.draw_ellipse(Point2D::ORIGIN, half_width, hh, Color::Blue, self.config.lens_width);
    }

    fn draw_info<S: Surface + ?Sized>(
        &self,
        r: &mut PrimitiveRenderer<'_, S>,
        viewport: Viewport,
        image: Option<&ImageResult>,
    ) {
        let config = self.config;
        r.draw_text(
            Point2D::new(2.0, 5.0),
            "(0,0)",
            &TextStyle::new(Color::Black, config.info_font_px),
        );

        let style = TextStyle::new(Color::Black, config.info_font_px).right_aligned();
        let x = viewport.width as f64 - config.info_right_margin;
        for (i, line) in info_lines(viewport, image).iter().enumerate() {
            let y = config.info_top + i as f64 * config.info_line_height;
            r.draw_screen_text(Point2D::new(x, y), line, &style);
        }
    }

    /// Returns the object tip.
    fn draw_object<S: Surface + ?Sized>(
        &self,
        r: &mut PrimitiveRenderer<'_, S>,
        object: &PlacedObject<'_>,
    ) -> Result<Point2D, OpticsError> {
        let strokes = object.outline.strokes()?;
        let tip = object.tip()?;

        for stroke in &strokes {
            let placed: Vec<Point2D> = stroke
                .iter()
                .map(|p| Point2D::new(object.distance + p.x, p.y * object.height_scale))
                .collect();
            r.draw_polyline(&placed, Color::Red, self.config.outline_width);
        }
        self.draw_tip(r, tip);
        Ok(tip)
    }

    /// Returns the image tip, or `None` if the outline has nothing to draw.
    fn draw_image<S: Surface + ?Sized>(
        &self,
        r: &mut PrimitiveRenderer<'_, S>,
        object: &PlacedObject<'_>,
        object_tip: Point2D,
        image: &ImageResult,
    ) -> Option<Point2D> {
        let strokes = object.outline.strokes().ok()?;
        let m = image.magnification;

        for stroke in &strokes {
            let placed: Vec<Point2D> = stroke
                .iter()
                .map(|p| Point2D::new(image.position + p.x * m, p.y * object.height_scale * m))
                .collect();
            r.draw_polyline(&placed, Color::Blue, self.config.outline_width);
        }
        let tip = image_tip(object_tip, image);
        self.draw_tip(r, tip);
        Some(tip)
    }

    /// Tip marker plus a guide down to the axis.
    fn draw_tip<S: Surface + ?Sized>(&self, r: &mut PrimitiveRenderer<'_, S>, tip: Point2D) {
        r.draw_circle(tip, self.config.tip_radius, Color::Purple);
        r.draw_segment(tip, Point2D::on_axis(tip.x), Color::Black, self.config.axis_width);
    }

    fn draw_focal_markers<S: Surface + ?Sized>(
        &self,
        r: &mut PrimitiveRenderer<'_, S>,
        element: &OpticalElement,
    ) {
        for p in element.focal_points() {
            r.draw_circle(p, self.config.marker_radius, Color::Green);
        }
        for p in element.double_focal_points() {
            r.draw_circle(p, self.config.marker_radius, Color::Purple);
        }
    }

    fn draw_labels<S: Surface + ?Sized>(
        &self,
        r: &mut PrimitiveRenderer<'_, S>,
        element: &OpticalElement,
        object_tip: Option<Point2D>,
        image_tip: Option<Point2D>,
        image: Option<&ImageResult>,
    ) {
        let config = self.config;
        let style = TextStyle::new(Color::Black, config.label_font_px);

        if let Some(tip) = object_tip {
            r.draw_text(Point2D::new(tip.x + config.object_label_dx, tip.y), "Object", &style);
        }
        if let (Some(tip), Some(image)) = (image_tip, image) {
            let label = format!("{} Image", image.kind_label());
            r.draw_text(Point2D::new(tip.x + config.image_label_dx, tip.y), &label, &style);
        }

        // Primed labels mark the lens's far-side focal points.
        const FOCAL_LABELS: [(&str, &str); 2] = [("F", "2F"), ("F'", "2F'")];
        let focal = element.focal_points();
        let double = element.double_focal_points();
        for ((f, f2), (f_label, f2_label)) in focal.iter().zip(&double).zip(FOCAL_LABELS) {
            let y = config.focal_label_y;
            r.draw_text(Point2D::new(f.x + config.focal_label_dx, y), f_label, &style);
            r.draw_text(Point2D::new(f2.x + config.focal_label_dx, y), f2_label, &style);
        }
    }
}
