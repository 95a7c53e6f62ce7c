//! Primitive drawing in optical space.
//!
//! Every call clamps its optical coordinates, maps them through the
//! [`CoordinateMapper`] and only then touches the surface.

use crate::config::RenderConfig;
use crate::mapper::CoordinateMapper;
use crate::points::Point2D;
use crate::rays::{Ray, StrokePattern};
use crate::surface::{Color, Surface, TextStyle};
use crate::viewport::Viewport;

/// Outcome of one ray march.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MarchReport {
    /// March iterations taken.
    pub steps: usize,
    /// Dots actually sent to the surface.
    pub plotted: usize,
    /// The iteration ceiling stopped the march before the ray left the
    /// viewport.
    pub hit_cap: bool,
}

impl MarchReport {
    fn merge(self, other: MarchReport) -> MarchReport {
        MarchReport {
            steps: self.steps + other.steps,
            plotted: self.plotted + other.plotted,
            hit_cap: self.hit_cap || other.hit_cap,
        }
    }
}

pub struct PrimitiveRenderer<'a, S: Surface + ?Sized> {
    surface: &'a mut S,
    mapper: CoordinateMapper,
    config: &'a RenderConfig,
}

impl<'a, S: Surface + ?Sized> PrimitiveRenderer<'a, S> {
    pub fn new(surface: &'a mut S, config: &'a RenderConfig) -> Self {
        let (width, height) = surface.size();
        Self {
            surface,
            mapper: CoordinateMapper::new(Viewport::new(width, height)),
            config,
        }
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    pub fn clear(&mut self) {
        self.surface.clear();
    }

    fn map(&self, p: Point2D) -> Point2D {
        self.mapper
            .to_surface(CoordinateMapper::clamp_point(p, self.config.coordinate_bound))
    }

    pub fn draw_segment(&mut self, a: Point2D, b: Point2D, color: Color, width: f64) {
        let (a, b) = (self.map(a), self.map(b));
        self.surface.stroke_line(a, b, color, width);
    }

    pub fn draw_polyline(&mut self, points: &[Point2D], color: Color, width: f64) {
        for pair in points.windows(2) {
            self.draw_segment(pair[0], pair[1], color, width);
        }
    }

    pub fn draw_circle(&mut self, center: Point2D, radius: f64, color: Color) {
        let center = self.map(center);
        self.surface.fill_circle(center, radius, color);
    }

    pub fn draw_ellipse(
        &mut self,
        center: Point2D,
        radius_x: f64,
        radius_y: f64,
        color: Color,
        width: f64,
    ) {
        let center = self.map(center);
        self.surface.stroke_ellipse(center, radius_x, radius_y, color, width);
    }

    pub fn draw_text(&mut self, at: Point2D, text: &str, style: &TextStyle) {
        let at = self.map(at);
        self.surface.fill_text(at, text, style);
    }

    /// Text anchored directly in surface space (overlays).
    pub fn draw_screen_text(&mut self, at: Point2D, text: &str, style: &TextStyle) {
        self.surface.fill_text(at, text, style);
    }

    /// Solid ray from `origin` along `direction` until it leaves the viewport.
    pub fn draw_ray(
        &mut self,
        origin: Point2D,
        direction: Point2D,
        color: Color,
        width: f64,
    ) -> MarchReport {
        self.draw_patterned_ray(origin, direction, color, width, 1, |_| false)
    }

    /// Ray march where samples for which `dotted` holds are thinned to one
    /// dot every `dot_spacing` steps; all other samples are plotted.
    pub fn draw_patterned_ray(
        &mut self,
        origin: Point2D,
        direction: Point2D,
        color: Color,
        width: f64,
        dot_spacing: u32,
        dotted: impl Fn(Point2D) -> bool,
    ) -> MarchReport {
        self.march(origin, direction, f64::INFINITY, color, width, dot_spacing, dotted)
    }

    /// Draw a traced ray: its segments, then its extension if it has one.
    pub fn draw(&mut self, ray: &Ray) -> MarchReport {
        let style = ray.style;
        let mut report = MarchReport::default();

        for pair in ray.points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let segment = match style.pattern {
                StrokePattern::Solid => {
                    self.draw_segment(a, b, style.color, style.width);
                    MarchReport::default()
                }
                pattern => {
                    let length = b.sub(&a).length();
                    let (every, dotted) = pattern_predicate(pattern);
                    self.march(a, b.sub(&a), length, style.color, style.width, every, dotted)
                }
            };
            report = report.merge(segment);
        }

        if ray.extend_to_infinity {
            if let (Some(&last), Some(direction)) = (ray.points.last(), ray.direction()) {
                let (every, dotted) = pattern_predicate(style.pattern);
                let extension = self.march(
                    last,
                    direction,
                    f64::INFINITY,
                    style.color,
                    style.width,
                    every,
                    dotted,
                );
                report = report.merge(extension);
            }
        }

        report
    }

    /// Walk from `origin` along `direction` in fixed steps for at most
    /// `max_length` optical units, plotting each visible sample, until the
    /// walk leaves the viewport or hits the iteration ceiling.
    #[allow(clippy::too_many_arguments)]
    fn march(
        &mut self,
        origin: Point2D,
        direction: Point2D,
        max_length: f64,
        color: Color,
        width: f64,
        dot_spacing: u32,
        dotted: impl Fn(Point2D) -> bool,
    ) -> MarchReport {
        let mut report = MarchReport::default();
        let Some(unit) = direction.normalized() else {
            return report;
        };
        let origin = CoordinateMapper::clamp_point(origin, self.config.coordinate_bound);
        let Some((t_enter, t_exit)) = self.mapper.clip_ray(origin, unit) else {
            return report;
        };
        let t_end = t_exit.min(max_length);
        let spacing = dot_spacing.max(1) as usize;
        let step = self.config.ray_step;

        let mut t = t_enter;
        while t <= t_end {
            if report.steps >= self.config.max_ray_steps {
                report.hit_cap = true;
                log::debug!("ray march hit the {} step cap", self.config.max_ray_steps);
                break;
            }
            let p = origin.add(&unit.scale(t));
            if !dotted(p) || report.steps % spacing == 0 {
                let s = self.map(p);
                self.surface.plot(Point2D::new(s.x.round(), s.y.round()), color, width);
                report.plotted += 1;
            }
            report.steps += 1;
            t += step;
        }

        report
    }
}

type DotPredicate = Box<dyn Fn(Point2D) -> bool>;

/// Dot spacing and "is this sample dotted" test for a stroke pattern.
fn pattern_predicate(pattern: StrokePattern) -> (u32, DotPredicate) {
    match pattern {
        StrokePattern::Solid => (1, Box::new(|_: Point2D| false) as DotPredicate),
        StrokePattern::Dotted { every } => (every, Box::new(|_: Point2D| true) as DotPredicate),
        StrokePattern::SplitAtAxis { every, dotted_side } => (
            every,
            Box::new(move |p: Point2D| dotted_side.contains(p.x)) as DotPredicate,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rays::{AxisSide, RayRole};
    use crate::surface::{DrawCommand, RecordingSurface};

    fn plots(surface: &RecordingSurface) -> Vec<Point2D> {
        surface
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Plot { at, .. } => Some(*at),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn segment_is_mapped_to_surface_space() {
        let mut surface = RecordingSurface::new(1280, 720);
        let config = RenderConfig::default();
        PrimitiveRenderer::new(&mut surface, &config).draw_segment(
            Point2D::new(-100.0, 50.0),
            Point2D::new(0.0, 0.0),
            Color::Red,
            3.0,
        );
        assert_eq!(
            surface.commands()[0],
            DrawCommand::Line {
                from: Point2D::new(540.0, 310.0),
                to: Point2D::new(640.0, 360.0),
                color: Color::Red,
                width: 3.0,
            }
        );
    }

    #[test]
    fn huge_coordinates_are_clamped_before_drawing() {
        let mut surface = RecordingSurface::new(1280, 720);
        let config = RenderConfig::default();
        let mut renderer = PrimitiveRenderer::new(&mut surface, &config);
        renderer.draw_circle(Point2D::new(1e12, f64::NEG_INFINITY), 5.0, Color::Green);
        renderer.draw_text(Point2D::new(f64::NAN, 0.0), "F", &TextStyle::new(Color::Black, 14.0));

        let anchors: Vec<Point2D> = surface.commands().iter().flat_map(|c| c.anchors()).collect();
        assert_eq!(anchors[0], Point2D::new(640.0 + 2000.0, 360.0 + 2000.0));
        assert_eq!(anchors[1], Point2D::new(640.0, 360.0));
    }

    #[test]
    fn horizontal_ray_runs_to_viewport_edge() {
        let mut surface = RecordingSurface::new(200, 100);
        let config = RenderConfig::default();
        let report = PrimitiveRenderer::new(&mut surface, &config).draw_ray(
            Point2D::ORIGIN,
            Point2D::new(1.0, 0.0),
            Color::Blue,
            1.0,
        );
        assert!(!report.hit_cap);
        assert_eq!(report.steps, 101);
        assert_eq!(report.plotted, 101);
        let points = plots(&surface);
        assert_eq!(points.first(), Some(&Point2D::new(100.0, 50.0)));
        assert_eq!(points.last(), Some(&Point2D::new(200.0, 50.0)));
    }

    #[test]
    fn ray_march_terminates_for_any_direction() {
        let config = RenderConfig::default();
        for i in 0..64 {
            let angle = i as f64 * std::f64::consts::TAU / 64.0;
            let direction = Point2D::new(angle.cos(), angle.sin()).scale(1e-3 + i as f64);
            for origin in [
                Point2D::ORIGIN,
                Point2D::new(-1500.0, 300.0),
                Point2D::new(1e9, -1e9),
            ] {
                let mut surface = RecordingSurface::new(1280, 720);
                let report = PrimitiveRenderer::new(&mut surface, &config)
                    .draw_ray(origin, direction, Color::Red, 1.0);
                assert!(report.steps <= config.max_ray_steps);
                for p in plots(&surface) {
                    let optical = CoordinateMapper::new(Viewport::new(1280, 720)).to_optical(p);
                    assert!(optical.x.abs() <= config.coordinate_bound);
                    assert!(optical.y.abs() <= config.coordinate_bound);
                }
            }
        }
    }

    #[test]
    fn ray_march_respects_iteration_cap() {
        let config = RenderConfig {
            max_ray_steps: 10,
            ..RenderConfig::default()
        };
        let mut surface = RecordingSurface::new(1280, 720);
        let report = PrimitiveRenderer::new(&mut surface, &config).draw_ray(
            Point2D::ORIGIN,
            Point2D::new(0.0, 1.0),
            Color::Red,
            1.0,
        );
        assert!(report.hit_cap);
        assert_eq!(report.steps, 10);
    }

    #[test]
    fn zero_direction_draws_nothing() {
        let mut surface = RecordingSurface::new(1280, 720);
        let config = RenderConfig::default();
        let report = PrimitiveRenderer::new(&mut surface, &config).draw_ray(
            Point2D::ORIGIN,
            Point2D::ORIGIN,
            Color::Red,
            1.0,
        );
        assert_eq!(report, MarchReport::default());
        assert!(surface.commands().is_empty());
    }

    #[test]
    fn ray_starting_off_screen_enters_viewport() {
        let mut surface = RecordingSurface::new(200, 100);
        let config = RenderConfig::default();
        let report = PrimitiveRenderer::new(&mut surface, &config).draw_ray(
            Point2D::new(-1000.0, 0.0),
            Point2D::new(1.0, 0.0),
            Color::Red,
            1.0,
        );
        assert_eq!(report.steps, 201);
        assert_eq!(plots(&surface).first(), Some(&Point2D::new(0.0, 50.0)));
    }

    #[test]
    fn split_ray_is_solid_on_one_side_and_dotted_on_the_other() {
        let mut surface = RecordingSurface::new(200, 100);
        let config = RenderConfig::default();
        let report = PrimitiveRenderer::new(&mut surface, &config).draw_patterned_ray(
            Point2D::new(-100.0, 0.0),
            Point2D::new(1.0, 0.0),
            Color::Green,
            1.0,
            5,
            |p| AxisSide::Positive.contains(p.x),
        );
        let points = plots(&surface);
        let solid = points.iter().filter(|p| p.x <= 100.0).count();
        let dotted = points.iter().filter(|p| p.x > 100.0).count();
        assert_eq!(solid, 101);
        assert_eq!(dotted, 20);
        assert_eq!(report.plotted, points.len());
    }

    #[test]
    fn dotted_guide_stops_at_its_end_point() {
        let mut surface = RecordingSurface::new(400, 400);
        let config = RenderConfig::default();
        let guide = Ray::guide(Point2D::ORIGIN, Point2D::new(60.0, 0.0), RayRole::Chief);
        let report = PrimitiveRenderer::new(&mut surface, &config).draw(&guide);
        assert_eq!(report.steps, 61);
        assert_eq!(report.plotted, 11);
        assert!(plots(&surface).iter().all(|p| p.x <= 260.0));
    }

    #[test]
    fn extended_ray_draws_segment_then_extension() {
        let mut surface = RecordingSurface::new(200, 100);
        let config = RenderConfig::default();
        let ray = Ray::extended(Point2D::ORIGIN, Point2D::new(-3.0, 0.0), RayRole::ThroughFocus);
        let report = PrimitiveRenderer::new(&mut surface, &config).draw(&ray);
        assert_eq!(surface.count_where(|c| matches!(c, DrawCommand::Line { .. })), 1);
        assert_eq!(report.steps, 100);
        assert!(plots(&surface).iter().all(|p| p.x <= 99.0 && p.x >= 0.0));
    }
}
