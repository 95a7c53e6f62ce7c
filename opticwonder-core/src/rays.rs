//! Principal-ray construction.
//!
//! Which rays are drawn depends on the element kind, on which side of the
//! vertex the object sits and on whether it is beyond the focal point, i.e.
//! whether the principal rays converge to a real image. [`classify`] reduces
//! those inputs to a [`RayRegime`], and [`Construction::for_regime`] is the
//! single table that maps every regime to the set of rays to build.
//!
//! All rays are built from the object tip, the image tip and the focal
//! points, so every ray that is meant to pass through the image tip does so
//! exactly (as a line), whatever the side or sign of the focal length.

use crate::error::OpticsError;
use crate::optics::{ElementKind, ImageResult, OpticalElement};
use crate::outline::ObjectOutline;
use crate::points::Point2D;
use crate::surface::Color;

/// Side of the element's vertical axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisSide {
    /// `x < 0`
    Negative,
    /// `x > 0`
    Positive,
}

impl AxisSide {
    pub fn of(x: f64) -> Self {
        if x > 0.0 {
            AxisSide::Positive
        } else {
            AxisSide::Negative
        }
    }

    pub fn sign(&self) -> f64 {
        match self {
            AxisSide::Negative => -1.0,
            AxisSide::Positive => 1.0,
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            AxisSide::Negative => AxisSide::Positive,
            AxisSide::Positive => AxisSide::Negative,
        }
    }

    /// Strictly on this side; points on the axis belong to neither.
    pub fn contains(&self, x: f64) -> bool {
        match self {
            AxisSide::Negative => x < 0.0,
            AxisSide::Positive => x > 0.0,
        }
    }
}

/// Object position relative to the effective focal point `fe` on the
/// signed axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Reach {
    /// At or beyond the focal point, on its side of the vertex (`d <= fe < 0`
    /// or `d >= fe > 0`): the image is real.
    OutsideFocus,
    /// Between the vertex and the focal point, or on the other side of the
    /// vertex from it: the image is virtual.
    InsideFocus,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RayRegime {
    pub kind: ElementKind,
    pub side: AxisSide,
    pub reach: Reach,
}

/// Which rays to build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Construction {
    /// Lens, object outside the focal length: principal rays plus dotted
    /// convergence guides to the image tip. `mirrored` when the object sits
    /// on the positive side.
    LensOutsideFocus { mirrored: bool },
    /// Lens, object inside the focal length: principal rays only.
    LensInsideFocus { mirrored: bool },
    /// Mirror, object inside the focal length: reflected rays diverge and are
    /// extended back to the virtual image. `vertex_ray` adds the ray through
    /// the vertex when the object sits on the positive side.
    MirrorInsideFocus { vertex_ray: bool },
    /// Mirror, object outside the focal length: parallel, focal and 2F rays
    /// meeting at the image tip.
    MirrorOutsideFocus,
}

impl Construction {
    pub fn for_regime(regime: RayRegime) -> Self {
        use AxisSide::*;
        use ElementKind::*;
        use Reach::*;

        match (regime.kind, regime.side, regime.reach) {
            (Lens, Negative, OutsideFocus) => Construction::LensOutsideFocus { mirrored: false },
            (Lens, Positive, OutsideFocus) => Construction::LensOutsideFocus { mirrored: true },
            (Lens, Negative, InsideFocus) => Construction::LensInsideFocus { mirrored: false },
            (Lens, Positive, InsideFocus) => Construction::LensInsideFocus { mirrored: true },
            (Mirror, Negative, InsideFocus) => {
                Construction::MirrorInsideFocus { vertex_ray: false }
            }
            (Mirror, Positive, InsideFocus) => {
                Construction::MirrorInsideFocus { vertex_ray: true }
            }
            (Mirror, _, OutsideFocus) => Construction::MirrorOutsideFocus,
        }
    }
}

/// Classify an object distance for ray construction.
///
/// A converging element (`fe < 0` for an object at `x < 0`) forms a real
/// image once the object is at or past its focal point. A diverging one
/// never does, however far away the object is.
pub fn classify(element: &OpticalElement, object_distance: f64) -> RayRegime {
    let focus = element.effective_focal_length(object_distance);
    let beyond_focus = if focus < 0.0 {
        object_distance <= focus
    } else {
        object_distance >= focus
    };
    let reach = if beyond_focus {
        Reach::OutsideFocus
    } else {
        Reach::InsideFocus
    };
    RayRegime {
        kind: element.kind,
        side: AxisSide::of(object_distance),
        reach,
    }
}

/// What part a ray plays in the construction. Fixes its color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RayRole {
    /// Object-side ray travelling toward the element.
    Incident,
    /// Reflected/refracted ray passing through a focal point.
    ThroughFocus,
    /// Reflected/refracted ray leaving parallel to the axis.
    EmergentParallel,
    /// Ray through the lens center, the mirror vertex or the 2F point.
    Chief,
}

impl RayRole {
    pub fn color(&self) -> Color {
        match self {
            RayRole::Incident => Color::Red,
            RayRole::ThroughFocus => Color::Blue,
            RayRole::EmergentParallel | RayRole::Chief => Color::Green,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrokePattern {
    Solid,
    /// One dot every `every` march steps.
    Dotted { every: u32 },
    /// Solid on one side of the element's axis, dotted on `dotted_side`.
    SplitAtAxis { every: u32, dotted_side: AxisSide },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayStyle {
    pub color: Color,
    pub width: f64,
    pub pattern: StrokePattern,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Ray {
    pub points: Vec<Point2D>,
    pub style: RayStyle,
    /// Continue past the last point, along the last segment's direction,
    /// until the ray leaves the viewport.
    pub extend_to_infinity: bool,
    pub role: RayRole,
}

/// Dot spacing used for guides and virtual extensions.
pub const GUIDE_DOT_SPACING: u32 = 6;

const RAY_WIDTH: f64 = 1.0;

impl Ray {
    fn styled(role: RayRole, pattern: StrokePattern) -> RayStyle {
        RayStyle {
            color: role.color(),
            width: RAY_WIDTH,
            pattern,
        }
    }

    /// Finite solid segment.
    pub fn segment(from: Point2D, to: Point2D, role: RayRole) -> Self {
        Self {
            points: vec![from, to],
            style: Self::styled(role, StrokePattern::Solid),
            extend_to_infinity: false,
            role,
        }
    }

    /// Solid ray from `origin` along `direction` to the viewport boundary.
    pub fn extended(origin: Point2D, direction: Point2D, role: RayRole) -> Self {
        Self::extended_with(origin, direction, role, StrokePattern::Solid)
    }

    /// Finite dotted guide.
    pub fn guide(from: Point2D, to: Point2D, role: RayRole) -> Self {
        Self {
            points: vec![from, to],
            style: Self::styled(
                role,
                StrokePattern::Dotted {
                    every: GUIDE_DOT_SPACING,
                },
            ),
            extend_to_infinity: false,
            role,
        }
    }

    /// Infinite ray drawn dotted once it crosses to `dotted_side`.
    pub fn split(
        origin: Point2D,
        direction: Point2D,
        role: RayRole,
        dotted_side: AxisSide,
    ) -> Self {
        Self::extended_with(
            origin,
            direction,
            role,
            StrokePattern::SplitAtAxis {
                every: GUIDE_DOT_SPACING,
                dotted_side,
            },
        )
    }

    fn extended_with(
        origin: Point2D,
        direction: Point2D,
        role: RayRole,
        pattern: StrokePattern,
    ) -> Self {
        let unit = direction.normalized().unwrap_or(Point2D::new(1.0, 0.0));
        Self {
            points: vec![origin, origin.add(&unit)],
            style: Self::styled(role, pattern),
            extend_to_infinity: true,
            role,
        }
    }

    pub fn is_dotted(&self) -> bool {
        !matches!(self.style.pattern, StrokePattern::Solid)
    }

    /// Direction of the last segment, if it has one.
    pub fn direction(&self) -> Option<Point2D> {
        let n = self.points.len();
        if n < 2 {
            return None;
        }
        self.points[n - 1].sub(&self.points[n - 2]).normalized()
    }
}

/// The object as seen by the ray tracer.
#[derive(Clone, Copy, Debug)]
pub struct PlacedObject<'a> {
    pub distance: f64,
    pub height_scale: f64,
    pub outline: &'a ObjectOutline,
}

impl PlacedObject<'_> {
    /// Top of the object: outline height scaled by the height multiplier,
    /// standing on the axis at the object distance.
    pub fn tip(&self) -> Result<Point2D, OpticsError> {
        let height = self.outline.height()?;
        Ok(Point2D::new(self.distance, height * self.height_scale))
    }
}

/// Top of the image for an object whose top is at `object_tip`.
pub fn image_tip(object_tip: Point2D, image: &ImageResult) -> Point2D {
    Point2D::new(image.position, object_tip.y * image.magnification)
}

/// Point where the line through `a` and `b` crosses the element plane
/// (`x = 0`), or `None` if the line is parallel to it.
fn cross_element_plane(a: Point2D, b: Point2D) -> Option<Point2D> {
    let dx = b.x - a.x;
    if dx == 0.0 {
        return None;
    }
    let t = -a.x / dx;
    let p = Point2D::new(0.0, a.y + t * (b.y - a.y));
    p.is_finite().then_some(p)
}

/// Direction from `from` toward (or away from) `through`, flipped if needed
/// so that it travels along `travel` in x.
fn outgoing(from: Point2D, through: Point2D, travel: f64) -> Point2D {
    let d = through.sub(&from);
    let d = if d.x * travel < 0.0 { d.scale(-1.0) } else { d };
    d.normalized().unwrap_or(Point2D::new(travel, 0.0))
}

/// Build the principal rays for an object.
pub fn trace_rays(
    element: &OpticalElement,
    object: &PlacedObject<'_>,
    image: &ImageResult,
) -> Result<Vec<Ray>, OpticsError> {
    let tip = object.tip()?;
    Ok(trace_from_tip(element, tip, image))
}

/// [`trace_rays`] for an already-resolved object tip.
pub fn trace_from_tip(element: &OpticalElement, tip: Point2D, image: &ImageResult) -> Vec<Ray> {
    let regime = classify(element, tip.x);
    let construction = Construction::for_regime(regime);
    log::debug!("tracing rays: {:?} -> {:?}", regime, construction);

    let ctx = TraceContext::new(element, tip, image, regime.side);
    let rays = match construction {
        Construction::LensOutsideFocus { mirrored } => ctx.lens(true, mirrored),
        Construction::LensInsideFocus { mirrored } => ctx.lens(false, mirrored),
        Construction::MirrorInsideFocus { vertex_ray } => ctx.mirror_inside_focus(vertex_ray),
        Construction::MirrorOutsideFocus => ctx.mirror_outside_focus(),
    };

    log::debug!("traced {} rays", rays.len());
    rays
}

struct TraceContext {
    focal_length: f64,
    side: AxisSide,
    object_tip: Point2D,
    image_tip: Point2D,
    /// The principal rays actually meet (object not at the focal point).
    image_finite: bool,
    /// Where the parallel ray meets the element.
    parallel_hit: Point2D,
    /// Where the focal ray meets the element (height of the image tip).
    focal_hit: Point2D,
}

impl TraceContext {
    fn new(
        element: &OpticalElement,
        object_tip: Point2D,
        image: &ImageResult,
        side: AxisSide,
    ) -> Self {
        let image_tip = image_tip(object_tip, image);
        Self {
            focal_length: element.focal_length,
            side,
            object_tip,
            image_tip,
            image_finite: image.is_finite() && image_tip.is_finite(),
            parallel_hit: Point2D::new(0.0, object_tip.y),
            focal_hit: Point2D::new(0.0, image_tip.y),
        }
    }

    /// Lens: light travels away from the object side, which is the positive
    /// side when `mirrored`. The far focal point is at `f` on the object's
    /// side sign, i.e. `-f` for an object at `x < 0`.
    fn lens(&self, guides: bool, mirrored: bool) -> Vec<Ray> {
        let side = if mirrored {
            AxisSide::Positive
        } else {
            AxisSide::Negative
        };
        let travel = side.opposite().sign();
        let far_focus = Point2D::on_axis(self.focal_length * side.sign());
        let o = self.object_tip;
        let mut rays = vec![
            Ray::segment(o, self.parallel_hit, RayRole::Incident),
            Ray::extended(
                self.parallel_hit,
                outgoing(self.parallel_hit, far_focus, travel),
                RayRole::ThroughFocus,
            ),
            Ray::extended(o, Point2D::ORIGIN.sub(&o), RayRole::Chief),
        ];

        if !self.image_finite {
            return rays;
        }

        rays.push(Ray::segment(o, self.focal_hit, RayRole::Incident));
        rays.push(Ray::extended(
            self.focal_hit,
            Point2D::new(travel, 0.0),
            RayRole::EmergentParallel,
        ));

        if guides {
            let i = self.image_tip;
            rays.push(Ray::guide(self.focal_hit, i, RayRole::EmergentParallel));
            rays.push(Ray::guide(self.parallel_hit, i, RayRole::ThroughFocus));
            rays.push(Ray::guide(o, i, RayRole::Chief));
        }
        rays
    }

    /// Mirror, object inside the focal length: the reflected rays diverge;
    /// their backward extensions meet at the virtual image behind the mirror.
    fn mirror_inside_focus(&self, vertex_ray: bool) -> Vec<Ray> {
        let travel = self.side.sign();
        let focus = Point2D::on_axis(self.focal_length);
        let o = self.object_tip;
        let mut rays = vec![
            Ray::segment(o, self.parallel_hit, RayRole::Incident),
            Ray::extended(
                self.parallel_hit,
                outgoing(self.parallel_hit, focus, travel),
                RayRole::ThroughFocus,
            ),
        ];

        if vertex_ray {
            rays.push(Ray::segment(o, Point2D::ORIGIN, RayRole::Incident));
            rays.push(Ray::extended(
                Point2D::ORIGIN,
                Point2D::new(o.x, -o.y),
                RayRole::Chief,
            ));
        }

        if !self.image_finite {
            return rays;
        }

        let behind = self.side.opposite();
        let i = self.image_tip;
        rays.push(Ray::segment(o, self.focal_hit, RayRole::Incident));
        rays.push(Ray::extended(
            self.focal_hit,
            Point2D::new(travel, 0.0),
            RayRole::EmergentParallel,
        ));
        rays.push(Ray::split(
            self.parallel_hit,
            i.sub(&self.parallel_hit),
            RayRole::ThroughFocus,
            behind,
        ));
        rays.push(Ray::split(
            self.focal_hit,
            i.sub(&self.focal_hit),
            RayRole::EmergentParallel,
            behind,
        ));
        rays
    }

    /// Mirror, object outside the focal length: parallel ray through F,
    /// focal ray back parallel, and the 2F ray retracing itself; all three
    /// lines pass through the image tip.
    fn mirror_outside_focus(&self) -> Vec<Ray> {
        let travel = self.side.sign();
        let focus = Point2D::on_axis(self.focal_length);
        let center = Point2D::on_axis(2.0 * self.focal_length);
        let o = self.object_tip;
        let mut rays = vec![
            Ray::segment(o, self.parallel_hit, RayRole::Incident),
            Ray::extended(
                self.parallel_hit,
                outgoing(self.parallel_hit, focus, travel),
                RayRole::ThroughFocus,
            ),
        ];

        if self.image_finite {
            rays.push(Ray::segment(o, self.focal_hit, RayRole::Incident));
            rays.push(Ray::extended(
                self.focal_hit,
                Point2D::new(travel, 0.0),
                RayRole::EmergentParallel,
            ));
        }

        // Object standing on 2F: the ray through 2F is vertical and never
        // reaches the mirror.
        if let Some(hit) = cross_element_plane(o, center) {
            rays.push(Ray::segment(o, hit, RayRole::Incident));
            rays.push(Ray::extended(hit, outgoing(hit, center, travel), RayRole::Chief));
        }
        rays
    }
}
