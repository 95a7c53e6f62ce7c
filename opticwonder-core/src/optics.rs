//! Thin mirror / thin lens image computation.
//!
//! Sign convention: the element sits at x = 0. A negative focal length is a
//! converging concave mirror with the object on the negative side. For a lens
//! the same equation is reused, with the focal length negated when the object
//! sits on the positive side, and the image is drawn mirrored in x.

use crate::error::OpticsError;
use crate::points::Point2D;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Mirror,
    Lens,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OpticalElement {
    pub kind: ElementKind,
    pub focal_length: f64,
}

/// Result of solving the element equation for one object distance.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ImageResult {
    /// Signed image distance as given by the element equation.
    pub distance: f64,
    /// Signed magnification `-distance / object_distance`.
    pub magnification: f64,
    /// `distance > 0`
    pub is_virtual: bool,
    /// Axis x at which the image is drawn (`-distance` for a lens).
    pub position: f64,
}

impl OpticalElement {
    pub fn mirror(focal_length: f64) -> Self {
        Self {
            kind: ElementKind::Mirror,
            focal_length,
        }
    }

    pub fn lens(focal_length: f64) -> Self {
        Self {
            kind: ElementKind::Lens,
            focal_length,
        }
    }

    /// Focal points on the axis: one for a mirror, two (at `±f`) for a lens.
    pub fn focal_points(&self) -> Vec<Point2D> {
        let f = self.focal_length;
        match self.kind {
            ElementKind::Mirror => vec![Point2D::on_axis(f)],
            ElementKind::Lens => vec![Point2D::on_axis(f), Point2D::on_axis(-f)],
        }
    }

    /// Focal length seen by an object at `object_distance`: the lens
    /// equation is solved with `-f` when the object sits on the positive side.
    pub fn effective_focal_length(&self, object_distance: f64) -> f64 {
        match self.kind {
            ElementKind::Lens if object_distance > 0.0 => -self.focal_length,
            _ => self.focal_length,
        }
    }

    /// Twice-focal-length markers, laid out like [`focal_points`](Self::focal_points).
    pub fn double_focal_points(&self) -> Vec<Point2D> {
        self.focal_points()
            .into_iter()
            .map(|p| p.scale(2.0))
            .collect()
    }
}

/// Solve the element equation for an object at `object_distance`.
pub fn compute_image(
    element: &OpticalElement,
    object_distance: f64,
) -> Result<ImageResult, OpticsError> {
    let f = element.focal_length;
    if f == 0.0 || object_distance == 0.0 {
        return Err(OpticsError::DegenerateConfiguration {
            object_distance,
            focal_length: f,
        });
    }

    let effective_focal = element.effective_focal_length(object_distance);
    let distance = 1.0 / (1.0 / effective_focal - 1.0 / object_distance);
    let magnification = -distance / object_distance;
    let position = match element.kind {
        ElementKind::Mirror => distance,
        ElementKind::Lens => -distance,
    };

    Ok(ImageResult {
        distance,
        magnification,
        is_virtual: distance > 0.0,
        position,
    })
}

impl ImageResult {
    pub fn is_upright(&self) -> bool {
        self.magnification > 0.0
    }

    pub fn is_magnified(&self) -> bool {
        self.magnification.abs() > 1.0
    }

    /// Both the position and the magnification are finite, i.e. the
    /// principal rays actually meet.
    pub fn is_finite(&self) -> bool {
        self.distance.is_finite() && self.magnification.is_finite()
    }

    pub fn kind_label(&self) -> &'static str {
        if self.is_virtual {
            "Virtual"
        } else {
            "Real"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn mirror_real_image_outside_focal_length() {
        let image = compute_image(&OpticalElement::mirror(-150.0), -350.0).unwrap();
        assert!((image.distance - -262.5).abs() < EPS);
        assert!((image.magnification - -0.75).abs() < EPS);
        assert!(!image.is_virtual);
        assert!(!image.is_upright());
        assert_eq!(image.position, image.distance);
    }

    #[test]
    fn mirror_virtual_image_inside_focal_length() {
        let image = compute_image(&OpticalElement::mirror(-150.0), -50.0).unwrap();
        assert!((image.distance - 75.0).abs() < EPS);
        assert!((image.magnification - 1.5).abs() < EPS);
        assert!(image.is_virtual);
        assert!(image.is_upright());
        assert!(image.is_magnified());
    }

    #[test]
    fn lens_positive_side_uses_negated_focal_length() {
        let image = compute_image(&OpticalElement::lens(150.0), 300.0).unwrap();
        assert!((image.distance - -100.0).abs() < EPS);
        assert!((image.magnification - 1.0 / 3.0).abs() < EPS);
        assert!((image.position - 100.0).abs() < EPS);

        // The plain mirror equation would have given +300.
        let mirror = compute_image(&OpticalElement::mirror(150.0), 300.0).unwrap();
        assert!((mirror.distance - 300.0).abs() < EPS);
    }

    #[test]
    fn lens_negative_side_matches_mirror_equation() {
        let lens = compute_image(&OpticalElement::lens(-150.0), -350.0).unwrap();
        let mirror = compute_image(&OpticalElement::mirror(-150.0), -350.0).unwrap();
        assert_eq!(lens.distance, mirror.distance);
        assert_eq!(lens.magnification, mirror.magnification);
        assert_eq!(lens.position, -lens.distance);
    }

    #[test]
    fn zero_inputs_are_degenerate() {
        let err = compute_image(&OpticalElement::mirror(-150.0), 0.0).unwrap_err();
        assert!(err.is_degenerate());
        let err = compute_image(&OpticalElement::lens(0.0), -100.0).unwrap_err();
        assert!(err.is_degenerate());
    }

    #[test]
    fn object_at_focal_point_gives_non_finite_image() {
        let image = compute_image(&OpticalElement::mirror(-150.0), -150.0).unwrap();
        assert!(!image.is_finite());
    }

    #[test]
    fn lens_has_two_focal_points() {
        let lens = OpticalElement::lens(-150.0);
        assert_eq!(
            lens.focal_points(),
            vec![Point2D::on_axis(-150.0), Point2D::on_axis(150.0)]
        );
        assert_eq!(
            lens.double_focal_points(),
            vec![Point2D::on_axis(-300.0), Point2D::on_axis(300.0)]
        );
        assert_eq!(OpticalElement::mirror(-150.0).focal_points().len(), 1);
    }
}
