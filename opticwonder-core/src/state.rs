//! The control-panel snapshot a frame is rendered from.

use crate::error::OpticsError;
use crate::optics::{ElementKind, OpticalElement};
use crate::viewport::Viewport;
use serde::{Deserialize, Serialize};

/// Height multiplier range offered by the control panel.
pub const HEIGHT_SCALE_RANGE: (f64, f64) = (-2.0, 2.0);

/// Immutable snapshot of every input a frame depends on.
///
/// The host owns the live state; each render receives a copy of it. Builders
/// return a modified copy instead of mutating in place.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulationState {
    pub object_name: String,
    pub object_distance: f64,
    pub height_scale: f64,
    pub focal_length: f64,
    pub element: ElementKind,
    pub show_rays: bool,
    pub show_labels: bool,
    pub viewport: Viewport,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self {
            object_name: "triangle".to_string(),
            object_distance: -350.0,
            height_scale: 1.0,
            focal_length: -150.0,
            element: ElementKind::Mirror,
            show_rays: true,
            show_labels: true,
            viewport: Viewport::new(1280, 720),
        }
    }
}

impl SimulationState {
    pub fn from_json(json: &str) -> Result<Self, OpticsError> {
        serde_json::from_str(json).map_err(OpticsError::InvalidSnapshot)
    }

    pub fn to_json(&self) -> Result<String, OpticsError> {
        serde_json::to_string(self).map_err(OpticsError::InvalidSnapshot)
    }

    pub fn optical_element(&self) -> OpticalElement {
        OpticalElement {
            kind: self.element,
            focal_length: self.focal_length,
        }
    }

    pub fn with_object(mut self, name: impl Into<String>) -> Self {
        self.object_name = name.into();
        self
    }

    pub fn with_object_distance(mut self, distance: f64) -> Self {
        self.object_distance = distance;
        self
    }

    pub fn with_height_scale(mut self, scale: f64) -> Self {
        self.height_scale = scale;
        self
    }

    pub fn with_focal_length(mut self, focal_length: f64) -> Self {
        self.focal_length = focal_length;
        self
    }

    pub fn with_element(mut self, kind: ElementKind) -> Self {
        self.element = kind;
        self
    }

    pub fn with_rays(mut self, show: bool) -> Self {
        self.show_rays = show;
        self
    }

    pub fn with_labels(mut self, show: bool) -> Self {
        self.show_labels = show;
        self
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    /// Clamp inputs to what the control panel can produce: distance and
    /// focal length within `[-width, width]`, height scale within
    /// [`HEIGHT_SCALE_RANGE`]. Non-finite inputs fall back to the defaults.
    pub fn clamp_to_controls(mut self) -> Self {
        let defaults = Self::default();
        let span = self.viewport.width as f64;
        let clamp = |value: f64, fallback: f64, lo: f64, hi: f64| {
            if value.is_finite() {
                value.clamp(lo, hi)
            } else {
                fallback
            }
        };

        self.object_distance = clamp(self.object_distance, defaults.object_distance, -span, span);
        self.focal_length = clamp(self.focal_length, defaults.focal_length, -span, span);
        self.height_scale = clamp(
            self.height_scale,
            defaults.height_scale,
            HEIGHT_SCALE_RANGE.0,
            HEIGHT_SCALE_RANGE.1,
        );
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_concave_mirror_scene() {
        let state = SimulationState::default();
        assert_eq!(state.object_name, "triangle");
        assert_eq!(state.object_distance, -350.0);
        assert_eq!(state.focal_length, -150.0);
        assert_eq!(state.element, ElementKind::Mirror);
        assert!(state.show_rays && state.show_labels);
        assert_eq!(state.viewport, Viewport::new(1280, 720));
    }

    #[test]
    fn builders_return_modified_copies() {
        let base = SimulationState::default();
        let lens = base
            .clone()
            .with_element(ElementKind::Lens)
            .with_focal_length(120.0)
            .with_rays(false);
        assert_eq!(base.element, ElementKind::Mirror);
        assert_eq!(lens.optical_element(), OpticalElement::lens(120.0));
        assert!(!lens.show_rays);
    }

    #[test]
    fn clamp_to_controls_limits_ranges() {
        let state = SimulationState::default()
            .with_object_distance(-5000.0)
            .with_focal_length(f64::NAN)
            .with_height_scale(7.0)
            .clamp_to_controls();
        assert_eq!(state.object_distance, -1280.0);
        assert_eq!(state.focal_length, -150.0);
        assert_eq!(state.height_scale, 2.0);
    }

    #[test]
    fn snapshot_json_uses_camel_case_and_fills_defaults() {
        let state = SimulationState::from_json(
            r#"{"objectDistance": -200, "element": "lens", "showLabels": false}"#,
        )
        .unwrap();
        assert_eq!(state.object_distance, -200.0);
        assert_eq!(state.element, ElementKind::Lens);
        assert!(!state.show_labels);
        assert_eq!(state.object_name, "triangle");

        let json = state.to_json().unwrap();
        assert!(json.contains("\"focalLength\":-150"));
        assert_eq!(SimulationState::from_json(&json).unwrap(), state);
    }

    #[test]
    fn malformed_snapshot_is_rejected() {
        assert!(matches!(
            SimulationState::from_json(r#"{"objectDistance": "far"}"#),
            Err(OpticsError::InvalidSnapshot(_))
        ));
    }
}
