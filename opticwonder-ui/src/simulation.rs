use crate::canvas_surface::CanvasSurface;
use opticwonder_core::{
    display_name, ElementKind, FrameReport, ImageResult, OpticsError, OutlineCatalog,
    SceneComposer, SimulationState, Viewport, DEFAULT_RENDER_CONFIG,
};
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

fn to_js(e: OpticsError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Optics visualizer bound to one canvas.
///
/// Holds the live control-panel state; every setter clamps its input to the
/// range the controls offer. Nothing is drawn until [`render`](Self::render)
/// is called.
#[wasm_bindgen]
pub struct OpticsSimulation {
    surface: CanvasSurface,
    catalog: OutlineCatalog,
    state: SimulationState,
    last_image: Option<ImageResult>,
}

#[wasm_bindgen]
impl OpticsSimulation {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement) -> Result<OpticsSimulation, JsValue> {
        let viewport = Viewport::new(canvas.width(), canvas.height());
        let surface = CanvasSurface::new(canvas)?;
        let state = SimulationState::default()
            .with_viewport(viewport)
            .clamp_to_controls();
        log::info!(
            "OpticsSimulation created for {}x{} canvas",
            viewport.width,
            viewport.height
        );
        Ok(Self {
            surface,
            catalog: OutlineCatalog::builtin(),
            state,
            last_image: None,
        })
    }

    pub fn set_object_distance(&mut self, distance: f64) {
        self.update(|s| s.with_object_distance(distance));
    }

    pub fn set_height_scale(&mut self, scale: f64) {
        self.update(|s| s.with_height_scale(scale));
    }

    pub fn set_focal_length(&mut self, focal_length: f64) {
        self.update(|s| s.with_focal_length(focal_length));
    }

    /// `"mirror"` or `"lens"`.
    pub fn set_element(&mut self, kind: &str) -> Result<(), JsValue> {
        let kind: ElementKind =
            serde_json::from_value(serde_json::Value::String(kind.to_lowercase()))
                .map_err(|_| JsValue::from_str(&format!("Unknown element kind: {}", kind)))?;
        self.update(|s| s.with_element(kind));
        Ok(())
    }

    pub fn set_show_rays(&mut self, show: bool) {
        self.update(|s| s.with_rays(show));
    }

    pub fn set_show_labels(&mut self, show: bool) {
        self.update(|s| s.with_labels(show));
    }

    pub fn set_object(&mut self, name: &str) -> Result<(), JsValue> {
        if !self.catalog.contains(name) {
            return Err(to_js(OpticsError::UnknownObject(name.to_string())));
        }
        self.update(|s| s.with_object(name));
        Ok(())
    }

    /// Resize the canvas; slider ranges follow the new width.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.surface.resize(width, height);
        self.update(|s| s.with_viewport(Viewport::new(width, height)));
    }

    pub fn object_name(&self) -> String {
        self.state.object_name.clone()
    }

    /// Catalog keys, in picker order.
    pub fn object_names(&self) -> js_sys::Array {
        self.catalog.names().map(JsValue::from_str).collect()
    }

    /// Title-cased names, parallel to [`object_names`](Self::object_names).
    pub fn display_names(&self) -> js_sys::Array {
        self.catalog
            .names()
            .map(|name| JsValue::from_str(&display_name(name)))
            .collect()
    }

    /// Replace the whole state from a JSON snapshot.
    pub fn load_snapshot(&mut self, json: &str) -> Result<(), JsValue> {
        let state = SimulationState::from_json(json).map_err(to_js)?;
        if !self.catalog.contains(&state.object_name) {
            return Err(to_js(OpticsError::UnknownObject(state.object_name)));
        }
        self.surface.resize(state.viewport.width, state.viewport.height);
        self.state = state.clamp_to_controls();
        Ok(())
    }

    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        self.state.to_json().map_err(to_js)
    }

    /// Image computed by the last frame as JSON, `null` if it had none.
    pub fn image_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.last_image).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Draw a frame. If the object crossed the vertex and its shape has a
    /// mirrored counterpart, switch to it and draw once more.
    pub fn render(&mut self) -> Result<(), JsValue> {
        let report = self.compose()?;
        if let Some(swap) = report.shape_swap {
            if self.catalog.contains(swap) {
                log::info!("Switching shape {} -> {}", self.state.object_name, swap);
                self.update(|s| s.with_object(swap));
                self.compose()?;
            }
        }
        Ok(())
    }
}

impl OpticsSimulation {
    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    fn update(&mut self, f: impl FnOnce(SimulationState) -> SimulationState) {
        self.state = f(self.state.clone()).clamp_to_controls();
    }

    fn compose(&mut self) -> Result<FrameReport, JsValue> {
        let outline = self.catalog.get(&self.state.object_name).map_err(to_js)?;
        let composer = SceneComposer::new(&DEFAULT_RENDER_CONFIG);
        let report = composer.compose(&self.state, outline, &mut self.surface);
        self.last_image = report.image.filter(|i| i.is_finite());
        Ok(report)
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn simulation() -> OpticsSimulation {
        let document = web_sys::window().unwrap().document().unwrap();
        let canvas = document
            .create_element("canvas")
            .unwrap()
            .dyn_into::<HtmlCanvasElement>()
            .unwrap();
        canvas.set_width(1280);
        canvas.set_height(720);
        OpticsSimulation::new(canvas).unwrap()
    }

    #[wasm_bindgen_test]
    fn setters_are_clamped() {
        let mut sim = simulation();
        sim.set_object_distance(-9000.0);
        sim.set_height_scale(5.0);
        assert_eq!(sim.state().object_distance, -1280.0);
        assert_eq!(sim.state().height_scale, 2.0);
    }

    #[wasm_bindgen_test]
    fn unknown_names_are_rejected() {
        let mut sim = simulation();
        assert!(sim.set_object("unicorn").is_err());
        assert!(sim.set_element("prism").is_err());
        assert!(sim.set_element("Lens").is_ok());
        assert_eq!(sim.state().element, ElementKind::Lens);
    }

    #[wasm_bindgen_test]
    fn render_records_image() {
        let mut sim = simulation();
        sim.render().unwrap();
        let image: ImageResult = sim.last_image.unwrap();
        assert!((image.distance - -262.5).abs() < 1e-9);
    }
}
