use opticwonder_core::{Color, Point2D, Surface, TextStyle};
use std::f64::consts::TAU;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Get 2D rendering context from canvas.
pub fn get_2d_context(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    Ok(canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("No 2d context"))?
        .dyn_into::<CanvasRenderingContext2d>()?)
}

/// [`Surface`] backed by a canvas 2D context.
///
/// The size is read from the canvas on every call, so resizing the element
/// is picked up by the next frame. Context calls that can fail are logged
/// and skipped.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let context = get_2d_context(&canvas)?;
        Ok(Self { canvas, context })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    pub fn resize(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn warn_on_err(op: &str, result: Result<(), JsValue>) {
        if let Err(e) = result {
            log::warn!("canvas {} failed: {:?}", op, e);
        }
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn clear(&mut self) {
        let (width, height) = self.size();
        self.context.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn stroke_line(&mut self, from: Point2D, to: Point2D, color: Color, width: f64) {
        let ctx = &self.context;
        ctx.begin_path();
        ctx.move_to(from.x, from.y);
        ctx.line_to(to.x, to.y);
        ctx.set_stroke_style_str(color.css());
        ctx.set_line_width(width);
        ctx.stroke();
    }

    fn plot(&mut self, at: Point2D, color: Color, size: f64) {
        self.context.set_fill_style_str(color.css());
        self.context.fill_rect(at.x, at.y, size, size);
    }

    fn fill_circle(&mut self, center: Point2D, radius: f64, color: Color) {
        let ctx = &self.context;
        ctx.begin_path();
        Self::warn_on_err("arc", ctx.arc(center.x, center.y, radius, 0.0, TAU));
        ctx.set_fill_style_str(color.css());
        ctx.fill();
    }

    fn stroke_ellipse(
        &mut self,
        center: Point2D,
        radius_x: f64,
        radius_y: f64,
        color: Color,
        width: f64,
    ) {
        let ctx = &self.context;
        ctx.begin_path();
        Self::warn_on_err(
            "ellipse",
            ctx.ellipse(center.x, center.y, radius_x, radius_y, 0.0, 0.0, TAU),
        );
        ctx.set_stroke_style_str(color.css());
        ctx.set_line_width(width);
        ctx.stroke();
    }

    fn fill_text(&mut self, at: Point2D, text: &str, style: &TextStyle) {
        let ctx = &self.context;
        ctx.set_font(&format!("{}px Arial", style.font_px));
        ctx.set_text_align(style.align.css());
        ctx.set_fill_style_str(style.color.css());
        Self::warn_on_err("fill_text", ctx.fill_text(text, at.x, at.y));
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn canvas(width: u32, height: u32) -> HtmlCanvasElement {
        let document = web_sys::window().unwrap().document().unwrap();
        let canvas = document
            .create_element("canvas")
            .unwrap()
            .dyn_into::<HtmlCanvasElement>()
            .unwrap();
        canvas.set_width(width);
        canvas.set_height(height);
        canvas
    }

    #[wasm_bindgen_test]
    fn size_follows_canvas() {
        let surface = CanvasSurface::new(canvas(320, 200)).unwrap();
        assert_eq!(surface.size(), (320, 200));
        surface.resize(640, 480);
        assert_eq!(surface.size(), (640, 480));
    }

    #[wasm_bindgen_test]
    fn drawing_does_not_panic() {
        let mut surface = CanvasSurface::new(canvas(100, 100)).unwrap();
        surface.clear();
        surface.stroke_line(Point2D::ORIGIN, Point2D::new(50.0, 50.0), Color::Red, 2.0);
        surface.plot(Point2D::new(10.0, 10.0), Color::Blue, 1.0);
        surface.fill_circle(Point2D::new(50.0, 50.0), 5.0, Color::Green);
        // Negative radius makes the context throw; it is logged, not raised.
        surface.stroke_ellipse(Point2D::new(50.0, 50.0), -1.0, 20.0, Color::Blue, 2.0);
        surface.fill_text(
            Point2D::new(90.0, 20.0),
            "100x100",
            &TextStyle::new(Color::Black, 14.0).right_aligned(),
        );
    }
}
