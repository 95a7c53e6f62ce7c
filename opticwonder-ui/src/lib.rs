mod canvas_surface;
mod simulation;

pub use canvas_surface::{get_2d_context, CanvasSurface};
pub use simulation::OpticsSimulation;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Debug);
    log::info!("opticwonder loaded");
}
