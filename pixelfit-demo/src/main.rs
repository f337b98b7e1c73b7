use gloo::{
    events::EventListener,
    utils::{body, document},
};
use log::*;
use pixelfit_web::{viewport_config, CanvasResizer};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement};

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

pub fn main() -> Result<(), JsValue> {
    #[cfg(debug_assertions)]
    console_error_panic_hook::set_once();

    wasm_logger::init(wasm_logger::Config::default());

    let viewport = viewport_config();
    info!(
        "initial-scale: {:?}, pixel ratio scale: {}, high definition supported: {}",
        viewport.initial_scale(),
        viewport.pixel_ratio_scale(),
        viewport.is_supported()
    );

    let canvas = mount_stage();
    let redraw_canvas = canvas.clone();
    let redraw = EventListener::new(&canvas, "resize", move |_| draw(&redraw_canvas));
    let resizer = CanvasResizer::new(canvas.clone());
    draw(&canvas);

    // The stage lives as long as the page does.
    std::mem::forget(redraw);
    std::mem::forget(resizer);
    Ok(())
}

/// Builds a full-viewport stage with a canvas stretched over it. The
/// resizer keeps the buffer matched to the stage; CSS keeps the element
/// covering it.
fn mount_stage() -> HtmlCanvasElement {
    let stage: HtmlElement = document()
        .create_element("div")
        .unwrap()
        .dyn_into()
        .unwrap();
    let stage_style = stage.style();
    stage_style.set_property("position", "fixed").unwrap();
    stage_style.set_property("inset", "0").unwrap();

    let canvas: HtmlCanvasElement = document()
        .create_element("canvas")
        .unwrap()
        .dyn_into()
        .unwrap();
    let canvas_style = canvas.style();
    canvas_style.set_property("width", "100%").unwrap();
    canvas_style.set_property("height", "100%").unwrap();

    stage.append_child(&canvas).unwrap();
    body().append_child(&stage).unwrap();
    canvas
}

/// Draws a single-pixel grid and some shapes in CSS pixel coordinates.
/// With the resizer's scale transform active the hairlines stay sharp on
/// high density screens.
fn draw(canvas: &HtmlCanvasElement) {
    let context: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .unwrap()
        .unwrap()
        .dyn_into()
        .unwrap();
    let width = canvas.client_width() as f64;
    let height = canvas.client_height() as f64;

    context.clear_rect(0.0, 0.0, width, height);

    context.set_global_alpha(0.35);
    context.set_line_width(1.0);
    context.begin_path();
    let mut x = 0.5;
    while x < width {
        context.move_to(x, 0.0);
        context.line_to(x, height);
        x += 16.0;
    }
    let mut y = 0.5;
    while y < height {
        context.move_to(0.0, y);
        context.line_to(width, y);
        y += 16.0;
    }
    context.stroke();

    context.set_global_alpha(1.0);
    context.set_line_width(2.0);
    context.stroke_rect(8.0, 8.0, width - 16.0, height - 16.0);

    context.begin_path();
    let radius = (width.min(height) / 4.0).max(1.0);
    context
        .arc(width / 2.0, height / 2.0, radius, 0.0, std::f64::consts::TAU)
        .unwrap();
    context.stroke();

    context.set_font("16px sans-serif");
    context
        .fill_text(&format!("{:.0} x {:.0} css px", width, height), 16.0, 28.0)
        .unwrap();
}
