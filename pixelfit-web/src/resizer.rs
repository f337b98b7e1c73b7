use std::{cell::RefCell, rc::Rc};

use anyhow::{anyhow, Result};
use gloo::{events::EventListener, utils::window};
use log::debug;
use pixelfit_core::{DocumentView, PixelSize, ResizeOptions, ResizerCore, ViewportConfig};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Event, HtmlCanvasElement};

use crate::{document::WebDocument, util::ResultExt};

/// Keeps a canvas backing buffer sized to the canvas's parent container.
///
/// Only the buffer resolution changes; the CSS box of the canvas is left
/// alone. With high definition on, the buffer is scaled by the device
/// pixel ratio times the page's `initial-scale` and the 2d context gets a
/// matching scale transform, so drawing code keeps working in CSS pixel
/// coordinates. Whenever the buffer actually changes, a `resize` event is
/// dispatched on the canvas itself. Dropping the resizer, like calling
/// [`dispose`](Self::dispose), detaches it from the window resize signal.
pub struct CanvasResizer {
    state: Rc<RefCell<ResizerState>>,
    resize_listener: Option<EventListener>,
}

struct ResizerState {
    canvas: HtmlCanvasElement,
    core: ResizerCore,
}

impl CanvasResizer {
    /// Attaches to a canvas with high definition and auto resize both on,
    /// sizing it once before returning.
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self::with_options(canvas, ResizeOptions::default())
    }

    pub fn with_options(canvas: HtmlCanvasElement, options: ResizeOptions) -> Self {
        let state = Rc::new(RefCell::new(ResizerState {
            canvas,
            core: ResizerCore::new(options),
        }));

        let listener_state = Rc::clone(&state);
        let resize_listener = EventListener::new(&window(), "resize", move |_| {
            let auto_resize = listener_state.borrow().core.auto_resize();
            if auto_resize {
                resize_now(&listener_state);
            }
        });

        let resizer = Self {
            state,
            resize_listener: Some(resize_listener),
        };
        if resizer.auto_resize() {
            resizer.resize();
        }
        resizer
    }

    /// Recomputes the buffer size immediately. A canvas without a parent
    /// element is left untouched.
    pub fn resize(&self) {
        resize_now(&self.state);
    }

    pub fn high_definition(&self) -> bool {
        self.state.borrow().core.high_definition()
    }

    /// Changing the value recomputes immediately, auto resize or not.
    pub fn set_high_definition(&self, on: bool) {
        let changed = self.state.borrow_mut().core.set_high_definition(on);
        if changed {
            self.resize();
        }
    }

    pub fn auto_resize(&self) -> bool {
        self.state.borrow().core.auto_resize()
    }

    /// Changing the value recomputes immediately.
    pub fn set_auto_resize(&self, on: bool) {
        let changed = self.state.borrow_mut().core.set_auto_resize(on);
        if changed {
            self.resize();
        }
    }

    /// Scale the 2d context was left at by the last recomputation.
    pub fn content_scale_factor(&self) -> f64 {
        self.state.borrow().core.content_scale_factor()
    }

    /// Buffer size applied by the last effective recomputation.
    pub fn applied_size(&self) -> Option<PixelSize> {
        self.state.borrow().core.applied_size()
    }

    pub fn canvas(&self) -> HtmlCanvasElement {
        self.state.borrow().canvas.clone()
    }

    /// Stops listening to the window resize signal. Safe to call more
    /// than once; manual [`resize`](Self::resize) keeps working after.
    pub fn dispose(&mut self) {
        self.resize_listener = None;
    }

    pub fn is_disposed(&self) -> bool {
        self.resize_listener.is_none()
    }
}

fn resize_now(state: &RefCell<ResizerState>) {
    let resized = apply_resize(&mut state.borrow_mut());
    if resized.is_none() {
        return;
    }
    // The borrow is released before dispatching so a listener may call
    // straight back into resize().
    let canvas = state.borrow().canvas.clone();
    if let Ok(event) = Event::new("resize") {
        let _ = canvas.dispatch_event(&event);
    }
}

fn apply_resize(state: &mut ResizerState) -> Option<PixelSize> {
    let canvas = &state.canvas;
    let parent = canvas.parent_element()?;

    // Hide the canvas while measuring so its current size cannot prop up
    // the parent's content box.
    let style = canvas.style();
    let shown_display = style.get_property_value("display").unwrap_or_default();
    let _ = style.set_property("display", "none");

    let parent_width = parent.client_width() as f64;
    let parent_height = parent.client_height() as f64;

    let page = WebDocument::current();
    let viewport_scale = ViewportConfig::new(page.clone()).initial_scale();
    let resized = state.core.resize(
        parent_width,
        parent_height,
        page.device_pixel_ratio(),
        viewport_scale,
    );

    if let Some(size) = resized {
        canvas.set_width(size.width);
        canvas.set_height(size.height);
        let scale = state.core.content_scale_factor();
        if let Ok(context) = context_2d(canvas).log_err() {
            // Assigning the buffer size reset the context state; rebuild
            // the transform from identity.
            let _ = context.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
            let _ = context.scale(scale, scale);
        }
        debug!(
            "canvas resized to {}x{} (scale {})",
            size.width, size.height, scale
        );
    }

    if shown_display.is_empty() {
        let _ = style.remove_property("display");
    } else {
        let _ = style.set_property("display", &shown_display);
    }

    resized
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .map_err(|_| anyhow!("the 2d context is unsupported"))?
        .ok_or_else(|| anyhow!("the canvas has no 2d context"))?
        .dyn_into()
        .map_err(|_| anyhow!("the 2d context has an unexpected type"))
}
