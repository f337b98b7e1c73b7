//! Browser side of pixelfit: the viewport accessor bound to the live page
//! document and a resizer that keeps a canvas backing buffer matched to
//! its parent box.

mod document;
mod resizer;
mod util;

pub use document::*;
pub use resizer::*;

pub use pixelfit_core::{
    keys, DocumentView, PixelSize, ResizeOptions, ViewportConfig, ViewportProperties,
};

/// Viewport accessor for the current page.
pub fn viewport_config() -> ViewportConfig<WebDocument> {
    ViewportConfig::new(WebDocument::current())
}
