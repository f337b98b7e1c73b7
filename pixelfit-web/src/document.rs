use gloo::utils::{document, window};
use pixelfit_core::DocumentView;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlMetaElement};

use crate::util::OptionExt;

const VIEWPORT_TAG_SELECTOR: &str = "meta[name=viewport i]";

/// [`DocumentView`] over a live `web_sys::Document`.
///
/// The viewport tag is the last `<meta name="viewport">` in document
/// order; the name match is case-insensitive. Writes reuse that tag or
/// create one as the last child of `<head>`. The device pixel ratio comes
/// from the window, with anything non-finite or non-positive read as 1.
#[derive(Clone)]
pub struct WebDocument {
    document: Document,
}

impl WebDocument {
    /// Wraps the document of the current browsing context.
    pub fn current() -> Self {
        Self::new(document())
    }

    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn find_viewport_tag(&self) -> Option<HtmlMetaElement> {
        let tags = self.document.query_selector_all(VIEWPORT_TAG_SELECTOR).ok()?;
        let last = tags.item(tags.length().checked_sub(1)?)?;
        last.dyn_into().ok()
    }

    fn create_viewport_tag(&self) -> Option<HtmlMetaElement> {
        let tag: HtmlMetaElement = self.document.create_element("meta").ok()?.dyn_into().ok()?;
        tag.set_name("viewport");
        let head = self
            .document
            .head()
            .log_none("document has no head to hold the viewport tag")?;
        head.append_child(&tag).ok()?;
        Some(tag)
    }
}

impl DocumentView for WebDocument {
    fn viewport_content(&self) -> Option<String> {
        let content = self.find_viewport_tag()?.content();
        (!content.is_empty()).then_some(content)
    }

    fn set_viewport_content(&self, content: &str) {
        let tag = self.find_viewport_tag().or_else(|| self.create_viewport_tag());
        if let Some(tag) = tag {
            tag.set_content(content);
        }
    }

    fn device_pixel_ratio(&self) -> f64 {
        let ratio = window().device_pixel_ratio();
        if ratio.is_finite() && ratio > 0.0 {
            ratio
        } else {
            1.0
        }
    }
}
