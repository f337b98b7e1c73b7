use getset::CopyGetters;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeOptions {
    /// Scale the backing buffer so canvas pixels line up with device pixels.
    pub high_definition: bool,
    /// Recompute whenever the window reports a resize.
    pub auto_resize: bool,
}

impl Default for ResizeOptions {
    fn default() -> Self {
        Self {
            high_definition: true,
            auto_resize: true,
        }
    }
}

/// Whole-pixel dimensions of a canvas backing buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Sizing rules of a canvas resizer, kept apart from the DOM so they run
/// without a browser.
#[derive(Debug, Clone, CopyGetters)]
pub struct ResizerCore {
    #[getset(get_copy = "pub")]
    high_definition: bool,
    #[getset(get_copy = "pub")]
    auto_resize: bool,
    #[getset(get_copy = "pub")]
    content_scale_factor: f64,
    applied: Option<PixelSize>,
}

impl ResizerCore {
    pub fn new(options: ResizeOptions) -> Self {
        Self {
            high_definition: options.high_definition,
            auto_resize: options.auto_resize,
            content_scale_factor: 1.0,
            applied: None,
        }
    }

    /// Returns true when the flag actually changed.
    pub fn set_high_definition(&mut self, on: bool) -> bool {
        let changed = self.high_definition != on;
        self.high_definition = on;
        changed
    }

    /// Returns true when the flag actually changed.
    pub fn set_auto_resize(&mut self, on: bool) -> bool {
        let changed = self.auto_resize != on;
        self.auto_resize = on;
        changed
    }

    /// Buffer size committed by the last effective [`resize`](Self::resize).
    pub fn applied_size(&self) -> Option<PixelSize> {
        self.applied
    }

    /// Decides the buffer size for a parent box measured in CSS pixels,
    /// or `None` when the last applied size already matches. The scale
    /// stays 1 unless high definition is on, the page declares an initial
    /// scale and the device pixel ratio differs from 1; it is recorded
    /// even when the size is unchanged.
    pub fn resize(
        &mut self,
        parent_width: f64,
        parent_height: f64,
        device_pixel_ratio: f64,
        viewport_scale: Option<f64>,
    ) -> Option<PixelSize> {
        let mut scale = 1.0;
        if self.high_definition {
            if let Some(viewport_scale) = viewport_scale {
                let ratio = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
                    device_pixel_ratio
                } else {
                    1.0
                };
                if ratio != 1.0 {
                    scale = ratio * viewport_scale;
                }
            }
        }
        self.content_scale_factor = scale;

        let candidate = PixelSize::new(
            (parent_width * scale).round() as u32,
            (parent_height * scale).round() as u32,
        );
        if self.applied == Some(candidate) {
            return None;
        }
        self.applied = Some(candidate);
        Some(candidate)
    }
}
