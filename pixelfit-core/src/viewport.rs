use crate::content::ViewportProperties;

/// Property names the typed accessors understand.
pub mod keys {
    pub const WIDTH: &str = "width";
    pub const HEIGHT: &str = "height";
    pub const INITIAL_SCALE: &str = "initial-scale";
    pub const MAXIMUM_SCALE: &str = "maximum-scale";
    pub const MINIMUM_SCALE: &str = "minimum-scale";
    pub const USER_SCALABLE: &str = "user-scalable";
    pub const TARGET_DENSITY_DPI: &str = "target-densitydpi";
}

/// Document access needed to reach the viewport meta tag. The tag is the
/// last `<meta name="viewport">` in document order; a missing tag or an
/// empty content attribute reads as `None`.
pub trait DocumentView {
    fn viewport_content(&self) -> Option<String>;
    fn set_viewport_content(&self, content: &str);
    /// Device pixels per CSS pixel. 1 when the host reports nothing usable.
    fn device_pixel_ratio(&self) -> f64 {
        1.0
    }
}

/// Typed access to the viewport meta tag of a document. Getters never
/// fail: a missing tag or key reads as `None` (`false` for
/// [`user_scalable`](Self::user_scalable)). Numeric scales are rounded to
/// four decimal places on both read and write.
pub struct ViewportConfig<D> {
    document: D,
}

impl<D: DocumentView> ViewportConfig<D> {
    pub fn new(document: D) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn read(&self) -> ViewportProperties {
        match self.document.viewport_content() {
            Some(content) => ViewportProperties::parse(&content),
            None => ViewportProperties::new(),
        }
    }

    /// Sets or deletes one property and writes the whole mapping back.
    /// Deleting the last property still writes the then empty string.
    pub fn write(&self, key: &str, value: Option<&str>) {
        let mut props = self.read();
        match value {
            Some(value) => props.set(key, value),
            None => props.remove(key),
        }
        self.document.set_viewport_content(&props.to_string());
    }

    pub fn initial_scale(&self) -> Option<f64> {
        self.scale_of(keys::INITIAL_SCALE)
    }

    pub fn set_initial_scale(&self, value: Option<f64>) {
        self.write_scale(keys::INITIAL_SCALE, value);
    }

    pub fn maximum_scale(&self) -> Option<f64> {
        self.scale_of(keys::MAXIMUM_SCALE)
    }

    pub fn set_maximum_scale(&self, value: Option<f64>) {
        self.write_scale(keys::MAXIMUM_SCALE, value);
    }

    pub fn minimum_scale(&self) -> Option<f64> {
        self.scale_of(keys::MINIMUM_SCALE)
    }

    pub fn set_minimum_scale(&self, value: Option<f64>) {
        self.write_scale(keys::MINIMUM_SCALE, value);
    }

    /// True only for a literal `user-scalable=yes`.
    pub fn user_scalable(&self) -> bool {
        self.read().get(keys::USER_SCALABLE) == Some("yes")
    }

    pub fn set_user_scalable(&self, value: Option<bool>) {
        self.write(
            keys::USER_SCALABLE,
            value.map(|on| if on { "yes" } else { "no" }),
        );
    }

    pub fn width(&self) -> Option<String> {
        self.string_of(keys::WIDTH)
    }

    pub fn set_width(&self, value: Option<&str>) {
        self.write(keys::WIDTH, value);
    }

    pub fn height(&self) -> Option<String> {
        self.string_of(keys::HEIGHT)
    }

    pub fn set_height(&self, value: Option<&str>) {
        self.write(keys::HEIGHT, value);
    }

    pub fn target_density_dpi(&self) -> Option<String> {
        self.string_of(keys::TARGET_DENSITY_DPI)
    }

    pub fn set_target_density_dpi(&self, value: Option<&str>) {
        self.write(keys::TARGET_DENSITY_DPI, value);
    }

    /// Inverse of the device pixel ratio; a missing or zero ratio reads as 1.
    pub fn pixel_ratio_scale(&self) -> f64 {
        let ratio = self.document.device_pixel_ratio();
        if ratio.is_finite() && ratio > 0.0 {
            1.0 / ratio
        } else {
            1.0
        }
    }

    /// True when the device distinguishes CSS pixels from device pixels.
    pub fn is_supported(&self) -> bool {
        self.pixel_ratio_scale() != 1.0
    }

    /// Sets the initial scale to [`pixel_ratio_scale`](Self::pixel_ratio_scale).
    pub fn match_device(&self) {
        self.set_initial_scale(Some(self.pixel_ratio_scale()));
    }

    fn scale_of(&self, key: &str) -> Option<f64> {
        self.read()
            .get(key)?
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .map(round_scale)
    }

    fn write_scale(&self, key: &str, value: Option<f64>) {
        let value = value.map(|value| round_scale(value).to_string());
        self.write(key, value.as_deref());
    }

    fn string_of(&self, key: &str) -> Option<String> {
        self.read().get(key).map(str::to_string)
    }
}

fn round_scale(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use assert2::{assert, check};

    struct FakeDocument {
        content: RefCell<Option<String>>,
        pixel_ratio: f64,
    }

    impl FakeDocument {
        fn empty() -> Self {
            Self {
                content: RefCell::new(None),
                pixel_ratio: 1.0,
            }
        }

        fn with_content(content: &str) -> Self {
            Self {
                content: RefCell::new(Some(content.to_owned())),
                pixel_ratio: 1.0,
            }
        }

        fn with_pixel_ratio(pixel_ratio: f64) -> Self {
            Self {
                content: RefCell::new(None),
                pixel_ratio,
            }
        }

        fn stored(&self) -> Option<String> {
            self.content.borrow().clone()
        }
    }

    impl DocumentView for FakeDocument {
        fn viewport_content(&self) -> Option<String> {
            self.stored().filter(|content| !content.is_empty())
        }

        fn set_viewport_content(&self, content: &str) {
            *self.content.borrow_mut() = Some(content.to_owned());
        }

        fn device_pixel_ratio(&self) -> f64 {
            self.pixel_ratio
        }
    }

    #[test]
    fn missing_tag_reads_as_empty_mapping() {
        let config = ViewportConfig::new(FakeDocument::empty());
        check!(config.read().is_empty());
        check!(config.initial_scale() == None);
        check!(config.width() == None);
        check!(!config.user_scalable());
    }

    #[test]
    fn scales_round_to_four_decimals_on_read() {
        let config = ViewportConfig::new(FakeDocument::with_content("initial-scale=1.23456"));
        check!(config.initial_scale() == Some(1.2346));
    }

    #[test]
    fn scales_round_to_four_decimals_on_write() {
        let config = ViewportConfig::new(FakeDocument::empty());
        config.set_initial_scale(Some(1.23456));
        check!(config.document().stored().as_deref() == Some("initial-scale=1.2346"));
        check!(config.initial_scale() == Some(1.2346));
    }

    #[test]
    fn whole_scales_write_without_a_fraction() {
        let config = ViewportConfig::new(FakeDocument::empty());
        config.set_maximum_scale(Some(3.0));
        check!(config.document().stored().as_deref() == Some("maximum-scale=3"));
        check!(config.maximum_scale() == Some(3.0));
    }

    #[test]
    fn non_numeric_scale_reads_as_absent() {
        let config = ViewportConfig::new(FakeDocument::with_content("initial-scale=fit"));
        check!(config.initial_scale() == None);
    }

    #[test]
    fn setting_none_removes_the_property() {
        let document = FakeDocument::with_content("initial-scale=2, width=device-width");
        let config = ViewportConfig::new(document);
        config.set_initial_scale(None);
        check!(config.document().stored().as_deref() == Some("width=device-width"));
        check!(config.initial_scale() == None);
    }

    #[test]
    fn removing_the_last_property_writes_an_empty_string() {
        let config = ViewportConfig::new(FakeDocument::with_content("width=320"));
        config.set_width(None);
        check!(config.document().stored().as_deref() == Some(""));
        check!(config.width() == None);
    }

    #[test]
    fn write_preserves_unrelated_properties() {
        let document = FakeDocument::with_content("width=device-width, initial-scale=1");
        let config = ViewportConfig::new(document);
        config.set_height(Some("480"));
        check!(
            config.document().stored().as_deref()
                == Some("width=device-width, initial-scale=1, height=480")
        );
    }

    #[test]
    fn repeated_writes_serialize_identically() {
        let config = ViewportConfig::new(FakeDocument::with_content("width=320"));
        config.set_minimum_scale(Some(0.1));
        let first = config.document().stored();
        config.set_minimum_scale(Some(0.1));
        assert!(config.document().stored() == first);
        check!(first.as_deref() == Some("width=320, minimum-scale=0.1"));
    }

    #[test]
    fn user_scalable_is_true_only_for_yes() {
        check!(ViewportConfig::new(FakeDocument::with_content("user-scalable=yes")).user_scalable());
        check!(!ViewportConfig::new(FakeDocument::with_content("user-scalable=no")).user_scalable());
        check!(!ViewportConfig::new(FakeDocument::with_content("user-scalable=1")).user_scalable());
        check!(!ViewportConfig::new(FakeDocument::empty()).user_scalable());
    }

    #[test]
    fn user_scalable_writes_yes_and_no() {
        let config = ViewportConfig::new(FakeDocument::empty());
        config.set_user_scalable(Some(true));
        check!(config.document().stored().as_deref() == Some("user-scalable=yes"));
        config.set_user_scalable(Some(false));
        check!(config.document().stored().as_deref() == Some("user-scalable=no"));
        config.set_user_scalable(None);
        check!(config.document().stored().as_deref() == Some(""));
    }

    #[test]
    fn opaque_strings_pass_through_unmodified() {
        let config = ViewportConfig::new(FakeDocument::empty());
        config.set_width(Some("device-width"));
        config.set_target_density_dpi(Some("device-dpi"));
        check!(config.width().as_deref() == Some("device-width"));
        check!(config.target_density_dpi().as_deref() == Some("device-dpi"));
        check!(
            config.document().stored().as_deref()
                == Some("width=device-width, target-densitydpi=device-dpi")
        );
    }

    #[test]
    fn pixel_ratio_scale_inverts_the_ratio() {
        let config = ViewportConfig::new(FakeDocument::with_pixel_ratio(2.0));
        check!(config.pixel_ratio_scale() == 0.5);
        check!(config.is_supported());
    }

    #[test]
    fn degenerate_pixel_ratios_read_as_one() {
        check!(ViewportConfig::new(FakeDocument::with_pixel_ratio(0.0)).pixel_ratio_scale() == 1.0);
        check!(
            ViewportConfig::new(FakeDocument::with_pixel_ratio(f64::NAN)).pixel_ratio_scale() == 1.0
        );
        check!(!ViewportConfig::new(FakeDocument::with_pixel_ratio(1.0)).is_supported());
    }

    #[test]
    fn match_device_writes_the_inverse_ratio() {
        let config = ViewportConfig::new(FakeDocument::with_pixel_ratio(2.0));
        config.match_device();
        check!(config.document().stored().as_deref() == Some("initial-scale=0.5"));
        check!(config.initial_scale() == Some(0.5));
    }
}
