use crate::foundation::core::Rgb8;

/// Font weight subset the watermark needs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontWeight {
    /// 400.
    #[default]
    Normal,
    /// 700.
    Bold,
}

/// Font selection handed to a surface: weight, pixel size, generic sans-serif family.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontSpec {
    /// Weight.
    pub weight: FontWeight,
    /// Size in pixels.
    pub size_px: f64,
}

impl FontSpec {
    /// `bold {size_px}px sans-serif`.
    pub fn bold_sans(size_px: f64) -> Self {
        Self {
            weight: FontWeight::Bold,
            size_px,
        }
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            weight: FontWeight::Normal,
            size_px: 10.0,
        }
    }
}

impl std::fmt::Display for FontSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.weight == FontWeight::Bold {
            f.write_str("bold ")?;
        }
        write!(f, "{}px sans-serif", self.size_px)
    }
}

/// Horizontal anchor of `fill_text` relative to its `x`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    /// `x` is the left edge.
    #[default]
    Left,
    /// `x` is the horizontal center.
    Center,
    /// `x` is the right edge.
    Right,
}

/// Vertical anchor of `fill_text` relative to its `y`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextBaseline {
    /// `y` is the top of the line box.
    Top,
    /// `y` is the vertical middle of the line box.
    Middle,
    /// `y` is the alphabetic baseline.
    #[default]
    Alphabetic,
    /// `y` is the bottom of the line box.
    Bottom,
}

/// Drawing capability the watermark renderer paints through.
///
/// Modeled on a 2D canvas context: transforms compose onto the current transform, and
/// `save`/`restore` push and pop the transform together with the text and fill state.
pub trait WatermarkSurface {
    /// Select the font used by `measure_text` and `fill_text`.
    fn set_font(&mut self, font: &FontSpec);
    /// Select the fill color.
    fn set_fill_style(&mut self, color: Rgb8);
    /// Select the global alpha in `[0, 1]`.
    fn set_alpha(&mut self, alpha: f32);
    /// Select horizontal text alignment.
    fn set_text_align(&mut self, align: TextAlign);
    /// Select vertical text alignment.
    fn set_text_baseline(&mut self, baseline: TextBaseline);
    /// Advance width of `text` in the current font, in pixels. Empty text measures 0.
    fn measure_text(&mut self, text: &str) -> f64;
    /// Draw `text` anchored at `(x, y)` in the current transform.
    fn fill_text(&mut self, text: &str, x: f64, y: f64);
    /// Push the current transform and drawing state.
    fn save(&mut self);
    /// Pop the state pushed by the matching `save`. Unbalanced calls are ignored.
    fn restore(&mut self);
    /// Compose a translation onto the current transform.
    fn translate(&mut self, dx: f64, dy: f64);
    /// Compose a rotation (radians, clockwise in y-down space) onto the current transform.
    fn rotate(&mut self, angle_rad: f64);
}

impl<S: WatermarkSurface + ?Sized> WatermarkSurface for &mut S {
    fn set_font(&mut self, font: &FontSpec) {
        (**self).set_font(font)
    }

    fn set_fill_style(&mut self, color: Rgb8) {
        (**self).set_fill_style(color)
    }

    fn set_alpha(&mut self, alpha: f32) {
        (**self).set_alpha(alpha)
    }

    fn set_text_align(&mut self, align: TextAlign) {
        (**self).set_text_align(align)
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        (**self).set_text_baseline(baseline)
    }

    fn measure_text(&mut self, text: &str) -> f64 {
        (**self).measure_text(text)
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        (**self).fill_text(text, x, y)
    }

    fn save(&mut self) {
        (**self).save()
    }

    fn restore(&mut self) {
        (**self).restore()
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        (**self).translate(dx, dy)
    }

    fn rotate(&mut self, angle_rad: f64) {
        (**self).rotate(angle_rad)
    }
}
