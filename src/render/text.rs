use std::borrow::Cow;

use crate::foundation::error::{DocmarkError, DocmarkResult};
use crate::watermark::surface::{FontSpec, FontWeight};

/// Brush type carried through Parley layouts. Color is applied at draw time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct TextBrush;

/// Generic family used when no font file is registered.
const DEFAULT_FAMILY: &str = "sans-serif";

/// Stateful helper for shaping single-line text with Parley.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrush>,
    family: Option<String>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    /// Engine resolving `sans-serif` from the system font collection.
    pub(crate) fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            family: None,
        }
    }

    /// Register font bytes and use their first family for all later layouts.
    pub(crate) fn register_font(&mut self, font_bytes: &[u8]) -> DocmarkResult<String> {
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            DocmarkError::validation("no font families registered from font bytes")
        })?;

        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| DocmarkError::validation("registered font family has no name"))?
            .to_string();

        tracing::debug!(family = %family_name, "registered watermark font");
        self.family = Some(family_name.clone());
        Ok(family_name)
    }

    /// Family name of the registered font, if any.
    pub(crate) fn family_name(&self) -> Option<&str> {
        self.family.as_deref()
    }

    /// Shape `text` on a single unbroken line.
    pub(crate) fn layout_line(&mut self, text: &str, font: &FontSpec) -> parley::Layout<TextBrush> {
        let family = match &self.family {
            Some(name) => Cow::Owned(name.clone()),
            None => Cow::Borrowed(DEFAULT_FAMILY),
        };
        let weight = match font.weight {
            FontWeight::Normal => parley::style::FontWeight::NORMAL,
            FontWeight::Bold => parley::style::FontWeight::BOLD,
        };

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(family),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(font.size_px as f32));
        builder.push_default(parley::style::StyleProperty::FontWeight(weight));
        builder.push_default(parley::style::StyleProperty::Brush(TextBrush));

        let mut layout: parley::Layout<TextBrush> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }
}
