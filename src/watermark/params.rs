use crate::foundation::core::Rgb8;
use crate::watermark::preset::DensityPreset;

/// Minimum font size in pixels, reached on surfaces up to 800px on their long side.
pub const MIN_FONT_SIZE_PX: f64 = 24.0;
/// Font size per 1000px of the surface's long side.
pub const FONT_SIZE_PER_1000_PX: f64 = 30.0;
/// Horizontal padding added to the measured text width, before scaling.
pub const BASE_TEXT_SPACING_PX: f64 = 60.0;

/// Tiling parameters derived from a surface size and a density preset.
///
/// Computed fresh for every render; nothing here is cached.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct WatermarkParams {
    /// Font size in pixels.
    pub font_size_px: f64,
    /// Row stride in pixels.
    pub gap_px: f64,
    /// Padding appended to the measured text width to form the column stride.
    pub text_spacing_px: f64,
    /// Fill color.
    pub color: Rgb8,
    /// Fill opacity.
    pub alpha: f32,
}

/// Scale a preset to a `width` x `height` surface.
///
/// The font grows linearly with the long side but never drops below
/// [`MIN_FONT_SIZE_PX`]; gap and spacing only ever grow.
pub fn derive_params(width: f64, height: f64, preset: &DensityPreset) -> WatermarkParams {
    let scale = width.max(height) / 1000.0;
    let safe_scale = scale.max(1.0);

    WatermarkParams {
        font_size_px: (FONT_SIZE_PER_1000_PX * scale).max(MIN_FONT_SIZE_PX),
        gap_px: preset.gap * safe_scale,
        text_spacing_px: BASE_TEXT_SPACING_PX * safe_scale,
        color: preset.color,
        alpha: preset.alpha,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/watermark/params.rs"]
mod tests;
