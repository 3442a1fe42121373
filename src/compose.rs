//! Preview and export compositions: the two call sites of the watermark core.

use std::path::PathBuf;

use crate::assets::decode::Photo;
use crate::foundation::core::{Affine, Canvas, Vec2};
use crate::foundation::error::{DocmarkError, DocmarkResult};
use crate::render::FrameRGBA;
use crate::render::cpu::CpuSurface;
use crate::watermark::{QuarterTurn, WatermarkConfig, derive_params, paint};

/// Environment variable naming a font file used instead of the system `sans-serif`.
pub const FONT_ENV: &str = "DOCMARK_FONT";

/// Font selection for raster compositions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FontOptions {
    /// Font file to register; `None` resolves `sans-serif` from system fonts.
    pub font_path: Option<PathBuf>,
}

impl FontOptions {
    /// Options taken from [`FONT_ENV`]; blank values are ignored.
    pub fn from_env() -> Self {
        let font_path = std::env::var_os(FONT_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        Self { font_path }
    }

    /// `path` when given, otherwise the environment.
    pub fn with_override(path: Option<PathBuf>) -> Self {
        match path {
            Some(p) => Self { font_path: Some(p) },
            None => Self::from_env(),
        }
    }

    fn apply(&self, surface: &mut CpuSurface) -> DocmarkResult<()> {
        let Some(path) = &self.font_path else {
            return Ok(());
        };
        let bytes = std::fs::read(path).map_err(|e| {
            DocmarkError::config(format!("failed to read font '{}': {e}", path.display()))
        })?;
        surface.register_font(&bytes)?;
        Ok(())
    }
}

/// Output canvas for a photo turned by `turn`.
pub fn export_canvas(photo: &Photo, turn: QuarterTurn) -> DocmarkResult<Canvas> {
    let canvas = photo.canvas()?;
    Ok(if turn.swaps_axes() {
        canvas.transposed()
    } else {
        canvas
    })
}

/// Transform drawing `photo` centered on `canvas`, turned clockwise by `turn`.
pub fn photo_transform(photo: &Photo, canvas: Canvas, turn: QuarterTurn) -> Affine {
    let c = canvas.center();
    Affine::translate(c.to_vec2())
        * Affine::rotate(turn.radians())
        * Affine::translate(Vec2::new(
            -f64::from(photo.width) / 2.0,
            -f64::from(photo.height) / 2.0,
        ))
}

/// Final export: the photo at full resolution, turned by `config.rotation`, with the watermark
/// painted over it.
#[tracing::instrument(skip(photo, fonts), fields(width = photo.width, height = photo.height))]
pub fn compose_export(
    photo: &Photo,
    config: &WatermarkConfig,
    fonts: &FontOptions,
) -> DocmarkResult<FrameRGBA> {
    let turn = config.rotation;
    let canvas = export_canvas(photo, turn)?;
    let mut surface = CpuSurface::new(canvas)?;
    fonts.apply(&mut surface)?;

    surface.draw_photo(photo, photo_transform(photo, canvas, turn))?;

    let (w, h) = (f64::from(canvas.width), f64::from(canvas.height));
    let params = derive_params(w, h, config.density.preset());
    paint(
        &mut surface,
        w,
        h,
        config.text.as_str(),
        &params,
        turn.radians(),
    );
    Ok(surface.render())
}

/// Size of `photo` scaled to fit inside `viewport`, preserving aspect ratio.
pub fn fit_canvas(photo: &Photo, viewport: Canvas) -> DocmarkResult<Canvas> {
    let pw = f64::from(photo.width);
    let ph = f64::from(photo.height);
    if pw <= 0.0 || ph <= 0.0 {
        return Err(DocmarkError::validation("photo must be non-empty"));
    }
    let scale = (f64::from(viewport.width) / pw).min(f64::from(viewport.height) / ph);
    let w = (pw * scale).floor().max(1.0) as u32;
    let h = (ph * scale).floor().max(1.0) as u32;
    Canvas::new(w, h)
}

/// Live preview: the photo fitted into `viewport` with the watermark at preview scale.
///
/// The preview never turns the photo; rotation only applies on export.
#[tracing::instrument(skip(photo, fonts))]
pub fn compose_preview(
    photo: &Photo,
    viewport: Canvas,
    config: &WatermarkConfig,
    fonts: &FontOptions,
) -> DocmarkResult<FrameRGBA> {
    let canvas = fit_canvas(photo, viewport)?;
    let mut surface = CpuSurface::new(canvas)?;
    fonts.apply(&mut surface)?;

    let sx = f64::from(canvas.width) / f64::from(photo.width);
    let sy = f64::from(canvas.height) / f64::from(photo.height);
    surface.draw_photo(photo, Affine::scale_non_uniform(sx, sy))?;
    paint_overlay(&mut surface, canvas, config);
    Ok(surface.render())
}

/// Watermark alone on a transparent `viewport`, for overlaying a live camera feed.
#[tracing::instrument(skip(fonts))]
pub fn compose_overlay(
    viewport: Canvas,
    config: &WatermarkConfig,
    fonts: &FontOptions,
) -> DocmarkResult<FrameRGBA> {
    let mut surface = CpuSurface::new(viewport)?;
    fonts.apply(&mut surface)?;
    paint_overlay(&mut surface, viewport, config);
    Ok(surface.render())
}

fn paint_overlay(surface: &mut CpuSurface, canvas: Canvas, config: &WatermarkConfig) {
    let (w, h) = (f64::from(canvas.width), f64::from(canvas.height));
    let params = derive_params(w, h, config.density.preset());
    paint(surface, w, h, config.text.as_str(), &params, 0.0);
}

#[cfg(test)]
#[path = "../tests/unit/compose/compose.rs"]
mod tests;
