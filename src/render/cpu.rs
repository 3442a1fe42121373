use std::collections::HashMap;
use std::sync::Arc;

use crate::assets::decode::Photo;
use crate::foundation::core::{Affine, Canvas, Rgb8, Vec2};
use crate::foundation::error::{DocmarkError, DocmarkResult};
use crate::render::FrameRGBA;
use crate::render::text::{TextBrush, TextLayoutEngine};
use crate::watermark::surface::{FontSpec, TextAlign, TextBaseline, WatermarkSurface};

#[derive(Clone, Copy, Debug)]
struct DrawState {
    transform: Affine,
    font: FontSpec,
    fill: Rgb8,
    alpha: f32,
    align: TextAlign,
    baseline: TextBaseline,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            font: FontSpec::default(),
            fill: Rgb8::new(0, 0, 0),
            alpha: 1.0,
            align: TextAlign::default(),
            baseline: TextBaseline::default(),
        }
    }
}

/// Most recently shaped line; tiling draws one string many times in one font.
struct ShapedLine {
    text: String,
    font: FontSpec,
    layout: parley::Layout<TextBrush>,
}

/// CPU raster surface backed by `vello_cpu`.
///
/// Draws accumulate in a render context; [`CpuSurface::render`] rasterizes everything drawn so
/// far into a fresh frame. Text is shaped with Parley using the system `sans-serif` family
/// unless a font file was registered with [`CpuSurface::register_font`].
pub struct CpuSurface {
    canvas: Canvas,
    ctx: vello_cpu::RenderContext,
    text: TextLayoutEngine,
    font_cache: HashMap<(u64, u32), vello_cpu::peniko::FontData>,
    line: Option<ShapedLine>,
    state: DrawState,
    stack: Vec<DrawState>,
}

impl CpuSurface {
    /// Create a transparent surface. Both sides must be in `1..=65535`.
    pub fn new(canvas: Canvas) -> DocmarkResult<Self> {
        let (w, h) = surface_size_u16(canvas)?;
        Ok(Self {
            canvas,
            ctx: vello_cpu::RenderContext::new(w, h),
            text: TextLayoutEngine::new(),
            font_cache: HashMap::new(),
            line: None,
            state: DrawState::default(),
            stack: Vec::new(),
        })
    }

    /// Surface size.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Use the first family in `font_bytes` for all text. Returns the family name.
    pub fn register_font(&mut self, font_bytes: &[u8]) -> DocmarkResult<String> {
        let family = self.text.register_font(font_bytes)?;
        self.line = None;
        Ok(family)
    }

    /// Family name of the registered font, if any.
    pub fn font_family(&self) -> Option<&str> {
        self.text.family_name()
    }

    /// Drop everything drawn so far and reset the drawing state.
    pub fn clear(&mut self) {
        self.ctx.reset();
        self.state = DrawState::default();
        self.stack.clear();
    }

    /// Draw `photo` with its top-left corner at the origin of `transform` (composed onto the
    /// current transform).
    pub fn draw_photo(&mut self, photo: &Photo, transform: Affine) -> DocmarkResult<()> {
        let pixmap = pixmap_from_premul_bytes(photo.premul_bytes(), photo.width, photo.height)?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };

        self.ctx
            .set_transform(affine_to_cpu(self.state.transform * transform));
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(paint);
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(photo.width),
            f64::from(photo.height),
        ));
        Ok(())
    }

    /// Rasterize everything drawn so far. Drawing may continue afterwards.
    pub fn render(&mut self) -> FrameRGBA {
        let (w, h) = (self.canvas.width as u16, self.canvas.height as u16);
        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }

    fn take_line(&mut self, text: &str) -> ShapedLine {
        match self.line.take() {
            Some(line) if line.text == text && line.font == self.state.font => line,
            _ => ShapedLine {
                text: text.to_owned(),
                font: self.state.font,
                layout: self.text.layout_line(text, &self.state.font),
            },
        }
    }

    fn font_for(&mut self, key: (u64, u32), bytes: &[u8]) -> vello_cpu::peniko::FontData {
        self.font_cache
            .entry(key)
            .or_insert_with(|| {
                vello_cpu::peniko::FontData::new(
                    vello_cpu::peniko::Blob::from(bytes.to_vec()),
                    key.1,
                )
            })
            .clone()
    }
}

impl WatermarkSurface for CpuSurface {
    fn set_font(&mut self, font: &FontSpec) {
        self.state.font = *font;
    }

    fn set_fill_style(&mut self, color: Rgb8) {
        self.state.fill = color;
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.state.alpha = alpha.clamp(0.0, 1.0);
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.state.align = align;
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.state.baseline = baseline;
    }

    fn measure_text(&mut self, text: &str) -> f64 {
        if text.is_empty() {
            return 0.0;
        }
        let line = self.take_line(text);
        let width = f64::from(line.layout.width());
        self.line = Some(line);
        width
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        if text.is_empty() || self.state.alpha <= 0.0 {
            return;
        }

        let line = self.take_line(text);
        let layout = &line.layout;
        let w = f64::from(layout.width());
        let h = f64::from(layout.height());
        let dx = match self.state.align {
            TextAlign::Left => 0.0,
            TextAlign::Center => -w / 2.0,
            TextAlign::Right => -w,
        };
        let dy = match self.state.baseline {
            TextBaseline::Top => 0.0,
            TextBaseline::Middle => -h / 2.0,
            TextBaseline::Bottom => -h,
            TextBaseline::Alphabetic => -layout
                .lines()
                .next()
                .map(|l| f64::from(l.metrics().baseline))
                .unwrap_or(0.0),
        };

        let tr = self.state.transform * Affine::translate(Vec2::new(x + dx, y + dy));
        let [r, g, b, a] = self.state.fill.with_alpha(self.state.alpha);
        self.ctx.set_transform(affine_to_cpu(tr));
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));

        for row in layout.lines() {
            for item in row.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let font_ref = run.run().font();
                let font = self.font_for(
                    (font_ref.data.id(), font_ref.index),
                    font_ref.data.data(),
                );
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(&font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        self.line = Some(line);
    }

    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(s) = self.stack.pop() {
            self.state = s;
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.state.transform *= Affine::translate(Vec2::new(dx, dy));
    }

    fn rotate(&mut self, angle_rad: f64) {
        self.state.transform *= Affine::rotate(angle_rad);
    }
}

fn surface_size_u16(canvas: Canvas) -> DocmarkResult<(u16, u16)> {
    if canvas.width == 0 || canvas.height == 0 {
        return Err(DocmarkError::validation("surface must be non-empty"));
    }
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| DocmarkError::validation("surface width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| DocmarkError::validation("surface height exceeds u16"))?;
    Ok((w, h))
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> DocmarkResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| DocmarkError::render("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| DocmarkError::render("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(DocmarkError::render("pixmap byte len mismatch"));
    }
    let mut may_have_opacities = false;
    let mut pixels = Vec::<vello_cpu::peniko::color::PremulRgba8>::with_capacity(
        (width as usize) * (height as usize),
    );
    for px in bytes.chunks_exact(4) {
        may_have_opacities |= px[3] != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array([
            px[0], px[1], px[2], px[3],
        ]));
    }
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
