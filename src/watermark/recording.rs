use crate::foundation::core::{Affine, Point, Rgb8, Vec2};
use crate::watermark::surface::{FontSpec, TextAlign, TextBaseline, WatermarkSurface};

/// One call received by a [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceCall {
    /// `set_font`.
    SetFont(FontSpec),
    /// `set_fill_style`.
    SetFillStyle(Rgb8),
    /// `set_alpha`.
    SetAlpha(f32),
    /// `set_text_align`.
    SetTextAlign(TextAlign),
    /// `set_text_baseline`.
    SetTextBaseline(TextBaseline),
    /// `save`.
    Save,
    /// `restore`.
    Restore,
    /// `translate`.
    Translate(f64, f64),
    /// `rotate`.
    Rotate(f64),
    /// `fill_text`, with the transform that was active when it was issued.
    FillText {
        /// Text drawn.
        text: String,
        /// Anchor in the local frame.
        at: Point,
        /// Local-to-canvas transform.
        transform: Affine,
    },
}

#[derive(Clone, Copy, Debug)]
struct State {
    transform: Affine,
    font: FontSpec,
}

/// Surface that records calls instead of rasterizing.
///
/// Text is measured with a fixed advance of `advance_em` font sizes per character, which keeps
/// tile geometry independent of installed fonts.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    calls: Vec<SurfaceCall>,
    state: State,
    stack: Vec<State>,
    advance_em: f64,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingSurface {
    /// Empty recording with a 0.6em advance per character.
    pub fn new() -> Self {
        Self::with_advance_em(0.6)
    }

    /// Empty recording with a custom per-character advance.
    pub fn with_advance_em(advance_em: f64) -> Self {
        Self {
            calls: Vec::new(),
            state: State {
                transform: Affine::IDENTITY,
                font: FontSpec::default(),
            },
            stack: Vec::new(),
            advance_em,
        }
    }

    /// Every call in order.
    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    /// Number of `fill_text` calls.
    pub fn fill_count(&self) -> usize {
        self.fill_texts().count()
    }

    /// Canvas-space anchor of every `fill_text` call.
    pub fn fill_points(&self) -> Vec<Point> {
        self.fill_texts().map(|(at, tr)| tr * at).collect()
    }

    /// Canvas-space unit vector of the text baseline for each `fill_text` call.
    pub fn baseline_directions(&self) -> Vec<Vec2> {
        self.fill_texts()
            .map(|(_, tr)| {
                let d = tr * Point::new(1.0, 0.0) - tr * Point::ORIGIN;
                d / d.hypot()
            })
            .collect()
    }

    /// Current transform.
    pub fn transform(&self) -> Affine {
        self.state.transform
    }

    /// Number of unmatched `save` calls.
    pub fn save_depth(&self) -> usize {
        self.stack.len()
    }

    fn fill_texts(&self) -> impl Iterator<Item = (Point, Affine)> + '_ {
        self.calls.iter().filter_map(|c| match c {
            SurfaceCall::FillText { at, transform, .. } => Some((*at, *transform)),
            _ => None,
        })
    }
}

impl WatermarkSurface for RecordingSurface {
    fn set_font(&mut self, font: &FontSpec) {
        self.state.font = *font;
        self.calls.push(SurfaceCall::SetFont(*font));
    }

    fn set_fill_style(&mut self, color: Rgb8) {
        self.calls.push(SurfaceCall::SetFillStyle(color));
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.calls.push(SurfaceCall::SetAlpha(alpha));
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.calls.push(SurfaceCall::SetTextAlign(align));
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.calls.push(SurfaceCall::SetTextBaseline(baseline));
    }

    fn measure_text(&mut self, text: &str) -> f64 {
        (text.chars().count() as f64) * self.state.font.size_px * self.advance_em
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.calls.push(SurfaceCall::FillText {
            text: text.to_owned(),
            at: Point::new(x, y),
            transform: self.state.transform,
        });
    }

    fn save(&mut self) {
        self.stack.push(self.state);
        self.calls.push(SurfaceCall::Save);
    }

    fn restore(&mut self) {
        if let Some(s) = self.stack.pop() {
            self.state = s;
        }
        self.calls.push(SurfaceCall::Restore);
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.state.transform *= Affine::translate(Vec2::new(dx, dy));
        self.calls.push(SurfaceCall::Translate(dx, dy));
    }

    fn rotate(&mut self, angle_rad: f64) {
        self.state.transform *= Affine::rotate(angle_rad);
        self.calls.push(SurfaceCall::Rotate(angle_rad));
    }
}
