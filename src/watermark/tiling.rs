use std::f64::consts::FRAC_PI_4;

use crate::foundation::core::{Affine, Point, Vec2};
use crate::watermark::params::WatermarkParams;
use crate::watermark::surface::{FontSpec, TextAlign, TextBaseline, WatermarkSurface};

/// Angle of the watermark baseline relative to the viewer, before base-rotation compensation.
pub const WATERMARK_ANGLE_RAD: f64 = -FRAC_PI_4;

/// Grid geometry for one paint call.
///
/// Tiles are laid out in a frame that is centered on the canvas center and rotated by
/// [`TileGrid::angle`]. Anchors run from `-diag` (inclusive) to `+diag` (exclusive) on both
/// axes, so the grid spans the whole circle circumscribing the canvas with room to spare.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileGrid {
    /// Canvas diagonal, used as the grid half-extent.
    pub diag: f64,
    /// Column stride (measured text width plus spacing).
    pub step_x: f64,
    /// Row stride.
    pub step_y: f64,
    /// Number of anchors along y.
    pub rows: usize,
    /// Number of anchors along x.
    pub cols: usize,
    /// Rotation of the grid frame in radians.
    pub angle: f64,
}

impl TileGrid {
    /// Plan a grid for a `width` x `height` canvas.
    ///
    /// `base_rotation_rad` is the rotation already applied to the photo underneath; the grid
    /// is rotated by `base_rotation_rad - 45°`. Non-positive or non-finite strides produce an
    /// empty grid.
    pub fn plan(
        width: f64,
        height: f64,
        step_x: f64,
        step_y: f64,
        base_rotation_rad: f64,
    ) -> Self {
        let diag = width.hypot(height);
        Self {
            diag,
            step_x,
            step_y,
            rows: steps_to_cover(2.0 * diag, step_y),
            cols: steps_to_cover(2.0 * diag, step_x),
            angle: base_rotation_rad + WATERMARK_ANGLE_RAD,
        }
    }

    /// Total number of anchors.
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    /// `true` when the grid has no anchors.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Anchor positions in the grid frame, row by row.
    pub fn anchors(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.rows).flat_map(move |row| {
            let y = -self.diag + (row as f64) * self.step_y;
            (0..self.cols).map(move |col| Point::new(-self.diag + (col as f64) * self.step_x, y))
        })
    }

    /// Map from the grid frame to canvas pixel space.
    pub fn to_canvas(&self, width: f64, height: f64) -> Affine {
        Affine::translate(Vec2::new(width / 2.0, height / 2.0)) * Affine::rotate(self.angle)
    }

    /// `true` when a canvas-space point falls inside the area owned by the grid's cells
    /// (each anchor owns one stride in +x and +y).
    pub fn covers_point(&self, width: f64, height: f64, p: Point) -> bool {
        let local = self.to_canvas(width, height).inverse() * p;
        let x_end = -self.diag + (self.cols as f64) * self.step_x;
        let y_end = -self.diag + (self.rows as f64) * self.step_y;
        local.x >= -self.diag && local.x <= x_end && local.y >= -self.diag && local.y <= y_end
    }
}

fn steps_to_cover(span: f64, step: f64) -> usize {
    if !(step.is_finite() && step > 0.0 && span.is_finite() && span > 0.0) {
        return 0;
    }
    (span / step).ceil() as usize
}

/// Paint the tiled watermark onto `surface`.
///
/// Draws only; the surface is neither cleared nor resized. A zero-area or non-finite canvas is
/// a no-op. The surface's transform and drawing state are restored before returning.
pub fn paint<S: WatermarkSurface + ?Sized>(
    surface: &mut S,
    width: f64,
    height: f64,
    text: &str,
    params: &WatermarkParams,
    base_rotation_rad: f64,
) {
    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
        tracing::trace!(width, height, "skipping watermark on degenerate surface");
        return;
    }

    surface.save();
    surface.set_font(&FontSpec::bold_sans(params.font_size_px));
    surface.set_fill_style(params.color);
    surface.set_alpha(params.alpha);
    surface.set_text_align(TextAlign::Center);
    surface.set_text_baseline(TextBaseline::Middle);

    let step_x = surface.measure_text(text) + params.text_spacing_px;
    let grid = TileGrid::plan(width, height, step_x, params.gap_px, base_rotation_rad);

    surface.translate(width / 2.0, height / 2.0);
    surface.rotate(grid.angle);
    for anchor in grid.anchors() {
        surface.fill_text(text, anchor.x, anchor.y);
    }
    surface.restore();

    tracing::debug!(
        rows = grid.rows,
        cols = grid.cols,
        step_x,
        step_y = params.gap_px,
        "painted watermark grid"
    );
}

#[cfg(test)]
#[path = "../../tests/unit/watermark/tiling.rs"]
mod tests;
