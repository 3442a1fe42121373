use super::*;
use crate::watermark::{Density, derive_params, paint};

fn surface(w: u32, h: u32) -> CpuSurface {
    CpuSurface::new(Canvas::new(w, h).unwrap()).unwrap()
}

const FONT: &[u8] = include_bytes!("../../data/fonts/DejaVuSans-Bold.ttf");

fn surface_with_font(w: u32, h: u32) -> CpuSurface {
    let mut s = surface(w, h);
    s.register_font(FONT).unwrap();
    s
}

/// Inclusive pixel bounds of everything with non-zero alpha.
fn ink_bounds(frame: &FrameRGBA) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for y in 0..frame.height {
        for x in 0..frame.width {
            if frame.pixel(x, y).is_some_and(|p| p[3] > 0) {
                bounds = Some(match bounds {
                    None => (x, y, x, y),
                    Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
                });
            }
        }
    }
    bounds
}

fn max_alpha(frame: &FrameRGBA) -> u8 {
    frame.data.chunks_exact(4).map(|px| px[3]).max().unwrap_or(0)
}

fn solid_photo(w: u32, h: u32, rgba: [u8; 4]) -> Photo {
    Photo::from_rgba_image(image::RgbaImage::from_pixel(w, h, image::Rgba(rgba)))
}

#[test]
fn rejects_sizes_outside_u16() {
    let too_wide = Canvas {
        width: 70_000,
        height: 10,
    };
    assert!(CpuSurface::new(too_wide).is_err());
    let empty = Canvas {
        width: 0,
        height: 10,
    };
    assert!(CpuSurface::new(empty).is_err());
}

#[test]
fn blank_surface_renders_transparent() {
    let mut s = surface(8, 6);
    let frame = s.render();
    assert_eq!(frame.width, 8);
    assert_eq!(frame.height, 6);
    assert_eq!(frame.data.len(), 8 * 6 * 4);
    assert!(frame.premultiplied);
    assert!(frame.data.iter().all(|&b| b == 0));
}

#[test]
fn opaque_photo_covers_surface() {
    let mut s = surface(16, 16);
    s.draw_photo(&solid_photo(16, 16, [255, 0, 0, 255]), Affine::IDENTITY)
        .unwrap();
    let frame = s.render();
    assert_eq!(frame.pixel(0, 0), Some([255, 0, 0, 255]));
    assert_eq!(frame.pixel(8, 8), Some([255, 0, 0, 255]));
    assert_eq!(frame.pixel(15, 15), Some([255, 0, 0, 255]));
    assert_eq!(frame.pixel(16, 0), None);
}

#[test]
fn zero_area_paint_leaves_pixels_untouched() {
    let mut s = surface(32, 32);
    s.draw_photo(&solid_photo(32, 32, [10, 20, 30, 255]), Affine::IDENTITY)
        .unwrap();
    let before = s.render();

    let params = derive_params(32.0, 32.0, Density::Dense.preset());
    paint(&mut s, 0.0, 0.0, "TEST", &params, 0.0);
    assert_eq!(s.render(), before);
}

#[test]
fn identical_paints_are_pixel_identical() {
    let params = derive_params(240.0, 160.0, Density::Normal.preset());
    let mut a = surface(240, 160);
    let mut b = surface(240, 160);
    paint(&mut a, 240.0, 160.0, "SAMPLE", &params, 0.0);
    paint(&mut b, 240.0, 160.0, "SAMPLE", &params, 0.0);
    assert_eq!(a.render(), b.render());
}

#[test]
fn fill_text_centers_ink_on_the_anchor() {
    let mut s = surface_with_font(240, 100);
    s.set_font(&FontSpec::bold_sans(24.0));
    s.set_fill_style(Rgb8::new(0x80, 0x80, 0x80));
    s.set_alpha(0.25);
    s.set_text_align(TextAlign::Center);
    s.set_text_baseline(TextBaseline::Middle);

    let measured = s.measure_text("HHHH");
    assert!(measured > 0.0);
    s.fill_text("HHHH", 120.0, 50.0);
    let frame = s.render();

    let (x0, y0, x1, y1) = ink_bounds(&frame).expect("glyphs were drawn");
    let cx = f64::from(x0 + x1 + 1) / 2.0;
    let cy = f64::from(y0 + y1 + 1) / 2.0;
    assert!((cx - 120.0).abs() <= 3.0, "ink x {x0}..{x1}");
    assert!((cy - 50.0).abs() <= 4.0, "ink y {y0}..{y1}");
    assert!(f64::from(x1 - x0 + 1) <= measured + 2.0);

    let ceiling = Rgb8::new(0x80, 0x80, 0x80).with_alpha(0.25)[3] + 1;
    assert!(max_alpha(&frame) <= ceiling);
}

#[test]
fn watermark_inks_surface_below_preset_alpha() {
    let mut s = surface_with_font(300, 300);
    let params = derive_params(300.0, 300.0, Density::Sparse.preset());
    paint(&mut s, 300.0, 300.0, "HH", &params, 0.0);
    let frame = s.render();

    assert!(ink_bounds(&frame).is_some());
    let ceiling = params.color.with_alpha(params.alpha)[3] + 1;
    assert!(max_alpha(&frame) <= ceiling);
}

#[test]
fn shaped_line_follows_text_and_font() {
    let mut s = surface_with_font(64, 64);
    s.set_font(&FontSpec::bold_sans(20.0));
    let small = s.measure_text("AB");
    assert_eq!(s.line.as_ref().map(|l| l.text.as_str()), Some("AB"));
    assert_eq!(s.measure_text("AB"), small);

    s.set_font(&FontSpec::bold_sans(40.0));
    let large = s.measure_text("AB");
    assert!(large > small);
    assert_eq!(s.line.as_ref().map(|l| l.font), Some(FontSpec::bold_sans(40.0)));

    let longer = s.measure_text("ABAB");
    assert!(longer > large);
    assert_eq!(s.line.as_ref().map(|l| l.text.as_str()), Some("ABAB"));
}

#[test]
fn measure_empty_text_is_zero() {
    let mut s = surface(4, 4);
    s.set_font(&FontSpec::bold_sans(30.0));
    assert_eq!(s.measure_text(""), 0.0);
}

#[test]
fn save_restore_round_trips_transform() {
    let mut s = surface(4, 4);
    s.save();
    s.translate(3.0, 4.0);
    s.rotate(1.0);
    s.restore();
    assert_eq!(s.state.transform, Affine::IDENTITY);
    // Unbalanced restore is ignored.
    s.restore();
    assert_eq!(s.state.transform, Affine::IDENTITY);
}

#[test]
fn clear_discards_previous_draws() {
    let mut s = surface(8, 8);
    s.draw_photo(&solid_photo(8, 8, [0, 255, 0, 255]), Affine::IDENTITY)
        .unwrap();
    s.clear();
    assert!(s.render().data.iter().all(|&b| b == 0));
}

#[test]
fn register_font_reports_family() {
    let mut s = surface(4, 4);
    let family = s.register_font(FONT).unwrap();
    assert_eq!(family, "DejaVu Sans");
    assert_eq!(s.font_family(), Some("DejaVu Sans"));
}

#[test]
fn register_font_rejects_garbage() {
    let mut s = surface(4, 4);
    assert!(s.register_font(b"definitely not a font").is_err());
    assert_eq!(s.font_family(), None);
}
