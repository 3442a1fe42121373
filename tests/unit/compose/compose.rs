use super::*;
use crate::watermark::{Density, WatermarkText};

const RED: [u8; 4] = [255, 0, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];

/// 20x10 photo: left half red, right half blue.
fn split_photo() -> Photo {
    let img = image::RgbaImage::from_fn(20, 10, |x, _| {
        if x < 10 {
            image::Rgba(RED)
        } else {
            image::Rgba(BLUE)
        }
    });
    Photo::from_rgba_image(img)
}

fn blank_text(rotation: QuarterTurn) -> WatermarkConfig {
    WatermarkConfig {
        text: WatermarkText::verbatim(""),
        density: Density::Normal,
        rotation,
    }
}

#[test]
fn export_canvas_swaps_axes_on_odd_quarter_turns() {
    let photo = split_photo();
    let size = |t| {
        let c = export_canvas(&photo, t).unwrap();
        (c.width, c.height)
    };
    assert_eq!(size(QuarterTurn::R0), (20, 10));
    assert_eq!(size(QuarterTurn::R90), (10, 20));
    assert_eq!(size(QuarterTurn::R180), (20, 10));
    assert_eq!(size(QuarterTurn::R270), (10, 20));
}

#[test]
fn export_upright_keeps_photo_layout() {
    let frame =
        compose_export(&split_photo(), &blank_text(QuarterTurn::R0), &FontOptions::default())
            .unwrap();
    assert_eq!((frame.width, frame.height), (20, 10));
    assert_eq!(frame.pixel(3, 5), Some(RED));
    assert_eq!(frame.pixel(16, 5), Some(BLUE));
}

#[test]
fn export_quarter_turn_moves_left_half_to_top() {
    let frame =
        compose_export(&split_photo(), &blank_text(QuarterTurn::R90), &FontOptions::default())
            .unwrap();
    assert_eq!((frame.width, frame.height), (10, 20));
    assert_eq!(frame.pixel(5, 3), Some(RED));
    assert_eq!(frame.pixel(5, 16), Some(BLUE));
}

#[test]
fn export_half_turn_mirrors_both_axes() {
    let frame = compose_export(
        &split_photo(),
        &blank_text(QuarterTurn::R180),
        &FontOptions::default(),
    )
    .unwrap();
    assert_eq!((frame.width, frame.height), (20, 10));
    assert_eq!(frame.pixel(3, 5), Some(BLUE));
    assert_eq!(frame.pixel(16, 5), Some(RED));
}

#[test]
fn export_three_quarter_turn_moves_left_half_to_bottom() {
    let frame = compose_export(
        &split_photo(),
        &blank_text(QuarterTurn::R270),
        &FontOptions::default(),
    )
    .unwrap();
    assert_eq!((frame.width, frame.height), (10, 20));
    assert_eq!(frame.pixel(5, 3), Some(BLUE));
    assert_eq!(frame.pixel(5, 16), Some(RED));
}

#[test]
fn export_is_deterministic() {
    let cfg = WatermarkConfig {
        text: WatermarkText::from_input("COPY ONLY"),
        density: Density::Dense,
        rotation: QuarterTurn::R90,
    };
    let a = compose_export(&split_photo(), &cfg, &FontOptions::default()).unwrap();
    let b = compose_export(&split_photo(), &cfg, &FontOptions::default()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn fit_canvas_preserves_aspect() {
    let photo = split_photo();
    let c = fit_canvas(&photo, Canvas::new(50, 50).unwrap()).unwrap();
    assert_eq!((c.width, c.height), (50, 25));
    let c = fit_canvas(&photo, Canvas::new(8, 100).unwrap()).unwrap();
    assert_eq!((c.width, c.height), (8, 4));
}

#[test]
fn preview_scales_photo_into_viewport() {
    let frame = compose_preview(
        &split_photo(),
        Canvas::new(40, 40).unwrap(),
        &blank_text(QuarterTurn::R90),
        &FontOptions::default(),
    )
    .unwrap();
    // Rotation is an export-only concern.
    assert_eq!((frame.width, frame.height), (40, 20));
    assert_eq!(frame.pixel(5, 10), Some(RED));
    assert_eq!(frame.pixel(34, 10), Some(BLUE));
}

#[test]
fn overlay_with_blank_text_is_transparent() {
    let frame = compose_overlay(
        Canvas::new(64, 48).unwrap(),
        &blank_text(QuarterTurn::R0),
        &FontOptions::default(),
    )
    .unwrap();
    assert_eq!((frame.width, frame.height), (64, 48));
    assert!(frame.data.iter().all(|&b| b == 0));
}

#[test]
fn missing_font_file_is_config_error() {
    let fonts = FontOptions {
        font_path: Some(PathBuf::from("target/no-such-font.ttf")),
    };
    let err = compose_overlay(
        Canvas::new(4, 4).unwrap(),
        &WatermarkConfig::default(),
        &fonts,
    )
    .unwrap_err();
    assert!(matches!(err, DocmarkError::Config(_)));
}

#[test]
fn explicit_font_path_overrides_environment() {
    let p = PathBuf::from("fonts/custom.ttf");
    assert_eq!(
        FontOptions::with_override(Some(p.clone())).font_path,
        Some(p)
    );
}
