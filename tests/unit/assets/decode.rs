use std::io::Cursor;

use super::*;

#[test]
fn decode_png_dimensions_and_premul() {
    let src_rgba = vec![100u8, 50u8, 200u8, 128u8];
    let img = image::RgbaImage::from_raw(1, 1, src_rgba).unwrap();

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();

    let photo = decode_photo(&buf).unwrap();
    assert_eq!(photo.width, 1);
    assert_eq!(photo.height, 1);
    assert_eq!(
        photo.premul_bytes(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_garbage_is_decode_error() {
    let err = decode_photo(b"not an image").unwrap_err();
    assert!(matches!(err, DocmarkError::Decode(_)));
}

#[test]
fn load_missing_file_is_decode_error() {
    let err = load_photo(Path::new("target/no-such-photo.jpg")).unwrap_err();
    assert!(err.to_string().contains("no-such-photo.jpg"));
}

#[test]
fn unpremultiply_inverts_premultiply_for_opaque_and_clear() {
    let mut px = vec![10u8, 20, 30, 255, 9, 9, 9, 0];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(px, vec![10, 20, 30, 255, 0, 0, 0, 0]);
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(px, vec![10, 20, 30, 255, 0, 0, 0, 0]);
}

#[test]
fn unpremultiply_half_alpha_is_close() {
    let mut px = vec![200u8, 100, 0, 128];
    premultiply_rgba8_in_place(&mut px);
    unpremultiply_rgba8_in_place(&mut px);
    assert!((px[0] as i16 - 200).abs() <= 1);
    assert!((px[1] as i16 - 100).abs() <= 1);
    assert_eq!(px[2], 0);
    assert_eq!(px[3], 128);
}
