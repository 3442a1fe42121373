use super::*;
use crate::watermark::preset::Density;

#[test]
fn thousand_px_normal_matches_table() {
    let p = derive_params(1000.0, 1000.0, Density::Normal.preset());
    assert_eq!(p.font_size_px, 30.0);
    assert_eq!(p.gap_px, 200.0);
    assert_eq!(p.text_spacing_px, 60.0);
    assert_eq!(p.color.to_string(), "#808080");
    assert_eq!(p.alpha, 0.20);
}

#[test]
fn font_floor_on_small_surfaces() {
    for d in Density::ALL {
        let small = derive_params(500.0, 500.0, d.preset());
        assert_eq!(small.font_size_px, 24.0);
        let large = derive_params(2000.0, 2000.0, d.preset());
        assert!(large.font_size_px > small.font_size_px);
        assert_eq!(large.font_size_px, 60.0);
    }
}

#[test]
fn gap_and_spacing_never_shrink_below_base() {
    let p = derive_params(100.0, 40.0, Density::Dense.preset());
    assert_eq!(p.gap_px, 120.0);
    assert_eq!(p.text_spacing_px, 60.0);
}

#[test]
fn long_side_drives_scaling() {
    let a = derive_params(4000.0, 300.0, Density::Sparse.preset());
    let b = derive_params(300.0, 4000.0, Density::Sparse.preset());
    assert_eq!(a, b);
    assert_eq!(a.gap_px, 1200.0);
    assert_eq!(a.text_spacing_px, 240.0);
    assert_eq!(a.font_size_px, 120.0);
}

#[test]
fn density_ordering_of_gap_and_alpha() {
    for (w, h) in [(640.0, 480.0), (1000.0, 1000.0), (4032.0, 3024.0)] {
        let s = derive_params(w, h, Density::Sparse.preset());
        let n = derive_params(w, h, Density::Normal.preset());
        let d = derive_params(w, h, Density::Dense.preset());
        assert!(d.gap_px < n.gap_px && n.gap_px < s.gap_px);
        assert!(d.alpha < n.alpha && n.alpha < s.alpha);
    }
}

#[test]
fn params_serialize_with_hex_color() {
    let p = derive_params(1000.0, 1000.0, Density::Normal.preset());
    let v = serde_json::to_value(p).unwrap();
    assert_eq!(v["color"], serde_json::json!("#808080"));
    assert_eq!(v["font_size_px"], serde_json::json!(30.0));
}
