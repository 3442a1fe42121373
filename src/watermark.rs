//! Watermark tiling core.
//!
//! [`derive_params`] scales a [`DensityPreset`] to a surface size and [`paint`] tiles the text
//! across any [`WatermarkSurface`]. Both are pure functions of their inputs.

pub mod config;
pub mod params;
pub mod preset;
pub mod recording;
pub mod surface;
pub mod tiling;

pub use config::{DEFAULT_TEXT, QuarterTurn, WatermarkConfig, WatermarkText};
pub use params::{WatermarkParams, derive_params};
pub use preset::{Density, DensityPreset};
pub use recording::{RecordingSurface, SurfaceCall};
pub use surface::{FontSpec, FontWeight, TextAlign, TextBaseline, WatermarkSurface};
pub use tiling::{TileGrid, WATERMARK_ANGLE_RAD, paint};

/// Derive parameters for `config.density` and paint `config.text` with the config's rotation
/// as the base rotation.
pub fn render_watermark<S: WatermarkSurface + ?Sized>(
    surface: &mut S,
    width: f64,
    height: f64,
    config: &WatermarkConfig,
) {
    let params = derive_params(width, height, config.density.preset());
    paint(
        surface,
        width,
        height,
        config.text.as_str(),
        &params,
        config.rotation.radians(),
    );
}
