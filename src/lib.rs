//! Docmark tiles a rotated, semi-transparent text watermark over document photos.
//!
//! The core lives in [`watermark`]: [`derive_params`] scales a density preset to a surface and
//! [`paint`] tiles the text across anything implementing [`WatermarkSurface`]. Around it:
//!
//! - [`CpuSurface`] rasterizes onto an RGBA canvas
//! - [`compose`] builds the preview and export compositions of a photo
//! - [`export`] encodes the result as JPEG, PNG or a single-page PDF
#![forbid(unsafe_code)]

mod assets;
mod foundation;

pub mod compose;
pub mod export;
/// Raster backend.
pub mod render;
pub mod watermark;

pub use crate::foundation::core::{Affine, Canvas, Point, Rgb8, Vec2};
pub use crate::foundation::error::{DocmarkError, DocmarkResult};

pub use crate::assets::decode::{Photo, decode_photo, load_photo};
pub use crate::compose::{
    FONT_ENV, FontOptions, compose_export, compose_overlay, compose_preview, export_canvas,
};
pub use crate::export::{ExportFormat, encode, write_frame};
pub use crate::render::FrameRGBA;
pub use crate::render::cpu::CpuSurface;
pub use crate::watermark::{
    DEFAULT_TEXT, Density, DensityPreset, QuarterTurn, RecordingSurface, WatermarkConfig,
    WatermarkParams, WatermarkSurface, WatermarkText, derive_params, paint, render_watermark,
};
