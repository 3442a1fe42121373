//! Encoders for composed frames: JPEG, PNG and single-page PDF.

mod pdf;

use std::io::Cursor;
use std::path::{Path, PathBuf};

use crate::foundation::core::{Canvas, Rgb8};
use crate::foundation::error::{DocmarkError, DocmarkResult};
use crate::render::FrameRGBA;

/// JPEG quality used for image and PDF export.
pub const JPEG_QUALITY: u8 = 95;

/// Background JPEG output is flattened onto.
pub const JPEG_BACKGROUND: Rgb8 = Rgb8::new(255, 255, 255);

/// Output file format.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Baseline JPEG, no alpha.
    #[default]
    Jpeg,
    /// PNG with alpha.
    Png,
    /// One PDF page the size of the frame.
    Pdf,
}

impl ExportFormat {
    /// Infer from a file extension (`jpg`, `jpeg`, `png`, `pdf`, any case).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    /// Canonical file extension.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Pdf => "pdf",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = DocmarkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_path(Path::new(&format!("x.{}", s.trim())))
            .ok_or_else(|| DocmarkError::validation(format!("unknown export format \"{s}\"")))
    }
}

/// `docmark_<unix_millis>.<ext>`.
pub fn default_file_name(format: ExportFormat, unix_millis: u128) -> String {
    format!("docmark_{unix_millis}.{}", format.extension())
}

/// Encode `frame` in `format`.
#[tracing::instrument(skip(frame), fields(width = frame.width, height = frame.height))]
pub fn encode(frame: &FrameRGBA, format: ExportFormat) -> DocmarkResult<Vec<u8>> {
    let bytes = match format {
        ExportFormat::Jpeg => encode_jpeg(frame, JPEG_QUALITY)?,
        ExportFormat::Png => encode_png(frame)?,
        ExportFormat::Pdf => encode_pdf(frame)?,
    };
    tracing::debug!(len = bytes.len(), "encoded frame");
    Ok(bytes)
}

/// JPEG at `quality`, flattened over [`JPEG_BACKGROUND`].
pub fn encode_jpeg(frame: &FrameRGBA, quality: u8) -> DocmarkResult<Vec<u8>> {
    let rgb = flatten_to_rgb8(frame, JPEG_BACKGROUND)?;
    let mut out = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, quality)
        .encode(&rgb, frame.width, frame.height, image::ExtendedColorType::Rgb8)
        .map_err(|e| DocmarkError::export(format!("jpeg encode: {e}")))?;
    Ok(out)
}

/// PNG with straight alpha.
pub fn encode_png(frame: &FrameRGBA) -> DocmarkResult<Vec<u8>> {
    let img = frame.to_rgba_image()?;
    let mut out = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .map_err(|e| DocmarkError::export(format!("png encode: {e}")))?;
    Ok(out)
}

/// Single-page PDF embedding the JPEG encoding of `frame`; page size equals frame size.
pub fn encode_pdf(frame: &FrameRGBA) -> DocmarkResult<Vec<u8>> {
    let canvas = Canvas::new(frame.width, frame.height)?;
    let jpeg = encode_jpeg(frame, JPEG_QUALITY)?;
    pdf::single_image_pdf(canvas, jpeg)
}

/// Encode and write `frame` to `path`, creating parent directories.
pub fn write_frame(frame: &FrameRGBA, format: ExportFormat, path: &Path) -> DocmarkResult<()> {
    let bytes = encode(frame, format)?;
    ensure_parent_dir(path)?;
    std::fs::write(path, bytes)
        .map_err(|e| DocmarkError::export(format!("write '{}': {e}", path.display())))?;
    tracing::info!(path = %path.display(), ?format, "wrote export");
    Ok(())
}

/// Resolve an output argument: directories get a generated file name.
pub fn resolve_output_path(out: &Path, format: ExportFormat, unix_millis: u128) -> PathBuf {
    if out.is_dir() {
        out.join(default_file_name(format, unix_millis))
    } else {
        out.to_path_buf()
    }
}

/// Create the parent directory of `path` when it has one.
pub fn ensure_parent_dir(path: &Path) -> DocmarkResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            DocmarkError::export(format!("create output dir '{}': {e}", parent.display()))
        })?;
    }
    Ok(())
}

fn flatten_to_rgb8(frame: &FrameRGBA, bg: Rgb8) -> DocmarkResult<Vec<u8>> {
    let expected = (frame.width as usize)
        .saturating_mul(frame.height as usize)
        .saturating_mul(4);
    if frame.data.len() != expected {
        return Err(DocmarkError::export(
            "frame byte length does not match its size",
        ));
    }

    let premul;
    let src: &[u8] = if frame.premultiplied {
        &frame.data
    } else {
        premul = premultiplied_copy(&frame.data);
        &premul
    };

    let mut out = Vec::with_capacity(expected / 4 * 3);
    for s in src.chunks_exact(4) {
        let inv = 255u16 - s[3] as u16;
        out.push((s[0] as u16 + mul_div255(bg.r as u16, inv)).min(255) as u8);
        out.push((s[1] as u16 + mul_div255(bg.g as u16, inv)).min(255) as u8);
        out.push((s[2] as u16 + mul_div255(bg.b as u16, inv)).min(255) as u8);
    }
    Ok(out)
}

fn premultiplied_copy(straight: &[u8]) -> Vec<u8> {
    let mut v = straight.to_vec();
    crate::assets::decode::premultiply_rgba8_in_place(&mut v);
    v
}

fn mul_div255(x: u16, y: u16) -> u16 {
    let t = x * y + 128;
    (t + (t >> 8)) >> 8
}

#[cfg(test)]
#[path = "../tests/unit/export/export.rs"]
mod tests;
