use std::path::Path;
use std::sync::Arc;

use crate::foundation::core::Canvas;
use crate::foundation::error::{DocmarkError, DocmarkResult};

/// Decoded photo in premultiplied RGBA8 form.
#[derive(Clone, Debug)]
pub struct Photo {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub(crate) rgba8_premul: Arc<Vec<u8>>,
}

impl Photo {
    /// Take ownership of a straight-alpha RGBA image.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let mut rgba8_premul = img.into_raw();
        premultiply_rgba8_in_place(&mut rgba8_premul);
        Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        }
    }

    /// Photo dimensions as a validated canvas.
    pub fn canvas(&self) -> DocmarkResult<Canvas> {
        Canvas::new(self.width, self.height)
    }

    /// Premultiplied RGBA8 bytes.
    pub fn premul_bytes(&self) -> &[u8] {
        self.rgba8_premul.as_slice()
    }
}

/// Decode any format the `image` crate recognizes.
pub fn decode_photo(bytes: &[u8]) -> DocmarkResult<Photo> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| DocmarkError::decode(format!("decode image from memory: {e}")))?;
    Ok(Photo::from_rgba_image(dyn_img.to_rgba8()))
}

/// Read and decode a photo from disk.
#[tracing::instrument]
pub fn load_photo(path: &Path) -> DocmarkResult<Photo> {
    let bytes = std::fs::read(path).map_err(|e| {
        DocmarkError::decode(format!("failed to read photo '{}': {e}", path.display()))
    })?;
    let photo = decode_photo(&bytes)?;
    tracing::debug!(width = photo.width, height = photo.height, "decoded photo");
    Ok(photo)
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        let un = |c: u8| -> u8 { ((c as u16 * 255 + a / 2) / a).min(255) as u8 };
        px[0] = un(px[0]);
        px[1] = un(px[1]);
        px[2] = un(px[2]);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
