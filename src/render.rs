pub mod cpu;
pub(crate) mod text;

use crate::assets::decode::unpremultiply_rgba8_in_place;
use crate::foundation::error::{DocmarkError, DocmarkResult};

/// A rendered frame as RGBA8 pixels.
///
/// Frames read back from [`cpu::CpuSurface`] are premultiplied; the flag makes that explicit
/// at API boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Straight-alpha copy as an [`image::RgbaImage`].
    pub fn to_rgba_image(&self) -> DocmarkResult<image::RgbaImage> {
        let mut data = self.data.clone();
        if self.premultiplied {
            unpremultiply_rgba8_in_place(&mut data);
        }
        image::RgbaImage::from_raw(self.width, self.height, data)
            .ok_or_else(|| DocmarkError::render("frame byte length does not match its size"))
    }

    /// Premultiplied RGBA8 at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        self.data.get(i..i + 4).map(|p| [p[0], p[1], p[2], p[3]])
    }
}
