use std::path::Path;

use crate::foundation::core::ColorKey;
use crate::foundation::error::{TexelError, TexelResult};

/// Pixel layout of the decoded source, before expansion to RGBA8.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PixelFormat {
    /// Source carried no alpha channel.
    Rgb8,
    /// Source carried an alpha channel.
    Rgba8,
}

/// CPU-side pixels ready to be uploaded as a texture.
///
/// Always straight (non-premultiplied) RGBA8, row-major, tightly packed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Layout of the encoded source.
    pub format: PixelFormat,
    /// `width * height * 4` bytes.
    pub rgba8: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw straight RGBA8 bytes, validating the length.
    pub fn from_rgba8(width: u32, height: u32, rgba8: Vec<u8>) -> TexelResult<Self> {
        let expected = (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4);
        if rgba8.len() != expected {
            return Err(TexelError::config(format!(
                "pixel buffer {width}x{height} expects {expected} bytes, got {}",
                rgba8.len()
            )));
        }
        Ok(Self {
            width,
            height,
            format: PixelFormat::Rgba8,
            rgba8,
        })
    }

    /// Straight RGBA of the pixel at `(x, y)`, if in bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        self.rgba8
            .get(i..i + 4)
            .map(|px| [px[0], px[1], px[2], px[3]])
    }
}

/// Source of decoded images, keyed by path.
pub trait ImageDecoder {
    /// Decode the image at `path` into straight RGBA8.
    fn decode(&self, path: &Path) -> TexelResult<PixelBuffer>;
}

/// [`ImageDecoder`] that reads from the filesystem and decodes with the `image` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsImageDecoder;

impl ImageDecoder for FsImageDecoder {
    fn decode(&self, path: &Path) -> TexelResult<PixelBuffer> {
        let bytes = std::fs::read(path).map_err(|e| TexelError::decode(path, e))?;
        decode_image(&bytes, path)
    }
}

/// Decode encoded image bytes; `origin` is only used for error context.
pub fn decode_image(bytes: &[u8], origin: &Path) -> TexelResult<PixelBuffer> {
    let dyn_img = image::load_from_memory(bytes).map_err(|e| TexelError::decode(origin, e))?;
    let format = if dyn_img.color().has_alpha() {
        PixelFormat::Rgba8
    } else {
        PixelFormat::Rgb8
    };
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(TexelError::decode(origin, "image has zero size"));
    }

    Ok(PixelBuffer {
        width,
        height,
        format,
        rgba8: rgba.into_raw(),
    })
}

/// Make every pixel whose RGB equals `key` fully transparent.
///
/// Color channels are left as-is; only alpha changes. Returns the number of keyed pixels.
pub fn apply_color_key(pixels: &mut PixelBuffer, key: ColorKey) -> usize {
    let mut keyed = 0;
    for px in pixels.rgba8.chunks_exact_mut(4) {
        if key.matches(px[0], px[1], px[2]) {
            px[3] = 0;
            keyed += 1;
        }
    }
    if keyed > 0 {
        pixels.format = PixelFormat::Rgba8;
    }
    keyed
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
