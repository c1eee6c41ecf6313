use crate::assets::decode::PixelBuffer;
use crate::foundation::core::{BlendMode, Flip, PixelRect, Point, Rgb8, Rgba8};
use crate::foundation::error::TexelResult;

/// A presented frame as straight RGBA8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// RGBA of the pixel at `(x, y)`, if in bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        self.data.get(i..i + 4).map(|p| [p[0], p[1], p[2], p[3]])
    }
}

/// Opaque handle to a device-resident texture.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct TextureHandle(pub u64);

/// One textured quad: source region, destination rect and transform.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DrawCall {
    /// Texture region to sample; `None` samples the whole texture.
    pub src: Option<PixelRect>,
    /// Destination rectangle in frame-buffer pixels.
    pub dst: PixelRect,
    /// Clockwise rotation in degrees.
    pub angle_deg: f64,
    /// Rotation pivot relative to `dst`'s origin; `None` is the center of `dst`.
    pub pivot: Option<Point>,
    /// Mirror applied before rotation.
    pub flip: Flip,
}

impl DrawCall {
    /// Axis-aligned copy of `src` into `dst`.
    pub fn copy(src: Option<PixelRect>, dst: PixelRect) -> Self {
        Self {
            src,
            dst,
            angle_deg: 0.0,
            pivot: None,
            flip: Flip::None,
        }
    }

    /// Pivot actually used for rotation.
    pub fn resolved_pivot(&self) -> Point {
        self.pivot.unwrap_or_else(|| self.dst.center())
    }
}

/// Device statistics, mostly useful to assert resource hygiene.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DeviceStats {
    /// Textures currently alive.
    pub live_textures: usize,
    /// Textures created over the device's lifetime.
    pub created: u64,
    /// Textures destroyed over the device's lifetime.
    pub destroyed: u64,
    /// Draw calls issued.
    pub draw_calls: u64,
    /// Frames presented.
    pub frames: u64,
}

/// The hardware side of the renderer.
///
/// Textures carry their own modulation state (color, alpha, blend mode); draws read it at
/// draw time. Implementations must reject unknown or already-destroyed handles with
/// [`crate::TexelError::Device`].
pub trait RenderDevice {
    /// Upload `pixels` as a new texture.
    fn create_texture(&mut self, pixels: &PixelBuffer) -> TexelResult<TextureHandle>;

    /// Release a texture. The handle is invalid afterwards.
    fn destroy_texture(&mut self, handle: TextureHandle) -> TexelResult<()>;

    /// Set the RGB multiplier applied when drawing `handle`.
    fn set_color_mod(&mut self, handle: TextureHandle, color: Rgb8) -> TexelResult<()>;

    /// Set the alpha multiplier applied when drawing `handle`.
    fn set_alpha_mod(&mut self, handle: TextureHandle, alpha: u8) -> TexelResult<()>;

    /// Set the compositing rule used when drawing `handle`.
    fn set_blend_mode(&mut self, handle: TextureHandle, mode: BlendMode) -> TexelResult<()>;

    /// Draw `handle` into the current frame.
    fn draw_texture(&mut self, handle: TextureHandle, call: &DrawCall) -> TexelResult<()>;

    /// Fill the whole frame with `color`.
    fn clear(&mut self, color: Rgba8) -> TexelResult<()>;

    /// Finish the frame and return what was drawn.
    fn present(&mut self) -> TexelResult<FrameRGBA>;

    /// Resource and draw counters.
    fn stats(&self) -> DeviceStats {
        DeviceStats::default()
    }
}
