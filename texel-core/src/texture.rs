use std::path::Path;

use crate::assets::decode::{PixelBuffer, apply_color_key};
use crate::assets::text::Font;
use crate::foundation::core::{BlendMode, ColorKey, Flip, PixelRect, Point, Rgb8, Rgba8};
use crate::foundation::error::{TexelError, TexelResult};
use crate::render::backend::{DrawCall, TextureHandle};
use crate::render::context::RenderContext;

/// A device texture plus its pixel size.
///
/// A texture is either empty (no handle, size `0x0`) or loaded (one live handle, size
/// strictly positive). Every load goes through the same release-then-create path, so at
/// most one device resource is ever held. The handle is released on [`Texture::free`] and
/// on drop.
#[derive(Debug)]
pub struct Texture {
    ctx: RenderContext,
    handle: Option<TextureHandle>,
    width: u32,
    height: u32,
}

impl Texture {
    /// An empty texture bound to `ctx`.
    pub fn new(ctx: RenderContext) -> Self {
        Self {
            ctx,
            handle: None,
            width: 0,
            height: 0,
        }
    }

    /// Decode an image file, optionally key out one color, and upload it.
    ///
    /// If decoding fails the current contents are kept. If the device rejects the upload
    /// the texture is left empty.
    #[tracing::instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn load_from_file(
        &mut self,
        path: impl AsRef<Path>,
        color_key: Option<ColorKey>,
    ) -> TexelResult<()> {
        let mut pixels = self.ctx.decode_image(path.as_ref())?;
        if let Some(key) = color_key {
            let keyed = apply_color_key(&mut pixels, key);
            tracing::debug!(keyed, "applied color key");
        }
        self.reload(&pixels)
    }

    /// Rasterize `text` with `font` and upload the result.
    ///
    /// Same failure semantics as [`Texture::load_from_file`], with
    /// [`TexelError::Rasterize`] in place of the decode error.
    #[tracing::instrument(skip(self, font), fields(size_px = font.size_px()))]
    pub fn load_from_rendered_text(
        &mut self,
        text: &str,
        color: Rgba8,
        font: &Font,
    ) -> TexelResult<()> {
        let pixels = self.ctx.rasterize_text(text, font, color)?;
        self.reload(&pixels)
    }

    /// Upload already-decoded pixels.
    pub fn load_from_pixels(&mut self, pixels: &PixelBuffer) -> TexelResult<()> {
        self.reload(pixels)
    }

    fn reload(&mut self, pixels: &PixelBuffer) -> TexelResult<()> {
        self.free()?;
        let handle = self.ctx.device()?.create_texture(pixels)?;
        self.handle = Some(handle);
        self.width = pixels.width;
        self.height = pixels.height;
        Ok(())
    }

    /// Set the RGB multiplier used on every draw.
    pub fn set_color(&mut self, r: u8, g: u8, b: u8) -> TexelResult<()> {
        let h = self.loaded("set color of")?;
        self.ctx.device()?.set_color_mod(h, Rgb8::new(r, g, b))
    }

    /// Set the alpha multiplier used on every draw.
    pub fn set_alpha(&mut self, alpha: u8) -> TexelResult<()> {
        let h = self.loaded("set alpha of")?;
        self.ctx.device()?.set_alpha_mod(h, alpha)
    }

    /// Set how draws composite over the frame.
    pub fn set_blend_mode(&mut self, mode: BlendMode) -> TexelResult<()> {
        let h = self.loaded("set blend mode of")?;
        self.ctx.device()?.set_blend_mode(h, mode)
    }

    /// Draw at `(x, y)`; with a clip only that region is drawn, at its own size.
    pub fn render(&self, x: i32, y: i32, clip: Option<PixelRect>) -> TexelResult<()> {
        let h = self.loaded("render")?;
        let call = DrawCall::copy(clip, self.dst_rect(x, y, clip));
        self.ctx.device()?.draw_texture(h, &call)
    }

    /// Draw like [`Texture::render`], rotated clockwise by `angle_deg` around `pivot`
    /// (relative to the destination origin, center when `None`) after applying `flip`.
    pub fn render_rotated_flipped(
        &self,
        x: i32,
        y: i32,
        clip: Option<PixelRect>,
        angle_deg: f64,
        pivot: Option<Point>,
        flip: Flip,
    ) -> TexelResult<()> {
        let h = self.loaded("render")?;
        let call = DrawCall {
            src: clip,
            dst: self.dst_rect(x, y, clip),
            angle_deg,
            pivot,
            flip,
        };
        self.ctx.device()?.draw_texture(h, &call)
    }

    /// Release the device resource. Calling it on an empty texture does nothing.
    ///
    /// On failure the handle is kept, so a later `free` can retry.
    pub fn free(&mut self) -> TexelResult<()> {
        if let Some(h) = self.handle {
            self.ctx.device()?.destroy_texture(h)?;
            self.handle = None;
            self.width = 0;
            self.height = 0;
        }
        Ok(())
    }

    fn dst_rect(&self, x: i32, y: i32, clip: Option<PixelRect>) -> PixelRect {
        match clip {
            Some(c) => PixelRect::new(x, y, c.w, c.h),
            None => PixelRect::new(x, y, self.width, self.height),
        }
    }

    fn loaded(&self, op: &'static str) -> TexelResult<TextureHandle> {
        self.handle.ok_or(TexelError::NotLoaded(op))
    }

    /// Width in pixels, 0 when empty.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels, 0 when empty.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Whether a device resource is held.
    pub fn is_loaded(&self) -> bool {
        self.handle.is_some()
    }

    /// The held device handle, if any.
    pub fn handle(&self) -> Option<TextureHandle> {
        self.handle
    }

    /// Context this texture draws through.
    pub fn context(&self) -> &RenderContext {
        &self.ctx
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        if let Err(err) = self.free() {
            tracing::warn!(%err, "failed to release texture on drop");
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/texture.rs"]
mod tests;
