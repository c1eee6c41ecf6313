use std::cell::{RefCell, RefMut};
use std::path::Path;
use std::rc::Rc;

use crate::assets::decode::{FsImageDecoder, ImageDecoder, PixelBuffer};
use crate::assets::text::{Font, ParleyTextRasterizer, TextRasterizer};
use crate::foundation::core::Rgba8;
use crate::foundation::error::{TexelError, TexelResult};
use crate::render::backend::{DeviceStats, FrameRGBA, RenderDevice};

/// Explicit rendering context handed to every texture.
///
/// Bundles the device with the image decoder and text rasterizer it consumes. Cloning is
/// cheap and all clones refer to the same device. Single-threaded by construction.
#[derive(Clone)]
pub struct RenderContext {
    device: Rc<RefCell<dyn RenderDevice>>,
    images: Rc<dyn ImageDecoder>,
    text: Rc<RefCell<dyn TextRasterizer>>,
}

impl std::fmt::Debug for RenderContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderContext")
            .field("device_ptr", &Rc::as_ptr(&self.device))
            .finish_non_exhaustive()
    }
}

impl RenderContext {
    /// Wrap `device` with the filesystem image decoder and the Parley rasterizer.
    pub fn new<D: RenderDevice + 'static>(device: Rc<RefCell<D>>) -> Self {
        Self {
            device,
            images: Rc::new(FsImageDecoder),
            text: Rc::new(RefCell::new(ParleyTextRasterizer::new())),
        }
    }

    /// Replace the image decoder.
    pub fn with_image_decoder(mut self, decoder: impl ImageDecoder + 'static) -> Self {
        self.images = Rc::new(decoder);
        self
    }

    /// Replace the text rasterizer.
    pub fn with_text_rasterizer(mut self, rasterizer: impl TextRasterizer + 'static) -> Self {
        self.text = Rc::new(RefCell::new(rasterizer));
        self
    }

    /// Mutable access to the device for the duration of one call.
    ///
    /// Fails with [`TexelError::Device`] on re-entrant use instead of panicking.
    pub fn device(&self) -> TexelResult<RefMut<'_, dyn RenderDevice + 'static>> {
        self.device
            .try_borrow_mut()
            .map_err(|_| TexelError::device("render device is already borrowed"))
    }

    /// Whether both contexts drive the same device.
    pub fn same_device(&self, other: &RenderContext) -> bool {
        Rc::ptr_eq(&self.device, &other.device)
    }

    pub(crate) fn decode_image(&self, path: &Path) -> TexelResult<PixelBuffer> {
        self.images.decode(path)
    }

    pub(crate) fn rasterize_text(
        &self,
        text: &str,
        font: &Font,
        color: Rgba8,
    ) -> TexelResult<PixelBuffer> {
        let mut r = self
            .text
            .try_borrow_mut()
            .map_err(|_| TexelError::rasterize("text rasterizer is already borrowed"))?;
        r.rasterize(text, font, color)
    }

    /// Clear the frame.
    pub fn clear(&self, color: Rgba8) -> TexelResult<()> {
        self.device()?.clear(color)
    }

    /// Present the frame.
    pub fn present(&self) -> TexelResult<FrameRGBA> {
        self.device()?.present()
    }

    /// Device counters.
    pub fn stats(&self) -> TexelResult<DeviceStats> {
        Ok(self.device()?.stats())
    }
}
