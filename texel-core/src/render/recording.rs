use std::collections::BTreeMap;

use crate::assets::decode::PixelBuffer;
use crate::foundation::core::{BlendMode, Rgb8, Rgba8};
use crate::foundation::error::{TexelError, TexelResult};
use crate::render::backend::{DeviceStats, DrawCall, FrameRGBA, RenderDevice, TextureHandle};

/// One device operation, in issue order.
#[derive(Clone, Debug, PartialEq)]
pub enum DeviceOp {
    /// Texture created with the given size.
    Create {
        /// Returned handle.
        handle: TextureHandle,
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },
    /// Texture released.
    Destroy(TextureHandle),
    /// Color modulation changed.
    ColorMod(TextureHandle, Rgb8),
    /// Alpha modulation changed.
    AlphaMod(TextureHandle, u8),
    /// Blend mode changed.
    Blend(TextureHandle, BlendMode),
    /// Draw issued.
    Draw(TextureHandle, DrawCall),
    /// Frame cleared.
    Clear(Rgba8),
    /// Frame presented.
    Present,
}

/// [`RenderDevice`] that rasterizes nothing and records every call.
///
/// Textures are tracked so misuse (double destroy, draw after destroy) still fails the
/// way a real device would. `fail_next_create` lets callers exercise device errors.
#[derive(Debug, Default)]
pub struct RecordingDevice {
    ops: Vec<DeviceOp>,
    live: BTreeMap<TextureHandle, (u32, u32)>,
    next_handle: u64,
    fail_next_create: bool,
    stats: DeviceStats,
}

impl RecordingDevice {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the recorded operations.
    pub fn ops(&self) -> &[DeviceOp] {
        &self.ops
    }

    /// Only the draw calls, in order.
    pub fn draws(&self) -> Vec<(TextureHandle, DrawCall)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DeviceOp::Draw(h, c) => Some((*h, *c)),
                _ => None,
            })
            .collect()
    }

    /// Forget recorded operations; live textures are kept.
    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    /// Handles currently alive.
    pub fn live_handles(&self) -> Vec<TextureHandle> {
        self.live.keys().copied().collect()
    }

    /// Make the next `create_texture` fail with a device error.
    pub fn fail_next_create(&mut self) {
        self.fail_next_create = true;
    }

    fn check(&self, handle: TextureHandle) -> TexelResult<()> {
        if self.live.contains_key(&handle) {
            Ok(())
        } else {
            Err(TexelError::device(format!(
                "unknown texture handle {:#x}",
                handle.0
            )))
        }
    }
}

impl RenderDevice for RecordingDevice {
    fn create_texture(&mut self, pixels: &PixelBuffer) -> TexelResult<TextureHandle> {
        if std::mem::take(&mut self.fail_next_create) {
            return Err(TexelError::device("renderer lost"));
        }
        if pixels.width == 0 || pixels.height == 0 {
            return Err(TexelError::device("cannot create an empty texture"));
        }
        self.next_handle += 1;
        let handle = TextureHandle(self.next_handle);
        self.live.insert(handle, (pixels.width, pixels.height));
        self.ops.push(DeviceOp::Create {
            handle,
            width: pixels.width,
            height: pixels.height,
        });
        self.stats.created += 1;
        self.stats.live_textures = self.live.len();
        Ok(handle)
    }

    fn destroy_texture(&mut self, handle: TextureHandle) -> TexelResult<()> {
        self.check(handle)?;
        self.live.remove(&handle);
        self.ops.push(DeviceOp::Destroy(handle));
        self.stats.destroyed += 1;
        self.stats.live_textures = self.live.len();
        Ok(())
    }

    fn set_color_mod(&mut self, handle: TextureHandle, color: Rgb8) -> TexelResult<()> {
        self.check(handle)?;
        self.ops.push(DeviceOp::ColorMod(handle, color));
        Ok(())
    }

    fn set_alpha_mod(&mut self, handle: TextureHandle, alpha: u8) -> TexelResult<()> {
        self.check(handle)?;
        self.ops.push(DeviceOp::AlphaMod(handle, alpha));
        Ok(())
    }

    fn set_blend_mode(&mut self, handle: TextureHandle, mode: BlendMode) -> TexelResult<()> {
        self.check(handle)?;
        self.ops.push(DeviceOp::Blend(handle, mode));
        Ok(())
    }

    fn draw_texture(&mut self, handle: TextureHandle, call: &DrawCall) -> TexelResult<()> {
        self.check(handle)?;
        self.ops.push(DeviceOp::Draw(handle, *call));
        self.stats.draw_calls += 1;
        Ok(())
    }

    fn clear(&mut self, color: Rgba8) -> TexelResult<()> {
        self.ops.push(DeviceOp::Clear(color));
        Ok(())
    }

    fn present(&mut self) -> TexelResult<FrameRGBA> {
        self.ops.push(DeviceOp::Present);
        self.stats.frames += 1;
        Ok(FrameRGBA {
            width: 0,
            height: 0,
            data: Vec::new(),
        })
    }

    fn stats(&self) -> DeviceStats {
        self.stats
    }
}
