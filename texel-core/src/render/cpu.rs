use crate::assets::decode::PixelBuffer;
use crate::foundation::core::{Affine, BlendMode, PixelRect, Rgb8, Rgba8, Vec2};
use crate::foundation::error::{TexelError, TexelResult};
use crate::foundation::math::{add_sat_u8, mul_div255_u8};
use crate::render::backend::{DeviceStats, DrawCall, FrameRGBA, RenderDevice, TextureHandle};

const MAX_TEXTURE_SIZE_ENV: &str = "TEXEL_MAX_TEXTURE_SIZE";

/// Options for the CPU device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuDeviceOpts {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) max_texture_size: u32,
    pub(crate) clear_rgba: Rgba8,
}

impl Default for CpuDeviceOpts {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            max_texture_size: 8192,
            clear_rgba: Rgba8::WHITE,
        }
    }
}

impl CpuDeviceOpts {
    /// Defaults, with `TEXEL_MAX_TEXTURE_SIZE` applied when it parses as a positive integer.
    pub fn from_env() -> Self {
        let mut opts = Self::default();
        if let Some(n) = std::env::var(MAX_TEXTURE_SIZE_ENV)
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|&n| n > 0)
        {
            opts.max_texture_size = n;
        }
        opts
    }

    /// Return options with a different frame-buffer size.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Return options with a different per-axis texture size limit.
    pub fn with_max_texture_size(mut self, max: u32) -> Self {
        self.max_texture_size = max;
        self
    }

    /// Return options with a different color for the initial frame buffer.
    pub fn with_clear_rgba(mut self, clear: Rgba8) -> Self {
        self.clear_rgba = clear;
        self
    }

    /// Frame-buffer size.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Per-axis texture size limit.
    pub fn max_texture_size(&self) -> u32 {
        self.max_texture_size
    }
}

struct CpuTexture {
    width: u32,
    height: u32,
    rgba8: Vec<u8>,
    color_mod: Rgb8,
    alpha_mod: u8,
    blend: BlendMode,
}

#[derive(Default)]
struct Slot {
    generation: u32,
    texture: Option<CpuTexture>,
}

/// Software [`RenderDevice`]: textures live in a slot table, draws rasterize into a
/// straight-RGBA8 frame buffer with nearest-neighbour sampling.
///
/// Handles encode `(generation << 32) | slot`; a freed slot is reused with a bumped
/// generation so stale handles are rejected.
pub struct CpuDevice {
    opts: CpuDeviceOpts,
    slots: Vec<Slot>,
    frame: Vec<u8>,
    stats: DeviceStats,
}

impl std::fmt::Debug for CpuDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuDevice")
            .field("opts", &self.opts)
            .field("slots", &self.slots.len())
            .field("stats", &self.stats)
            .finish()
    }
}

impl CpuDevice {
    /// Create a device with a frame buffer cleared to `opts`' clear color.
    pub fn new(opts: CpuDeviceOpts) -> TexelResult<Self> {
        if opts.width == 0 || opts.height == 0 {
            return Err(TexelError::config(format!(
                "frame buffer must be non-empty, got {}x{}",
                opts.width, opts.height
            )));
        }
        if opts.max_texture_size == 0 {
            return Err(TexelError::config("max_texture_size must be > 0"));
        }
        let len = (opts.width as usize)
            .checked_mul(opts.height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| TexelError::config("frame buffer size overflows"))?;
        let mut dev = Self {
            opts,
            slots: Vec::new(),
            frame: vec![0; len],
            stats: DeviceStats::default(),
        };
        fill_rgba(&mut dev.frame, opts.clear_rgba);
        Ok(dev)
    }

    /// Device options.
    pub fn opts(&self) -> &CpuDeviceOpts {
        &self.opts
    }

    /// Read back the frame buffer without presenting.
    pub fn frame(&self) -> FrameRGBA {
        FrameRGBA {
            width: self.opts.width,
            height: self.opts.height,
            data: self.frame.clone(),
        }
    }

    fn encode(slot: usize, generation: u32) -> TextureHandle {
        TextureHandle((u64::from(generation) << 32) | slot as u64)
    }

    fn decode(handle: TextureHandle) -> (usize, u32) {
        ((handle.0 & 0xffff_ffff) as usize, (handle.0 >> 32) as u32)
    }

    fn texture(&self, handle: TextureHandle) -> TexelResult<&CpuTexture> {
        let (idx, generation) = Self::decode(handle);
        self.slots
            .get(idx)
            .filter(|s| s.generation == generation)
            .and_then(|s| s.texture.as_ref())
            .ok_or_else(|| TexelError::device(format!("unknown texture handle {:#x}", handle.0)))
    }

    fn texture_mut(&mut self, handle: TextureHandle) -> TexelResult<&mut CpuTexture> {
        let (idx, generation) = Self::decode(handle);
        self.slots
            .get_mut(idx)
            .filter(|s| s.generation == generation)
            .and_then(|s| s.texture.as_mut())
            .ok_or_else(|| TexelError::device(format!("unknown texture handle {:#x}", handle.0)))
    }
}

impl RenderDevice for CpuDevice {
    fn create_texture(&mut self, pixels: &PixelBuffer) -> TexelResult<TextureHandle> {
        if pixels.width == 0 || pixels.height == 0 {
            return Err(TexelError::device(format!(
                "cannot create a {}x{} texture",
                pixels.width, pixels.height
            )));
        }
        let max = self.opts.max_texture_size;
        if pixels.width > max || pixels.height > max {
            return Err(TexelError::device(format!(
                "texture {}x{} exceeds device limit {max}",
                pixels.width, pixels.height
            )));
        }
        if pixels.rgba8.len() != (pixels.width as usize) * (pixels.height as usize) * 4 {
            return Err(TexelError::device("texture byte length mismatch"));
        }

        let texture = CpuTexture {
            width: pixels.width,
            height: pixels.height,
            rgba8: pixels.rgba8.clone(),
            color_mod: Rgb8::WHITE,
            alpha_mod: 255,
            blend: BlendMode::Blend,
        };

        let idx = match self.slots.iter().position(|s| s.texture.is_none()) {
            Some(i) => i,
            None => {
                if self.slots.len() > u32::MAX as usize {
                    return Err(TexelError::device("texture slot table exhausted"));
                }
                self.slots.push(Slot::default());
                self.slots.len() - 1
            }
        };
        let slot = &mut self.slots[idx];
        slot.texture = Some(texture);
        let handle = Self::encode(idx, slot.generation);

        self.stats.created += 1;
        self.stats.live_textures += 1;
        tracing::debug!(handle = handle.0, w = pixels.width, h = pixels.height, "texture created");
        Ok(handle)
    }

    fn destroy_texture(&mut self, handle: TextureHandle) -> TexelResult<()> {
        self.texture(handle)?;
        let (idx, _) = Self::decode(handle);
        let slot = &mut self.slots[idx];
        slot.texture = None;
        slot.generation = slot.generation.wrapping_add(1);

        self.stats.destroyed += 1;
        self.stats.live_textures -= 1;
        tracing::debug!(handle = handle.0, "texture destroyed");
        Ok(())
    }

    fn set_color_mod(&mut self, handle: TextureHandle, color: Rgb8) -> TexelResult<()> {
        self.texture_mut(handle)?.color_mod = color;
        Ok(())
    }

    fn set_alpha_mod(&mut self, handle: TextureHandle, alpha: u8) -> TexelResult<()> {
        self.texture_mut(handle)?.alpha_mod = alpha;
        Ok(())
    }

    fn set_blend_mode(&mut self, handle: TextureHandle, mode: BlendMode) -> TexelResult<()> {
        self.texture_mut(handle)?.blend = mode;
        Ok(())
    }

    fn draw_texture(&mut self, handle: TextureHandle, call: &DrawCall) -> TexelResult<()> {
        let (fw, fh) = (self.opts.width, self.opts.height);
        let idx = Self::decode(handle).0;
        self.texture(handle)?;
        self.stats.draw_calls += 1;

        let Some(tex) = self.slots[idx].texture.as_ref() else {
            return Ok(());
        };
        draw_quad(&mut self.frame, fw, fh, tex, call);
        Ok(())
    }

    fn clear(&mut self, color: Rgba8) -> TexelResult<()> {
        fill_rgba(&mut self.frame, color);
        Ok(())
    }

    fn present(&mut self) -> TexelResult<FrameRGBA> {
        self.stats.frames += 1;
        Ok(self.frame())
    }

    fn stats(&self) -> DeviceStats {
        self.stats
    }
}

/// Forward transform from `dst`-local coordinates to frame coordinates.
///
/// `T(dst.origin) * T(pivot) * R(angle) * T(-pivot) * Flip`
pub(crate) fn draw_transform(call: &DrawCall) -> Affine {
    let dst = call.dst;
    let pivot = call.resolved_pivot();
    let pivot = Vec2::new(f64::from(pivot.x), f64::from(pivot.y));
    Affine::translate(Vec2::new(f64::from(dst.x), f64::from(dst.y)))
        * Affine::translate(pivot)
        * Affine::rotate(call.angle_deg.to_radians())
        * Affine::translate(-pivot)
        * call.flip.to_affine(f64::from(dst.w), f64::from(dst.h))
}

fn draw_quad(frame: &mut [u8], fw: u32, fh: u32, tex: &CpuTexture, call: &DrawCall) {
    let src = call
        .src
        .unwrap_or(PixelRect::new(0, 0, tex.width, tex.height));
    let dst = call.dst;
    if src.is_empty() || dst.is_empty() || !call.angle_deg.is_finite() {
        return;
    }

    let fwd = draw_transform(call);
    let inv = fwd.inverse();
    let (dw, dh) = (f64::from(dst.w), f64::from(dst.h));
    let (sw, sh) = (f64::from(src.w), f64::from(src.h));

    let bbox = fwd.transform_rect_bbox(kurbo::Rect::new(0.0, 0.0, dw, dh));
    let x0 = bbox.x0.floor().max(0.0) as i64;
    let y0 = bbox.y0.floor().max(0.0) as i64;
    let x1 = bbox.x1.ceil().min(f64::from(fw)) as i64;
    let y1 = bbox.y1.ceil().min(f64::from(fh)) as i64;

    for py in y0..y1 {
        for px in x0..x1 {
            let local = inv * kurbo::Point::new(px as f64 + 0.5, py as f64 + 0.5);
            if local.x < 0.0 || local.y < 0.0 || local.x >= dw || local.y >= dh {
                continue;
            }
            let sx = i64::from(src.x) + (local.x * sw / dw).floor() as i64;
            let sy = i64::from(src.y) + (local.y * sh / dh).floor() as i64;
            if sx < 0 || sy < 0 || sx >= i64::from(tex.width) || sy >= i64::from(tex.height) {
                continue;
            }

            let si = ((sy as usize) * (tex.width as usize) + (sx as usize)) * 4;
            let t = &tex.rgba8[si..si + 4];
            let s = [
                mul_div255_u8(t[0], tex.color_mod.r),
                mul_div255_u8(t[1], tex.color_mod.g),
                mul_div255_u8(t[2], tex.color_mod.b),
                mul_div255_u8(t[3], tex.alpha_mod),
            ];

            let di = ((py as usize) * (fw as usize) + (px as usize)) * 4;
            blend_pixel(&mut frame[di..di + 4], s, tex.blend);
        }
    }
}

fn blend_pixel(d: &mut [u8], s: [u8; 4], mode: BlendMode) {
    match mode {
        BlendMode::None => d.copy_from_slice(&s),
        BlendMode::Blend => {
            let sa = s[3];
            if sa == 0 {
                return;
            }
            let inv = 255 - sa;
            for c in 0..3 {
                d[c] = add_sat_u8(mul_div255_u8(s[c], sa), mul_div255_u8(d[c], inv));
            }
            d[3] = add_sat_u8(sa, mul_div255_u8(d[3], inv));
        }
        BlendMode::Add => {
            let sa = s[3];
            for c in 0..3 {
                d[c] = add_sat_u8(d[c], mul_div255_u8(s[c], sa));
            }
        }
        BlendMode::Mod => {
            for c in 0..3 {
                d[c] = mul_div255_u8(s[c], d[c]);
            }
        }
    }
}

fn fill_rgba(buf: &mut [u8], color: Rgba8) {
    let rgba = [color.r, color.g, color.b, color.a];
    for px in buf.chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
