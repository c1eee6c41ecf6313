use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::*;
use crate::assets::decode::ImageDecoder;
use crate::render::backend::RenderDevice;
use crate::render::recording::{DeviceOp, RecordingDevice};

struct FixedDecoder(Option<PixelBuffer>);

impl ImageDecoder for FixedDecoder {
    fn decode(&self, path: &Path) -> TexelResult<PixelBuffer> {
        self.0
            .clone()
            .ok_or_else(|| TexelError::decode(path, "no such fixture"))
    }
}

fn solid(w: u32, h: u32, rgba: [u8; 4]) -> PixelBuffer {
    let bytes = rgba.repeat((w * h) as usize);
    PixelBuffer::from_rgba8(w, h, bytes).unwrap()
}

fn recording() -> (Rc<RefCell<RecordingDevice>>, RenderContext) {
    let dev = Rc::new(RefCell::new(RecordingDevice::new()));
    let ctx = RenderContext::new(dev.clone());
    (dev, ctx)
}

#[test]
fn new_texture_is_empty() {
    let (_dev, ctx) = recording();
    let tex = Texture::new(ctx);
    assert!(!tex.is_loaded());
    assert_eq!(tex.size(), (0, 0));
    assert_eq!(tex.handle(), None);
}

#[test]
fn operations_on_empty_texture_report_not_loaded() {
    let (dev, ctx) = recording();
    let mut tex = Texture::new(ctx);
    assert!(matches!(tex.render(0, 0, None), Err(TexelError::NotLoaded(_))));
    assert!(matches!(
        tex.render_rotated_flipped(0, 0, None, 90.0, None, Flip::Vertical),
        Err(TexelError::NotLoaded(_))
    ));
    assert!(matches!(tex.set_alpha(10), Err(TexelError::NotLoaded(_))));
    assert!(matches!(tex.set_color(1, 2, 3), Err(TexelError::NotLoaded(_))));
    assert!(matches!(
        tex.set_blend_mode(BlendMode::Add),
        Err(TexelError::NotLoaded(_))
    ));
    assert!(dev.borrow().ops().is_empty());
}

#[test]
fn load_sets_size_and_render_uses_full_extent() {
    let (dev, ctx) = recording();
    let mut tex = Texture::new(ctx);
    tex.load_from_pixels(&solid(7, 5, [1, 2, 3, 255])).unwrap();
    assert_eq!(tex.size(), (7, 5));

    tex.render(10, -3, None).unwrap();
    let draws = dev.borrow().draws();
    assert_eq!(draws.len(), 1);
    assert_eq!(draws[0].1.dst, PixelRect::new(10, -3, 7, 5));
    assert_eq!(draws[0].1.src, None);
}

#[test]
fn clipped_render_uses_clip_extent() {
    let (dev, ctx) = recording();
    let mut tex = Texture::new(ctx);
    tex.load_from_pixels(&solid(64, 32, [0, 0, 0, 255])).unwrap();

    let clip = PixelRect::new(16, 8, 12, 9);
    tex.render(100, 200, Some(clip)).unwrap();
    tex.render_rotated_flipped(1, 2, Some(clip), 45.0, Some(Point::new(3, 3)), Flip::Horizontal)
        .unwrap();

    let draws = dev.borrow().draws();
    assert_eq!(draws[0].1.dst, PixelRect::new(100, 200, 12, 9));
    assert_eq!(draws[0].1.src, Some(clip));
    assert_eq!(draws[1].1.dst, PixelRect::new(1, 2, 12, 9));
    assert_eq!(draws[1].1.angle_deg, 45.0);
    assert_eq!(draws[1].1.pivot, Some(Point::new(3, 3)));
    assert_eq!(draws[1].1.flip, Flip::Horizontal);
}

#[test]
fn reload_releases_old_handle_before_creating_new() {
    let (dev, ctx) = recording();
    let mut tex = Texture::new(ctx);
    tex.load_from_pixels(&solid(2, 2, [0; 4])).unwrap();
    let first = tex.handle().unwrap();
    tex.load_from_pixels(&solid(3, 1, [0; 4])).unwrap();
    let second = tex.handle().unwrap();

    let dev = dev.borrow();
    let ops = dev.ops();
    assert_eq!(ops.len(), 3);
    assert_eq!(ops[1], DeviceOp::Destroy(first));
    assert!(matches!(ops[2], DeviceOp::Create { handle, width: 3, height: 1 } if handle == second));
    assert_eq!(dev.live_handles(), vec![second]);
}

#[test]
fn free_is_idempotent() {
    let (dev, ctx) = recording();
    let mut tex = Texture::new(ctx);
    tex.load_from_pixels(&solid(4, 4, [9; 4])).unwrap();
    tex.free().unwrap();
    tex.free().unwrap();
    assert_eq!(tex.size(), (0, 0));
    assert!(!tex.is_loaded());
    assert_eq!(dev.borrow().stats().destroyed, 1);
}

#[test]
fn failed_free_keeps_handle_for_retry() {
    let (dev, ctx) = recording();
    let mut tex = Texture::new(ctx);
    tex.load_from_pixels(&solid(2, 3, [9; 4])).unwrap();
    let handle = tex.handle();

    let held = dev.borrow_mut();
    assert!(matches!(tex.free(), Err(TexelError::Device(_))));
    drop(held);

    assert_eq!(tex.handle(), handle);
    assert_eq!(tex.size(), (2, 3));
    tex.free().unwrap();
    assert!(!tex.is_loaded());
    assert!(dev.borrow().live_handles().is_empty());
}

#[test]
fn drop_releases_handle() {
    let (dev, ctx) = recording();
    {
        let mut tex = Texture::new(ctx);
        tex.load_from_pixels(&solid(1, 1, [0; 4])).unwrap();
        assert_eq!(dev.borrow().live_handles().len(), 1);
    }
    assert!(dev.borrow().live_handles().is_empty());
}

#[test]
fn decode_failure_keeps_previous_contents() {
    let (dev, ctx) = recording();
    let ctx = ctx.with_image_decoder(FixedDecoder(None));
    let mut tex = Texture::new(ctx);
    tex.load_from_pixels(&solid(5, 6, [0; 4])).unwrap();
    let before = tex.handle();

    let err = tex.load_from_file("missing.png", None).unwrap_err();
    match err {
        TexelError::Decode { path, .. } => assert_eq!(path, PathBuf::from("missing.png")),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(tex.handle(), before);
    assert_eq!(tex.size(), (5, 6));
    assert_eq!(dev.borrow().live_handles().len(), 1);
}

#[test]
fn device_failure_leaves_texture_empty() {
    let (dev, ctx) = recording();
    let mut tex = Texture::new(ctx);
    tex.load_from_pixels(&solid(5, 6, [0; 4])).unwrap();

    dev.borrow_mut().fail_next_create();
    let err = tex.load_from_pixels(&solid(2, 2, [0; 4])).unwrap_err();
    assert!(matches!(err, TexelError::Device(_)));
    assert!(!tex.is_loaded());
    assert_eq!(tex.size(), (0, 0));
    assert!(dev.borrow().live_handles().is_empty());
}

#[test]
fn load_from_file_applies_color_key() {
    let mut px = solid(2, 1, [0, 255, 255, 255]);
    px.rgba8[4..8].copy_from_slice(&[10, 20, 30, 255]);
    let (_dev, ctx) = recording();
    let ctx = ctx.with_image_decoder(FixedDecoder(Some(px)));
    let mut tex = Texture::new(ctx);
    tex.load_from_file("sheet.png", Some(ColorKey::rgb(0, 255, 255)))
        .unwrap();
    assert_eq!(tex.size(), (2, 1));
}

#[test]
fn modulation_forwards_to_device() {
    let (dev, ctx) = recording();
    let mut tex = Texture::new(ctx);
    tex.load_from_pixels(&solid(1, 1, [0; 4])).unwrap();
    let h = tex.handle().unwrap();
    tex.set_color(1, 2, 3).unwrap();
    tex.set_alpha(128).unwrap();
    tex.set_blend_mode(BlendMode::Mod).unwrap();

    let dev = dev.borrow();
    let ops = &dev.ops()[1..];
    assert_eq!(
        ops,
        &[
            DeviceOp::ColorMod(h, Rgb8::new(1, 2, 3)),
            DeviceOp::AlphaMod(h, 128),
            DeviceOp::Blend(h, BlendMode::Mod),
        ]
    );
}
