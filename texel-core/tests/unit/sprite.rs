use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::assets::decode::PixelBuffer;
use crate::render::context::RenderContext;
use crate::render::recording::RecordingDevice;

fn loaded(w: u32, h: u32) -> (Rc<RefCell<RecordingDevice>>, Texture) {
    let dev = Rc::new(RefCell::new(RecordingDevice::new()));
    let mut tex = Texture::new(RenderContext::new(dev.clone()));
    let px = PixelBuffer::from_rgba8(w, h, vec![0; (w * h * 4) as usize]).unwrap();
    tex.load_from_pixels(&px).unwrap();
    (dev, tex)
}

#[test]
fn strip_lays_out_frames_along_axis() {
    let walk = ClipRegion::strip(0, 0, 64, 205, 4, Axis::Horizontal);
    assert_eq!(walk[3], ClipRegion::new(192, 0, 64, 205));

    let buttons = ClipRegion::strip(0, 0, 300, 200, 4, Axis::Vertical);
    assert_eq!(buttons[0], ClipRegion::new(0, 0, 300, 200));
    assert_eq!(buttons[2], ClipRegion::new(0, 400, 300, 200));
}

#[test]
fn regions_on_the_edge_are_accepted() {
    let (_dev, tex) = loaded(300, 800);
    let clips = ClipRegion::strip(0, 0, 300, 200, 4, Axis::Vertical);
    let sheet = SpriteSheet::new(tex, clips).unwrap();
    assert_eq!(sheet.len(), 4);
    assert!(!sheet.is_empty());
}

#[test]
fn region_exceeding_by_one_is_rejected() {
    for (i, bad) in [
        ClipRegion::new(1, 0, 300, 200),
        ClipRegion::new(0, 601, 300, 200),
        ClipRegion::new(0, 0, 301, 1),
        ClipRegion::new(0, 0, 1, 801),
    ]
    .into_iter()
    .enumerate()
    {
        let (_dev, tex) = loaded(300, 800);
        let err = SpriteSheet::new(tex, vec![ClipRegion::new(0, 0, 1, 1), bad]).unwrap_err();
        match err {
            TexelError::InvalidRegion {
                index,
                width,
                height,
                ..
            } => {
                assert_eq!((index, width, height), (1, 300, 800), "case {i}");
            }
            other => panic!("case {i}: unexpected {other}"),
        }
    }
}

#[test]
fn region_check_does_not_overflow() {
    let (_dev, tex) = loaded(4, 4);
    let err = SpriteSheet::new(tex, vec![ClipRegion::new(u32::MAX, 0, 2, 1)]).unwrap_err();
    assert!(matches!(err, TexelError::InvalidRegion { .. }));
}

#[test]
fn render_draws_clip_at_its_own_size() {
    let (dev, tex) = loaded(256, 205);
    let clips = ClipRegion::strip(0, 0, 64, 205, 4, Axis::Horizontal);
    let sheet = SpriteSheet::new(tex, clips).unwrap();
    sheet.render(2, 10, 20).unwrap();

    let draws = dev.borrow().draws();
    let call = draws[0].1;
    assert_eq!(call.src, Some(PixelRect::new(128, 0, 64, 205)));
    assert_eq!(call.dst, PixelRect::new(10, 20, 64, 205));
}

#[test]
fn render_out_of_range_index_fails() {
    let (dev, tex) = loaded(64, 64);
    let sheet = SpriteSheet::new(tex, vec![ClipRegion::new(0, 0, 32, 32)]).unwrap();
    let err = sheet.render(1, 0, 0).unwrap_err();
    assert!(matches!(err, TexelError::Index { index: 1, len: 1 }));
    assert!(dev.borrow().draws().is_empty());
}

#[test]
fn rotated_render_forwards_transform() {
    let (dev, tex) = loaded(64, 64);
    let sheet = SpriteSheet::new(tex, vec![ClipRegion::new(0, 32, 16, 16)]).unwrap();
    sheet
        .render_rotated_flipped(0, 5, 5, -60.0, None, Flip::Vertical)
        .unwrap();
    let call = dev.borrow().draws()[0].1;
    assert_eq!(call.dst, PixelRect::new(5, 5, 16, 16));
    assert_eq!(call.angle_deg, -60.0);
    assert_eq!(call.flip, Flip::Vertical);
}
