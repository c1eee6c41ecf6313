use std::cell::RefCell;
use std::rc::Rc;

use texel::{
    CpuDevice, CpuDeviceOpts, Flip, PixelBuffer, RenderContext, Rgba8, RotationControls, Texture,
};

/// 40x20 arrow pointing right: a bar plus a triangular head.
fn arrow_pixels() -> anyhow::Result<PixelBuffer> {
    let (w, h) = (40u32, 20u32);
    let mut rgba = vec![0u8; (w * h * 4) as usize];
    for y in 0..h {
        for x in 0..w {
            let dy = (y as i32 - 10).unsigned_abs();
            let bar = x < 28 && dy <= 3;
            let head = x >= 28 && dy <= 39 - x;
            if bar || head {
                let i = ((y * w + x) * 4) as usize;
                rgba[i..i + 4].copy_from_slice(&[200, 30, 30, 255]);
            }
        }
    }
    Ok(PixelBuffer::from_rgba8(w, h, rgba)?)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let device = Rc::new(RefCell::new(CpuDevice::new(
        CpuDeviceOpts::default().with_size(480, 80),
    )?));
    let ctx = RenderContext::new(device);
    let mut arrow = Texture::new(ctx.clone());
    arrow.load_from_pixels(&arrow_pixels()?)?;

    ctx.clear(Rgba8::WHITE)?;
    let steps = [
        (0.0, Flip::None),
        (60.0, Flip::None),
        (120.0, Flip::None),
        (0.0, Flip::Horizontal),
        (0.0, Flip::Vertical),
        (-60.0, Flip::Vertical),
    ];
    for (i, (degrees, flip)) in steps.into_iter().enumerate() {
        let controls = RotationControls { degrees, flip };
        let x = i as i32 * 80 + 20;
        arrow.render_rotated_flipped(x, 30, None, controls.degrees, None, controls.flip)?;
    }
    let frame = ctx.present()?;

    let out = std::path::Path::new("target/rotations.png");
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)?;
    }
    image::save_buffer_with_format(
        out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )?;

    println!("{}", serde_json::to_string_pretty(&ctx.stats()?)?);
    eprintln!("wrote {}", out.display());
    Ok(())
}
