//! texel is a small retained-mode 2D rendering core.
//!
//! It covers the pieces a sprite-based scene needs between "decode an image" and "present a
//! frame":
//!
//! - [`Texture`]: one device texture plus its size, loaded from an image file (with an
//!   optional [`ColorKey`]), from rendered text or from raw pixels.
//! - [`SpriteSheet`] / [`ClipRegion`]: a texture with a validated catalog of regions.
//! - [`AnimationCursor`]: tick counter mapping elapsed frames onto a looping sprite index.
//! - [`Button`]: pointer-driven widget whose state selects its sprite.
//! - [`run_frame`]: drain input, clear, draw, present.
//!
//! There is no global renderer. Everything that touches the device holds a
//! [`RenderContext`], which bundles a [`RenderDevice`] with the [`ImageDecoder`] and
//! [`TextRasterizer`] it consumes. [`CpuDevice`] is the software device used by the CLI
//! and the tests; [`RecordingDevice`] only records calls.
//!
//! Pixels are straight (non-premultiplied) RGBA8 everywhere.
#![forbid(unsafe_code)]

mod animation;
mod assets;
mod foundation;
mod frame;
mod input;
mod render;
mod scene;
mod sprite;
mod texture;
mod ui;

pub use animation::AnimationCursor;
pub use assets::decode::{
    FsImageDecoder, ImageDecoder, PixelBuffer, PixelFormat, apply_color_key, decode_image,
};
pub use assets::text::{
    Font, ParleyTextRasterizer, TextBrushRgba8, TextLayoutEngine, TextRasterizer,
};
pub use foundation::core::{
    Affine, BlendMode, ColorKey, Flip, PixelRect, Point, Rgb8, Rgba8, Vec2,
};
pub use foundation::error::{TexelError, TexelResult};
pub use frame::{ControlFlow, FrameOutput, LoopStats, Scene, run_frame, run_frames};
pub use input::{Event, InputSource, Key, MouseButton, PointerState, ScriptedInput};
pub use render::backend::{DeviceStats, DrawCall, FrameRGBA, RenderDevice, TextureHandle};
pub use render::context::RenderContext;
pub use render::cpu::{CpuDevice, CpuDeviceOpts};
pub use render::recording::{DeviceOp, RecordingDevice};
pub use scene::dot::{DOT_SIZE, DOT_VELOCITY, Dot};
pub use scene::fade::{ALPHA_STEP, AlphaFader, ROTATION_STEP_DEG, RotationControls};
pub use sprite::{Axis, ClipRegion, SpriteSheet};
pub use texture::Texture;
pub use ui::button::{Button, ButtonSize, ButtonState};
