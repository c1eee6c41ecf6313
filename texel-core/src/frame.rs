use crate::foundation::core::Rgba8;
use crate::foundation::error::{TexelError, TexelResult};
use crate::input::{Event, InputSource, PointerState};
use crate::render::backend::FrameRGBA;
use crate::render::context::RenderContext;

/// Whether the loop should keep going after a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlFlow {
    #[default]
    Continue,
    Quit,
}

/// Per-frame callbacks driven by [`run_frame`].
pub trait Scene {
    /// Called once per event, in delivery order, with the pointer state after the event.
    fn handle_event(&mut self, event: &Event, pointer: PointerState) -> TexelResult<()>;

    /// Issue draws for this frame. The frame is already cleared.
    fn render(&mut self, ctx: &RenderContext) -> TexelResult<()>;
}

/// Result of one [`run_frame`] call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameOutput {
    pub flow: ControlFlow,
    pub events: usize,
    pub frame: FrameRGBA,
}

/// Drain input, clear, render and present one frame.
///
/// A quit event does not cut the frame short: remaining events are still delivered and the
/// frame is still presented.
pub fn run_frame(
    ctx: &RenderContext,
    input: &mut dyn InputSource,
    clear: Rgba8,
    scene: &mut dyn Scene,
) -> TexelResult<FrameOutput> {
    let mut flow = ControlFlow::Continue;
    let mut events = 0;
    while let Some(event) = input.poll_event() {
        events += 1;
        if event == Event::Quit {
            flow = ControlFlow::Quit;
        }
        scene.handle_event(&event, input.pointer_state())?;
    }

    ctx.clear(clear)?;
    scene.render(ctx)?;
    let frame = ctx.present()?;
    Ok(FrameOutput {
        flow,
        events,
        frame,
    })
}

/// Counters for [`run_frames`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LoopStats {
    pub frames: u64,
    pub events: u64,
    pub quit: bool,
}

/// Run up to `max_frames` frames, stopping after the first frame that saw a quit event.
///
/// Returns the last presented frame.
pub fn run_frames(
    ctx: &RenderContext,
    input: &mut dyn InputSource,
    clear: Rgba8,
    scene: &mut dyn Scene,
    max_frames: u64,
) -> TexelResult<(FrameRGBA, LoopStats)> {
    if max_frames == 0 {
        return Err(TexelError::config("max_frames must be >= 1"));
    }

    let mut stats = LoopStats::default();
    let mut last = None;
    for _ in 0..max_frames {
        let out = run_frame(ctx, input, clear, scene)?;
        stats.frames += 1;
        stats.events += out.events as u64;
        last = Some(out.frame);
        if out.flow == ControlFlow::Quit {
            stats.quit = true;
            break;
        }
    }
    let frame = last.ok_or_else(|| TexelError::config("no frame was rendered"))?;
    tracing::debug!(
        frames = stats.frames,
        events = stats.events,
        quit = stats.quit,
        "loop finished"
    );
    Ok((frame, stats))
}

#[cfg(test)]
#[path = "../tests/unit/frame.rs"]
mod tests;
