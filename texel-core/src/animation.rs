use crate::foundation::error::{TexelError, TexelResult};

/// Tick counter that maps elapsed frames onto a looping sprite index.
///
/// Each sprite is held for `ticks_per_frame` advances; after the last sprite the counter
/// wraps to zero, so it never grows past `ticks_per_frame * frame_count - 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AnimationCursor {
    tick: u64,
    ticks_per_frame: u32,
    frame_count: u32,
}

impl AnimationCursor {
    pub fn new(ticks_per_frame: u32, frame_count: u32) -> TexelResult<Self> {
        if ticks_per_frame == 0 {
            return Err(TexelError::config("ticks_per_frame must be >= 1"));
        }
        if frame_count == 0 {
            return Err(TexelError::config("frame_count must be >= 1"));
        }
        Ok(Self {
            tick: 0,
            ticks_per_frame,
            frame_count,
        })
    }

    /// Move one tick forward, wrapping after the last frame.
    pub fn advance(&mut self) {
        self.tick += 1;
        if self.tick == self.period() {
            self.tick = 0;
        }
    }

    /// Sprite index to draw now.
    pub fn current_frame(&self) -> usize {
        ((self.tick / u64::from(self.ticks_per_frame)) % u64::from(self.frame_count)) as usize
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn reset(&mut self) {
        self.tick = 0;
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    pub fn ticks_per_frame(&self) -> u32 {
        self.ticks_per_frame
    }

    /// Ticks in one full cycle. Held in `u64` so the product of two `u32` never overflows.
    fn period(&self) -> u64 {
        u64::from(self.ticks_per_frame) * u64::from(self.frame_count)
    }
}

#[cfg(test)]
#[path = "../tests/unit/animation.rs"]
mod tests;
