use crate::foundation::core::Flip;
use crate::foundation::error::TexelResult;
use crate::input::{Event, Key};
use crate::texture::Texture;

/// Alpha change per W/S press.
pub const ALPHA_STEP: u8 = 32;
/// Rotation change per A/D press, in degrees.
pub const ROTATION_STEP_DEG: f64 = 60.0;

/// Keyboard-driven alpha modulation: W raises, S lowers, clamped to `0..=255`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AlphaFader {
    alpha: u8,
}

impl Default for AlphaFader {
    fn default() -> Self {
        Self { alpha: u8::MAX }
    }
}

impl AlphaFader {
    pub fn new(alpha: u8) -> Self {
        Self { alpha }
    }

    pub fn alpha(&self) -> u8 {
        self.alpha
    }

    pub fn handle_event(&mut self, event: &Event) {
        match event {
            Event::KeyDown { key: Key::W, .. } => {
                self.alpha = self.alpha.saturating_add(ALPHA_STEP)
            }
            Event::KeyDown { key: Key::S, .. } => {
                self.alpha = self.alpha.saturating_sub(ALPHA_STEP)
            }
            _ => {}
        }
    }

    /// Push the current alpha to `texture`.
    pub fn apply(&self, texture: &mut Texture) -> TexelResult<()> {
        texture.set_alpha(self.alpha)
    }
}

/// Keyboard-driven rotation and mirroring.
///
/// A/D rotate by [`ROTATION_STEP_DEG`]; Q mirrors horizontally, W clears the mirror and
/// E mirrors vertically.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RotationControls {
    pub degrees: f64,
    pub flip: Flip,
}

impl RotationControls {
    pub fn handle_event(&mut self, event: &Event) {
        let Event::KeyDown { key, .. } = *event else {
            return;
        };
        match key {
            Key::A => self.degrees -= ROTATION_STEP_DEG,
            Key::D => self.degrees += ROTATION_STEP_DEG,
            Key::Q => self.flip = Flip::Horizontal,
            Key::W => self.flip = Flip::None,
            Key::E => self.flip = Flip::Vertical,
            _ => {}
        }
    }

    /// Draw `texture` centered in a `bounds`-sized window with the current rotation.
    pub fn render_centered(&self, texture: &Texture, bounds: (u32, u32)) -> TexelResult<()> {
        let x = (i64::from(bounds.0) - i64::from(texture.width())) / 2;
        let y = (i64::from(bounds.1) - i64::from(texture.height())) / 2;
        texture.render_rotated_flipped(
            x.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32,
            y.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32,
            None,
            self.degrees,
            None,
            self.flip,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/fade.rs"]
mod tests;
