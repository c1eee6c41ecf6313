use crate::foundation::error::TexelResult;
use crate::input::{Event, Key};
use crate::texture::Texture;

/// Side length of the dot sprite.
pub const DOT_SIZE: i32 = 20;
/// Pixels per step along one axis while an arrow key is held.
pub const DOT_VELOCITY: i32 = 2;

/// Arrow-key driven dot that stays inside the window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Dot {
    pub x: i32,
    pub y: i32,
    pub vel_x: i32,
    pub vel_y: i32,
}

impl Dot {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    /// Arrow press adds velocity on its axis, release takes it back. Key repeats are ignored.
    pub fn handle_event(&mut self, event: &Event) {
        let (key, sign) = match *event {
            Event::KeyDown { key, repeat: false } => (key, 1),
            Event::KeyUp { key, repeat: false } => (key, -1),
            _ => return,
        };
        let v = DOT_VELOCITY * sign;
        match key {
            Key::Up => self.vel_y -= v,
            Key::Down => self.vel_y += v,
            Key::Left => self.vel_x -= v,
            Key::Right => self.vel_x += v,
            _ => {}
        }
    }

    /// Move one step, undoing the move on any axis that would leave `[0, bounds]`.
    pub fn step(&mut self, bounds: (u32, u32)) {
        let (w, h) = (
            i64::from(bounds.0),
            i64::from(bounds.1),
        );

        self.x += self.vel_x;
        if self.x < 0 || i64::from(self.x) + i64::from(DOT_SIZE) > w {
            self.x -= self.vel_x;
        }

        self.y += self.vel_y;
        if self.y < 0 || i64::from(self.y) + i64::from(DOT_SIZE) > h {
            self.y -= self.vel_y;
        }
    }

    pub fn render(&self, texture: &Texture) -> TexelResult<()> {
        texture.render(self.x, self.y, None)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/dot.rs"]
mod tests;
