use std::rc::Rc;

use crate::foundation::core::{PixelRect, Point};
use crate::foundation::error::TexelResult;
use crate::input::Event;
use crate::sprite::SpriteSheet;

/// Visual state of a [`Button`], one sprite per state.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ButtonState {
    /// Pointer is outside.
    #[default]
    Idle,
    /// Pointer moved inside.
    Hover,
    /// Pointer pressed inside.
    Pressed,
    /// Pointer released inside.
    Released,
}

impl ButtonState {
    /// Index of this state's sprite in the button sheet.
    pub fn sprite_index(self) -> usize {
        match self {
            ButtonState::Idle => 0,
            ButtonState::Hover => 1,
            ButtonState::Pressed => 2,
            ButtonState::Released => 3,
        }
    }
}

/// Extent shared by every button of one kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ButtonSize {
    pub width: u32,
    pub height: u32,
}

impl ButtonSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Rectangular widget that reflects pointer activity through its sprite.
///
/// Several buttons can share one sheet; the sheet is drawn, never mutated, through them.
#[derive(Clone, Debug)]
pub struct Button {
    position: Point,
    size: ButtonSize,
    state: ButtonState,
    sheet: Rc<SpriteSheet>,
}

impl Button {
    pub fn new(position: Point, size: ButtonSize, sheet: Rc<SpriteSheet>) -> Self {
        Self {
            position,
            size,
            state: ButtonState::Idle,
            sheet,
        }
    }

    /// Update the state from one event and the current pointer position.
    ///
    /// Only pointer events are considered. Outside the button the state becomes `Idle`
    /// whatever the event kind.
    pub fn handle_event(&mut self, event: &Event, pointer: Point) {
        let next = match event {
            Event::PointerMove { .. } => ButtonState::Hover,
            Event::PointerDown { .. } => ButtonState::Pressed,
            Event::PointerUp { .. } => ButtonState::Released,
            _ => return,
        };
        self.state = if self.contains(pointer) {
            next
        } else {
            ButtonState::Idle
        };
    }

    /// Boundary-inclusive hit test, see [`PixelRect::contains_inclusive`].
    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains_inclusive(p)
    }

    /// Move the button. The state is not re-evaluated.
    pub fn set_position(&mut self, x: i32, y: i32) {
        self.position = Point::new(x, y);
    }

    /// Draw the sprite for the current state at the button's position.
    pub fn render(&self) -> TexelResult<()> {
        self.sheet
            .render(self.state.sprite_index(), self.position.x, self.position.y)
    }

    pub fn bounds(&self) -> PixelRect {
        PixelRect::new(
            self.position.x,
            self.position.y,
            self.size.width,
            self.size.height,
        )
    }

    pub fn state(&self) -> ButtonState {
        self.state
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> ButtonSize {
        self.size
    }

    pub fn sheet(&self) -> &Rc<SpriteSheet> {
        &self.sheet
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ui/button.rs"]
mod tests;
