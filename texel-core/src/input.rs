use std::collections::VecDeque;

use crate::foundation::core::Point;

/// Pointer button.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

impl MouseButton {
    fn mask(self) -> u8 {
        match self {
            MouseButton::Left => 1,
            MouseButton::Middle => 2,
            MouseButton::Right => 4,
        }
    }
}

/// Keyboard key. Keys nothing in the crate reacts to are carried as `Other(code)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    W,
    A,
    S,
    D,
    Q,
    E,
    Return,
    Escape,
    Other(u32),
}

/// One input event, in window pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    Quit,
    PointerMove { x: i32, y: i32 },
    PointerDown { x: i32, y: i32, button: MouseButton },
    PointerUp { x: i32, y: i32, button: MouseButton },
    KeyDown { key: Key, repeat: bool },
    KeyUp { key: Key, repeat: bool },
}

impl Event {
    /// Position carried by pointer events.
    pub fn pointer_position(&self) -> Option<Point> {
        match *self {
            Event::PointerMove { x, y }
            | Event::PointerDown { x, y, .. }
            | Event::PointerUp { x, y, .. } => Some(Point::new(x, y)),
            _ => None,
        }
    }
}

/// Snapshot of the pointer: position plus a bitmask of held buttons.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize,
)]
pub struct PointerState {
    pub x: i32,
    pub y: i32,
    pub buttons: u8,
}

impl PointerState {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn is_down(&self, button: MouseButton) -> bool {
        self.buttons & button.mask() != 0
    }
}

/// Where events come from.
pub trait InputSource {
    /// Next pending event, `None` when the queue is drained for this frame.
    fn poll_event(&mut self) -> Option<Event>;

    /// Pointer state as of the last delivered event.
    fn pointer_state(&self) -> PointerState;
}

/// In-memory [`InputSource`] fed by the caller.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    queue: VecDeque<Event>,
    pointer: PointerState,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue of events delivered in order.
    pub fn from_events(events: impl IntoIterator<Item = Event>) -> Self {
        Self {
            queue: events.into_iter().collect(),
            pointer: PointerState::default(),
        }
    }

    pub fn push(&mut self, event: Event) {
        self.queue.push_back(event);
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll_event(&mut self) -> Option<Event> {
        let event = self.queue.pop_front()?;
        if let Some(p) = event.pointer_position() {
            self.pointer.x = p.x;
            self.pointer.y = p.y;
        }
        match event {
            Event::PointerDown { button, .. } => self.pointer.buttons |= button.mask(),
            Event::PointerUp { button, .. } => self.pointer.buttons &= !button.mask(),
            _ => {}
        }
        Some(event)
    }

    fn pointer_state(&self) -> PointerState {
        self.pointer
    }
}

#[cfg(test)]
#[path = "../tests/unit/input.rs"]
mod tests;
