//! Translation of raw pointer/keyboard input into editor events.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Pointer event type for unified mouse/touch handling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point, button: MouseButton },
    Move { position: Point },
}

/// Abstract events consumed by the construction state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Event {
    Click,
    Move,
    Escape,
    Enter,
    Backspace,
}

impl Event {
    /// Map a key name (as reported by the windowing layer) to an event.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Escape" => Some(Event::Escape),
            "Enter" => Some(Event::Enter),
            "Backspace" => Some(Event::Backspace),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Event::Click => "click",
            Event::Move => "move",
            Event::Escape => "escape",
            Event::Enter => "enter",
            Event::Backspace => "backspace",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tracks the pointer so actions can query its position when they run.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Current pointer position in world coordinates.
    pub pointer_position: Point,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pointer event and return the editor event it produces.
    ///
    /// Only the left button clicks; other buttons just move the pointer.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> Option<Event> {
        match event {
            PointerEvent::Down { position, button } => {
                self.pointer_position = position;
                (button == MouseButton::Left).then_some(Event::Click)
            }
            PointerEvent::Move { position } => {
                self.pointer_position = position;
                Some(Event::Move)
            }
        }
    }
}
