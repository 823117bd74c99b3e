//! Input events and pointer state.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Pointer event in surface pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
    },
    Move {
        position: Point,
    },
}

/// Parameterless commands triggered from the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Finish the pending vertex collection as a polygon.
    Complete,
    /// Spawn a copy of the most recently completed polygon.
    Copy,
    /// Clear the whole scene.
    Reset,
}

/// Last known pointer position.
///
/// Windowing backends report button presses without a position, so the
/// cursor position is kept here and attached to the press.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    /// Current pointer position in surface pixels.
    pub pointer_position: Point,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the position carried by a pointer event.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { position, .. } | PointerEvent::Move { position } => {
                self.pointer_position = position;
            }
        }
    }

    /// Build a press event for `button` at the last known pointer position.
    pub fn press(&self, button: MouseButton) -> PointerEvent {
        PointerEvent::Down {
            position: self.pointer_position,
            button,
        }
    }
}
