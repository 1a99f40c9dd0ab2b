//! Pointer and keyboard events, in canvas coordinates.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// What produced a pointer press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerSource {
    Mouse(MouseButton),
    Touch,
}

impl PointerSource {
    /// Only the primary button or a touch starts an interaction.
    pub fn is_primary(&self) -> bool {
        matches!(self, PointerSource::Mouse(MouseButton::Left) | PointerSource::Touch)
    }
}

/// Pointer event type for unified mouse/touch handling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        source: PointerSource,
    },
    Move {
        position: Point,
    },
    Up {
        position: Point,
    },
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Move { position }
            | PointerEvent::Up { position } => *position,
        }
    }
}

/// Keyboard event type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyEvent {
    Pressed(String),
    Released(String),
}

/// Keyboard commands understood by the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Commit pending input.
    Confirm,
    /// Drop pending input.
    Cancel,
}

impl KeyEvent {
    /// Map a key press to a board command. Releases never map.
    pub fn command(&self) -> Option<KeyCommand> {
        match self {
            KeyEvent::Pressed(key) => match key.as_str() {
                "Enter" => Some(KeyCommand::Confirm),
                "Escape" => Some(KeyCommand::Cancel),
                _ => None,
            },
            KeyEvent::Released(_) => None,
        }
    }
}
