//! Input event types for pointer, keyboard, wheel and picker input.

use serde::{Deserialize, Serialize};

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

impl MouseButton {
    /// Convert a DOM `MouseEvent.button` index
    pub fn from_dom(button: i16) -> Option<Self> {
        match button {
            0 => Some(Self::Left),
            1 => Some(Self::Middle),
            2 => Some(Self::Right),
            _ => None,
        }
    }
}

/// Which of the two selected colors a picker widget edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorSlot {
    Primary,
    Secondary,
}

impl ColorSlot {
    /// Map a picker element id to its slot
    pub fn from_picker_id(id: &str) -> Option<Self> {
        match id {
            "primaryColorPicker" => Some(Self::Primary),
            "secondaryColorPicker" => Some(Self::Secondary),
            _ => None,
        }
    }

    /// DOM id of the picker element bound to this slot
    pub fn picker_id(self) -> &'static str {
        match self {
            Self::Primary => "primaryColorPicker",
            Self::Secondary => "secondaryColorPicker",
        }
    }
}

/// Input events delivered by the host, in arrival order.
///
/// Coordinates are screen space (CSS pixels relative to the viewport).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum InputEvent {
    PointerMove { x: f32, y: f32 },
    PointerDown { button: MouseButton, x: f32, y: f32 },
    PointerUp { button: MouseButton, x: f32, y: f32 },
    /// Auxiliary (non-pointer) button press, used for the pan button
    MouseDown { button: MouseButton, x: f32, y: f32 },
    MouseUp { button: MouseButton, x: f32, y: f32 },
    Wheel { delta_y: f32 },
    KeyDown { key: String },
    /// A picker widget emitted "color changed"
    PickerInput { slot: ColorSlot, value: String },
    WindowResized { width: f32, height: f32 },
}
