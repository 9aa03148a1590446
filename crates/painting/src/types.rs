use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::color::ColorValue;

/// Interaction state of a drawing session
///
/// Derived from the button flags; panning wins when both buttons are held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    Idle,
    Drawing,
    Panning,
}

/// Pointer position history and button flags (screen space)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CursorState {
    pub current: Vec2,
    pub previous: Vec2,
    pub primary_down: bool,
    pub pan_down: bool,
}

impl CursorState {
    /// Shift `current` into `previous` and record a new sample
    #[inline]
    pub fn advance(&mut self, position: Vec2) {
        self.previous = self.current;
        self.current = position;
    }

    pub fn state(&self) -> SessionState {
        if self.pan_down {
            SessionState::Panning
        } else if self.primary_down {
            SessionState::Drawing
        } else {
            SessionState::Idle
        }
    }

    /// Movement between the last two samples
    pub fn delta(&self) -> Vec2 {
        self.current - self.previous
    }
}

/// Primary (stroke) and secondary colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedColors {
    pub primary: ColorValue,
    pub secondary: ColorValue,
}

impl Default for SelectedColors {
    fn default() -> Self {
        Self {
            primary: ColorValue::rgb(0xff, 0x00, 0x00),
            secondary: ColorValue::rgb(0xff, 0x00, 0xff),
        }
    }
}

impl SelectedColors {
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.primary, &mut self.secondary);
    }
}
