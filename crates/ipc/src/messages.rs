//! Commands from the drawing core to the host.

use serde::{Deserialize, Serialize};

use crate::input::ColorSlot;

/// Commands the core queues for the host to apply after each event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum CoreToHost {
    /// Move/resize the on-screen canvas element (CSS pixels)
    PlaceSurface {
        left: i32,
        top: i32,
        width: f32,
        height: f32,
    },

    /// The visible surface changed and should be uploaded
    Present,

    /// Show an accepted color in a picker widget
    PickerChanged { slot: ColorSlot, color: String },

    /// Error notification
    Error { code: String, message: String },
}
