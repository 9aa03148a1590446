//! Color selection and palette management

use pixelpad_ipc::ColorSlot;
use serde_json::Value;
use tracing::{debug, info};

use super::{DrawingSession, SessionError};
use crate::color::{ColorValue, ToColor};
use crate::palette::Palette;

impl DrawingSession {
    /// Select the stroke color; invalid input leaves the selection unchanged
    pub fn set_primary_color(&mut self, color: impl ToColor) -> Result<ColorValue, SessionError> {
        self.set_slot_color(ColorSlot::Primary, color)
    }

    pub fn set_secondary_color(&mut self, color: impl ToColor) -> Result<ColorValue, SessionError> {
        self.set_slot_color(ColorSlot::Secondary, color)
    }

    pub(super) fn set_slot_color(
        &mut self,
        slot: ColorSlot,
        color: impl ToColor,
    ) -> Result<ColorValue, SessionError> {
        let value = color.to_color()?;
        match slot {
            ColorSlot::Primary => self.colors.primary = value,
            ColorSlot::Secondary => self.colors.secondary = value,
        }
        debug!("{:?} color set to {}", slot, value);
        self.queue_picker(slot, value);
        Ok(value)
    }

    /// Exchange primary and secondary, updating both pickers
    pub fn swap_colors(&mut self) {
        self.colors.swap();
        let colors = self.colors;
        self.queue_picker(ColorSlot::Primary, colors.primary);
        self.queue_picker(ColorSlot::Secondary, colors.secondary);
    }

    pub fn set_palette(&mut self, palette: Palette) {
        info!("Palette \"{}\" active ({} colors)", palette.title, palette.len());
        self.palette = palette;
    }

    /// Validate a host-provided value and install it as the palette
    pub fn set_palette_value(&mut self, value: &Value) -> Result<(), SessionError> {
        let palette = Palette::from_value(value)?;
        self.set_palette(palette);
        Ok(())
    }
}
