//! Input event dispatch

use glam::Vec2;
use pixelpad_ipc::{CoreToHost, InputEvent, MouseButton};
use tracing::{debug, trace};

use super::{DrawingSession, SessionError};
use crate::raster::line_points;
use crate::types::SessionState;

impl DrawingSession {
    /// Process one input event to completion
    pub fn handle(&mut self, event: InputEvent) -> Result<(), SessionError> {
        match event {
            InputEvent::PointerMove { x, y } => self.pointer_move(Vec2::new(x, y)),
            InputEvent::PointerDown { button, x, y } => {
                if button == MouseButton::Left {
                    self.cursor.advance(Vec2::new(x, y));
                    self.cursor.primary_down = true;
                    debug!("Stroke started at ({:.1}, {:.1})", x, y);
                }
                Ok(())
            }
            InputEvent::PointerUp { button, .. } => {
                if button == MouseButton::Left {
                    self.cursor.primary_down = false;
                }
                Ok(())
            }
            InputEvent::MouseDown { button, x, y } => {
                if button == MouseButton::Middle {
                    self.cursor.advance(Vec2::new(x, y));
                    self.cursor.pan_down = true;
                }
                Ok(())
            }
            InputEvent::MouseUp { button, .. } => {
                if button == MouseButton::Middle {
                    self.cursor.pan_down = false;
                }
                Ok(())
            }
            InputEvent::Wheel { delta_y } => self.wheel(delta_y),
            InputEvent::KeyDown { key } => self.key_down(&key),
            InputEvent::PickerInput { slot, value } => self.set_slot_color(slot, &value).map(|_| ()),
            InputEvent::WindowResized { width, height } => {
                self.window = Vec2::new(width, height);
                Ok(())
            }
        }
    }

    fn pointer_move(&mut self, position: Vec2) -> Result<(), SessionError> {
        self.cursor.advance(position);

        match self.cursor.state() {
            SessionState::Panning => {
                let delta = self.cursor.delta();
                self.viewport.set_position(delta.x, delta.y, true);
                self.queue_placement();
            }
            SessionState::Drawing => self.stroke_segment(),
            SessionState::Idle => {}
        }
        Ok(())
    }

    /// Paint every cell between the previous and current pointer samples
    fn stroke_segment(&mut self) {
        let from = self.viewport.screen_to_canvas_pixel(self.cursor.previous);
        let to = self.viewport.screen_to_canvas_pixel(self.cursor.current);
        let color = self.colors.primary.opaque();

        let surface = self.surfaces.active_mut();
        for cell in line_points(from, to) {
            surface.set_pixel(cell.x, cell.y, color);
        }
        trace!("Stroke segment {:?} -> {:?}", from, to);

        self.surfaces.present();
        self.outbound.push(CoreToHost::Present);
    }

    fn wheel(&mut self, delta_y: f32) -> Result<(), SessionError> {
        if delta_y == 0.0 || !delta_y.is_finite() {
            return Ok(());
        }
        let factor = 1.0 - delta_y.signum() * self.config.wheel_zoom_step;
        self.zoom(factor, self.cursor.current)
    }

    fn key_down(&mut self, key: &str) -> Result<(), SessionError> {
        match key {
            "=" | "+" => self.zoom(self.config.zoom_in_factor, self.cursor.current),
            "-" => self.zoom(self.config.zoom_out_factor, self.window_center()),
            "x" | "X" => {
                self.swap_colors();
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Zoom the camera around a screen anchor and re-place the surface
    pub fn zoom(&mut self, factor: f32, anchor: Vec2) -> Result<(), SessionError> {
        self.viewport.set_scale(factor, anchor)?;
        self.queue_placement();
        Ok(())
    }
}
