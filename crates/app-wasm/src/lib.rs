//! pixelpad WASM host
//!
//! Runs the drawing core inside a browser page. The page provides a
//! `#drawingCanvas` element (optionally carrying a JSON `data-config`) and
//! two color picker inputs; this crate wires DOM input into the
//! [`DrawingSession`] and applies the commands it queues back onto the page.

use std::cell::RefCell;

use glam::Vec2;
use pixelpad_config::CanvasConfig;
use pixelpad_ipc::{CoreToHost, InputEvent};
use pixelpad_painting::{DrawingSession, SessionError};
use tracing::{error, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen::{Clamped, JsCast};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlInputElement, ImageData, Window};

mod bridge;
mod listeners;
mod logging;

/// Id of the canvas element the visible surface is drawn into
pub const CANVAS_ID: &str = "drawingCanvas";

thread_local! {
    static HOST: RefCell<Option<Host>> = const { RefCell::new(None) };
}

/// Page handles plus the session they display
struct Host {
    session: DrawingSession,
    window: Window,
    document: Document,
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

/// Main entry point for the WASM module
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Set up panic hook for better error messages in browser console
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    logging::init();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let canvas = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{CANVAS_ID}")))?
        .dyn_into::<HtmlCanvasElement>()?;

    let config = match canvas.get_attribute("data-config") {
        Some(json) => CanvasConfig::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?,
        None => CanvasConfig::default(),
    };

    let (grid_width, grid_height) = config.grid();
    canvas.set_width(grid_width);
    canvas.set_height(grid_height);
    let style = canvas.style();
    style.set_property("position", "absolute")?;
    style.set_property("image-rendering", "pixelated")?;

    let context = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()?;

    let (width, height) = listeners::window_size().unwrap_or_default();
    let session = DrawingSession::new(config, Vec2::new(width, height)).map_err(|e| {
        report(&window, &e);
        JsValue::from_str(&e.to_string())
    })?;

    bridge::init_bridge(&window)?;
    listeners::register(&window, &document)?;

    HOST.with(|host| {
        *host.borrow_mut() = Some(Host {
            session,
            window,
            document,
            canvas,
            context,
        });
    });

    // Setup queued placement, picker values and the first present
    pump();

    info!("pixelpad started ({}x{} grid)", grid_width, grid_height);
    Ok(())
}

/// Queue an input event and process everything pending
pub fn submit(input: InputEvent) {
    bridge::push_input(input);
    pump();
}

/// Drain queued input through the session
///
/// Commands applied here may make page scripts dispatch more input; that
/// input is queued and picked up by the loop already running.
fn pump() {
    HOST.with(|cell| {
        let Ok(mut guard) = cell.try_borrow_mut() else {
            return;
        };
        let Some(host) = guard.as_mut() else {
            return;
        };

        host.apply_outbound();
        while let Some(input) = bridge::poll_input() {
            if let Err(e) = host.session.handle(input) {
                report(&host.window, &e);
            }
            host.apply_outbound();
        }
    });
}

impl Host {
    fn apply_outbound(&mut self) {
        for command in self.session.take_outbound() {
            if let Err(e) = self.apply(&command) {
                error!("Failed to apply {:?}: {:?}", command, e);
            }
            if let Err(e) = bridge::send_to_host(&self.window, &command) {
                error!("Failed to announce {:?}: {:?}", command, e);
            }
        }
    }

    fn apply(&self, command: &CoreToHost) -> Result<(), JsValue> {
        match command {
            CoreToHost::PlaceSurface {
                left,
                top,
                width,
                height,
            } => {
                let style = self.canvas.style();
                style.set_property("left", &format!("{left}px"))?;
                style.set_property("top", &format!("{top}px"))?;
                style.set_property("width", &format!("{width}px"))?;
                style.set_property("height", &format!("{height}px"))?;
            }
            CoreToHost::Present => {
                let surface = self.session.visible();
                let image = ImageData::new_with_u8_clamped_array_and_sh(
                    Clamped(surface.as_bytes()),
                    surface.width,
                    surface.height,
                )?;
                self.context.put_image_data(&image, 0.0, 0.0)?;
            }
            CoreToHost::PickerChanged { slot, color } => {
                if let Some(picker) = self.document.get_element_by_id(slot.picker_id()) {
                    picker.dyn_into::<HtmlInputElement>()?.set_value(color);
                }
            }
            CoreToHost::Error { .. } => {}
        }
        Ok(())
    }
}

/// Log a session error, tell page scripts, and alert the user
fn report(window: &Window, error: &SessionError) {
    error!("{}", error);

    let command = CoreToHost::Error {
        code: error.code().to_string(),
        message: error.to_string(),
    };
    if let Err(e) = bridge::send_to_host(window, &command) {
        error!("Failed to announce error: {:?}", e);
    }
    if let Err(e) = window.alert_with_message(&error.to_string()) {
        error!("Failed to alert: {:?}", e);
    }
}

/// Replace the active palette with a `{ title, colors }` object
///
/// Anything else is rejected and the current palette stays active.
#[wasm_bindgen(js_name = setPalette)]
pub fn set_palette(palette: JsValue) -> Result<(), JsValue> {
    let json = js_sys::JSON::stringify(&palette)?
        .as_string()
        .ok_or_else(|| JsValue::from_str("palette is not serializable"))?;
    let value: serde_json::Value =
        serde_json::from_str(&json).map_err(|e| JsValue::from_str(&e.to_string()))?;

    with_session(|session| session.set_palette_value(&value))
}

/// Current palette as JSON
#[wasm_bindgen(js_name = paletteJson)]
pub fn palette_json() -> Result<String, JsValue> {
    with_session(|session| Ok(serde_json::to_string(session.palette())))?
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn with_session<T>(f: impl FnOnce(&mut DrawingSession) -> Result<T, SessionError>) -> Result<T, JsValue> {
    HOST.with(|cell| {
        let mut guard = cell
            .try_borrow_mut()
            .map_err(|_| JsValue::from_str("pixelpad is busy"))?;
        let host = guard
            .as_mut()
            .ok_or_else(|| JsValue::from_str("pixelpad is not started"))?;

        let result = f(&mut host.session).map_err(|e| {
            report(&host.window, &e);
            JsValue::from_str(&e.to_string())
        });
        host.apply_outbound();
        result
    })
}
