//! JavaScript bridge for the host page
//!
//! DOM listeners and external widgets hand input to the core through a
//! queue; commands flow back out as CustomEvents on the window object so
//! page scripts can observe them. Both directions carry JSON.

use std::cell::RefCell;
use std::collections::VecDeque;

use pixelpad_ipc::{CoreToHost, InputEvent};
use tracing::{debug, error};
use wasm_bindgen::prelude::*;

/// Page scripts dispatch this with a JSON [`InputEvent`] as `detail`
pub const HOST_TO_CORE_EVENT: &str = "pixelpad:host-to-core";
/// Dispatched with a JSON [`CoreToHost`] as `detail`
pub const CORE_TO_HOST_EVENT: &str = "pixelpad:core-to-host";

thread_local! {
    /// Input waiting to be handled, in arrival order
    static INPUT_QUEUE: RefCell<VecDeque<InputEvent>> = const { RefCell::new(VecDeque::new()) };
}

/// Listen for JSON input events dispatched by page scripts
pub fn init_bridge(window: &web_sys::Window) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(move |event: web_sys::CustomEvent| {
        let Some(detail) = event.detail().as_string() else {
            return;
        };
        match pixelpad_ipc::decode_input(&detail) {
            Ok(input) => crate::submit(input),
            Err(e) => error!("Failed to parse host message: {}", e),
        }
    }) as Box<dyn FnMut(_)>);

    window.add_event_listener_with_callback(HOST_TO_CORE_EVENT, closure.as_ref().unchecked_ref())?;

    // Keep the closure alive
    closure.forget();

    debug!("pixelpad bridge listening on {}", HOST_TO_CORE_EVENT);
    Ok(())
}

pub fn push_input(input: InputEvent) {
    INPUT_QUEUE.with(|queue| queue.borrow_mut().push_back(input));
}

/// Next queued input (non-blocking)
pub fn poll_input() -> Option<InputEvent> {
    INPUT_QUEUE.with(|queue| queue.borrow_mut().pop_front())
}

/// Announce a command to page scripts
pub fn send_to_host(window: &web_sys::Window, command: &CoreToHost) -> Result<(), JsValue> {
    let json = pixelpad_ipc::encode_command(command).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let init = web_sys::CustomEventInit::new();
    init.set_detail(&JsValue::from_str(&json));

    let event = web_sys::CustomEvent::new_with_event_init_dict(CORE_TO_HOST_EVENT, &init)?;
    window.dispatch_event(&event)?;
    Ok(())
}
