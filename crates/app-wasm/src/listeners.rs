//! DOM listeners translating browser events into [`InputEvent`]s

use pixelpad_ipc::{ColorSlot, InputEvent, MouseButton};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, EventTarget, HtmlInputElement, KeyboardEvent, MouseEvent, PointerEvent, WheelEvent,
    Window,
};

/// Attach `map` to `name` events on `target`; mapped events go to the core
fn listen<E, F>(target: &EventTarget, name: &str, map: F) -> Result<(), JsValue>
where
    E: JsCast + 'static,
    F: Fn(&E) -> Option<InputEvent> + 'static,
{
    let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
        if let Some(input) = event.dyn_ref::<E>().and_then(&map) {
            crate::submit(input);
        }
    }) as Box<dyn FnMut(web_sys::Event)>);

    target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn position(event: &MouseEvent) -> (f32, f32) {
    (event.client_x() as f32, event.client_y() as f32)
}

pub fn register(window: &Window, document: &Document) -> Result<(), JsValue> {
    listen(window, "pointermove", |event: &PointerEvent| {
        let (x, y) = position(event);
        Some(InputEvent::PointerMove { x, y })
    })?;
    listen(window, "pointerdown", |event: &PointerEvent| {
        let button = MouseButton::from_dom(event.button())?;
        let (x, y) = position(event);
        Some(InputEvent::PointerDown { button, x, y })
    })?;
    listen(window, "pointerup", |event: &PointerEvent| {
        let button = MouseButton::from_dom(event.button())?;
        let (x, y) = position(event);
        Some(InputEvent::PointerUp { button, x, y })
    })?;
    listen(window, "mousedown", |event: &MouseEvent| {
        let button = MouseButton::from_dom(event.button())?;
        let (x, y) = position(event);
        Some(InputEvent::MouseDown { button, x, y })
    })?;
    listen(window, "mouseup", |event: &MouseEvent| {
        let button = MouseButton::from_dom(event.button())?;
        let (x, y) = position(event);
        Some(InputEvent::MouseUp { button, x, y })
    })?;
    listen(window, "wheel", |event: &WheelEvent| {
        Some(InputEvent::Wheel {
            delta_y: event.delta_y() as f32,
        })
    })?;
    listen(window, "keydown", |event: &KeyboardEvent| {
        Some(InputEvent::KeyDown { key: event.key() })
    })?;
    listen(window, "resize", |_: &web_sys::Event| {
        let (width, height) = window_size()?;
        Some(InputEvent::WindowResized { width, height })
    })?;

    for slot in [ColorSlot::Primary, ColorSlot::Secondary] {
        let Some(picker) = document.get_element_by_id(slot.picker_id()) else {
            tracing::warn!("No picker element #{}", slot.picker_id());
            continue;
        };
        listen(&picker, "change", move |event: &web_sys::Event| {
            let input = event.target()?.dyn_into::<HtmlInputElement>().ok()?;
            Some(InputEvent::PickerInput {
                slot,
                value: input.value(),
            })
        })?;
    }

    Ok(())
}

/// Inner window size in CSS pixels
pub fn window_size() -> Option<(f32, f32)> {
    let window = web_sys::window()?;
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    Some((width as f32, height as f32))
}
