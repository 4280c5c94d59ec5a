use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlCanvasElement, KeyboardEvent, MouseEvent, WheelEvent};

use crate::constants::{ID_CANVAS_CONTAINER, ID_GRAPH_CANVAS, ZOOM_STEP};
use crate::messages::Message;
use crate::state::dispatch_global_message;

/// Create the canvas inside `parent` and wire its input handlers.
pub fn setup_canvas(document: &Document, parent: &Element) -> Result<(), JsValue> {
    let container = document.create_element("div")?;
    container.set_id(ID_CANVAS_CONTAINER);
    let canvas = document.create_element("canvas")?.dyn_into::<HtmlCanvasElement>()?;
    canvas.set_id(ID_GRAPH_CANVAS);
    canvas.set_attribute("tabindex", "0")?;
    container.append_child(&canvas)?;
    parent.append_child(&container)?;

    setup_canvas_mouse_events(&canvas)?;
    setup_keyboard_events(&canvas)?;
    setup_resize_handler(&container)?;
    resize_canvas(&container);
    Ok(())
}

/// Report the container's CSS size to the store; the renderer sizes the
/// backing bitmap from it.
pub fn resize_canvas(container: &Element) {
    let width = container.client_width() as f64;
    let height = container.client_height() as f64;
    if width > 0.0 && height > 0.0 {
        dispatch_global_message(Message::CanvasResized { width, height });
    }
}

fn setup_resize_handler(container: &Element) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window exists"))?;
    let container = container.clone();
    let resize_callback = Closure::wrap(Box::new(move || {
        resize_canvas(&container);
    }) as Box<dyn FnMut()>);

    window.add_event_listener_with_callback("resize", resize_callback.as_ref().unchecked_ref())?;
    // Leak the closure to keep it alive for the lifetime of the page
    resize_callback.forget();
    Ok(())
}

fn setup_canvas_mouse_events(canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    let mousedown_handler = Closure::wrap(Box::new(move |event: MouseEvent| {
        if event.button() != 0 {
            return;
        }
        dispatch_global_message(Message::CanvasMouseDown {
            x: event.offset_x() as f64,
            y: event.offset_y() as f64,
        });
    }) as Box<dyn FnMut(_)>);
    canvas.add_event_listener_with_callback("mousedown", mousedown_handler.as_ref().unchecked_ref())?;
    mousedown_handler.forget();

    let mousemove_handler = Closure::wrap(Box::new(move |event: MouseEvent| {
        dispatch_global_message(Message::CanvasMouseMove {
            x: event.offset_x() as f64,
            y: event.offset_y() as f64,
        });
    }) as Box<dyn FnMut(_)>);
    canvas.add_event_listener_with_callback("mousemove", mousemove_handler.as_ref().unchecked_ref())?;
    mousemove_handler.forget();

    let mouseup_handler = Closure::wrap(Box::new(move |event: MouseEvent| {
        dispatch_global_message(Message::CanvasMouseUp {
            x: event.offset_x() as f64,
            y: event.offset_y() as f64,
        });
    }) as Box<dyn FnMut(_)>);
    canvas.add_event_listener_with_callback("mouseup", mouseup_handler.as_ref().unchecked_ref())?;
    canvas.add_event_listener_with_callback("mouseleave", mouseup_handler.as_ref().unchecked_ref())?;
    mouseup_handler.forget();

    let wheel_handler = Closure::wrap(Box::new(move |event: WheelEvent| {
        event.prevent_default();
        let factor = if event.delta_y() < 0.0 { ZOOM_STEP } else { 1.0 / ZOOM_STEP };
        dispatch_global_message(Message::CanvasZoom {
            factor,
            x: event.offset_x() as f64,
            y: event.offset_y() as f64,
        });
    }) as Box<dyn FnMut(_)>);
    canvas.add_event_listener_with_callback("wheel", wheel_handler.as_ref().unchecked_ref())?;
    wheel_handler.forget();

    Ok(())
}

/// Delete / Backspace removes the selection while the canvas has focus.
fn setup_keyboard_events(canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    let keydown_handler = Closure::wrap(Box::new(move |event: KeyboardEvent| {
        if matches!(event.key().as_str(), "Delete" | "Backspace") {
            event.prevent_default();
            dispatch_global_message(Message::DeleteSelection);
        }
    }) as Box<dyn FnMut(_)>);
    canvas.add_event_listener_with_callback("keydown", keydown_handler.as_ref().unchecked_ref())?;
    keydown_handler.forget();
    Ok(())
}
