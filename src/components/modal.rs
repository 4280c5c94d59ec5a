//! Shared modal helper used by the node editor.
//!
//! Keeps creation / show / hide logic in one place. Escape and backdrop
//! clicks close through the store, never by touching the DOM directly.

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Document, Element, KeyboardEvent, MouseEvent};

use crate::constants::CSS_MODAL;
use crate::dom_utils;
use crate::messages::Message;
use crate::state::dispatch_global_message;

/// Ensure a `<div id="{id}" class="modal">` exists in the DOM and return it
/// together with its `.modal-content` child.
///
/// Returns `(backdrop, content)`.
pub fn ensure_modal(document: &Document, id: &str) -> Result<(Element, Element), JsValue> {
    let backdrop = if let Some(el) = document.get_element_by_id(id) {
        el
    } else {
        let el = document.create_element("div")?;
        el.set_id(id);
        el.set_class_name(CSS_MODAL);
        el.set_attribute("role", "dialog")?;
        el.set_attribute("aria-modal", "true")?;
        dom_utils::hide(&el);
        document
            .body()
            .ok_or_else(|| JsValue::from_str("document has no body"))?
            .append_child(&el)?;
        attach_close_handlers(document, &el)?;
        el
    };

    let content = if let Some(el) = backdrop.query_selector(".modal-content")? {
        el
    } else {
        let el = document.create_element("div")?;
        el.set_class_name("modal-content");
        backdrop.append_child(&el)?;
        el
    };

    Ok((backdrop, content))
}

/// Escape anywhere or a click on the backdrop itself closes the editor.
fn attach_close_handlers(document: &Document, backdrop: &Element) -> Result<(), JsValue> {
    let backdrop_for_click = backdrop.clone();
    let click = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
        let on_backdrop = event
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .is_some_and(|t| t == backdrop_for_click);
        if on_backdrop {
            dispatch_global_message(Message::CloseEditor);
        }
    });
    backdrop.add_event_listener_with_callback("click", click.as_ref().unchecked_ref())?;
    click.forget();

    let backdrop_for_key = backdrop.clone();
    let keydown = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
        let visible = backdrop_for_key.class_list().contains(crate::constants::CSS_VISIBLE);
        if visible && event.key() == "Escape" {
            event.prevent_default();
            dispatch_global_message(Message::CloseEditor);
        }
    });
    document.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())?;
    keydown.forget();
    Ok(())
}

pub fn show(backdrop: &Element) {
    dom_utils::show(backdrop);
}

pub fn hide(backdrop: &Element) {
    dom_utils::hide(backdrop);
}
