//! Vertical strip of buttons that open the editor for each node kind.

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Document, Element, Event};

use crate::constants::{CSS_PANEL_BUTTON, ID_NODE_PANEL};
use crate::dom_utils;
use crate::editor::EditorKind;
use crate::messages::Message;
use crate::state::dispatch_global_message;

pub fn render_into(document: &Document, parent: &Element) -> Result<(), JsValue> {
    let panel = dom_utils::create(document, "div", "node-panel", None)?;
    panel.set_id(ID_NODE_PANEL);

    for kind in EditorKind::NODE_KINDS {
        let button = dom_utils::create(document, "button", CSS_PANEL_BUTTON, Some(kind.title()))?;
        button.set_attribute("type", "button")?;
        button.set_attribute("title", kind.panel_tooltip())?;
        button.set_attribute("data-kind", kind.title())?;

        let cb = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
            dispatch_global_message(Message::OpenEditor(kind));
        });
        button.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
        cb.forget();

        panel.append_child(&button)?;
    }

    parent.append_child(&panel)?;
    Ok(())
}
