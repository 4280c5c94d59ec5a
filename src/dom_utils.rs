//! dom_utils.rs – thin helper layer for repetitive DOM operations.
//!
//! Small wrappers for show / hide and for reading form fields so the page
//! and component builders don't repeat the same cast-and-check dance.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

use crate::constants::{CSS_HIDDEN, CSS_VISIBLE};

pub fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))
}

/// Show the element by toggling CSS classes.
pub fn show(el: &Element) {
    let _ = el.class_list().remove_1(CSS_HIDDEN);
    let _ = el.class_list().add_1(CSS_VISIBLE);
}

/// Hide the element by toggling CSS classes.
pub fn hide(el: &Element) {
    let _ = el.class_list().remove_1(CSS_VISIBLE);
    let _ = el.class_list().add_1(CSS_HIDDEN);
}

/// Create `<tag class="class">` with optional text.
pub fn create(document: &Document, tag: &str, class: &str, text: Option<&str>) -> Result<Element, JsValue> {
    let el = document.create_element(tag)?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    if text.is_some() {
        el.set_text_content(text);
    }
    Ok(el)
}

pub fn set_disabled(el: &Element, disabled: bool) {
    let _ = if disabled {
        el.set_attribute("disabled", "true")
    } else {
        el.remove_attribute("disabled")
    };
}

/// Current value of an `<input>`, `<select>` or `<textarea>` by id.
/// Missing elements read as empty so validation reports the field.
pub fn field_value(document: &Document, id: &str) -> String {
    let Some(el) = document.get_element_by_id(id) else {
        return String::new();
    };
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
        select.value()
    } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else {
        String::new()
    }
}

pub fn set_field_value(document: &Document, id: &str, value: &str) {
    let Some(el) = document.get_element_by_id(id) else {
        return;
    };
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        input.set_value(value);
    } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
        select.set_value(value);
    } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        area.set_value(value);
    }
}

/// Remove every child of `el`.
pub fn clear(el: &Element) {
    el.set_inner_html("");
}
