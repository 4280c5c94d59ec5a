//! Landing page: open an existing project or create a new one.

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Document, Element, Event};

use crate::constants::{CSS_CARD, CSS_FORM_ROW, CSS_PRIMARY_BUTTON};
use crate::dom_utils;
use crate::editor::{LoginForm, ProjectForm};
use crate::messages::Message;
use crate::state::dispatch_global_message;

const LOGIN_NAME: &str = "login-name";
const LOGIN_PASSWORD: &str = "login-password";
const PROJECT_NAME: &str = "project-name";
const PROJECT_DESCRIPTION: &str = "project-description";

pub fn mount(document: &Document, root: &Element) -> Result<(), JsValue> {
    let login = card(document, "Open project")?;
    field(document, &login, LOGIN_NAME, "Project name", "text")?;
    field(document, &login, LOGIN_PASSWORD, "Password", "password")?;
    submit_button(document, &login, "Log in", || {
        let Ok(document) = dom_utils::document() else {
            return;
        };
        dispatch_global_message(Message::SubmitLogin(LoginForm {
            name: dom_utils::field_value(&document, LOGIN_NAME),
            password: dom_utils::field_value(&document, LOGIN_PASSWORD),
        }));
    })?;
    root.append_child(&login)?;

    let create = card(document, "New project")?;
    field(document, &create, PROJECT_NAME, "Name", "text")?;
    field(document, &create, PROJECT_DESCRIPTION, "Description", "text")?;
    submit_button(document, &create, "Create", || {
        let Ok(document) = dom_utils::document() else {
            return;
        };
        dispatch_global_message(Message::SubmitProjectForm(ProjectForm {
            name: dom_utils::field_value(&document, PROJECT_NAME),
            description: dom_utils::field_value(&document, PROJECT_DESCRIPTION),
        }));
    })?;
    root.append_child(&create)?;
    Ok(())
}

fn card(document: &Document, title: &str) -> Result<Element, JsValue> {
    let card = dom_utils::create(document, "section", CSS_CARD, None)?;
    card.append_child(&dom_utils::create(document, "h2", "", Some(title))?.into())?;
    Ok(card)
}

fn field(document: &Document, parent: &Element, id: &str, label: &str, input_type: &str) -> Result<(), JsValue> {
    let row = dom_utils::create(document, "div", CSS_FORM_ROW, None)?;
    let label_el = dom_utils::create(document, "label", "", Some(label))?;
    label_el.set_attribute("for", id)?;
    let input = document.create_element("input")?;
    input.set_id(id);
    input.set_attribute("type", input_type)?;
    row.append_child(&label_el)?;
    row.append_child(&input)?;
    parent.append_child(&row)?;
    Ok(())
}

fn submit_button(document: &Document, parent: &Element, text: &str, on_click: impl Fn() + 'static) -> Result<(), JsValue> {
    let button = dom_utils::create(document, "button", CSS_PRIMARY_BUTTON, Some(text))?;
    button.set_attribute("type", "button")?;
    let cb = Closure::<dyn FnMut(Event)>::new(move |_: Event| on_click());
    button.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();
    parent.append_child(&button)?;
    Ok(())
}
