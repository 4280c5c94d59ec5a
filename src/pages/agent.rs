//! Agent page: header with back link and run button, node panel, canvas.

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Document, Element, Event};

use crate::components::{canvas_editor, node_panel};
use crate::constants::{CSS_PRIMARY_BUTTON, ID_PAGE_TITLE, ID_RUN_BUTTON};
use crate::dom_utils;
use crate::error_log;
use crate::messages::Message;
use crate::router::Route;
use crate::state::{dispatch_global_message, APP_STATE};

const ID_BACK_LINK: &str = "back-link";

pub fn mount(document: &Document, root: &Element) -> Result<(), JsValue> {
    let header = dom_utils::create(document, "header", "agent-header", None)?;

    let back = dom_utils::create(document, "a", "back-link", Some("← Back"))?;
    back.set_id(ID_BACK_LINK);
    back.set_attribute("href", &Route::Home.path())?;
    header.append_child(&back)?;

    let title = dom_utils::create(document, "h1", "", Some("Loading agent..."))?;
    title.set_id(ID_PAGE_TITLE);
    header.append_child(&title)?;

    let run = dom_utils::create(document, "button", CSS_PRIMARY_BUTTON, Some("Run"))?;
    run.set_id(ID_RUN_BUTTON);
    run.set_attribute("type", "button")?;
    let cb = Closure::<dyn FnMut(Event)>::new(move |_: Event| dispatch_global_message(Message::RunAgent));
    run.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();
    header.append_child(&run)?;
    root.append_child(&header)?;

    let body = dom_utils::create(document, "div", "agent-body", None)?;
    node_panel::render_into(document, &body)?;
    root.append_child(&body)?;
    canvas_editor::setup_canvas(document, &body)?;
    Ok(())
}

pub fn refresh() {
    let header = APP_STATE.with(|state| {
        let state = state.borrow();
        state.agent.as_ref().map(|a| (a.name.clone(), a.project_id.clone()))
    });
    if let Some((name, project_id)) = header {
        if let Err(e) = render_header(&name, &project_id) {
            error_log!("Failed to render agent header: {:?}", e);
        }
    }
    refresh_run_button();
    crate::canvas::renderer::redraw();
}

fn render_header(name: &str, project_id: &str) -> Result<(), JsValue> {
    let document = dom_utils::document()?;
    if let Some(title) = document.get_element_by_id(ID_PAGE_TITLE) {
        title.set_text_content(Some(name));
    }
    if let Some(back) = document.get_element_by_id(ID_BACK_LINK) {
        let target = if project_id.is_empty() {
            Route::Home
        } else {
            Route::Project(project_id.to_string())
        };
        back.set_attribute("href", &target.path())?;
    }
    Ok(())
}

pub fn refresh_run_button() {
    let (pending, loaded) = APP_STATE.with(|state| {
        let state = state.borrow();
        (state.run_pending, state.agent_id().is_some())
    });
    let Some(button) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(ID_RUN_BUTTON))
    else {
        return;
    };
    dom_utils::set_disabled(&button, pending || !loaded);
    button.set_text_content(Some(if pending { "Running..." } else { "Run" }));
}
