//! Project page: the project's agents and a button to add one.

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Document, Element, Event};

use crate::constants::{CSS_PRIMARY_BUTTON, ID_AGENT_LIST, ID_PAGE_TITLE};
use crate::dom_utils;
use crate::editor::EditorKind;
use crate::error_log;
use crate::messages::Message;
use crate::models::Project;
use crate::router::Route;
use crate::state::{dispatch_global_message, APP_STATE};

/// `(href, label)` for each agent link.
pub fn agent_links(project: &Project) -> Vec<(String, String)> {
    project
        .agents
        .iter()
        .map(|agent| (Route::Agent(agent.id().to_string()).path(), agent.display_name().to_string()))
        .collect()
}

pub fn mount(document: &Document, root: &Element) -> Result<(), JsValue> {
    let title = dom_utils::create(document, "h1", "", Some("Loading project..."))?;
    title.set_id(ID_PAGE_TITLE);
    root.append_child(&title)?;

    let add = dom_utils::create(document, "button", CSS_PRIMARY_BUTTON, Some(EditorKind::Agent.title()))?;
    add.set_attribute("type", "button")?;
    let cb = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
        dispatch_global_message(Message::OpenEditor(EditorKind::Agent));
    });
    add.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();
    root.append_child(&add)?;

    let list = document.create_element("ul")?;
    list.set_id(ID_AGENT_LIST);
    root.append_child(&list)?;
    Ok(())
}

pub fn refresh() {
    let Some(project) = APP_STATE.with(|state| state.borrow().project.clone()) else {
        return;
    };
    if let Err(e) = render(&project) {
        error_log!("Failed to render project page: {:?}", e);
    }
}

fn render(project: &Project) -> Result<(), JsValue> {
    let document = dom_utils::document()?;
    if let Some(title) = document.get_element_by_id(ID_PAGE_TITLE) {
        title.set_text_content(Some(project.name.as_deref().unwrap_or("Untitled project")));
    }
    let Some(list) = document.get_element_by_id(ID_AGENT_LIST) else {
        return Ok(());
    };
    dom_utils::clear(&list);

    let links = agent_links(project);
    if links.is_empty() {
        list.append_child(&dom_utils::create(&document, "li", "empty", Some("No agents yet"))?.into())?;
    }
    for (href, label) in links {
        let item = document.create_element("li")?;
        let link = dom_utils::create(&document, "a", "", Some(&label))?;
        link.set_attribute("href", &href)?;
        item.append_child(&link)?;
        list.append_child(&item)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AgentRef, AgentSummary};

    #[test]
    fn agent_links_point_at_agent_pages() {
        let project = Project {
            id: Some("p1".into()),
            agents: vec![
                AgentRef::Id("a1".into()),
                AgentRef::Summary(AgentSummary { id: "a2".into(), name: Some("Watcher".into()) }),
            ],
            ..Project::default()
        };
        assert_eq!(
            agent_links(&project),
            vec![
                ("/agent/a1".to_string(), "a1".to_string()),
                ("/agent/a2".to_string(), "Watcher".to_string()),
            ]
        );
    }
}
