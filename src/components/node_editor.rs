//! The node editor modal: one form per `EditorKind`.
//!
//! The form is rebuilt only when the open kind changes, so values the user
//! typed survive an inline validation or request error.

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Document, Element, Event};

use crate::components::modal;
use crate::constants::{
    CSS_ERROR_TEXT, CSS_FORM_ROW, CSS_PRIMARY_BUTTON, DEFAULT_PROMPT_VERSION, DEFAULT_TEMPERATURE, ID_EDITOR_BODY,
    ID_EDITOR_ERROR, ID_EDITOR_MODAL, ID_EDITOR_SAVE, TEMPERATURE_STEP, TIMER_MAX_SECONDS, TIMER_MIN_SECONDS,
};
use crate::dom_utils;
use crate::editor::{
    AgentForm, EditorKind, EditorState, EditorSubmission, InputForm, LlmForm, PromptForm, TimerForm,
};
use crate::error_log;
use crate::messages::Message;
use crate::models::OutputType;
use crate::models_config;
use crate::state::{dispatch_global_message, APP_STATE};

const F_NAME: &str = "editor-name";
const F_DESCRIPTION: &str = "editor-description";
const F_TIME: &str = "editor-time";
const F_PROVIDER: &str = "editor-provider";
const F_MODEL: &str = "editor-model";
const F_PROMPT: &str = "editor-prompt";
const F_TEMPERATURE: &str = "editor-temperature";
const F_VALUE: &str = "editor-value";
const F_OUTPUT_NAME: &str = "editor-output-name";
const F_OUTPUT_TYPE: &str = "editor-output-type";
const F_TARGET: &str = "editor-target";
const F_VERSION: &str = "editor-version";
const F_INPUTS: &str = "editor-inputs";

/// Collect the open form's fields. `read` returns a field's raw value by id.
pub fn read_submission(kind: EditorKind, read: impl Fn(&str) -> String) -> EditorSubmission {
    match kind {
        EditorKind::Agent => EditorSubmission::Agent(AgentForm { name: read(F_NAME), description: read(F_DESCRIPTION) }),
        EditorKind::Timer => EditorSubmission::Timer(TimerForm { time: read(F_TIME) }),
        EditorKind::Llm => EditorSubmission::Llm(LlmForm {
            name: read(F_NAME),
            description: read(F_DESCRIPTION),
            provider: read(F_PROVIDER),
            model: read(F_MODEL),
            prompt: read(F_PROMPT),
            temperature: read(F_TEMPERATURE).trim().parse().unwrap_or(f64::NAN),
            output_name: read(F_OUTPUT_NAME),
            output_type: read(F_OUTPUT_TYPE),
        }),
        EditorKind::Input => EditorSubmission::Input(InputForm {
            name: read(F_NAME),
            description: read(F_DESCRIPTION),
            value: read(F_VALUE),
            output_name: read(F_OUTPUT_NAME),
            output_type: read(F_OUTPUT_TYPE),
            target_id: read(F_TARGET),
        }),
        EditorKind::Prompt => EditorSubmission::Prompt(PromptForm {
            name: read(F_NAME),
            description: read(F_DESCRIPTION),
            prompt: read(F_PROMPT),
            version: read(F_VERSION),
            inputs: read(F_INPUTS),
            output_name: read(F_OUTPUT_NAME),
            output_type: read(F_OUTPUT_TYPE),
        }),
    }
}

/// Sync the modal with `AppState::editor`.
pub fn refresh() {
    let (editor, targets) = APP_STATE.with(|state| {
        let state = state.borrow();
        let targets: Vec<(String, String)> = state
            .agent
            .as_ref()
            .map(|agent| {
                crate::graph::available_targets(agent)
                    .into_iter()
                    .filter_map(|n| Some((n.id.clone()?, crate::graph::label_for(n))))
                    .collect()
            })
            .unwrap_or_default();
        (state.editor.clone(), targets)
    });

    if let Err(e) = render(&editor, &targets) {
        error_log!("Failed to render node editor: {:?}", e);
    }
}

fn render(editor: &EditorState, targets: &[(String, String)]) -> Result<(), JsValue> {
    let document = dom_utils::document()?;
    let (backdrop, content) = modal::ensure_modal(&document, ID_EDITOR_MODAL)?;

    let EditorState::Open { kind, pending, error } = editor else {
        content.remove_attribute("data-kind")?;
        dom_utils::clear(&content);
        modal::hide(&backdrop);
        return Ok(());
    };

    let kind_key = format!("{:?}", kind);
    if content.get_attribute("data-kind").as_deref() != Some(kind_key.as_str()) {
        dom_utils::clear(&content);
        build_form(&document, &content, *kind, targets)?;
        content.set_attribute("data-kind", &kind_key)?;
    }

    if let Some(error_el) = document.get_element_by_id(ID_EDITOR_ERROR) {
        error_el.set_text_content(error.as_deref());
    }
    if let Some(save) = document.get_element_by_id(ID_EDITOR_SAVE) {
        dom_utils::set_disabled(&save, *pending);
        save.set_text_content(Some(if *pending { "Saving..." } else { "Save" }));
    }
    modal::show(&backdrop);
    Ok(())
}

fn build_form(document: &Document, content: &Element, kind: EditorKind, targets: &[(String, String)]) -> Result<(), JsValue> {
    let header = dom_utils::create(document, "div", "modal-header", None)?;
    header.append_child(&dom_utils::create(document, "h2", "", Some(kind.title()))?.into())?;
    let close = dom_utils::create(document, "button", "modal-close", Some("×"))?;
    close.set_attribute("type", "button")?;
    on_click(&close, || dispatch_global_message(Message::CloseEditor))?;
    header.append_child(&close)?;
    content.append_child(&header)?;

    let body = dom_utils::create(document, "div", "modal-body", None)?;
    body.set_id(ID_EDITOR_BODY);
    match kind {
        EditorKind::Agent => {
            text_row(document, &body, F_NAME, "Name", "input")?;
            text_row(document, &body, F_DESCRIPTION, "Description", "textarea")?;
        }
        EditorKind::Timer => {
            let input = text_row(document, &body, F_TIME, "Time (seconds)", "input")?;
            input.set_attribute("type", "number")?;
            input.set_attribute("min", &TIMER_MIN_SECONDS.to_string())?;
            input.set_attribute("max", &TIMER_MAX_SECONDS.to_string())?;
        }
        EditorKind::Llm => {
            text_row(document, &body, F_NAME, "Name", "input")?;
            text_row(document, &body, F_DESCRIPTION, "Description", "textarea")?;
            let providers: Vec<(String, String)> = models_config::providers()
                .into_iter()
                .map(|p| (p.to_string(), p.to_string()))
                .collect();
            let provider = select_row(document, &body, F_PROVIDER, "Provider", &providers)?;
            let first = providers.first().map(|(p, _)| p.clone()).unwrap_or_default();
            select_row(document, &body, F_MODEL, "Model", &model_options(&first))?;
            on_change(&provider, repopulate_models)?;
            text_row(document, &body, F_PROMPT, "Prompt", "textarea")?;
            let temp = text_row(document, &body, F_TEMPERATURE, "Temperature", "input")?;
            temp.set_attribute("type", "range")?;
            temp.set_attribute("min", "0")?;
            temp.set_attribute("max", "1")?;
            temp.set_attribute("step", &TEMPERATURE_STEP.to_string())?;
            dom_utils::set_field_value(document, F_TEMPERATURE, &DEFAULT_TEMPERATURE.to_string());
            output_rows(document, &body)?;
        }
        EditorKind::Input => {
            text_row(document, &body, F_NAME, "Name", "input")?;
            text_row(document, &body, F_DESCRIPTION, "Description", "textarea")?;
            text_row(document, &body, F_VALUE, "Value", "input")?;
            output_rows(document, &body)?;
            let mut options = vec![(String::new(), "None".to_string())];
            options.extend(targets.iter().cloned());
            select_row(document, &body, F_TARGET, "Target", &options)?;
        }
        EditorKind::Prompt => {
            text_row(document, &body, F_NAME, "Name", "input")?;
            text_row(document, &body, F_DESCRIPTION, "Description", "textarea")?;
            text_row(document, &body, F_PROMPT, "Prompt", "textarea")?;
            text_row(document, &body, F_VERSION, "Version", "input")?;
            dom_utils::set_field_value(document, F_VERSION, DEFAULT_PROMPT_VERSION);
            text_row(document, &body, F_INPUTS, "Inputs (comma separated)", "input")?;
            output_rows(document, &body)?;
        }
    }
    content.append_child(&body)?;

    let error = dom_utils::create(document, "p", CSS_ERROR_TEXT, None)?;
    error.set_id(ID_EDITOR_ERROR);
    content.append_child(&error)?;

    let save = dom_utils::create(document, "button", CSS_PRIMARY_BUTTON, Some("Save"))?;
    save.set_id(ID_EDITOR_SAVE);
    save.set_attribute("type", "button")?;
    on_click(&save, move || {
        let Ok(document) = dom_utils::document() else {
            return;
        };
        let submission = read_submission(kind, |id| dom_utils::field_value(&document, id));
        dispatch_global_message(Message::SubmitEditor(submission));
    })?;
    content.append_child(&save)?;
    Ok(())
}

/// `<div class="form-row"><label/><control/></div>`; the control is
/// appended to the body before it is returned, so its value can be set.
fn text_row(document: &Document, body: &Element, id: &str, label: &str, tag: &str) -> Result<Element, JsValue> {
    let row = dom_utils::create(document, "div", CSS_FORM_ROW, None)?;
    let label_el = dom_utils::create(document, "label", "", Some(label))?;
    label_el.set_attribute("for", id)?;
    let control = document.create_element(tag)?;
    control.set_id(id);
    row.append_child(&label_el)?;
    row.append_child(&control)?;
    body.append_child(&row)?;
    Ok(control)
}

fn select_row(
    document: &Document,
    body: &Element,
    id: &str,
    label: &str,
    options: &[(String, String)],
) -> Result<Element, JsValue> {
    let select = text_row(document, body, id, label, "select")?;
    fill_options(document, &select, options)?;
    Ok(select)
}

fn fill_options(document: &Document, select: &Element, options: &[(String, String)]) -> Result<(), JsValue> {
    dom_utils::clear(select);
    for (value, text) in options {
        let option = dom_utils::create(document, "option", "", Some(text))?;
        option.set_attribute("value", value)?;
        select.append_child(&option)?;
    }
    Ok(())
}

fn output_rows(document: &Document, body: &Element) -> Result<(), JsValue> {
    text_row(document, body, F_OUTPUT_NAME, "Output name", "input")?;
    let types: Vec<(String, String)> = OutputType::ALL
        .iter()
        .map(|t| (t.as_str().to_string(), t.as_str().to_string()))
        .collect();
    select_row(document, body, F_OUTPUT_TYPE, "Output type", &types)?;
    Ok(())
}

fn model_options(provider: &str) -> Vec<(String, String)> {
    models_config::models_for(provider)
        .unwrap_or_default()
        .iter()
        .map(|m| (m.to_string(), m.to_string()))
        .collect()
}

fn repopulate_models() {
    let Ok(document) = dom_utils::document() else {
        return;
    };
    let provider = dom_utils::field_value(&document, F_PROVIDER);
    if let Some(select) = document.get_element_by_id(F_MODEL) {
        if let Err(e) = fill_options(&document, &select, &model_options(&provider)) {
            error_log!("Failed to list models: {:?}", e);
        }
    }
}

fn on_click(el: &Element, f: impl Fn() + 'static) -> Result<(), JsValue> {
    let cb = Closure::<dyn FnMut(Event)>::new(move |_: Event| f());
    el.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}

fn on_change(el: &Element, f: impl Fn() + 'static) -> Result<(), JsValue> {
    let cb = Closure::<dyn FnMut(Event)>::new(move |_: Event| f());
    el.add_event_listener_with_callback("change", cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn reader(fields: &[(&str, &str)]) -> impl Fn(&str) -> String {
        let map: HashMap<String, String> = fields.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |id| map.get(id).cloned().unwrap_or_default()
    }

    #[test]
    fn llm_form_reads_only_llm_fields() {
        let read = reader(&[
            (F_TIME, "45"),
            (F_NAME, "Summariser"),
            (F_PROVIDER, "Open AI"),
            (F_MODEL, "gpt-4"),
            (F_TEMPERATURE, "0.3"),
            (F_OUTPUT_NAME, "summary"),
            (F_OUTPUT_TYPE, "str"),
        ]);
        match read_submission(EditorKind::Llm, read) {
            EditorSubmission::Llm(form) => {
                assert_eq!(form.name, "Summariser");
                assert_eq!(form.model, "gpt-4");
                assert_eq!(form.temperature, 0.3);
                assert_eq!((form.output_name.as_str(), form.output_type.as_str()), ("summary", "str"));
            }
            other => panic!("expected llm form, got {:?}", other),
        }
    }

    #[test]
    fn unparsable_temperature_fails_validation() {
        let read = reader(&[(F_NAME, "x"), (F_PROVIDER, "Open AI"), (F_MODEL, "gpt-4"), (F_TEMPERATURE, "hot")]);
        let EditorSubmission::Llm(form) = read_submission(EditorKind::Llm, read) else {
            panic!("expected llm form");
        };
        assert_eq!(form.to_request("a1"), Err(crate::editor::FormError::TemperatureOutOfRange));
    }

    #[test]
    fn timer_form_reads_time_field() {
        let read = reader(&[(F_TIME, "30")]);
        assert_eq!(read_submission(EditorKind::Timer, read), EditorSubmission::Timer(TimerForm { time: "30".into() }));
    }
}
