use wasm_bindgen_test::*;

use crate::constants::{ID_EDITOR_ERROR, ID_EDITOR_MODAL, ID_EDITOR_SAVE};
use crate::editor::{EditorKind, EditorSubmission, TimerForm};
use crate::messages::Message;
use crate::models::Agent;
use crate::state::{dispatch_global_message, APP_STATE};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

#[wasm_bindgen_test]
fn editor_modal_follows_store() {
    APP_STATE.with(|s| {
        s.borrow_mut().agent = Some(Agent { id: Some("a1".into()), ..Agent::default() });
    });

    dispatch_global_message(Message::OpenEditor(EditorKind::Timer));
    let modal = document().get_element_by_id(ID_EDITOR_MODAL).expect("modal mounted");
    assert!(modal.class_list().contains("visible"));
    assert!(document().get_element_by_id(ID_EDITOR_SAVE).is_some());

    // Out of range: inline error, modal stays open
    dispatch_global_message(Message::SubmitEditor(EditorSubmission::Timer(TimerForm { time: "99".into() })));
    let error = document().get_element_by_id(ID_EDITOR_ERROR).unwrap();
    assert!(error.text_content().unwrap_or_default().contains("between 1 and 60"));

    dispatch_global_message(Message::CloseEditor);
    assert!(modal.class_list().contains("hidden"));
}
