//! Node editor modal lifecycle and request failures.

use crate::editor::{build_request, CreateRequest, EditorState};
use crate::{debug_log, error_log};
use crate::messages::{Command, Message, NotificationKind};
use crate::reducers::notify;
use crate::state::AppState;

fn refresh(cmds: &mut Vec<Command>) {
    cmds.push(Command::update_ui(crate::components::node_editor::refresh));
}

pub fn update(state: &mut AppState, msg: &Message, cmds: &mut Vec<Command>) -> bool {
    match msg {
        Message::OpenEditor(kind) => {
            if state.editor.is_pending() {
                return true;
            }
            state.editor = EditorState::open(*kind);
            refresh(cmds);
            true
        }
        Message::CloseEditor => {
            state.editor = EditorState::Closed;
            refresh(cmds);
            true
        }
        Message::SubmitEditor(submission) => {
            let EditorState::Open { kind, pending, .. } = &state.editor else {
                return true;
            };
            if *pending || *kind != submission.kind() {
                return true;
            }
            let kind = *kind;
            if let Some(in_flight) = state.create_in_flight {
                debug_log!("{} create still in flight, refusing submit", in_flight.title());
                state.editor.fail("Wait for the previous save to finish".to_string());
                refresh(cmds);
                return true;
            }

            match build_request(submission, state.project.as_ref(), state.agent.as_ref()) {
                Ok(request) => {
                    state.editor = EditorState::Open { kind, pending: true, error: None };
                    state.create_in_flight = Some(kind);
                    cmds.push(match request {
                        CreateRequest::Agent(agent) => Command::CreateAgent(agent),
                        CreateRequest::Node(node) => Command::CreateNode(node),
                    });
                }
                Err(err) => state.editor.fail(err.to_string()),
            }
            refresh(cmds);
            true
        }
        Message::RequestFailed { operation, error } => {
            error_log!("Failed to {}: {}", operation.describe(), error);
            let text = format!("Could not {}: {}", operation.describe(), error);

            if operation.from_editor() && state.finish_create() {
                state.editor.fail(text.clone());
                refresh(cmds);
            }
            if matches!(operation, crate::messages::Operation::RunAgent) {
                state.run_pending = false;
                cmds.push(Command::update_ui(crate::pages::agent::refresh_run_button));
            }
            notify(cmds, NotificationKind::Error, text);
            true
        }
        _ => false,
    }
}
