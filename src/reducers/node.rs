//! Node aggregate. Holds the last node created from the editor and forwards
//! it to the agent so the canvas picks it up.

use crate::editor::EditorState;
use crate::error_log;
use crate::messages::{Command, Message, NotificationKind};
use crate::reducers::agent::foreign_node_text;
use crate::reducers::notify;
use crate::state::AppState;

pub fn update(state: &mut AppState, msg: &Message, cmds: &mut Vec<Command>) -> bool {
    match msg {
        Message::NodeCreated(node) => {
            let submitted_here = state.finish_create();
            if state.agent_id() != Some(node.agent_id.as_str()) {
                error_log!("Created node for agent {} while {:?} is open", node.agent_id, state.agent_id());
                let text = foreign_node_text(&node.agent_id, state.agent_id());
                if submitted_here {
                    state.editor.fail(text.clone());
                    cmds.push(Command::update_ui(crate::components::node_editor::refresh));
                }
                notify(cmds, NotificationKind::Error, text);
                return true;
            }

            state.node = Some(node.clone());
            if submitted_here {
                state.editor = EditorState::Closed;
                cmds.push(Command::update_ui(crate::components::node_editor::refresh));
            }
            cmds.push(Command::send(Message::NodeAppended(node.clone())));
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::EditorKind;
    use crate::models::{Agent, Node, NodeKind, TimerData};

    fn state_with_agent() -> AppState {
        let mut state = AppState::new();
        state.agent = Some(Agent { id: Some("a1".into()), ..Agent::default() });
        state
    }

    fn timer_for(agent_id: &str) -> Node {
        Node::new_for_agent(agent_id.into(), None, NodeKind::Timer(TimerData { time: 30 }))
    }

    #[test]
    fn created_node_closes_editor_and_chains_append() {
        let mut state = state_with_agent();
        state.editor = EditorState::Open { kind: EditorKind::Timer, pending: true, error: None };
        state.create_in_flight = Some(EditorKind::Timer);
        let node = timer_for("a1");

        let cmds = state.dispatch(Message::NodeCreated(node.clone()));

        assert_eq!(state.node.as_ref(), Some(&node));
        assert_eq!(state.editor, EditorState::Closed);
        assert!(state.create_in_flight.is_none());
        assert!(cmds.iter().any(|c| matches!(c, Command::SendMessage(Message::NodeAppended(n)) if *n == node)));
    }

    #[test]
    fn late_node_create_leaves_newer_editor_open() {
        let mut state = state_with_agent();
        state.create_in_flight = Some(EditorKind::Timer);
        state.editor = EditorState::open(EditorKind::Llm);

        let cmds = state.dispatch(Message::NodeCreated(timer_for("a1")));

        assert_eq!(state.editor, EditorState::open(EditorKind::Llm));
        assert!(cmds.iter().any(|c| matches!(c, Command::SendMessage(Message::NodeAppended(_)))));
    }

    #[test]
    fn node_for_other_agent_is_reported_not_stored() {
        let mut state = state_with_agent();
        state.editor = EditorState::Open { kind: EditorKind::Timer, pending: true, error: None };
        state.create_in_flight = Some(EditorKind::Timer);

        let cmds = state.dispatch(Message::NodeCreated(timer_for("other")));

        assert!(state.node.is_none());
        assert_eq!(state.editor.kind(), Some(EditorKind::Timer));
        assert!(state.editor.error().is_some());
        assert!(!cmds.iter().any(|c| matches!(c, Command::SendMessage(Message::NodeAppended(_)))));
        assert!(cmds
            .iter()
            .any(|c| matches!(c, Command::SendMessage(Message::Notify { kind: NotificationKind::Error, .. }))));
    }
}
