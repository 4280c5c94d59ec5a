//! Agent domain reducer: loading, creation, node appends and run requests.

use crate::{debug_log, error_log};
use crate::editor::EditorState;
use crate::messages::{Command, Message, NotificationKind};
use crate::models::{AgentRef, AgentSummary};
use crate::reducers::notify;
use crate::router::Route;
use crate::state::AppState;

/// User-facing text for a node that belongs to another agent.
pub(crate) fn foreign_node_text(node_agent: &str, loaded: Option<&str>) -> String {
    match loaded {
        Some(loaded) => format!("Node belongs to agent {}, not the open agent {}", node_agent, loaded),
        None => format!("Node belongs to agent {}, but no agent is open", node_agent),
    }
}

/// Handles agent-related messages. Returns true if the message was handled.
pub fn update(state: &mut AppState, msg: &Message, cmds: &mut Vec<Command>) -> bool {
    match msg {
        Message::AgentLoaded(agent) => {
            if state.route.agent_id() != agent.id.as_deref() {
                debug_log!("Dropping stale agent response {:?}", agent.id);
                return true;
            }
            debug_log!("Loaded agent {} with {} nodes", agent.name, agent.nodes.len());
            state.agent = Some(agent.clone());
            state.load_canvas();
            cmds.push(Command::update_ui(crate::pages::agent::refresh));
            true
        }
        Message::AgentCreated(agent) => {
            let submitted_here = state.finish_create();
            let Some(id) = agent.id.clone() else {
                let text = "Agent was created without an id";
                if submitted_here {
                    state.editor.fail(text.to_string());
                    cmds.push(Command::update_ui(crate::components::node_editor::refresh));
                }
                notify(cmds, NotificationKind::Error, text);
                return true;
            };
            if submitted_here {
                state.editor = EditorState::Closed;
                cmds.push(Command::update_ui(crate::components::node_editor::refresh));
            }
            if let Some(project) = state.project.as_mut() {
                project.agents.push(AgentRef::Summary(AgentSummary { id: id.clone(), name: Some(agent.name.clone()) }));
            }
            state.agent = Some(agent.clone());
            cmds.push(Command::Navigate(Route::Agent(id)));
            true
        }
        Message::NodeAppended(node) => {
            if state.agent_id() != Some(node.agent_id.as_str()) {
                error_log!("Node for agent {} does not belong to {:?}", node.agent_id, state.agent_id());
                notify(cmds, NotificationKind::Error, foreign_node_text(&node.agent_id, state.agent_id()));
                return true;
            }
            let Some(agent) = state.agent.as_mut() else {
                return true;
            };
            if let Some(id) = node.id.as_deref() {
                if agent.find_node(id).is_some() {
                    debug_log!("Node {} already on agent, skipping", id);
                    return true;
                }
            }
            agent.nodes.push(node.clone());
            state.sync_canvas();
            cmds.push(Command::update_ui(crate::canvas::renderer::redraw));
            true
        }
        Message::RunAgent => {
            if state.run_pending {
                return true;
            }
            if let Some(id) = state.agent_id().map(str::to_string) {
                state.run_pending = true;
                cmds.push(Command::RunAgent(id));
                cmds.push(Command::update_ui(crate::pages::agent::refresh_run_button));
            }
            true
        }
        Message::AgentRunStarted(run) => {
            state.run_pending = false;
            state.last_run = Some(run.clone());
            notify(cmds, NotificationKind::Success, "Agent run started");
            cmds.push(Command::update_ui(crate::pages::agent::refresh_run_button));
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

    fn loaded_state() -> AppState {
        let mut state = AppState::new();
        state.route = Route::Agent("a1".into());
        state.dispatch(Message::AgentLoaded(Agent {
            id: Some("a1".into()),
            name: "Watcher".into(),
            project_id: "p1".into(),
            ..Agent::default()
        }));
        state
    }

    fn timer(agent_id: &str, id: &str) -> Node {
        let mut node = Node::new_for_agent(agent_id.into(), None, NodeKind::Timer(TimerData { time: 5 }));
        node.id = Some(id.into());
        node
    }

    #[test]
    fn append_grows_nodes_by_one_and_updates_canvas() {
        let mut state = loaded_state();
        state.dispatch(Message::NodeAppended(timer("a1", "n1")));
        let agent = state.agent.as_ref().unwrap();
        assert_eq!(agent.nodes.len(), 1);
        assert_eq!(agent.nodes[0].agent_id, "a1");
        assert_eq!(state.canvas.nodes.len(), 1);
        assert_eq!(state.canvas.nodes[0].label, "Timer 5s");
    }

    #[test]
    fn repeated_append_of_same_node_is_ignored() {
        let mut state = loaded_state();
        state.dispatch(Message::NodeAppended(timer("a1", "n1")));
        state.dispatch(Message::NodeAppended(timer("a1", "n1")));
        assert_eq!(state.agent.as_ref().unwrap().nodes.len(), 1);
        assert_eq!(state.canvas.nodes.len(), 1);
    }

    #[test]
    fn append_for_other_agent_is_reported() {
        let mut state = loaded_state();
        let cmds = state.dispatch(Message::NodeAppended(timer("other", "n1")));
        assert!(state.agent.as_ref().unwrap().nodes.is_empty());
        assert!(matches!(
            &cmds[..],
            [Command::SendMessage(Message::Notify { kind: NotificationKind::Error, text })] if text.contains("other")
        ));
    }

    #[test]
    fn agent_without_id_keeps_editor_open() {
        let mut state = AppState::new();
        state.editor = EditorState::Open { kind: EditorKind::Agent, pending: true, error: None };
        state.create_in_flight = Some(EditorKind::Agent);

        let cmds = state.dispatch(Message::AgentCreated(Agent { name: "Nameless".into(), ..Agent::default() }));

        assert_eq!(state.editor.kind(), Some(EditorKind::Agent));
        assert!(!state.editor.is_pending());
        assert!(state.editor.error().is_some());
        assert!(!cmds.iter().any(|c| matches!(c, Command::Navigate(_))));
        assert!(state.create_in_flight.is_none());
    }

    #[test]
    fn late_agent_create_does_not_close_other_editor() {
        let mut state = AppState::new();
        state.create_in_flight = Some(EditorKind::Agent);
        state.editor = EditorState::open(EditorKind::Timer);

        state.dispatch(Message::AgentCreated(Agent { id: Some("a7".into()), ..Agent::default() }));

        assert_eq!(state.editor, EditorState::open(EditorKind::Timer));
    }

    #[test]
    fn stale_agent_response_is_dropped() {
        let mut state = loaded_state();
        state.dispatch(Message::AgentLoaded(Agent { id: Some("a2".into()), ..Agent::default() }));
        assert_eq!(state.agent_id(), Some("a1"));
    }

    #[test]
    fn created_agent_navigates_to_its_page() {
        let mut state = AppState::new();
        let cmds = state.dispatch(Message::AgentCreated(Agent { id: Some("a7".into()), ..Agent::default() }));
        assert!(matches!(&cmds[0], Command::Navigate(Route::Agent(id)) if id == "a7"));
    }

    #[test]
    fn run_is_not_repeated_while_pending() {
        let mut state = loaded_state();
        let first = state.dispatch(Message::RunAgent);
        assert!(matches!(&first[0], Command::RunAgent(id) if id == "a1"));
        let second = state.dispatch(Message::RunAgent);
        assert!(second.is_empty());

        state.dispatch(Message::AgentRunStarted(serde_json::json!({"status": "running"})));
        assert!(!state.run_pending);
        assert!(state.last_run.is_some());
    }
}
