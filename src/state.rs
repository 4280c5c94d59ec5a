use std::cell::RefCell;

use serde_json::Value;

use crate::canvas::flow::CanvasState;
use crate::editor::{EditorKind, EditorState};
use crate::messages::{Command, Message, NotificationKind};
use crate::models::{Agent, Node, Project};
use crate::router::Route;
use crate::update;

/// A toast currently on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: u32,
    pub kind: NotificationKind,
    pub text: String,
}

// Store global application state
#[derive(Debug, Default)]
pub struct AppState {
    pub route: Route,

    // Server aggregates, mirroring the last fetched / created objects
    pub project: Option<Project>,
    pub agent: Option<Agent>,
    /// Last node created from the editor. Not kept in sync with `agent.nodes`.
    pub node: Option<Node>,

    // Transient UI state
    pub canvas: CanvasState,
    pub editor: EditorState,
    pub notifications: Vec<Notification>,
    next_notification_id: u32,

    /// Kind of the editor create request in flight. Outlives the modal, so
    /// closing and reopening the editor cannot submit a second create.
    pub create_in_flight: Option<EditorKind>,

    /// A run request for the loaded agent is in flight.
    pub run_pending: bool,
    pub last_run: Option<Value>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispatch(&mut self, msg: Message) -> Vec<Command> {
        update::update(self, msg)
    }

    /// Id of the loaded agent, if it has one.
    pub fn agent_id(&self) -> Option<&str> {
        self.agent.as_ref().and_then(|a| a.id.as_deref())
    }

    pub fn project_id(&self) -> Option<&str> {
        self.project.as_ref().and_then(|p| p.id.as_deref())
    }

    /// Settle the in-flight create. Returns true when the editor that
    /// submitted it is still showing. Only that editor can be pending, since
    /// a submit is refused while another create is in flight.
    pub fn finish_create(&mut self) -> bool {
        self.create_in_flight = None;
        self.editor.is_pending()
    }

    /// Record a notification and return its id.
    pub fn push_notification(&mut self, kind: NotificationKind, text: String) -> u32 {
        self.next_notification_id += 1;
        let id = self.next_notification_id;
        self.notifications.push(Notification { id, kind, text });
        id
    }

    /// Rebuild the canvas nodes from the loaded agent, keeping local edges.
    pub fn sync_canvas(&mut self) {
        match &self.agent {
            Some(agent) => self.canvas.sync_with(crate::graph::build_nodes(Some(&agent.nodes))),
            None => self.canvas.clear(),
        }
    }

    /// Rebuild the canvas for a freshly loaded agent, including the
    /// connections stored on the server.
    pub fn load_canvas(&mut self) {
        self.sync_canvas();
        if let Some(agent) = &self.agent {
            self.canvas.seed_edges(crate::graph::build_edges(&agent.nodes));
        }
    }
}

// We use thread_local to store our app state
thread_local! {
    pub static APP_STATE: RefCell<AppState> = RefCell::new(AppState::new());
}

pub fn dispatch_global_message(msg: Message) {
    // 1. Perform state updates and collect commands
    let commands = APP_STATE.with(|state| state.borrow_mut().dispatch(msg));

    // 2. Execute commands after state borrow is dropped
    for cmd in commands {
        match cmd {
            Command::SendMessage(msg) => dispatch_global_message(msg),
            Command::UpdateUI(ui_fn) => ui_fn(),

            cmd @ Command::FetchProject(_)
            | cmd @ Command::FetchAgent(_)
            | cmd @ Command::CreateProject(_)
            | cmd @ Command::Login(_)
            | cmd @ Command::CreateAgent(_)
            | cmd @ Command::CreateNode(_)
            | cmd @ Command::RunAgent(_) => crate::command_executors::execute_network_command(cmd),

            Command::Navigate(route) => crate::command_executors::navigate(&route),

            Command::ShowToast { id, kind, text } => crate::toast::show(id, &text, kind),
            Command::HideToast(id) => crate::toast::hide(id),
        }
    }
}
