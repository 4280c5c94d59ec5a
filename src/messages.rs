// src/messages.rs
//
// Everything that can happen in the UI, and the side effects reducers ask for.
//
use serde_json::Value;

use crate::canvas::flow::{Connection, EdgeChange, NodeChange};
use crate::editor::{EditorKind, EditorSubmission, LoginForm, ProjectForm};
use crate::models::{Agent, LoginRequest, Node, Project, Session};
use crate::network::ApiError;
use crate::router::Route;

/// Remote call a failure belongs to, used to word the error shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    LoadProject,
    CreateProject,
    Login,
    LoadAgent,
    CreateAgent,
    RunAgent,
    CreateNode,
}

impl Operation {
    pub fn describe(&self) -> &'static str {
        match self {
            Operation::LoadProject => "load project",
            Operation::CreateProject => "create project",
            Operation::Login => "log in",
            Operation::LoadAgent => "load agent",
            Operation::CreateAgent => "create agent",
            Operation::RunAgent => "run agent",
            Operation::CreateNode => "create node",
        }
    }

    /// Whether the failure belongs to the editor modal's save button.
    pub fn from_editor(&self) -> bool {
        matches!(self, Operation::CreateAgent | Operation::CreateNode)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Page load entered a route.
    RouteEntered(Route),

    // Project aggregate
    ProjectLoaded(Project),
    ProjectCreated(Project),
    LoggedIn(Session),
    SubmitProjectForm(ProjectForm),
    SubmitLogin(LoginForm),

    // Agent aggregate
    AgentLoaded(Agent),
    AgentCreated(Agent),
    /// Append a freshly created node to the loaded agent.
    NodeAppended(Node),
    RunAgent,
    AgentRunStarted(Value),

    // Node aggregate
    NodeCreated(Node),

    // Canvas change events (local only)
    NodesChanged(Vec<NodeChange>),
    EdgesChanged(Vec<EdgeChange>),
    Connect(Connection),

    // Canvas pointer input, in canvas-relative screen pixels
    CanvasMouseDown { x: f64, y: f64 },
    CanvasMouseMove { x: f64, y: f64 },
    CanvasMouseUp { x: f64, y: f64 },
    CanvasZoom { factor: f64, x: f64, y: f64 },
    CanvasResized { width: f64, height: f64 },
    DeleteSelection,

    // Node editor modal
    OpenEditor(EditorKind),
    CloseEditor,
    SubmitEditor(EditorSubmission),
    RequestFailed { operation: Operation, error: ApiError },

    // Notifications
    Notify { kind: NotificationKind, text: String },
    DismissNotification(u32),
}

pub enum Command {
    /// Chain another message to be processed
    SendMessage(Message),

    /// Execute a UI update function after state changes
    UpdateUI(Box<dyn FnOnce() + 'static>),

    FetchProject(String),
    FetchAgent(String),
    CreateProject(Project),
    Login(LoginRequest),
    CreateAgent(Agent),
    CreateNode(Node),
    RunAgent(String),

    /// Full-page navigation to a route.
    Navigate(Route),

    /// Render a toast and schedule its dismissal.
    ShowToast { id: u32, kind: NotificationKind, text: String },
    HideToast(u32),
}

impl Command {
    /// Helper to create a SendMessage command
    pub fn send(msg: Message) -> Self {
        Command::SendMessage(msg)
    }

    /// Helper to create an UpdateUI command
    pub fn update_ui<F>(f: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        Command::UpdateUI(Box::new(f))
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::SendMessage(msg) => f.debug_tuple("SendMessage").field(msg).finish(),
            Command::UpdateUI(_) => f.write_str("UpdateUI(..)"),
            Command::FetchProject(id) => f.debug_tuple("FetchProject").field(id).finish(),
            Command::FetchAgent(id) => f.debug_tuple("FetchAgent").field(id).finish(),
            Command::CreateProject(p) => f.debug_tuple("CreateProject").field(p).finish(),
            Command::Login(req) => f.debug_tuple("Login").field(&req.name).finish(),
            Command::CreateAgent(a) => f.debug_tuple("CreateAgent").field(a).finish(),
            Command::CreateNode(n) => f.debug_tuple("CreateNode").field(n).finish(),
            Command::RunAgent(id) => f.debug_tuple("RunAgent").field(id).finish(),
            Command::Navigate(route) => f.debug_tuple("Navigate").field(route).finish(),
            Command::ShowToast { id, kind, text } => f
                .debug_struct("ShowToast")
                .field("id", id)
                .field("kind", kind)
                .field("text", text)
                .finish(),
            Command::HideToast(id) => f.debug_tuple("HideToast").field(id).finish(),
        }
    }
}
