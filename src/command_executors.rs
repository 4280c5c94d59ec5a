use std::future::Future;

use crate::debug_log;
use crate::error_log;
use crate::messages::{Command, Message, Operation};
use crate::network::{ApiClient, ApiError};
use crate::router::Route;
use crate::state::dispatch_global_message;

/// Run `call` in the background and report the outcome as a message.
fn spawn_request<T, F, S>(operation: Operation, call: F, on_success: S)
where
    T: 'static,
    F: Future<Output = Result<T, ApiError>> + 'static,
    S: FnOnce(T) -> Message + 'static,
{
    wasm_bindgen_futures::spawn_local(async move {
        let msg = match call.await {
            Ok(value) => on_success(value),
            Err(error) => Message::RequestFailed { operation, error },
        };
        dispatch_global_message(msg);
    });
}

pub fn execute_network_command(cmd: Command) {
    match cmd {
        Command::FetchProject(project_id) => {
            debug_log!("Fetching project {}", project_id);
            spawn_request(
                Operation::LoadProject,
                async move { ApiClient::get_project(&project_id).await },
                Message::ProjectLoaded,
            );
        }
        Command::FetchAgent(agent_id) => {
            debug_log!("Fetching agent {}", agent_id);
            spawn_request(
                Operation::LoadAgent,
                async move { ApiClient::get_agent(&agent_id).await },
                Message::AgentLoaded,
            );
        }
        Command::CreateProject(project) => spawn_request(
            Operation::CreateProject,
            async move { ApiClient::create_project(&project).await },
            Message::ProjectCreated,
        ),
        Command::Login(request) => spawn_request(
            Operation::Login,
            async move { ApiClient::login(&request).await },
            Message::LoggedIn,
        ),
        Command::CreateAgent(agent) => spawn_request(
            Operation::CreateAgent,
            async move { ApiClient::create_agent(&agent).await },
            Message::AgentCreated,
        ),
        Command::CreateNode(node) => spawn_request(
            Operation::CreateNode,
            async move { ApiClient::create_node(&node).await },
            Message::NodeCreated,
        ),
        Command::RunAgent(agent_id) => spawn_request(
            Operation::RunAgent,
            async move { ApiClient::run_agent(&agent_id).await },
            Message::AgentRunStarted,
        ),
        other => error_log!("Not a network command: {:?}", other),
    }
}

/// Full-page navigation, so the next page starts from a fresh store.
pub fn navigate(route: &Route) {
    let path = route.path();
    debug_log!("Navigating to {}", path);
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(e) = window.location().assign(&path) {
        error_log!("Navigation to {} failed: {:?}", path, e);
    }
}
