// src/update.rs
//
use crate::debug_log;
use crate::messages::{Command, Message};
use crate::router::Route;
use crate::state::AppState;

pub fn update(state: &mut AppState, msg: Message) -> Vec<Command> {
    let mut commands = Vec::new();

    // ---------------------------------------------------------------
    // Delegate to domain-specific reducers first. When one of them
    // consumes the message we can bail out early.
    // ---------------------------------------------------------------

    if crate::reducers::project::update(state, &msg, &mut commands) {
        return commands;
    }
    if crate::reducers::agent::update(state, &msg, &mut commands) {
        return commands;
    }
    if crate::reducers::node::update(state, &msg, &mut commands) {
        return commands;
    }
    if crate::reducers::canvas::update(state, &msg, &mut commands) {
        return commands;
    }
    if crate::reducers::editor::update(state, &msg, &mut commands) {
        return commands;
    }
    if crate::reducers::notifications::update(state, &msg, &mut commands) {
        return commands;
    }

    match msg {
        Message::RouteEntered(route) => {
            debug_log!("Entering route {}", route.path());
            match &route {
                Route::Project(id) => commands.push(Command::FetchProject(id.clone())),
                Route::Agent(id) => commands.push(Command::FetchAgent(id.clone())),
                Route::Home | Route::NotFound(_) => {}
            }
            state.route = route;
        }
        other => {
            debug_log!("Unhandled message: {:?}", other);
        }
    }

    commands
}

