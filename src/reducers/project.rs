//! Project aggregate: loading a project, creating one, and logging in.

use crate::debug_log;
use crate::messages::{Command, Message, NotificationKind};
use crate::reducers::notify;
use crate::router::Route;
use crate::state::AppState;

pub fn update(state: &mut AppState, msg: &Message, cmds: &mut Vec<Command>) -> bool {
    match msg {
        Message::ProjectLoaded(project) => {
            if state.route.project_id() != project.id.as_deref() {
                debug_log!("Dropping stale project response {:?}", project.id);
                return true;
            }
            state.project = Some(project.clone());
            cmds.push(Command::update_ui(crate::pages::project::refresh));
            true
        }
        Message::ProjectCreated(project) => {
            state.project = Some(project.clone());
            match &project.id {
                Some(id) => cmds.push(Command::Navigate(Route::Project(id.clone()))),
                None => notify(cmds, NotificationKind::Error, "Project was created without an id"),
            }
            true
        }
        Message::LoggedIn(session) => {
            cmds.push(Command::Navigate(Route::Project(session.id.clone())));
            true
        }
        Message::SubmitProjectForm(form) => {
            match form.to_request() {
                Ok(project) => cmds.push(Command::CreateProject(project)),
                Err(err) => notify(cmds, NotificationKind::Error, err.to_string()),
            }
            true
        }
        Message::SubmitLogin(form) => {
            match form.to_request() {
                Ok(request) => cmds.push(Command::Login(request)),
                Err(err) => notify(cmds, NotificationKind::Error, err.to_string()),
            }
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::{LoginForm, ProjectForm};
    use crate::models::{Project, Session};

    fn project(id: &str) -> Project {
        Project { id: Some(id.into()), name: Some("Demo".into()), ..Project::default() }
    }

    #[test]
    fn project_for_current_route_is_stored() {
        let mut state = AppState::new();
        state.route = Route::Project("p1".into());
        let cmds = state.dispatch(Message::ProjectLoaded(project("p1")));
        assert_eq!(state.project_id(), Some("p1"));
        assert!(matches!(cmds.as_slice(), [Command::UpdateUI(_)]));
    }

    #[test]
    fn stale_project_is_dropped() {
        let mut state = AppState::new();
        state.route = Route::Project("p1".into());
        let cmds = state.dispatch(Message::ProjectLoaded(project("p2")));
        assert!(state.project.is_none());
        assert!(cmds.is_empty());
    }

    #[test]
    fn created_project_and_login_navigate() {
        let mut state = AppState::new();
        let cmds = state.dispatch(Message::ProjectCreated(project("p9")));
        assert!(matches!(&cmds[0], Command::Navigate(Route::Project(id)) if id == "p9"));

        let cmds = state.dispatch(Message::LoggedIn(Session { id: "p3".into() }));
        assert!(matches!(&cmds[0], Command::Navigate(Route::Project(id)) if id == "p3"));
    }

    #[test]
    fn invalid_forms_notify_instead_of_sending() {
        let mut state = AppState::new();
        let cmds = state.dispatch(Message::SubmitProjectForm(ProjectForm::default()));
        assert!(matches!(&cmds[0], Command::SendMessage(Message::Notify { kind: NotificationKind::Error, .. })));

        let form = LoginForm { name: "Demo".into(), password: "secret".into() };
        let cmds = state.dispatch(Message::SubmitLogin(form));
        assert!(matches!(&cmds[0], Command::Login(req) if req.name == "Demo"));
    }
}
