use crate::messages::{Command, Message};
use crate::state::AppState;

pub fn update(state: &mut AppState, msg: &Message, cmds: &mut Vec<Command>) -> bool {
    match msg {
        Message::Notify { kind, text } => {
            let id = state.push_notification(*kind, text.clone());
            cmds.push(Command::ShowToast { id, kind: *kind, text: text.clone() });
            true
        }
        Message::DismissNotification(id) => {
            state.notifications.retain(|n| n.id != *id);
            cmds.push(Command::HideToast(*id));
            true
        }
        _ => false,
    }
}
