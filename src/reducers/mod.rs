//! Domain reducers. `update.rs` offers each message to them in turn; a
//! reducer returns `true` once it has consumed the message.
//!
//! Reducers only touch `AppState` and push `Command`s. Anything that reaches
//! the DOM or the network is deferred to a command so reducers stay testable
//! off the browser.

pub mod agent;
pub mod canvas;
pub mod editor;
pub mod node;
pub mod notifications;
pub mod project;

use crate::messages::{Command, Message, NotificationKind};

/// Queue a toast.
pub(crate) fn notify(cmds: &mut Vec<Command>, kind: NotificationKind, text: impl Into<String>) {
    cmds.push(Command::send(Message::Notify { kind, text: text.into() }));
}
