//! Canvas reducer: applies node/edge change events and turns raw pointer
//! input into those events.
//!
//! Nothing here talks to the backend. Positions, selection and
//! connections are view state only.

use crate::canvas::flow::{Connection, DragState, NodeChange};
use crate::constants::{CONNECT_HANDLE_HEIGHT, EDGE_HIT_TOLERANCE, GRAPH_NODE_HEIGHT};
use crate::debug_log;
use crate::graph::Position;
use crate::messages::{Command, Message};
use crate::state::AppState;

fn redraw(cmds: &mut Vec<Command>) {
    cmds.push(Command::update_ui(crate::canvas::renderer::redraw));
}

/// Queue change events so every canvas edit flows through the same path.
fn emit(cmds: &mut Vec<Command>, changes: (Vec<NodeChange>, Vec<crate::canvas::flow::EdgeChange>)) {
    let (nodes, edges) = changes;
    if !nodes.is_empty() {
        cmds.push(Command::send(Message::NodesChanged(nodes)));
    }
    if !edges.is_empty() {
        cmds.push(Command::send(Message::EdgesChanged(edges)));
    }
}

pub fn update(state: &mut AppState, msg: &Message, cmds: &mut Vec<Command>) -> bool {
    match msg {
        Message::NodesChanged(changes) => {
            state.canvas.apply_node_changes(changes);
            redraw(cmds);
            true
        }
        Message::EdgesChanged(changes) => {
            state.canvas.apply_edge_changes(changes);
            redraw(cmds);
            true
        }
        Message::Connect(connection) => {
            if state.canvas.connect(connection) {
                redraw(cmds);
            } else {
                debug_log!("Rejected connection {} -> {}", connection.source, connection.target);
            }
            true
        }
        Message::CanvasMouseDown { x, y } => {
            let canvas = &mut state.canvas;
            let (wx, wy) = canvas.to_world(*x, *y);
            canvas.pointer = (wx, wy);

            if let Some((node, dx, dy)) = canvas.node_at(wx, wy) {
                let id = node.id.clone();
                if dy >= GRAPH_NODE_HEIGHT - CONNECT_HANDLE_HEIGHT {
                    canvas.connecting_from = Some(id.clone());
                } else {
                    canvas.dragging = Some(DragState { node_id: id.clone(), offset_x: dx, offset_y: dy });
                }
                emit(cmds, canvas.selection_changes(Some(&id)));
            } else if let Some(edge) = canvas.edge_at(wx, wy, EDGE_HIT_TOLERANCE / canvas.zoom_level) {
                let id = edge.id.clone();
                emit(cmds, canvas.selection_changes(Some(&id)));
            } else {
                canvas.panning_from = Some((*x, *y));
                emit(cmds, canvas.selection_changes(None));
            }
            true
        }
        Message::CanvasMouseMove { x, y } => {
            let canvas = &mut state.canvas;
            let (wx, wy) = canvas.to_world(*x, *y);
            canvas.pointer = (wx, wy);

            if let Some(drag) = &canvas.dragging {
                cmds.push(Command::send(Message::NodesChanged(vec![NodeChange::Position {
                    id: drag.node_id.clone(),
                    position: Position::new(wx - drag.offset_x, wy - drag.offset_y),
                    dragging: true,
                }])));
            } else if let Some((last_x, last_y)) = canvas.panning_from {
                canvas.pan_by(x - last_x, y - last_y);
                canvas.panning_from = Some((*x, *y));
                redraw(cmds);
            } else if canvas.connecting_from.is_some() {
                canvas.dirty = true;
                redraw(cmds);
            }
            true
        }
        Message::CanvasMouseUp { x, y } => {
            let canvas = &mut state.canvas;
            let (wx, wy) = canvas.to_world(*x, *y);
            canvas.panning_from = None;

            if let Some(drag) = canvas.dragging.take() {
                if let Some(node) = canvas.node(&drag.node_id) {
                    cmds.push(Command::send(Message::NodesChanged(vec![NodeChange::Position {
                        id: drag.node_id.clone(),
                        position: node.position,
                        dragging: false,
                    }])));
                }
            }
            if let Some(source) = canvas.connecting_from.take() {
                match canvas.node_at(wx, wy) {
                    Some((target, _, _)) => cmds.push(Command::send(Message::Connect(Connection {
                        source,
                        target: target.id.clone(),
                    }))),
                    None => redraw(cmds),
                }
            }
            true
        }
        Message::CanvasZoom { factor, x, y } => {
            state.canvas.zoom_at(*factor, *x, *y);
            redraw(cmds);
            true
        }
        Message::CanvasResized { width, height } => {
            state.canvas.width = *width;
            state.canvas.height = *height;
            state.canvas.dirty = true;
            redraw(cmds);
            true
        }
        Message::DeleteSelection => {
            emit(cmds, state.canvas.removal_changes());
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::flow::EdgeChange;
    use crate::graph::GraphNode;

    fn state_with(ids: &[&str]) -> AppState {
        let mut state = AppState::new();
        for (i, id) in ids.iter().enumerate() {
            state.canvas.nodes.push(GraphNode {
                id: id.to_string(),
                position: Position::new(200.0, 100.0 * (i as f64 + 1.0)),
                label: id.to_string(),
                node_type: "timer".into(),
                selected: false,
            });
        }
        state
    }

    /// Run a message and every message it chains, like the global dispatcher.
    fn run(state: &mut AppState, msg: Message) {
        let mut queue = vec![msg];
        while let Some(msg) = queue.pop() {
            for cmd in state.dispatch(msg) {
                if let Command::SendMessage(next) = cmd {
                    queue.push(next);
                }
            }
        }
    }

    #[test]
    fn dragging_moves_the_node_locally() {
        let mut state = state_with(&["a"]);
        run(&mut state, Message::CanvasMouseDown { x: 210.0, y: 110.0 });
        assert!(state.canvas.nodes[0].selected);
        run(&mut state, Message::CanvasMouseMove { x: 310.0, y: 160.0 });
        run(&mut state, Message::CanvasMouseUp { x: 310.0, y: 160.0 });
        assert_eq!(state.canvas.nodes[0].position, Position::new(300.0, 150.0));
        assert!(state.canvas.dragging.is_none());
    }

    #[test]
    fn dragging_from_handle_connects_nodes() {
        let mut state = state_with(&["a", "b"]);
        run(&mut state, Message::CanvasMouseDown { x: 280.0, y: 138.0 });
        assert_eq!(state.canvas.connecting_from.as_deref(), Some("a"));
        run(&mut state, Message::CanvasMouseUp { x: 280.0, y: 210.0 });
        assert_eq!(state.canvas.edges.len(), 1);
        assert_eq!(state.canvas.edges[0].id, "edge-a-b");
    }

    #[test]
    fn background_drag_pans_and_clears_selection() {
        let mut state = state_with(&["a"]);
        state.canvas.nodes[0].selected = true;
        run(&mut state, Message::CanvasMouseDown { x: 10.0, y: 10.0 });
        assert!(!state.canvas.nodes[0].selected);
        run(&mut state, Message::CanvasMouseMove { x: 30.0, y: 50.0 });
        assert_eq!((state.canvas.viewport_x, state.canvas.viewport_y), (-20.0, -40.0));
    }

    #[test]
    fn delete_selection_removes_node_and_edges() {
        let mut state = state_with(&["a", "b"]);
        run(&mut state, Message::Connect(Connection { source: "a".into(), target: "b".into() }));
        run(&mut state, Message::NodesChanged(vec![NodeChange::Select { id: "a".into(), selected: true }]));
        run(&mut state, Message::DeleteSelection);
        assert_eq!(state.canvas.nodes.len(), 1);
        assert!(state.canvas.edges.is_empty());
    }

    #[test]
    fn canvas_edits_never_touch_the_agent() {
        let mut state = state_with(&["a", "b"]);
        let cmds = state.dispatch(Message::EdgesChanged(vec![EdgeChange::Remove { id: "edge-a-b".into() }]));
        assert!(cmds.iter().all(|c| matches!(c, Command::UpdateUI(_))));
        assert!(state.agent.is_none());
    }
}
