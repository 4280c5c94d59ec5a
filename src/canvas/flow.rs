//! Transient canvas state: node positions, edges, selection and viewport.
//!
//! The canvas owns its layout. Change events mutate it locally and are never
//! sent to the backend; only node creation is persisted.

use crate::constants::{GRAPH_NODE_HEIGHT, GRAPH_NODE_WIDTH, MAX_ZOOM, MIN_ZOOM};
use crate::graph::{edge_id, GraphEdge, GraphNode, Position};

#[derive(Debug, Clone, PartialEq)]
pub enum NodeChange {
    Position {
        id: String,
        position: Position,
        dragging: bool,
    },
    Select {
        id: String,
        selected: bool,
    },
    Remove {
        id: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum EdgeChange {
    Select { id: String, selected: bool },
    Remove { id: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    pub node_id: String,
    /// Pointer offset from the node's top-left corner, in world units.
    pub offset_x: f64,
    pub offset_y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CanvasState {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub viewport_x: f64,
    pub viewport_y: f64,
    pub zoom_level: f64,
    pub dragging: Option<DragState>,
    /// Source node while the user draws a new connection.
    pub connecting_from: Option<String>,
    /// Last screen point while panning the background.
    pub panning_from: Option<(f64, f64)>,
    /// Pointer in world space, used to draw the pending connection.
    pub pointer: (f64, f64),
    pub width: f64,
    pub height: f64,
    pub dirty: bool,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            viewport_x: 0.0,
            viewport_y: 0.0,
            zoom_level: 1.0,
            dragging: None,
            connecting_from: None,
            panning_from: None,
            pointer: (0.0, 0.0),
            width: 800.0,
            height: 600.0,
            dirty: true,
        }
    }
}

impl CanvasState {
    /// Replace the node list with a freshly built one, keeping where the user
    /// already moved nodes and what they selected. Edges are left as the user
    /// edited them, minus those whose endpoints vanished.
    pub fn sync_with(&mut self, built: Vec<GraphNode>) {
        let previous = std::mem::take(&mut self.nodes);
        self.nodes = built
            .into_iter()
            .map(|mut node| {
                if let Some(old) = previous.iter().find(|o| o.id == node.id) {
                    node.position = old.position;
                    node.selected = old.selected;
                }
                node
            })
            .collect();
        self.drop_orphan_edges();
        self.dirty = true;
    }

    /// Add the connections stored on the server. Only called when an agent
    /// is loaded, so edges removed on the canvas stay removed afterwards.
    pub fn seed_edges(&mut self, server_edges: Vec<GraphEdge>) {
        for edge in server_edges {
            if !self.edges.iter().any(|e| e.id == edge.id) {
                self.edges.push(edge);
            }
        }
        self.drop_orphan_edges();
        self.dirty = true;
    }

    fn drop_orphan_edges(&mut self) {
        let nodes = &self.nodes;
        self.edges
            .retain(|e| nodes.iter().any(|n| n.id == e.source) && nodes.iter().any(|n| n.id == e.target));
    }

    pub fn clear(&mut self) {
        *self = Self {
            width: self.width,
            height: self.height,
            ..Self::default()
        };
    }

    pub fn apply_node_changes(&mut self, changes: &[NodeChange]) {
        for change in changes {
            match change {
                NodeChange::Position { id, position, .. } => {
                    if let Some(node) = self.nodes.iter_mut().find(|n| &n.id == id) {
                        node.position = *position;
                    }
                }
                NodeChange::Select { id, selected } => {
                    if let Some(node) = self.nodes.iter_mut().find(|n| &n.id == id) {
                        node.selected = *selected;
                    }
                }
                NodeChange::Remove { id } => {
                    self.nodes.retain(|n| &n.id != id);
                    self.edges.retain(|e| &e.source != id && &e.target != id);
                    if self.dragging.as_ref().is_some_and(|d| &d.node_id == id) {
                        self.dragging = None;
                    }
                }
            }
        }
        self.dirty = true;
    }

    pub fn apply_edge_changes(&mut self, changes: &[EdgeChange]) {
        for change in changes {
            match change {
                EdgeChange::Select { id, selected } => {
                    if let Some(edge) = self.edges.iter_mut().find(|e| &e.id == id) {
                        edge.selected = *selected;
                    }
                }
                EdgeChange::Remove { id } => self.edges.retain(|e| &e.id != id),
            }
        }
        self.dirty = true;
    }

    /// Add an edge for `connection`. Returns false when it was rejected
    /// (unknown endpoint, self-loop, or duplicate).
    pub fn connect(&mut self, connection: &Connection) -> bool {
        let Connection { source, target } = connection;
        if source == target || !self.has_node(source) || !self.has_node(target) {
            return false;
        }
        let id = edge_id(source, target);
        if self.edges.iter().any(|e| e.id == id) {
            return false;
        }
        self.edges.push(GraphEdge::between(source, target));
        self.dirty = true;
        true
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Changes that deselect everything except `keep`.
    pub fn selection_changes(&self, keep: Option<&str>) -> (Vec<NodeChange>, Vec<EdgeChange>) {
        let nodes = self
            .nodes
            .iter()
            .filter(|n| n.selected != (Some(n.id.as_str()) == keep))
            .map(|n| NodeChange::Select {
                id: n.id.clone(),
                selected: Some(n.id.as_str()) == keep,
            })
            .collect();
        let edges = self
            .edges
            .iter()
            .filter(|e| e.selected != (Some(e.id.as_str()) == keep))
            .map(|e| EdgeChange::Select {
                id: e.id.clone(),
                selected: Some(e.id.as_str()) == keep,
            })
            .collect();
        (nodes, edges)
    }

    /// Changes removing whatever is selected.
    pub fn removal_changes(&self) -> (Vec<NodeChange>, Vec<EdgeChange>) {
        let nodes = self
            .nodes
            .iter()
            .filter(|n| n.selected)
            .map(|n| NodeChange::Remove { id: n.id.clone() })
            .collect();
        let edges = self
            .edges
            .iter()
            .filter(|e| e.selected)
            .map(|e| EdgeChange::Remove { id: e.id.clone() })
            .collect();
        (nodes, edges)
    }

    // -----------------------------------------------------------------
    // Viewport
    // -----------------------------------------------------------------

    pub fn to_world(&self, screen_x: f64, screen_y: f64) -> (f64, f64) {
        (
            screen_x / self.zoom_level + self.viewport_x,
            screen_y / self.zoom_level + self.viewport_y,
        )
    }

    pub fn to_screen(&self, world_x: f64, world_y: f64) -> (f64, f64) {
        (
            (world_x - self.viewport_x) * self.zoom_level,
            (world_y - self.viewport_y) * self.zoom_level,
        )
    }

    /// Zoom by `factor` keeping the world point under the cursor fixed.
    pub fn zoom_at(&mut self, factor: f64, screen_x: f64, screen_y: f64) {
        let (world_x, world_y) = self.to_world(screen_x, screen_y);
        self.zoom_level = (self.zoom_level * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        self.viewport_x = world_x - screen_x / self.zoom_level;
        self.viewport_y = world_y - screen_y / self.zoom_level;
        self.dirty = true;
    }

    pub fn pan_by(&mut self, screen_dx: f64, screen_dy: f64) {
        self.viewport_x -= screen_dx / self.zoom_level;
        self.viewport_y -= screen_dy / self.zoom_level;
        self.dirty = true;
    }

    /// Topmost node under a world-space point, with the point's offset from
    /// the node's corner.
    pub fn node_at(&self, world_x: f64, world_y: f64) -> Option<(&GraphNode, f64, f64)> {
        self.nodes.iter().rev().find_map(|node| {
            let dx = world_x - node.position.x;
            let dy = world_y - node.position.y;
            if (0.0..=GRAPH_NODE_WIDTH).contains(&dx) && (0.0..=GRAPH_NODE_HEIGHT).contains(&dy) {
                Some((node, dx, dy))
            } else {
                None
            }
        })
    }

    /// Edge whose straight segment passes within `tolerance` world units.
    pub fn edge_at(&self, world_x: f64, world_y: f64, tolerance: f64) -> Option<&GraphEdge> {
        self.edges.iter().find(|edge| {
            let (Some(from), Some(to)) = (self.node(&edge.source), self.node(&edge.target)) else {
                return false;
            };
            let (ax, ay) = output_anchor(from);
            let (bx, by) = input_anchor(to);
            distance_to_segment(world_x, world_y, ax, ay, bx, by) <= tolerance
        })
    }
}

/// Bottom-centre of a node, where outgoing edges start.
pub fn output_anchor(node: &GraphNode) -> (f64, f64) {
    (node.position.x + GRAPH_NODE_WIDTH / 2.0, node.position.y + GRAPH_NODE_HEIGHT)
}

/// Top-centre of a node, where incoming edges end.
pub fn input_anchor(node: &GraphNode) -> (f64, f64) {
    (node.position.x + GRAPH_NODE_WIDTH / 2.0, node.position.y)
}

fn distance_to_segment(px: f64, py: f64, ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    let (dx, dy) = (bx - ax, by - ay);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((px - ax) * dx + (py - ay) * dy) / len_sq).clamp(0.0, 1.0)
    };
    let (cx, cy) = (ax + t * dx, ay + t * dy);
    ((px - cx).powi(2) + (py - cy).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gnode(id: &str, x: f64, y: f64) -> GraphNode {
        GraphNode {
            id: id.to_string(),
            position: Position::new(x, y),
            label: id.to_uppercase(),
            node_type: "input".into(),
            selected: false,
        }
    }

    fn canvas_with(ids: &[&str]) -> CanvasState {
        let mut canvas = CanvasState::default();
        for (i, id) in ids.iter().enumerate() {
            canvas.nodes.push(gnode(id, 200.0, 100.0 * (i as f64 + 1.0)));
        }
        canvas
    }

    #[test]
    fn connecting_same_pair_twice_keeps_one_edge() {
        let mut canvas = canvas_with(&["a", "b"]);
        let conn = Connection { source: "a".into(), target: "b".into() };
        assert!(canvas.connect(&conn));
        assert!(!canvas.connect(&conn));
        assert_eq!(canvas.edges.len(), 1);
    }

    #[test]
    fn self_loops_and_unknown_endpoints_are_rejected() {
        let mut canvas = canvas_with(&["a"]);
        assert!(!canvas.connect(&Connection { source: "a".into(), target: "a".into() }));
        assert!(!canvas.connect(&Connection { source: "a".into(), target: "zz".into() }));
        assert!(canvas.edges.is_empty());
    }

    #[test]
    fn removing_node_drops_incident_edges() {
        let mut canvas = canvas_with(&["a", "b", "c"]);
        canvas.connect(&Connection { source: "a".into(), target: "b".into() });
        canvas.connect(&Connection { source: "b".into(), target: "c".into() });
        canvas.connect(&Connection { source: "a".into(), target: "c".into() });
        canvas.apply_node_changes(&[NodeChange::Remove { id: "b".into() }]);
        assert_eq!(canvas.nodes.len(), 2);
        assert_eq!(canvas.edges, vec![GraphEdge::between("a", "c")]);
    }

    #[test]
    fn position_and_select_changes_apply() {
        let mut canvas = canvas_with(&["a"]);
        canvas.apply_node_changes(&[
            NodeChange::Position { id: "a".into(), position: Position::new(5.0, 6.0), dragging: true },
            NodeChange::Select { id: "a".into(), selected: true },
        ]);
        assert_eq!(canvas.nodes[0].position, Position::new(5.0, 6.0));
        assert!(canvas.nodes[0].selected);
    }

    #[test]
    fn sync_keeps_moved_positions_and_drops_orphan_edges() {
        let mut canvas = canvas_with(&["a", "b"]);
        canvas.nodes[0].position = Position::new(10.0, 10.0);
        canvas.connect(&Connection { source: "a".into(), target: "b".into() });

        canvas.sync_with(vec![gnode("a", 200.0, 100.0), gnode("c", 200.0, 200.0)]);

        assert_eq!(canvas.node("a").unwrap().position, Position::new(10.0, 10.0));
        assert!(canvas.node("c").is_some());
        assert!(canvas.edges.is_empty());
    }

    #[test]
    fn removed_edge_is_not_revived_by_a_later_sync() {
        let mut canvas = CanvasState::default();
        canvas.sync_with(vec![gnode("n1", 200.0, 100.0), gnode("n2", 200.0, 200.0)]);
        canvas.seed_edges(vec![GraphEdge::between("n1", "n2")]);
        canvas.apply_edge_changes(&[EdgeChange::Remove { id: edge_id("n1", "n2") }]);

        canvas.sync_with(vec![
            gnode("n1", 200.0, 100.0),
            gnode("n2", 200.0, 200.0),
            gnode("n3", 200.0, 300.0),
        ]);

        assert!(canvas.edges.is_empty());
        assert_eq!(canvas.nodes.len(), 3);
    }

    #[test]
    fn hit_testing_uses_world_coordinates() {
        let mut canvas = canvas_with(&["a"]);
        canvas.zoom_level = 2.0;
        canvas.viewport_x = 100.0;
        let (wx, wy) = canvas.to_world(220.0, 210.0);
        let (node, dx, dy) = canvas.node_at(wx, wy).unwrap();
        assert_eq!(node.id, "a");
        assert_eq!((dx, dy), (10.0, 5.0));
        assert!(canvas.node_at(0.0, 0.0).is_none());
    }

    #[test]
    fn zoom_is_clamped_and_keeps_cursor_anchor() {
        let mut canvas = CanvasState::default();
        let before = canvas.to_world(300.0, 200.0);
        canvas.zoom_at(100.0, 300.0, 200.0);
        assert_eq!(canvas.zoom_level, MAX_ZOOM);
        let (sx, sy) = canvas.to_screen(before.0, before.1);
        assert!((sx - 300.0).abs() < 1e-9 && (sy - 200.0).abs() < 1e-9);
    }

    #[test]
    fn edge_hit_and_removal_of_selection() {
        let mut canvas = canvas_with(&["a", "b"]);
        canvas.connect(&Connection { source: "a".into(), target: "b".into() });
        // Segment runs from (280, 140) to (280, 200).
        let edge_id = canvas.edge_at(281.0, 170.0, 4.0).map(|e| e.id.clone()).unwrap();
        let (node_sel, edge_sel) = canvas.selection_changes(Some(&edge_id));
        assert!(node_sel.is_empty());
        canvas.apply_edge_changes(&edge_sel);
        let (node_rm, edge_rm) = canvas.removal_changes();
        assert!(node_rm.is_empty());
        canvas.apply_edge_changes(&edge_rm);
        assert!(canvas.edges.is_empty());
    }
}
