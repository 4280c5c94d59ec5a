//! Graph builder: turns an agent's node list into what the canvas draws.
//!
//! Everything here is pure so it can run on every store change without
//! touching the DOM.

use unicode_segmentation::UnicodeSegmentation;

use crate::constants::{GRAPH_NODE_X, GRAPH_NODE_Y_STEP, MAX_LABEL_GRAPHEMES, UNNAMED_NODE};
use crate::models::{Agent, Node, NodeKind};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    pub id: String,
    pub position: Position,
    pub label: String,
    /// Wire type name, used for colouring.
    pub node_type: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub selected: bool,
}

impl GraphEdge {
    pub fn between(source: &str, target: &str) -> Self {
        Self {
            id: edge_id(source, target),
            source: source.to_string(),
            target: target.to_string(),
            selected: false,
        }
    }
}

pub fn edge_id(source: &str, target: &str) -> String {
    format!("edge-{}-{}", source, target)
}

/// Canvas id of the node at `index`. Unsaved nodes get a positional id.
pub fn graph_id(node: &Node, index: usize) -> String {
    node.id.clone().unwrap_or_else(|| format!("local-{}", index))
}

pub fn layout_position(index: usize) -> Position {
    Position::new(GRAPH_NODE_X, GRAPH_NODE_Y_STEP * (index as f64 + 1.0))
}

/// One graph node per input node, stacked vertically in list order.
pub fn build_nodes(nodes: Option<&[Node]>) -> Vec<GraphNode> {
    let nodes = match nodes {
        Some(nodes) => nodes,
        None => return Vec::new(),
    };

    nodes
        .iter()
        .enumerate()
        .map(|(index, node)| GraphNode {
            id: graph_id(node, index),
            position: layout_position(index),
            label: label_for(node),
            node_type: node.kind.type_name().to_string(),
            selected: false,
        })
        .collect()
}

/// Edges the backend knows about: each node's `target_id`, when it names
/// another node of the same list.
pub fn build_edges(nodes: &[Node]) -> Vec<GraphEdge> {
    nodes
        .iter()
        .enumerate()
        .filter_map(|(index, node)| {
            let target = node.target_id.as_deref()?;
            let source = graph_id(node, index);
            if source == target || !nodes.iter().any(|n| n.id.as_deref() == Some(target)) {
                return None;
            }
            Some(GraphEdge::between(&source, target))
        })
        .collect()
}

pub fn label_for(node: &Node) -> String {
    let name = node
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(UNNAMED_NODE);

    let label = match &node.kind {
        NodeKind::Timer(data) => format!("Timer {}s", data.time),
        NodeKind::Llm(_) => format!("LLM {}", name),
        NodeKind::Input(_) => format!("Input {}", name),
        NodeKind::Prompt(_) => format!("Prompt {}", name),
        NodeKind::Unknown { type_name, .. } => format!("{} {}", capitalise_first(type_name), name),
    };
    truncate_graphemes(&label, MAX_LABEL_GRAPHEMES)
}

/// Nodes an input can be wired into.
pub fn available_targets(agent: &Agent) -> Vec<&Node> {
    agent
        .nodes
        .iter()
        .filter(|n| n.id.is_some() && n.kind.accepts_input())
        .collect()
}

pub fn truncate_graphemes(text: &str, max: usize) -> String {
    let graphemes: Vec<&str> = text.graphemes(true).collect();
    if graphemes.len() <= max {
        return text.to_string();
    }
    let mut out: String = graphemes[..max.saturating_sub(1)].concat();
    out.push('…');
    out
}

fn capitalise_first(s: &str) -> String {
    let mut c = s.chars();
    match c.next() {
        None => "Node".to_string(),
        Some(f) => f.to_uppercase().collect::<String>() + c.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{InputData, LlmData, TimerData};
    use proptest::prelude::*;
    use serde_json::Value;

    fn node(id: &str, name: Option<&str>, kind: NodeKind) -> Node {
        Node {
            id: Some(id.to_string()),
            agent_id: "a1".to_string(),
            name: name.map(str::to_string),
            description: None,
            target_id: None,
            kind,
        }
    }

    #[test]
    fn empty_and_absent_lists_build_nothing() {
        assert!(build_nodes(None).is_empty());
        assert!(build_nodes(Some(&[])).is_empty());
    }

    #[test]
    fn timer_label_uses_seconds() {
        let n = node("t", None, NodeKind::Timer(TimerData { time: 30 }));
        assert_eq!(label_for(&n), "Timer 30s");
    }

    #[test]
    fn input_label_uses_name() {
        let n = node("i", Some("Sensor1"), NodeKind::Input(InputData::default()));
        assert_eq!(label_for(&n), "Input Sensor1");
    }

    #[test]
    fn unknown_type_gets_fallback_label() {
        let n = node(
            "c",
            Some("Branch"),
            NodeKind::Unknown { type_name: "conditional".into(), data: Value::Null },
        );
        assert_eq!(label_for(&n), "Conditional Branch");
    }

    #[test]
    fn missing_name_is_marked_unnamed() {
        let n = node("l", None, NodeKind::Llm(LlmData::default()));
        assert_eq!(label_for(&n), "LLM unnamed");
    }

    #[test]
    fn positions_stack_from_first_row() {
        let nodes = vec![
            node("a", Some("A"), NodeKind::Input(InputData::default())),
            node("b", Some("B"), NodeKind::Llm(LlmData::default())),
        ];
        let built = build_nodes(Some(&nodes));
        assert_eq!(built[0].position, Position::new(200.0, 100.0));
        assert_eq!(built[1].position, Position::new(200.0, 200.0));
        assert_eq!(built[1].id, "b");
    }

    #[test]
    fn edges_follow_target_ids_and_skip_dangling() {
        let mut a = node("a", Some("A"), NodeKind::Input(InputData::default()));
        a.target_id = Some("b".into());
        let mut b = node("b", Some("B"), NodeKind::Llm(LlmData::default()));
        b.target_id = Some("gone".into());
        let edges = build_edges(&[a, b]);
        assert_eq!(edges, vec![GraphEdge::between("a", "b")]);
    }

    #[test]
    fn long_labels_are_truncated_on_grapheme_boundaries() {
        let name = "é".repeat(60);
        let n = node("i", Some(&name), NodeKind::Input(InputData::default()));
        let label = label_for(&n);
        assert_eq!(label.graphemes(true).count(), MAX_LABEL_GRAPHEMES);
        assert!(label.ends_with('…'));
    }

    #[test]
    fn only_llm_and_prompt_nodes_are_targets() {
        let agent = Agent {
            id: Some("a1".into()),
            nodes: vec![
                node("i", Some("In"), NodeKind::Input(InputData::default())),
                node("l", Some("Model"), NodeKind::Llm(LlmData::default())),
            ],
            ..Agent::default()
        };
        let targets = available_targets(&agent);
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].id.as_deref(), Some("l"));
    }

    fn arb_kind() -> impl Strategy<Value = NodeKind> {
        prop_oneof![
            (0u32..3600).prop_map(|time| NodeKind::Timer(TimerData { time })),
            Just(NodeKind::Llm(LlmData::default())),
            Just(NodeKind::Input(InputData::default())),
            "[a-z]{1,12}".prop_map(|t| NodeKind::Unknown { type_name: t, data: Value::Null }),
        ]
    }

    proptest! {
        #[test]
        fn output_length_matches_input(
            specs in proptest::collection::vec((proptest::option::of("[a-z0-9]{1,8}"), arb_kind()), 0..32)
        ) {
            let nodes: Vec<Node> = specs
                .into_iter()
                .map(|(id, kind)| Node {
                    id,
                    agent_id: "a1".into(),
                    name: Some("n".into()),
                    description: None,
                    target_id: None,
                    kind,
                })
                .collect();
            let built = build_nodes(Some(&nodes));
            prop_assert_eq!(built.len(), nodes.len());
        }
    }
}
