//! Backend agent payloads through the graph builder and canvas sync.
//!
//! Run with: cargo test --test graph_builder

use agent_builder_frontend::canvas::flow::{CanvasState, NodeChange};
use agent_builder_frontend::graph::{build_edges, build_nodes, Position};
use agent_builder_frontend::models::{Agent, NodeKind};
use serde_json::json;

fn backend_agent() -> Agent {
    let payload = json!({
        "id": "a1",
        "name": "Morning digest",
        "project_id": 7,
        "nodes": [
            { "id": "n1", "agent_id": "a1", "type": "timer", "data": { "time": "30" } },
            { "id": "n2", "agent_id": "a1", "type": "input", "name": "Sensor1", "target_id": "n3",
              "data": { "value": "", "output": { "name": "reading", "type": "str" } } },
            { "id": "n3", "agent_id": "a1", "type": "llm", "name": "Summarise",
              "data": { "model": { "provider": "openai", "name": "gpt-4o" } } },
            { "id": "n4", "agent_id": "a1", "type": "webhook", "name": "Notify", "data": null }
        ]
    });
    serde_json::from_value(payload).expect("agent payload decodes")
}

#[test]
fn backend_agent_builds_one_graph_node_per_node() {
    let agent = backend_agent();
    assert_eq!(agent.project_id, "7");

    let built = build_nodes(Some(&agent.nodes));
    let labels: Vec<&str> = built.iter().map(|n| n.label.as_str()).collect();
    assert_eq!(labels, ["Timer 30s", "Input Sensor1", "LLM Summarise", "Webhook Notify"]);
    assert_eq!(built[0].position, Position::new(200.0, 100.0));
    assert_eq!(built[3].position, Position::new(200.0, 400.0));
    assert!(matches!(agent.nodes[3].kind, NodeKind::Unknown { .. }));
}

#[test]
fn stored_targets_become_edges() {
    let agent = backend_agent();
    let edges = build_edges(&agent.nodes);
    assert_eq!(edges.len(), 1);
    assert_eq!((edges[0].source.as_str(), edges[0].target.as_str()), ("n2", "n3"));
}

#[test]
fn unknown_type_survives_a_round_trip_to_the_wire() {
    let agent = backend_agent();
    let wire = serde_json::to_value(&agent.nodes[3]).unwrap();
    assert_eq!(wire["type"], "webhook");
    assert_eq!(wire["name"], "Notify");
}

#[test]
fn resync_keeps_dragged_positions() {
    let mut agent = backend_agent();
    let mut canvas = CanvasState::default();
    canvas.sync_with(build_nodes(Some(&agent.nodes)));
    canvas.seed_edges(build_edges(&agent.nodes));
    assert_eq!(canvas.edges.len(), 1);
    canvas.apply_node_changes(&[NodeChange::Position {
        id: "n1".into(),
        position: Position::new(640.0, 80.0),
        dragging: false,
    }]);

    agent.nodes.truncate(2);
    canvas.sync_with(build_nodes(Some(&agent.nodes)));

    assert_eq!(canvas.nodes.len(), 2);
    assert_eq!(canvas.nodes[0].position, Position::new(640.0, 80.0));
    assert!(canvas.edges.is_empty());
}
