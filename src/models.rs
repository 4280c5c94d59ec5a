//! Wire and domain types shared by the store, the graph builder and the
//! REST client.
//!
//! The backend serialises ids as strings (Mongo object ids) but older
//! payloads used numbers, so every id field goes through [`RawId`].

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Serde helpers
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

fn opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawId>::deserialize(deserializer)?.map(String::from))
}

fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawId>::deserialize(deserializer)?
        .map(String::from)
        .unwrap_or_default())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSeconds {
    Whole(u64),
    Fractional(f64),
    Text(String),
}

/// Timer durations arrive either as numbers or as the raw string value of
/// an `<input type="number">`.
fn seconds<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<RawSeconds>::deserialize(deserializer)? {
        None => Ok(0),
        Some(RawSeconds::Whole(n)) => u32::try_from(n).map_err(D::Error::custom),
        Some(RawSeconds::Fractional(f)) => round_seconds(f).map_err(D::Error::custom),
        Some(RawSeconds::Text(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(0);
            }
            if let Ok(n) = trimmed.parse::<u32>() {
                return Ok(n);
            }
            let f = trimmed.parse::<f64>().map_err(D::Error::custom)?;
            round_seconds(f).map_err(D::Error::custom)
        }
    }
}

fn round_seconds(f: f64) -> Result<u32, String> {
    if f.is_finite() && f >= 0.0 && f <= u32::MAX as f64 {
        Ok(f.round() as u32)
    } else {
        Err(format!("invalid duration {}", f))
    }
}

// ---------------------------------------------------------------------------
// Project
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default, deserialize_with = "opt_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub agents: Vec<AgentRef>,
}

/// A project's agent entry: the server sends bare ids, embedded payloads
/// carry at least an id and a name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AgentRef {
    Id(String),
    Summary(AgentSummary),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSummary {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl AgentRef {
    pub fn id(&self) -> &str {
        match self {
            AgentRef::Id(id) => id,
            AgentRef::Summary(summary) => &summary.id,
        }
    }

    /// Name to show in lists, falling back to the id.
    pub fn display_name(&self) -> &str {
        match self {
            AgentRef::Id(id) => id,
            AgentRef::Summary(AgentSummary { name: Some(name), .. }) if !name.is_empty() => name,
            AgentRef::Summary(summary) => &summary.id,
        }
    }
}

// ---------------------------------------------------------------------------
// Agent
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    #[serde(default, deserialize_with = "opt_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "id_string")]
    pub project_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nodes: Vec<Node>,
}

impl Agent {
    /// Payload for `POST /agent`: no id, no nodes yet.
    pub fn new_for_project(name: String, description: Option<String>, project_id: String) -> Self {
        Self {
            id: None,
            name,
            description,
            project_id,
            nodes: Vec::new(),
        }
    }

    pub fn find_node(&self, node_id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id.as_deref() == Some(node_id))
    }
}

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputType {
    Str,
    Int,
    Float,
    Json,
}

impl OutputType {
    pub const ALL: [OutputType; 4] = [OutputType::Str, OutputType::Int, OutputType::Float, OutputType::Json];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputType::Str => "str",
            OutputType::Int => "int",
            OutputType::Float => "float",
            OutputType::Json => "json",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }
}

/// Named value a node writes into the agent's run state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Output {
    pub name: String,
    #[serde(rename = "type")]
    pub output_type: OutputType,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimerData {
    #[serde(default, deserialize_with = "seconds")]
    pub time: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmModelSettings {
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
}

fn default_temperature() -> f64 {
    crate::constants::DEFAULT_TEMPERATURE
}

impl Default for LlmModelSettings {
    fn default() -> Self {
        Self {
            provider: String::new(),
            name: String::new(),
            temperature: default_temperature(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LlmData {
    #[serde(default)]
    pub model: LlmModelSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Output>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputData {
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Output>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PromptData {
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub version: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub inputs: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Output>,
}

/// Type-specific payload of a node, keyed by the wire `type` field.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Timer(TimerData),
    Llm(LlmData),
    Input(InputData),
    Prompt(PromptData),
    /// A type this client does not know yet. Kept verbatim.
    Unknown { type_name: String, data: Value },
}

impl NodeKind {
    pub fn type_name(&self) -> &str {
        match self {
            NodeKind::Timer(_) => "timer",
            NodeKind::Llm(_) => "llm",
            NodeKind::Input(_) => "input",
            NodeKind::Prompt(_) => "prompt",
            NodeKind::Unknown { type_name, .. } => type_name,
        }
    }

    /// Whether other nodes can be wired into this one.
    pub fn accepts_input(&self) -> bool {
        matches!(self, NodeKind::Llm(_) | NodeKind::Prompt(_))
    }

    fn from_wire(type_name: String, data: Value) -> Self {
        let data = if data.is_null() { Value::Object(Default::default()) } else { data };
        let parsed = match type_name.as_str() {
            "timer" => serde_json::from_value(data.clone()).map(NodeKind::Timer),
            "llm" => serde_json::from_value(data.clone()).map(NodeKind::Llm),
            "input" => serde_json::from_value(data.clone()).map(NodeKind::Input),
            "prompt" => serde_json::from_value(data.clone()).map(NodeKind::Prompt),
            _ => return NodeKind::Unknown { type_name, data },
        };
        match parsed {
            Ok(kind) => kind,
            Err(e) => {
                crate::debug_log!("Keeping malformed {} node payload as-is: {}", type_name, e);
                NodeKind::Unknown { type_name, data }
            }
        }
    }

    fn to_wire(&self) -> (String, Value) {
        let data = match self {
            NodeKind::Timer(d) => serde_json::to_value(d),
            NodeKind::Llm(d) => serde_json::to_value(d),
            NodeKind::Input(d) => serde_json::to_value(d),
            NodeKind::Prompt(d) => serde_json::to_value(d),
            NodeKind::Unknown { data, .. } => Ok(data.clone()),
        };
        (self.type_name().to_string(), data.unwrap_or_default())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct NodeRecord {
    #[serde(default, deserialize_with = "opt_id")]
    id: Option<String>,
    #[serde(default, deserialize_with = "id_string")]
    agent_id: String,
    #[serde(rename = "type", default)]
    node_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, deserialize_with = "opt_id", skip_serializing_if = "Option::is_none")]
    target_id: Option<String>,
    #[serde(default)]
    data: Value,
}

/// A typed unit of work inside an agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "NodeRecord", into = "NodeRecord")]
pub struct Node {
    pub id: Option<String>,
    pub agent_id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    /// Downstream node this one feeds, the only connection the backend stores.
    pub target_id: Option<String>,
    pub kind: NodeKind,
}

impl Node {
    /// Payload for `POST /node`.
    pub fn new_for_agent(agent_id: String, name: Option<String>, kind: NodeKind) -> Self {
        Self {
            id: None,
            agent_id,
            name,
            description: None,
            target_id: None,
            kind,
        }
    }
}

impl From<NodeRecord> for Node {
    fn from(record: NodeRecord) -> Self {
        Self {
            id: record.id,
            agent_id: record.agent_id,
            name: record.name,
            description: record.description,
            target_id: record.target_id,
            kind: NodeKind::from_wire(record.node_type, record.data),
        }
    }
}

impl From<Node> for NodeRecord {
    fn from(node: Node) -> Self {
        let (node_type, data) = node.kind.to_wire();
        Self {
            id: node.id,
            agent_id: node.agent_id,
            node_type,
            name: node.name,
            description: node.description,
            target_id: node.target_id,
            data,
        }
    }
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub name: String,
    pub password: String,
}

/// Login response; the backend answers with the project the session opens.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Session {
    #[serde(alias = "project_id", deserialize_with = "id_string")]
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn timer_accepts_string_duration() {
        let node: Node = serde_json::from_value(json!({
            "id": "n1",
            "agent_id": "a1",
            "type": "timer",
            "data": { "time": "30" }
        }))
        .unwrap();
        assert_eq!(node.kind, NodeKind::Timer(TimerData { time: 30 }));
    }

    #[test]
    fn fractional_string_duration_is_rounded() {
        let node: Node = serde_json::from_value(json!({
            "id": "n1",
            "agent_id": "a1",
            "type": "timer",
            "data": { "time": "1.5" }
        }))
        .unwrap();
        assert_eq!(node.kind, NodeKind::Timer(TimerData { time: 2 }));
        assert_eq!(crate::graph::label_for(&node), "Timer 2s");
    }

    #[test]
    fn unknown_type_is_preserved() {
        let node: Node = serde_json::from_value(json!({
            "id": "n2",
            "agent_id": "a1",
            "type": "conditional",
            "data": { "input": "x" }
        }))
        .unwrap();
        assert_eq!(node.kind.type_name(), "conditional");

        let back = serde_json::to_value(&node).unwrap();
        assert_eq!(back["type"], "conditional");
        assert_eq!(back["data"]["input"], "x");
    }

    #[test]
    fn agent_with_null_nodes_has_empty_list() {
        let agent: Agent = serde_json::from_value(json!({
            "id": "a1",
            "name": "Watcher",
            "project_id": "p1",
            "nodes": null
        }))
        .unwrap();
        assert!(agent.nodes.is_empty());
    }

    #[test]
    fn project_agents_accept_ids_and_summaries() {
        let project: Project = serde_json::from_value(json!({
            "id": "p1",
            "name": "Demo",
            "agents": ["a1", { "id": "a2", "name": "Second" }]
        }))
        .unwrap();
        assert_eq!(project.agents[0].id(), "a1");
        assert_eq!(project.agents[1].display_name(), "Second");
    }

    #[test]
    fn new_node_serializes_null_id_and_nested_data() {
        let node = Node::new_for_agent(
            "a1".into(),
            Some("Sensor1".into()),
            NodeKind::Input(InputData {
                value: "42".into(),
                output: Some(Output { name: "reading".into(), output_type: OutputType::Int }),
            }),
        );
        let wire = serde_json::to_value(&node).unwrap();
        assert!(wire["id"].is_null());
        assert_eq!(wire["type"], "input");
        assert_eq!(wire["data"]["output"]["type"], "int");
    }
}
